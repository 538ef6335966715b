//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Guitarkit - chord reference, metronome and tuner helpers
#[derive(Parser)]
#[command(name = "guitarkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build a chord and print its symbol, scale and tones
    Chord(ChordArgs),

    /// Print the major scale of a root
    Scale {
        /// Root tone, e.g. "Eb" or "F#"
        #[arg(short, long)]
        root: String,
    },

    /// Show tempo information, optionally running the beat clock
    Tempo {
        /// Quarter notes per minute (default from config)
        #[arg(short, long)]
        bpm: Option<u32>,

        /// Note value of one beat: 2, 4, 8, 16 or 32
        #[arg(short, long)]
        fraction: Option<u32>,

        /// Beats per bar, 1 to 31
        #[arg(long)]
        beats: Option<u32>,

        /// Run the clock for this many beats
        #[arg(long)]
        run: Option<u64>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Match a measured frequency to the nearest note
    Tune {
        /// Frequency in Hz
        #[arg(long)]
        freq: f32,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Chord options. Each flag takes an option tag or "none"; flags are applied
/// in category order, then every `--change` in the order given.
#[derive(Args)]
pub(crate) struct ChordArgs {
    /// Root tone (default C, or the saved root when restoring)
    #[arg(short, long)]
    pub root: Option<String>,

    /// major | minor
    #[arg(long)]
    pub quality: Option<String>,

    /// perfect | sharp | flat
    #[arg(long)]
    pub fifth: Option<String>,

    /// aug | dim
    #[arg(long)]
    pub augdim: Option<String>,

    /// maj7 | dom7 | dim7
    #[arg(long)]
    pub seventh: Option<String>,

    /// sus2 | sus4
    #[arg(long)]
    pub sus: Option<String>,

    /// natural | flat | sharp
    #[arg(long)]
    pub ninth: Option<String>,

    /// natural | sharp
    #[arg(long)]
    pub eleventh: Option<String>,

    /// natural | flat
    #[arg(long)]
    pub thirteenth: Option<String>,

    /// add2 | add9
    #[arg(long)]
    pub add29: Option<String>,

    /// add4 | add11
    #[arg(long)]
    pub add411: Option<String>,

    /// add6 | add13
    #[arg(long)]
    pub add613: Option<String>,

    /// Extra change events as category=option, e.g. "augdim=none"
    #[arg(short, long = "change")]
    pub changes: Vec<String>,

    /// Saved state file to restore from
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Write the resulting state back to --state
    #[arg(long, requires = "state")]
    pub save: bool,

    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

impl ChordArgs {
    /// Flag values as `category=option` events, in category order.
    pub fn flag_changes(&self) -> Vec<String> {
        [
            ("quality", &self.quality),
            ("fifth", &self.fifth),
            ("augdim", &self.augdim),
            ("seventh", &self.seventh),
            ("sus", &self.sus),
            ("ninth", &self.ninth),
            ("eleventh", &self.eleventh),
            ("thirteenth", &self.thirteenth),
            ("add29", &self.add29),
            ("add411", &self.add411),
            ("add613", &self.add613),
        ]
        .into_iter()
        .filter_map(|(category, value)| value.as_ref().map(|v| format!("{category}={v}")))
        .collect()
    }
}
