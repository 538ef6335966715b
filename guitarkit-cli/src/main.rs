//! # Guitarkit - Command-Line Front End
//!
//! A thin caller over `guitarkit-core`. Each subcommand builds its input,
//! runs one core operation and prints the result as text or JSON.
//!
//! ## Architecture
//! - **Main Thread**: argument parsing, engine calls and output
//! - **Clock Thread**: the metronome's beat clock, only for `tempo --run`
//! - **Communication**: a crossbeam channel carrying beats back to the main thread

mod cli_args;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli_args::{ChordArgs, Cli, Commands};
use guitarkit_core::chord::attributes::Change;
use guitarkit_core::metronome::{BeatClock, MetronomeSettings};
use guitarkit_core::persistence::SavedState;
use guitarkit_core::scale::scale_display;
use guitarkit_core::{ChordEngine, GuitarkitConfig, PitchClass};
use serde::Serialize;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log directive when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "guitarkit=info";

fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Chord(args) => run_chord(&config, &args),
        Commands::Scale { root } => {
            let root =
                PitchClass::parse(&root).with_context(|| format!("invalid root {root:?}"))?;
            println!("{}", scale_display(root));
            Ok(())
        }
        Commands::Tempo {
            bpm,
            fraction,
            beats,
            run,
            json,
        } => run_tempo(&config, bpm, fraction, beats, run, json),
        Commands::Tune { freq, json } => run_tune(&config, freq, json),
    }
}

fn load_config(path: Option<&Path>) -> Result<GuitarkitConfig> {
    match path {
        Some(path) => GuitarkitConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(GuitarkitConfig::default()),
    }
}

fn run_chord(config: &GuitarkitConfig, args: &ChordArgs) -> Result<()> {
    let resolver = config.chord.resolver();

    let mut engine = match &args.state {
        Some(path) if path.exists() => SavedState::load(path)
            .with_context(|| format!("failed to read state from {}", path.display()))?
            .restore(resolver),
        _ => ChordEngine::new(resolver),
    };

    if let Some(root) = &args.root {
        let root = PitchClass::parse(root).with_context(|| format!("invalid root {root:?}"))?;
        engine.set_root(root);
    }

    for event in args.flag_changes().iter().chain(&args.changes) {
        let change: Change = event
            .parse()
            .with_context(|| format!("invalid chord option {event:?}"))?;
        engine.change(change);
    }

    let chord = engine.chord();

    if args.save {
        if let Some(path) = &args.state {
            SavedState::from_engine(&engine)
                .save(path)
                .with_context(|| format!("failed to save state to {}", path.display()))?;
        }
    }

    let report = chord.report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.symbol);
        println!("scale:     {}", report.scale);
        println!("intervals: {}", report.intervals.join(" "));
        println!("notes:     {}", report.notes.join(" "));
    }
    Ok(())
}

#[derive(Serialize)]
struct TempoReport {
    bpm: u32,
    note_fraction: u32,
    beats_per_bar: u32,
    name: Option<&'static str>,
    beat_ms: f64,
}

fn run_tempo(
    config: &GuitarkitConfig,
    bpm: Option<u32>,
    fraction: Option<u32>,
    beats: Option<u32>,
    run: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut settings: MetronomeSettings = config.metronome;
    if let Some(bpm) = bpm {
        settings.set_bpm(bpm)?;
    }
    if let Some(fraction) = fraction {
        settings.set_note_fraction(fraction)?;
    }
    if let Some(beats) = beats {
        settings.set_beats_per_bar(beats)?;
    }

    let report = TempoReport {
        bpm: settings.bpm,
        note_fraction: settings.note_fraction,
        beats_per_bar: settings.beats_per_bar,
        name: settings.tempo_name(),
        beat_ms: settings.beat_duration()?.as_secs_f64() * 1000.0,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} bpm, 1/{} notes, {} per bar: {} ({:.1} ms per beat)",
            report.bpm,
            report.note_fraction,
            report.beats_per_bar,
            report.name.unwrap_or("-"),
            report.beat_ms
        );
    }

    let Some(count) = run else {
        return Ok(());
    };

    let (beat_tx, beat_rx) = crossbeam_channel::unbounded();
    let clock = BeatClock::start(&settings, beat_tx)?;
    for _ in 0..count {
        let beat = beat_rx.recv().context("beat clock stopped unexpectedly")?;
        if beat.accent {
            println!("TICK {}", beat.position + 1);
        } else {
            println!("tick {}", beat.position + 1);
        }
    }
    clock.stop();
    info!(beats = count, "finished metronome run");
    Ok(())
}

fn run_tune(config: &GuitarkitConfig, freq: f32, json: bool) -> Result<()> {
    let table = config.tuner.note_table();
    let Some(found) = table.nearest(freq, config.tuner.in_tune_cents) else {
        bail!("frequency must be a positive number of Hz, got {freq}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        println!(
            "{} ({:.2} Hz): {:+.1} cents, {:?}",
            found.name, found.target_frequency, found.cents, found.direction
        );
    }
    Ok(())
}
