//! pitctl: drive a smoker's blower toward a target pit temperature
//!
//! Runs the control loop against the built-in simulator. The loop ticks at
//! the configured interval until the operator presses Enter, then parks the
//! blower and exits. Point `RUST_LOG` at `debug` to see the per-tick
//! decision trace from the control engine.

mod sim;

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pitctl_core::constants::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_PRECISION_C, DEFAULT_SAMPLE_INTERVAL_S,
};
use pitctl_core::fanout::Channel;
use pitctl_core::{ControlConfig, ControlLoop, Controller, TickStatus};

#[derive(Parser, Debug)]
#[command(name = "pitctl", version, about = "Pit temperature controller")]
struct Args {
    /// Target pit temperature in °C (prompted for if omitted)
    #[arg(long)]
    target: Option<f32>,

    /// Significant temperature difference in °C; every decision threshold
    /// derives from this
    #[arg(long, default_value_t = DEFAULT_PRECISION_C)]
    precision: f32,

    /// Seconds between samples
    #[arg(long, default_value_t = DEFAULT_SAMPLE_INTERVAL_S)]
    interval: f32,

    /// Number of samples in the trend window
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    capacity: usize,

    /// Ambient temperature the simulated pit starts at, in °C
    #[arg(long, default_value_t = 20.0)]
    ambient: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let target_c = match args.target {
        Some(target) => target,
        None => prompt_target()?,
    };

    let config = ControlConfig {
        target_c,
        precision_c: args.precision,
        sample_interval_s: args.interval,
        history_capacity: args.capacity,
    };

    let (source, fan) = sim::simulated_pit(args.ambient, args.interval);
    let mut control_loop = ControlLoop::new(
        Controller::new(config).context("rejected configuration")?,
        source,
        fan,
    );

    let mut status_channel: Channel<TickStatus> = Channel::new();
    status_channel.subscribe(|status: TickStatus| {
        tracing::info!(
            "pit {:6.1} °C  deviation {:+6.1} °C  trend {:+8.4} °C/s  fan {:?}{}",
            status.temperature_c,
            status.deviation_c,
            status.trend_c_per_s,
            status.speed,
            match status.commanded {
                Some(speed) => format!("  → {speed:?}"),
                None => String::new(),
            },
        );
    });

    let cancel = Arc::new(AtomicBool::new(false));
    spawn_enter_watcher(Arc::clone(&cancel));
    tracing::info!("holding {target_c:.1} °C, press Enter to stop");

    let outcome = control_loop.run(&cancel, |status| {
        status_channel.publish(*status);
    });

    // Whatever ended the run, never leave the blower feeding the fire.
    control_loop.park().context("failed to park the fan")?;
    outcome.context("control loop aborted")?;

    tracing::info!("fan parked, goodbye");
    Ok(())
}

/// Ask the operator for a target temperature on stdin
fn prompt_target() -> anyhow::Result<f32> {
    print!("Target pit temperature (°C): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read target temperature")?;
    line.trim()
        .parse()
        .with_context(|| format!("not a temperature: {:?}", line.trim()))
}

/// Trip `cancel` on the next Enter keypress
fn spawn_enter_watcher(cancel: Arc<AtomicBool>) {
    thread::spawn(move || {
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
        cancel.store(true, Ordering::Relaxed);
    });
}
