use anyhow::Context;
use clap::Parser;
use gui_bridge::bridge::GuiBridge;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::sync::mpsc;
use workflow::config::SessionConfig;
use workflow::runner::Runner;

mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Rust PPI sweep driver")]
struct Args {
    /// Run a fixed number of ticks without a timer and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a session config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Number of simulated targets (overrides the config file)
    #[arg(long)]
    targets: Option<usize>,
    /// Seed for target placement (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Initial rotation rate; must be one of the configured presets
    #[arg(long)]
    rpm: Option<f64>,
    /// Ticks to simulate in offline mode
    #[arg(long, default_value_t = 400)]
    ticks: u64,
    /// Tick in real time and serve snapshots to the visualizer
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut session_config = if let Some(path) = args.workflow {
        SessionConfig::load(path)?
    } else {
        SessionConfig::from_args(10, None)
    };
    if let Some(targets) = args.targets {
        session_config.target_count = targets;
    }
    if args.seed.is_some() {
        session_config.seed = args.seed;
    }
    if args.rpm.is_some() {
        session_config.initial_rpm = args.rpm;
    }

    let runner = Runner::new(session_config.clone());
    info!("replay this session with --seed {}", runner.seed());

    if args.offline {
        let summary = runner.execute(args.ticks)?;

        println!(
            "Offline run -> ticks {}, sweep {:.2}°, hits {}, repositions {}, visible {}",
            summary.ticks,
            summary.final_angle_degrees,
            summary.metrics.hits,
            summary.metrics.repositions,
            summary.visible_targets
        );

        let report = format!(
            "seed={} ticks={} rpm={} angle={:.3} hits={} repositions={} visible={}\n",
            summary.seed,
            summary.ticks,
            summary.rotations_per_minute,
            summary.final_angle_degrees,
            summary.metrics.hits,
            summary.metrics.repositions,
            summary.visible_targets
        );
        let report_path = PathBuf::from("tools/data/offline_sweep.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report {}", report_path.display()))?;
        file.write_all(report.as_bytes())?;
        info!("report appended to {}", report_path.display());
    }

    if args.serve {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let gui_bridge = GuiBridge::new(command_tx);
        gui_bridge.serve(session_config.bridge_address);
        gui_bridge.publish_status("Sweep running (Ctrl+C to stop)...");

        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for the tick loop")?;
        runtime.block_on(runner.run_realtime(&gui_bridge, command_rx))?;
    }

    Ok(())
}
