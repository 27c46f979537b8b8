use crate::gui_bridge::bridge::{GuiBridge, SweepCommand};
use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::config::SessionConfig;
use anyhow::Context;
use log::{info, warn};
use ppicore::telemetry::SweepMetrics;
use ppicore::SweepSession;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, MissedTickBehavior};

pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub final_angle_degrees: f64,
    pub rotations_per_minute: f64,
    pub visible_targets: usize,
    pub metrics: SweepMetrics,
}

#[derive(Clone)]
pub struct Runner {
    config: SessionConfig,
    seed: u64,
}

impl Runner {
    pub fn new(config: SessionConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self { config, seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn build_session(&self) -> anyhow::Result<SweepSession> {
        self.config.validate().context("validating session config")?;
        let mut session = SweepSession::seeded(self.config.to_sweep_settings(), self.seed)
            .context("building sweep session")?;
        if let Some(rpm) = self.config.initial_rpm {
            if let Err(err) = session.set_rotation_rate(rpm) {
                warn!("ignoring initial rate: {}", err);
            }
        }
        info!(
            "session seed {} ({} targets, {}s ticks)",
            self.seed, self.config.target_count, self.config.tick_seconds
        );
        Ok(session)
    }

    /// Runs `ticks` fixed-length ticks back to back and summarizes the result.
    pub fn execute(&self, ticks: u64) -> anyhow::Result<RunSummary> {
        let mut session = self.build_session()?;
        for _ in 0..ticks {
            session.tick(self.config.tick_seconds);
        }

        let snapshot = session.snapshot();
        Ok(RunSummary {
            seed: self.seed,
            ticks: session.ticks(),
            final_angle_degrees: snapshot.sweep_angle_degrees,
            rotations_per_minute: snapshot.rotations_per_minute,
            visible_targets: session.field().visible_count(),
            metrics: session.metrics(),
        })
    }

    /// Ticks at the configured cadence, publishing each snapshot, until Ctrl+C.
    pub async fn run_realtime(
        &self,
        bridge: &GuiBridge,
        mut commands: UnboundedReceiver<SweepCommand>,
    ) -> anyhow::Result<()> {
        let mut session = self.build_session()?;
        bridge.publish(&VisualizationModel::new(session.snapshot(), session.metrics()));

        let mut interval = time::interval(Duration::from_secs_f64(self.config.tick_seconds));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let shutdown = signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let snapshot = session.tick(self.config.tick_seconds);
                    bridge.publish(&VisualizationModel::new(snapshot, session.metrics()));
                }
                Some(command) = commands.recv() => {
                    apply_command(&mut session, command);
                }
                result = &mut shutdown => {
                    result.context("awaiting Ctrl+C to exit")?;
                    break;
                }
            }
        }

        info!("stopped after {} ticks", session.ticks());
        Ok(())
    }
}

pub fn apply_command(session: &mut SweepSession, command: SweepCommand) {
    match command {
        SweepCommand::ToggleRotationRate => session.toggle_rotation_rate(),
        SweepCommand::SetRotationRate(rpm) => {
            if let Err(err) = session.set_rotation_rate(rpm) {
                warn!("rate command ignored: {}", err);
            }
        }
    }
}
