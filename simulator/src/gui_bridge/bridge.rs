use crate::gui_bridge::model::VisualizationModel;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use tokio::sync::mpsc::UnboundedSender;
use warp::{http::StatusCode, Filter};

/// Commands a viewer can send to the tick loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepCommand {
    ToggleRotationRate,
    SetRotationRate(f64),
}

#[derive(Debug, Deserialize)]
struct RateRequest {
    rpm: f64,
}

#[derive(Debug)]
struct CommandChannelClosed;

impl warp::reject::Reject for CommandChannelClosed {}

type SharedModel = Arc<RwLock<VisualizationModel>>;

/// Loopback HTTP endpoint that serves the latest published frame and
/// forwards rate commands to the tick loop.
pub struct GuiBridge {
    state: SharedModel,
    commands: UnboundedSender<SweepCommand>,
}

impl GuiBridge {
    pub fn new(commands: UnboundedSender<SweepCommand>) -> Self {
        Self {
            state: Arc::new(RwLock::new(VisualizationModel::default())),
            commands,
        }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        let state = self.state.clone();
        let state_filter = warp::any().map(move || state.clone());
        let commands = self.commands.clone();
        let command_filter = warp::any().map(move || commands.clone());

        let snapshot_route = warp::path("snapshot")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| warp::reply::json(&read_model(&state).snapshot));

        let metrics_route = warp::path("metrics")
            .and(warp::get())
            .and(state_filter)
            .map(|state: SharedModel| warp::reply::json(&read_model(&state).metrics));

        let toggle_route = warp::path("toggle-rpm")
            .and(warp::post())
            .and(command_filter.clone())
            .and_then(|commands: UnboundedSender<SweepCommand>| async move {
                forward(&commands, SweepCommand::ToggleRotationRate)
            });

        let rate_route = warp::path("rpm")
            .and(warp::post())
            .and(warp::body::json())
            .and(command_filter)
            .and_then(
                |request: RateRequest, commands: UnboundedSender<SweepCommand>| async move {
                    forward(&commands, SweepCommand::SetRotationRate(request.rpm))
                },
            );

        snapshot_route
            .or(metrics_route)
            .or(toggle_route)
            .or(rate_route)
    }

    /// Serves the routes on a background thread with its own runtime.
    pub fn serve(&self, address: SocketAddr) {
        let routes = self.routes();
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("bridge runtime failed to start: {}", err);
                    return;
                }
            };
            info!("bridge listening on http://{}", address);
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
    }

    pub fn publish(&self, model: &VisualizationModel) {
        match self.state.write() {
            Ok(mut guard) => *guard = model.clone(),
            Err(poisoned) => *poisoned.into_inner() = model.clone(),
        }
    }

    pub fn publish_status(&self, message: &str) {
        info!("[bridge] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        read_model(&self.state)
    }
}

fn read_model(state: &SharedModel) -> VisualizationModel {
    match state.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn forward(
    commands: &UnboundedSender<SweepCommand>,
    command: SweepCommand,
) -> Result<warp::reply::WithStatus<warp::reply::Json>, warp::Rejection> {
    match commands.send(command) {
        Ok(()) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({"status": "ok"})),
            StatusCode::OK,
        )),
        Err(err) => {
            error!("command dropped: {}", err);
            Err(warp::reject::custom(CommandChannelClosed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::SessionConfig;
    use crate::workflow::runner::Runner;
    use ppicore::RenderSnapshot;
    use tokio::sync::mpsc;

    #[test]
    fn gui_bridge_updates_state() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let gui = GuiBridge::new(tx);
        let runner = Runner::new(SessionConfig::from_args(4, Some(9)));
        let mut session = runner.build_session().unwrap();
        let snapshot = session.tick(0.05);
        gui.publish(&VisualizationModel::new(snapshot.clone(), session.metrics()));
        assert_eq!(gui.snapshot().snapshot, snapshot);
        assert_eq!(gui.snapshot().metrics.ticks, 1);
    }

    #[tokio::test]
    async fn snapshot_route_returns_latest_frame() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let gui = GuiBridge::new(tx);
        let snapshot = RenderSnapshot {
            sweep_angle_degrees: 42.0,
            rotations_per_minute: 27.0,
            tick: 7,
            targets: Vec::new(),
        };
        gui.publish(&VisualizationModel::new(snapshot.clone(), Default::default()));

        let response = warp::test::request()
            .method("GET")
            .path("/snapshot")
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: RenderSnapshot = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, snapshot);
    }

    #[tokio::test]
    async fn toggle_route_forwards_command() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let gui = GuiBridge::new(tx);
        let response = warp::test::request()
            .method("POST")
            .path("/toggle-rpm")
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(rx.recv().await, Some(SweepCommand::ToggleRotationRate));
    }

    #[tokio::test]
    async fn rate_route_forwards_requested_rpm() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let gui = GuiBridge::new(tx);
        let response = warp::test::request()
            .method("POST")
            .path("/rpm")
            .json(&json!({"rpm": 27.0}))
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(rx.recv().await, Some(SweepCommand::SetRotationRate(27.0)));
    }
}
