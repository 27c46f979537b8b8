use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, text, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use ppicore::{DisplayParameters, RenderSnapshot};
use std::time::Duration;

const BRIDGE_URL: &str = "http://127.0.0.1:9000";

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Radar PPI Screen".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_millis(50)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Visualizer {
    snapshot: Option<RenderSnapshot>,
    display: DisplayParameters,
    status: String,
    in_flight: bool,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    SnapshotFetched(Result<RenderSnapshot, String>),
    ToggleRpm,
    ToggleSent(Result<(), String>),
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                snapshot: None,
                display: DisplayParameters::default(),
                status: "Waiting for sweep...".into(),
                in_flight: true,
            },
            Task::perform(fetch_snapshot(), Message::SnapshotFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick if !state.in_flight => {
                state.in_flight = true;
                Task::perform(fetch_snapshot(), Message::SnapshotFetched)
            }
            Message::Tick => Task::none(),
            Message::SnapshotFetched(Ok(snapshot)) => {
                state.in_flight = false;
                // ignore late responses that would rewind the beam
                let stale = state
                    .snapshot
                    .as_ref()
                    .is_some_and(|current| snapshot.tick < current.tick);
                if !stale {
                    state.status = format!(
                        "Tick {} | sweep {:.1}° | {} of {} targets lit",
                        snapshot.tick,
                        snapshot.sweep_angle_degrees,
                        snapshot.visible_targets().count(),
                        snapshot.targets.len()
                    );
                    state.snapshot = Some(snapshot);
                }
                Task::none()
            }
            Message::SnapshotFetched(Err(err)) => {
                state.in_flight = false;
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
            Message::ToggleRpm => Task::perform(post_toggle(), Message::ToggleSent),
            Message::ToggleSent(Ok(())) => Task::none(),
            Message::ToggleSent(Err(err)) => {
                state.status = format!("Toggle failed: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let rpm_label = state
            .snapshot
            .as_ref()
            .map(|snapshot| format!("Toggle RPM: {} RPM", snapshot.rotations_per_minute))
            .unwrap_or_else(|| "Toggle RPM".into());

        let scope = Canvas::new(Scope {
            snapshot: state.snapshot.clone(),
            display: state.display,
        })
        .width(Length::Fixed(600.0))
        .height(Length::Fixed(600.0));

        let controls = row![
            button(text(rpm_label)).on_press(Message::ToggleRpm).padding(10),
            text(&state.status).size(14),
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        let layout = column![scope, controls]
            .spacing(10)
            .padding(20)
            .align_x(Alignment::Center);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}

async fn fetch_snapshot() -> Result<RenderSnapshot, String> {
    let response = reqwest::get(format!("{BRIDGE_URL}/snapshot"))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<RenderSnapshot>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_toggle() -> Result<(), String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE_URL}/toggle-rpm"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok(())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

/// Polar scope: range rings, bearing spokes, sweep line and fading returns.
#[derive(Clone)]
struct Scope {
    snapshot: Option<RenderSnapshot>,
    display: DisplayParameters,
}

impl canvas::Program<Message> for Scope {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.02, 0.04, 0.02),
        );

        let center = (bounds.width / 2.0, bounds.height / 2.0);
        let radius = bounds.width.min(bounds.height) / 2.0 - 12.0;
        let to_point = |(x, y): (f32, f32)| Point::new(x, y);
        let grid = Stroke::default()
            .with_width(1.0)
            .with_color(Color::from_rgb(0.15, 0.35, 0.15));

        let rings = self.display.ring_count.max(1);
        for ring in 1..=rings {
            let ring_radius = radius * (ring as f32 / rings as f32);
            let ring_path =
                Path::new(|builder| builder.circle(to_point(center), ring_radius));
            frame.stroke(&ring_path, grid.clone());
        }

        for bearing in self.display.spoke_bearings() {
            let end = self
                .display
                .polar_to_screen(bearing, self.display.max_range, center, radius);
            frame.stroke(&Path::line(to_point(center), to_point(end)), grid.clone());
        }

        if let Some(snapshot) = &self.snapshot {
            for target in snapshot.visible_targets() {
                let position = self.display.polar_to_screen(
                    target.bearing_radians,
                    target.range_units,
                    center,
                    radius,
                );
                let marker = Path::new(|builder| builder.circle(to_point(position), 5.0));
                frame.fill(&marker, Color::from_rgba(0.95, 0.2, 0.15, target.opacity as f32));
            }

            let tip = self
                .display
                .sweep_endpoint(snapshot.sweep_angle_degrees, center, radius);
            frame.stroke(
                &Path::line(to_point(center), to_point(tip)),
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb(0.2, 0.9, 0.3)),
            );
        }

        vec![frame.into_geometry()]
    }
}
