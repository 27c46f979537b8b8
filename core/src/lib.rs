//! Sweep clock and target fade core for the Rust PPI sweep simulator.
//!
//! A rotating beam reveals point targets as it passes their bearing; targets
//! then fade out and, once fully invisible, are moved before the next pass.
//! Hosts drive everything through [`SweepSession::tick`] and render the
//! returned [`RenderSnapshot`].

pub mod math;
pub mod ppi_interface;
pub mod prelude;
pub mod session;
pub mod sweep;
pub mod targets;
pub mod telemetry;

pub use ppi_interface::{DisplayParameters, RenderSnapshot, TargetSnapshot};
pub use prelude::{RandomSource, SweepError, SweepResult, SweepSettings};
pub use session::SweepSession;
