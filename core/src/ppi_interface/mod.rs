pub mod display;
pub mod snapshot;

pub use display::DisplayParameters;
pub use snapshot::{RenderSnapshot, TargetSnapshot};
