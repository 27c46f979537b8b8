pub mod clock;
pub mod presets;

pub use clock::SweepClock;
pub use presets::RotationPresets;
