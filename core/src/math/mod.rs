pub mod angles;
pub mod random;

pub use angles::{angular_distance_degrees, wrap_degrees, wrap_radians};
pub use random::{ScriptedRandom, SeededRandom};
