use serde::{Deserialize, Serialize};

/// Geometry the renderer must share with the core: radial domain `[0, max_range]`,
/// bearing zero at the top of the scope, increasing clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayParameters {
    pub max_range: f64,
    pub spoke_count: usize,
    pub ring_count: usize,
}

impl Default for DisplayParameters {
    fn default() -> Self {
        Self {
            max_range: 100.0,
            spoke_count: 8,
            ring_count: 4,
        }
    }
}

impl DisplayParameters {
    /// Maps a polar position onto screen coordinates (y grows downward).
    pub fn polar_to_screen(
        &self,
        bearing_radians: f64,
        range: f64,
        center: (f32, f32),
        radius_px: f32,
    ) -> (f32, f32) {
        let scale = (range / self.max_range).clamp(0.0, 1.0) as f32 * radius_px;
        let (sin, cos) = bearing_radians.sin_cos();
        (center.0 + scale * sin as f32, center.1 - scale * cos as f32)
    }

    /// Outer end of the sweep line for a bearing in degrees.
    pub fn sweep_endpoint(
        &self,
        sweep_angle_degrees: f64,
        center: (f32, f32),
        radius_px: f32,
    ) -> (f32, f32) {
        self.polar_to_screen(
            sweep_angle_degrees.to_radians(),
            self.max_range,
            center,
            radius_px,
        )
    }

    /// Bearings of the reference spokes, in radians.
    pub fn spoke_bearings(&self) -> Vec<f64> {
        let count = self.spoke_count.max(1);
        (0..count)
            .map(|i| i as f64 * std::f64::consts::TAU / count as f64)
            .collect()
    }
}
