use std::f64::consts::TAU;

/// Normalizes an angle into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Normalizes an angle into `[0, 2π)`.
pub fn wrap_radians(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest arc between two bearings in degrees, always in `[0, 180]`.
pub fn angular_distance_degrees(a: f64, b: f64) -> f64 {
    let forward = wrap_degrees(a - b);
    forward.min(360.0 - forward)
}
