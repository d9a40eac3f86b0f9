//! Shared angle helpers for chart and strength calculations.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-17 + 360.0 rounds up to 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Shortest arc between two longitudes, in [0, 180].
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_360(a - b);
    if d > 180.0 { 360.0 - d } else { d }
}

/// 0-based sign index of a longitude (floor(lon / 30)), clamped to 0..=11.
pub fn sign_index(lon: f64) -> u8 {
    ((normalize_360(lon) / 30.0).floor() as u8).min(11)
}

/// Degrees elapsed inside the occupied sign, [0, 30).
pub fn degrees_in_sign(lon: f64) -> f64 {
    let lon = normalize_360(lon);
    lon - f64::from(sign_index(lon)) * 30.0
}

/// Whole-sign house (1-12) of a sign counted from the lagna sign.
pub fn whole_sign_house(lagna_sign: u8, sign: u8) -> u8 {
    ((sign % 12 + 12 - lagna_sign % 12) % 12) + 1
}
