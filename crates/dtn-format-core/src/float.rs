//! Numeric normalization shared by both codecs.
//!
//! Keyframe values go through coarse rounding (2 or 4 decimals) because the
//! consuming mod samples them at low precision anyway. Model vectors instead
//! only get their binary-float representation noise trimmed, preserving the
//! authored precision.

/// Round `v` to `digits` decimal places. Results that round to zero are
/// normalized to positive zero so `-0` never reaches the wire.
pub fn round_to(v: f32, digits: u32) -> f32 {
    let scale = 10f32.powi(digits as i32);
    let rounded = (v * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Collapse values within `f32::EPSILON` of zero to exactly zero.
pub fn sanitize_zero(v: f32) -> f32 {
    if v.abs() < f32::EPSILON {
        0.0
    } else {
        v
    }
}

/// Trim floating-point representation noise without coarse rounding: format
/// to a short fixed-decimal string, drop trailing zeros, reparse. Turns
/// `8.100000381469727` into `8.1` while leaving `0.0625` intact.
pub fn trim_float(v: f32) -> f32 {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    let parsed: f32 = s.parse().unwrap_or(v);
    if parsed == 0.0 {
        0.0
    } else {
        parsed
    }
}

/// Apply [`trim_float`] componentwise.
pub fn fvec(v: [f32; 3]) -> [f32; 3] {
    [trim_float(v[0]), trim_float(v[1]), trim_float(v[2])]
}

/// True when every component equals zero (`-0` counts as zero).
pub fn is_zero_vec3(v: [f32; 3]) -> bool {
    v.iter().all(|&c| c == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_drops_negative_zero() {
        let r = round_to(-0.001, 2);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn round_to_keeps_two_decimals() {
        assert_eq!(round_to(1.005_001, 2), 1.01);
        assert_eq!(round_to(-3.14159, 2), -3.14);
        assert_eq!(round_to(0.123_456, 4), 0.1235);
    }

    #[test]
    fn sanitize_zero_collapses_epsilon_noise() {
        assert_eq!(sanitize_zero(f32::EPSILON / 2.0), 0.0);
        assert_eq!(sanitize_zero(-f32::EPSILON / 2.0), 0.0);
        assert_eq!(sanitize_zero(0.01), 0.01);
    }

    #[test]
    fn trim_float_removes_representation_noise() {
        assert_eq!(trim_float(8.100_000_4), 8.1);
        assert_eq!(trim_float(0.0625), 0.0625);
        assert_eq!(trim_float(-12.0), -12.0);
        let t = trim_float(-0.000_01);
        assert_eq!(t, 0.0);
        assert!(t.is_sign_positive());
    }

    #[test]
    fn zero_vec_accepts_negative_zero() {
        assert!(is_zero_vec3([0.0, -0.0, 0.0]));
        assert!(!is_zero_vec3([0.0, 0.1, 0.0]));
    }
}
