//! Représentation virgule fixe : entiers signés à 12 bits fractionnaires.

/// Nombre de bits fractionnaires.
pub const FRAC_BITS: u32 = 12;

/// Facteur d'échelle : 1.0 réel = 4096.
pub const SCALE: i64 = 1 << FRAC_BITS;

/// Seuil d'échappement : |z|² > 4 en unités réelles.
pub const ESCAPE_THRESHOLD: i64 = 4 * SCALE;

/// Borne absolue acceptée pour une coordonnée du viewport (±4096 en réel).
///
/// Au-delà, `(16384 + |c|)²` ne tient plus confortablement dans un `i64`.
pub const COORD_LIMIT: i64 = 1 << 24;

/// Longest escape-time count whose glyph stays in printable ASCII (`'~'`).
pub const MAX_PRINTABLE_ITER: u32 = 126 - 32;

/// Convert a real value to fixed-point, rounding to nearest.
///
/// # Example
/// ```
/// use mb_core::fixed::to_fixed;
/// assert_eq!(to_fixed(1.0), 4096);
/// assert_eq!(to_fixed(-2.1), -8602);
/// ```
#[must_use]
pub fn to_fixed(value: f64) -> i64 {
    (value * SCALE as f64).round() as i64
}

/// Convert a fixed-point value back to a real.
///
/// # Example
/// ```
/// use mb_core::fixed::from_fixed;
/// assert!((from_fixed(2048) - 0.5).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn from_fixed(value: i64) -> f64 {
    value as f64 / SCALE as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_matches_radius_two() {
        assert_eq!(ESCAPE_THRESHOLD, 16384);
        assert_eq!(to_fixed(4.0), ESCAPE_THRESHOLD);
    }

    #[test]
    fn classic_bounds_are_fixed_point_reals() {
        // -2.1, 0.7, ±1.2
        assert_eq!(to_fixed(-2.1), -8602);
        assert_eq!(to_fixed(0.7), 2867);
        assert_eq!(to_fixed(1.2), 4915);
        assert!((from_fixed(-8601) + 2.1).abs() < 1e-3);
    }

    #[test]
    fn printable_range_ends_at_tilde() {
        assert_eq!(char::from(32 + MAX_PRINTABLE_ITER as u8), '~');
    }
}
