//! # Units
//!
//! Documents are authored in CSS pixels (96 per inch). Everything that
//! reaches a surface is in PDF points (72 per inch). The conversion happens
//! exactly once per value, at the moment the value is consumed.

/// CSS pixels per inch.
pub const PX_PER_INCH: f64 = 96.0;

/// PDF points per inch.
pub const PT_PER_INCH: f64 = 72.0;

/// Convert pixels to points: `px * 3 / 4`.
pub fn to_points(px: f64) -> f64 {
    px * 3.0 / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_is_zero() {
        assert_eq!(to_points(0.0), 0.0);
    }

    #[test]
    fn one_inch_of_pixels_is_one_inch_of_points() {
        assert_eq!(to_points(PX_PER_INCH), PT_PER_INCH);
    }

    #[test]
    fn negative_shifts_convert_too() {
        assert_eq!(to_points(-8.0), -6.0);
    }

    proptest! {
        #[test]
        fn scales_by_three_quarters(px in -1.0e6f64..1.0e6) {
            prop_assert!((to_points(px) - px * 0.75).abs() <= 1e-9 * px.abs().max(1.0));
        }

        #[test]
        fn monotonic(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
            if a <= b {
                prop_assert!(to_points(a) <= to_points(b));
            } else {
                prop_assert!(to_points(a) >= to_points(b));
            }
        }
    }
}
