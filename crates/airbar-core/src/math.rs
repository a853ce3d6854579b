//! Rounding and the coordinate ⇄ value transforms.
//!
//! Every number that leaves this module is rounded to two decimal places, so
//! readings compare equal across both widget flavors.

use crate::{Orientation, ValueRange};

/// Rounds `x` to two decimal places, half away from zero.
///
/// Rounding is done on the shortest decimal form of `x` (what `{}` prints),
/// not on its binary value: `1.005` rounds to `1.01` even though the nearest
/// `f64` is `1.00499999999999989…`.
pub fn round2(x: f64) -> f64 {
    round_places(x, 2)
}

pub fn round_places(x: f64, places: u32) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    let sci = format!("{:e}", x.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return x;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return x;
    };
    let digits: Vec<u64> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| u64::from(b - b'0'))
        .collect();

    // digits[i] has weight 10^(exp - i); keep everything down to 10^-places.
    let keep = exp + places as i32 + 1;
    if keep < 0 {
        return 0.0;
    }
    let keep = keep as usize;
    if keep >= digits.len() {
        return x;
    }

    let mut scaled = digits[..keep].iter().fold(0u64, |acc, d| acc * 10 + d);
    if digits[keep] >= 5 {
        scaled += 1;
    }
    let magnitude = scaled as f64 / 10f64.powi(places as i32);
    if magnitude == 0.0 {
        0.0
    } else {
        magnitude.copysign(x)
    }
}

/// Forward transform: fill coordinate → percentage in `[0, 100]`.
///
/// A non-positive extent yields `0` instead of dividing by zero.
pub fn forward_percentage(fill: f64, extent: f64, orientation: Orientation) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    let ratio = fill / extent * 100.0;
    let raw = match orientation {
        Orientation::Vertical => 100.0 - ratio,
        Orientation::Horizontal => ratio,
    };
    round2(raw).clamp(0.0, 100.0)
}

pub fn percentage_to_value(percentage: f64, range: &ValueRange) -> f64 {
    round2(percentage.clamp(0.0, 100.0) / 100.0 * range.span() + range.min())
}

pub fn value_to_percentage(value: f64, range: &ValueRange) -> f64 {
    (value - range.min()) / range.span() * 100.0
}

/// Inverse transform: percentage → fill coordinate along an axis of `extent`.
pub fn inverse_coordinate(percentage: f64, extent: f64, orientation: Orientation) -> f64 {
    let along = percentage * extent / 100.0;
    round2(match orientation {
        Orientation::Vertical => extent - along,
        Orientation::Horizontal => along,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_is_half_away_from_zero_on_decimal_form() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(-1.005), -1.01);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(0.0004), 0.0);
        assert_eq!(round2(99.995), 100.0);
        assert_eq!(round2(33.333333333333336), 33.33);
        assert_eq!(round2(66.66666666666667), 66.67);
    }

    #[test]
    fn round2_keeps_short_values_untouched() {
        assert_eq!(round2(75.0), 75.0);
        assert_eq!(round2(12.5), 12.5);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(1234.56), 1234.56);
    }

    #[test]
    fn round2_never_returns_negative_zero() {
        let r = round2(-0.001);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn forward_handles_zero_extent() {
        assert_eq!(forward_percentage(10.0, 0.0, Orientation::Vertical), 0.0);
        assert_eq!(forward_percentage(10.0, 0.0, Orientation::Horizontal), 0.0);
    }

    #[test]
    fn forward_matches_both_orientations() {
        assert_eq!(forward_percentage(50.0, 200.0, Orientation::Vertical), 75.0);
        assert_eq!(forward_percentage(90.0, 300.0, Orientation::Horizontal), 30.0);
        assert_eq!(forward_percentage(0.0, 200.0, Orientation::Vertical), 100.0);
        assert_eq!(forward_percentage(200.0, 200.0, Orientation::Vertical), 0.0);
    }

    #[test]
    fn forward_clamps_outside_the_surface() {
        assert_eq!(forward_percentage(-20.0, 200.0, Orientation::Vertical), 100.0);
        assert_eq!(forward_percentage(400.0, 200.0, Orientation::Horizontal), 100.0);
        assert_eq!(forward_percentage(-5.0, 200.0, Orientation::Horizontal), 0.0);
    }

    #[test]
    fn value_scaling_uses_range() {
        let range = ValueRange::new(-50.0, 50.0).unwrap();
        assert_eq!(percentage_to_value(25.0, &range), -25.0);
        assert_eq!(value_to_percentage(-25.0, &range), 25.0);

        let range = ValueRange::new(0.0, 200.0).unwrap();
        let p = value_to_percentage(60.0, &range);
        assert_eq!(inverse_coordinate(p, 100.0, Orientation::Vertical), 70.0);
    }
}
