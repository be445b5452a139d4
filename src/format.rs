//! Fixed-point label formatting for conversion percentages.
//!
//! Labels must read the same as those a JavaScript chart front-end renders with
//! `Number.prototype.toFixed(1)`, so the rules here follow that routine exactly:
//! exact halves round away from zero, negative zero prints as `0.0`, non-finite
//! values print as `NaN`, `Infinity` or `-Infinity`, and magnitudes of 1e21 or
//! more fall back to exponent notation.

/// Formats `x` with exactly one fractional digit.
pub fn format_fixed1(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        let rendered = if x > 0.0 { "Infinity" } else { "-Infinity" };
        return rendered.to_string();
    }
    if x == 0.0 {
        return "0.0".to_string();
    }

    let magnitude = x.abs();
    if magnitude >= 1e21 {
        return exponent_notation(x);
    }

    let sign = if x < 0.0 { "-" } else { "" };
    if is_exact_half_tie(magnitude) {
        // `{:.2}` is exact for `k.25` and `k.75`; bump the tenths digit by hand
        // since `{:.1}` breaks exact ties toward even.
        let hundredths = format!("{:.2}", magnitude);
        let (head, tail) = hundredths.split_at(hundredths.len() - 2);
        let tenths = if tail == "25" { '3' } else { '8' };
        return format!("{}{}{}", sign, head, tenths);
    }
    format!("{}{:.1}", sign, magnitude)
}

/// Formats a ratio already scaled to percent, e.g. `66.666` -> `"66.7%"`.
pub fn format_percentage(percent: f64) -> String {
    format!("{}%", format_fixed1(percent))
}

/// Computes `100 * next / current` and formats it. Division by zero is not
/// guarded: it yields `Infinity%`, `-Infinity%` or `NaN%`.
pub fn conversion_label(current: f64, next: f64) -> String {
    format_percentage(next / current * 100.0)
}

/// A value sits exactly halfway between two one-decimal neighbours only when
/// it is `k + 0.25` or `k + 0.75`, i.e. when `4x` is an odd integer.
fn is_exact_half_tie(magnitude: f64) -> bool {
    let quadrupled = magnitude * 4.0;
    quadrupled.fract() == 0.0 && quadrupled % 2.0 == 1.0
}

fn exponent_notation(x: f64) -> String {
    let rendered = format!("{:e}", x);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(format_fixed1(80.0), "80.0");
        assert_eq!(format_fixed1(200.0 / 3.0), "66.7");
        assert_eq!(format_fixed1(100.0 / 3.0), "33.3");
        assert_eq!(format_fixed1(5.0), "5.0");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_fixed1(0.25), "0.3");
        assert_eq!(format_fixed1(12.75), "12.8");
        assert_eq!(format_fixed1(-0.25), "-0.3");
        assert_eq!(format_fixed1(99.75), "99.8");
    }

    #[test]
    fn exact_ties_round_up_at_large_magnitudes() {
        assert_eq!(format_fixed1(1e15 + 0.25), "1000000000000000.3");
        assert_eq!(format_fixed1(1e15 + 0.75), "1000000000000000.8");
        assert_eq!(format_fixed1(-(1e15 + 0.25)), "-1000000000000000.3");
    }

    #[test]
    fn inexact_near_ties_use_the_stored_value() {
        // 0.35 is stored slightly below 0.35.
        assert_eq!(format_fixed1(0.35), "0.3");
    }

    #[test]
    fn zero_and_negative_zero() {
        assert_eq!(format_fixed1(0.0), "0.0");
        assert_eq!(format_fixed1(-0.0), "0.0");
        assert_eq!(format_fixed1(-0.04), "-0.0");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_fixed1(f64::NAN), "NaN");
        assert_eq!(format_fixed1(f64::INFINITY), "Infinity");
        assert_eq!(format_fixed1(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn huge_values_use_exponent_notation() {
        assert_eq!(format_fixed1(1e21), "1e+21");
        assert_eq!(format_fixed1(-2.5e22), "-2.5e+22");
    }

    #[test]
    fn conversion_label_divides_by_the_upstream_value() {
        assert_eq!(conversion_label(100.0, 80.0), "80.0%");
        assert_eq!(conversion_label(80.0, 60.0), "75.0%");
        assert_eq!(conversion_label(60.0, 40.0), "66.7%");
        assert_eq!(conversion_label(0.0, 5.0), "Infinity%");
        assert_eq!(conversion_label(0.0, -5.0), "-Infinity%");
        assert_eq!(conversion_label(0.0, 0.0), "NaN%");
    }
}
