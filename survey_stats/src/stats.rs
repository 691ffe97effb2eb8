use crate::config::*;

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N), 0 for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Pearson correlation of the paired values.
///
/// Only the first `min(x.len(), y.len())` pairs are used. Returns 0 when there
/// is no pair or when one of the series is constant.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let nf = n as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = nf * sum_xy - sum_x * sum_y;
    let denominator = ((nf * sum_x2 - sum_x * sum_x) * (nf * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator == 0.0 || denominator.is_nan() {
        0.0
    } else {
        numerator / denominator
    }
}

/// Least squares fit of y against x.
///
/// Returns `None` when there is no pair or all the x values are equal: the
/// slope is not defined in that case.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<Regression> {
    let n = x.len().min(y.len());
    if n == 0 {
        return None;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let x_mean = mean(x);
    let y_mean = mean(y);
    let sxx: f64 = x.iter().map(|a| (a - x_mean).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - x_mean) * (b - y_mean))
        .sum();
    let slope = sxy / sxx;
    Some(Regression {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

/// Midpoint of a GPA bracket, 0 if the bracket is not recognised.
pub fn gpa_to_numeric(gpa: &str) -> f64 {
    match gpa {
        "4.01 or above" => 4.2,
        "3.51-4.0" => 3.75,
        "3.01-3.5" => 3.25,
        "3.0 or below" => 2.75,
        _ => 0.0,
    }
}

/// Leading integer of a grade level ("12", " 9th"), 0 if there is none.
pub fn grade_level_to_numeric(grade: &str) -> i64 {
    let s = grade.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

/// Rounds for display, e.g. `round_to(58.695, 1) == 58.7`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(correlation(&[], &[]), 0.0);
        assert_eq!(linear_regression(&[], &[]), None);
    }

    #[test]
    fn mean_and_std_dev() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v) - 5.0).abs() < EPS);
        // Population formula: divides by 8, not 7.
        assert!((std_dev(&v) - 2.0).abs() < EPS);
        assert_eq!(std_dev(&[3.0, 3.0, 3.0]), 0.0);
        for vals in [vec![1.0], vec![-4.0, 10.0, 0.5], vec![1e6, -1e6]] {
            assert!(std_dev(&vals) >= 0.0);
        }
    }

    #[test]
    fn correlation_properties() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 7.0];
        assert!((correlation(&x, &y) - correlation(&y, &x)).abs() < EPS);
        assert!((correlation(&x, &x) - 1.0).abs() < EPS);
        let neg: Vec<f64> = x.iter().map(|v| -2.0 * v + 1.0).collect();
        assert!((correlation(&x, &neg) + 1.0).abs() < EPS);
    }

    #[test]
    fn correlation_of_constant_series_is_zero() {
        assert_eq!(correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(correlation(&[5.0], &[2.0]), 0.0);
    }

    #[test]
    fn correlation_uses_shortest_series() {
        let r = correlation(&[1.0, 2.0, 3.0, 100.0], &[2.0, 4.0, 6.0]);
        assert!((r - 1.0).abs() < EPS);
    }

    #[test]
    fn regression_fits_a_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [3.0, 5.0, 7.0, 9.0];
        let reg = linear_regression(&x, &y).unwrap();
        assert!((reg.slope - 2.0).abs() < EPS);
        assert!((reg.intercept - 1.0).abs() < EPS);
        assert!((reg.predict(10.0) - 21.0).abs() < EPS);
    }

    #[test]
    fn regression_needs_x_variance() {
        assert_eq!(linear_regression(&[2.0, 2.0, 2.0], &[1.0, 5.0, 9.0]), None);
    }

    #[test]
    fn gpa_brackets() {
        assert_eq!(gpa_to_numeric("3.51-4.0"), 3.75);
        assert_eq!(gpa_to_numeric("4.01 or above"), 4.2);
        assert_eq!(gpa_to_numeric("3.01-3.5"), 3.25);
        assert_eq!(gpa_to_numeric("3.0 or below"), 2.75);
        assert_eq!(gpa_to_numeric(""), 0.0);
        assert_eq!(gpa_to_numeric("A+"), 0.0);
    }

    #[test]
    fn grade_levels() {
        assert_eq!(grade_level_to_numeric("12"), 12);
        assert_eq!(grade_level_to_numeric(" 9th"), 9);
        assert_eq!(grade_level_to_numeric("-3"), -3);
        assert_eq!(grade_level_to_numeric("senior"), 0);
        assert_eq!(grade_level_to_numeric(""), 0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(58.695652, 1), 58.7);
        assert_eq!(round_to(0.0240005, 3), 0.024);
    }
}
