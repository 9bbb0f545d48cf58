//! Signal-detection-theory statistics.
//!
//! Pure functions over a [`ConfusionMatrix`]:
//!
//! - [`dprime`]: sensitivity index `d' = probit(hit rate) - probit(FA rate)`
//! - [`bias`]: response-bias index beta
//! - [`accuracy`], [`accuracy_interval`]: fraction correct with a
//!   Beta-distribution confidence interval
//! - [`mcc`]: Matthews correlation coefficient
//!
//! d-prime, bias, and MCC are defined only for the binary 2x2 form and return
//! `None` for anything larger. Rates of exactly 0 or 1 are nudged into the
//! open interval (Macmillan & Kaplan 1985) so the probit transform stays
//! finite; no `inf` or `NaN` ever escapes these functions.

mod matrix;

pub use matrix::ConfusionMatrix;

use statrs::distribution::{Beta, ContinuousCDF, Normal};

/// Standard-normal inverse CDF (probit).
fn probit(p: f64) -> f64 {
    // Constant parameters, construction cannot fail.
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.inverse_cdf(p)
}

/// Hit and false-alarm rates with edge correction applied.
///
/// A rate of exactly 0 or 1 is nudged by `1/(2N)` for that row's total `N`;
/// an empty row uses rate 0 with a `1e-10` nudge.
fn corrected_rates(m: &ConfusionMatrix) -> (f64, f64) {
    let rate_for = |row: usize| {
        let n = m.row_sum(row);
        let (mut rate, nudge) = if n == 0.0 {
            (0.0, 1e-10)
        } else {
            (m.get(row, 0) / n, 1.0 / (2.0 * n))
        };
        if rate >= 1.0 {
            rate = 1.0 - nudge;
        }
        if rate <= 0.0 {
            rate = nudge;
        }
        rate
    };
    (rate_for(0), rate_for(1))
}

/// Sensitivity index d-prime.
///
/// Returns `None` for matrices larger than 2x2; always finite for binary
/// input thanks to the edge correction.
///
/// # Example
///
/// ```
/// use operant_eval::stats::{dprime, ConfusionMatrix};
///
/// let m = ConfusionMatrix::from_binary([[8.0, 2.0], [1.0, 9.0]]);
/// let dp = dprime(&m).unwrap();
/// assert!((dp - 2.123).abs() < 0.001);
/// ```
#[must_use]
pub fn dprime(m: &ConfusionMatrix) -> Option<f64> {
    if !m.is_binary() {
        return None;
    }
    let (hit_rate, fa_rate) = corrected_rates(m);
    Some(probit(hit_rate) - probit(fa_rate))
}

/// Response-bias index beta.
///
/// `beta = exp(d' * c)` with `c = -0.5 * (probit(hit) + probit(fa))`, using
/// the same edge correction as [`dprime`]. `None` above 2x2.
#[must_use]
pub fn bias(m: &ConfusionMatrix) -> Option<f64> {
    if !m.is_binary() {
        return None;
    }
    let (hit_rate, fa_rate) = corrected_rates(m);
    let c = -0.5 * (probit(hit_rate) + probit(fa_rate));
    let dp = probit(hit_rate) - probit(fa_rate);
    Some((dp * c).exp())
}

/// Fraction of correct predictions (trace over total).
///
/// `None` for an empty matrix.
#[must_use]
pub fn accuracy(m: &ConfusionMatrix) -> Option<f64> {
    let total = m.total();
    if total == 0.0 {
        return None;
    }
    Some(m.trace() / total)
}

/// Beta-distribution confidence interval for the accuracy.
///
/// Interval covering `1 - alpha` of a `Beta(correct, incorrect)` posterior.
/// `None` when either shape parameter is zero (interval undefined).
#[must_use]
pub fn accuracy_interval(m: &ConfusionMatrix, alpha: f64) -> Option<(f64, f64)> {
    let correct = m.trace();
    let incorrect = m.total() - correct;
    let dist = Beta::new(correct, incorrect).ok()?;
    Some((
        dist.inverse_cdf(alpha / 2.0),
        dist.inverse_cdf(1.0 - alpha / 2.0),
    ))
}

/// Matthews correlation coefficient for a binary matrix.
///
/// `None` above 2x2 or when the denominator is zero.
#[must_use]
pub fn mcc(m: &ConfusionMatrix) -> Option<f64> {
    if !m.is_binary() {
        return None;
    }
    let tp = m.get(0, 0);
    let fn_ = m.get(0, 1);
    let fp = m.get(1, 0);
    let tn = m.get(1, 1);
    let denom = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some((tp * tn - fp * fn_) / denom)
}

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Performance metrics over one confusion matrix.
///
/// Thin wrapper bundling the free functions for callers that hold a matrix.
#[derive(Debug, Clone)]
pub struct Analysis {
    matrix: ConfusionMatrix,
}

impl Analysis {
    /// Wrap a confusion matrix.
    #[must_use]
    pub fn new(matrix: ConfusionMatrix) -> Self {
        Self { matrix }
    }

    /// Matrix dimension.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.matrix.n_classes()
    }

    /// See [`dprime`].
    #[must_use]
    pub fn dprime(&self) -> Option<f64> {
        dprime(&self.matrix)
    }

    /// See [`bias`].
    #[must_use]
    pub fn bias(&self) -> Option<f64> {
        bias(&self.matrix)
    }

    /// See [`accuracy`].
    #[must_use]
    pub fn acc(&self) -> Option<f64> {
        accuracy(&self.matrix)
    }

    /// Accuracy confidence interval at the default alpha of 0.05.
    #[must_use]
    pub fn acc_ci(&self) -> Option<(f64, f64)> {
        accuracy_interval(&self.matrix, 0.05)
    }

    /// See [`mcc`].
    #[must_use]
    pub fn mcc(&self) -> Option<f64> {
        mcc(&self.matrix)
    }
}
