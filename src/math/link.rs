//! Logistic link and loss helpers.
//!
//! Both functions branch on the sign of `z` so that `exp` is only ever called
//! on non-positive arguments.

/// `1 / (1 + e^{-z})`.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + e^{z})`.
pub fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

/// Negative log-likelihood of label `y ∈ {0, 1}` under logit `z`.
pub fn log_loss(z: f64, y: f64) -> f64 {
    softplus(z) - y * z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_symmetric_and_bounded() {
        assert_eq!(sigmoid(0.0), 0.5);
        for &z in &[0.1, 1.0, 5.0, 40.0, 800.0] {
            let p = sigmoid(z);
            let q = sigmoid(-z);
            assert!((p + q - 1.0).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn softplus_is_finite_at_extremes() {
        assert!((softplus(0.0) - std::f64::consts::LN_2).abs() < 1e-15);
        assert!((softplus(1000.0) - 1000.0).abs() < 1e-12);
        assert!(softplus(-1000.0) >= 0.0);
        assert!(log_loss(-1000.0, 0.0).is_finite());
        assert!(log_loss(1000.0, 1.0).abs() < 1e-12);
    }
}
