//! Binary logistic regression.
//!
//! Objective (intercept not penalized):
//!
//! ```text
//! minimize ½‖w‖² + C · Σ_i [ softplus(z_i) - y_i z_i ],   z_i = x_i·w + b
//! ```
//!
//! Solved with damped Newton steps on `θ = [w, b]`:
//! - gradient `g = C Zᵀ(p - y) + Rθ`
//! - Hessian  `H = C Zᵀ diag(p(1-p)) Z + R`
//!
//! where `Z = [X | 1]` and `R = diag(1, …, 1, 0)`. The problem is strictly
//! convex, so the optimum is unique and the iteration is fully deterministic.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::math::{log_loss, sigmoid, solve_spd};

/// Armijo sufficient-decrease constant for the line search.
const ARMIJO: f64 = 1e-4;
const MAX_HALVINGS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticOptions {
    /// Inverse regularization strength.
    pub c: f64,
    pub max_iter: usize,
    /// Convergence threshold on the gradient max-norm.
    pub tol: f64,
}

impl Default for LogisticOptions {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 100,
            tol: 1e-8,
        }
    }
}

/// Fitted classifier over scaled features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub bias: f64,
    pub c: f64,
    pub n_iter: usize,
    pub converged: bool,
}

impl LogisticRegression {
    pub fn decision_function(&self, row: &[f64]) -> f64 {
        self.bias + row.iter().zip(&self.weights).map(|(x, w)| x * w).sum::<f64>()
    }

    /// Probability of the positive (bad / high-risk) class.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        sigmoid(self.decision_function(row))
    }

    pub fn predict(&self, row: &[f64]) -> u8 {
        u8::from(self.predict_proba(row) >= 0.5)
    }

    /// Fraction of rows of `x` whose prediction matches `y`.
    pub fn accuracy(&self, x: &DMatrix<f64>, y: &[u8]) -> f64 {
        if y.is_empty() {
            return 0.0;
        }
        let hits = (0..x.nrows())
            .filter(|&i| {
                let row: Vec<f64> = x.row(i).iter().copied().collect();
                self.predict(&row) == y[i]
            })
            .count();
        hits as f64 / y.len() as f64
    }
}

/// Fit a logistic regression on `x` (already scaled) and labels `y ∈ {0, 1}`.
pub fn fit_logistic(
    x: &DMatrix<f64>,
    y: &[u8],
    feature_names: &[String],
    opts: &LogisticOptions,
) -> Result<LogisticRegression, AppError> {
    let n = x.nrows();
    let p = x.ncols();
    if n == 0 || n != y.len() {
        return Err(AppError::numeric(format!(
            "Design matrix has {n} rows but {} labels were given.",
            y.len()
        )));
    }
    if feature_names.len() != p {
        return Err(AppError::usage(format!(
            "Classifier got {} feature names for {p} columns.",
            feature_names.len()
        )));
    }
    if !(opts.c.is_finite() && opts.c > 0.0) {
        return Err(AppError::usage(format!("Regularization C must be > 0, got {}.", opts.c)));
    }
    if y.iter().all(|&v| v == y[0]) {
        return Err(AppError::numeric(
            "Training split contains a single class; logistic regression needs both labels.",
        ));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(AppError::numeric("Non-finite value in training features."));
    }

    let z = x.clone().insert_column(p, 1.0);
    let yv = DVector::from_iterator(n, y.iter().map(|&v| f64::from(v)));
    let mut reg = DVector::<f64>::from_element(p + 1, 1.0);
    reg[p] = 0.0;

    let mut theta = DVector::<f64>::zeros(p + 1);
    let mut f = objective(&z, &yv, &theta, &reg, opts.c);
    let mut converged = false;
    let mut n_iter = 0;

    while n_iter < opts.max_iter {
        let logits = &z * &theta;
        let probs = logits.map(sigmoid);
        let grad = z.tr_mul(&(&probs - &yv)) * opts.c + reg.component_mul(&theta);
        if grad.amax() < opts.tol {
            converged = true;
            break;
        }

        let curvature = probs.map(|q| q * (1.0 - q) * opts.c);
        let mut hess = z.tr_mul(&DMatrix::from_fn(n, p + 1, |i, j| z[(i, j)] * curvature[i]));
        for j in 0..=p {
            hess[(j, j)] += reg[j];
        }

        let step = solve_spd(&hess, &grad)
            .ok_or_else(|| AppError::numeric("Newton system could not be solved."))?;

        // Backtrack until the objective decreases enough.
        let slope = grad.dot(&step);
        let mut t = 1.0;
        let mut accepted = false;
        for _ in 0..MAX_HALVINGS {
            let candidate = &theta - &step * t;
            let f_new = objective(&z, &yv, &candidate, &reg, opts.c);
            // Rounding slack lets the final, sub-ulp Newton steps through.
            let slack = 4.0 * f64::EPSILON * f.abs().max(1.0);
            if f_new <= f - ARMIJO * t * slope + slack {
                theta = candidate;
                f = f_new;
                accepted = true;
                break;
            }
            t *= 0.5;
        }
        n_iter += 1;

        if !accepted {
            // No further progress is representable at this precision.
            tracing::debug!(iter = n_iter, "line search stalled; stopping");
            break;
        }
    }

    if !converged {
        tracing::warn!(max_iter = opts.max_iter, iterations = n_iter, "logistic regression did not converge");
    }
    if theta.iter().any(|v| !v.is_finite()) {
        return Err(AppError::numeric("Logistic regression produced non-finite coefficients."));
    }

    Ok(LogisticRegression {
        feature_names: feature_names.to_vec(),
        weights: theta.rows(0, p).iter().copied().collect(),
        bias: theta[p],
        c: opts.c,
        n_iter,
        converged,
    })
}

fn objective(z: &DMatrix<f64>, y: &DVector<f64>, theta: &DVector<f64>, reg: &DVector<f64>, c: f64) -> f64 {
    let logits = z * theta;
    let loss: f64 = logits.iter().zip(y.iter()).map(|(&l, &t)| log_loss(l, t)).sum();
    0.5 * theta.component_mul(reg).dot(theta) + c * loss
}
