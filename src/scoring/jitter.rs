//! The noise term added to heuristic scores.
//!
//! Production draws uniformly from `[-25, 25]` on every call using the calling
//! thread's RNG, so concurrent requests never share generator state.

use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Half-width of the uniform jitter interval, in score points.
pub const JITTER_SPAN: f64 = 25.0;

/// Where the jitter term comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Jitter {
    /// Fresh uniform draw per call from thread-local entropy.
    #[default]
    Entropy,
    /// No jitter (equivalent to `Fixed(0.0)`).
    Disabled,
    /// Always add this many points.
    Fixed(f64),
}

impl Jitter {
    /// Produce the jitter for one scoring call.
    pub fn draw(&self) -> f64 {
        match self {
            Jitter::Entropy => sample_jitter(&mut rand::thread_rng()),
            Jitter::Disabled => 0.0,
            Jitter::Fixed(v) => *v,
        }
    }
}

/// Draw one jitter value from the supplied generator.
pub fn sample_jitter<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    Uniform::new_inclusive(-JITTER_SPAN, JITTER_SPAN).sample(rng)
}

impl FromStr for Jitter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" | "entropy" | "random" => Ok(Jitter::Entropy),
            "off" | "none" | "disabled" => Ok(Jitter::Disabled),
            other => match other.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Jitter::Fixed(v)),
                _ => Err(format!(
                    "invalid jitter '{s}': expected 'on', 'off', or a finite number"
                )),
            },
        }
    }
}
