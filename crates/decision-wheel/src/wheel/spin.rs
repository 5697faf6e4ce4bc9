use super::MIN_SPIN_MEMBERS;
use super::geometry::segment_angle;
use crate::config::SpinConfig;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

/// Outcome of one spin. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpinResult {
    pub winner_index: usize,
    pub rotations: u32,
    pub duration_ms: u64,
    /// Clockwise, whole degrees. `final_angle_deg % 360` lies inside the winning segment.
    pub final_angle_deg: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpinError {
    #[error("At least {min} options must be on the wheel to spin", min = MIN_SPIN_MEMBERS)]
    InsufficientOptions,
    #[error("The wheel is already spinning")]
    AlreadySpinning,
    #[error("No spin is in progress")]
    NotSpinning,
    #[error("Segment {0} is not the winner of the current spin")]
    NoWinner(usize),
    #[error("Cannot spin a wheel of {0} options")]
    InvalidArgument(usize),
}

/// Picks a winner uniformly and works out the rotation that lands the pointer on it.
pub fn calculate_spin<R: Rng + ?Sized>(
    config: &SpinConfig,
    num_options: usize,
    rng: &mut R,
) -> Result<SpinResult, SpinError> {
    if num_options < MIN_SPIN_MEMBERS {
        return Err(SpinError::InvalidArgument(num_options));
    }

    let duration_ms = rng.gen_range(config.duration_range());
    let rotations = rng.gen_range(config.rotation_range());
    let winner_index = rng.gen_range(0..num_options);

    let segment = segment_angle(num_options);
    let center_offset = winner_index as f64 * segment + segment / 2.0;
    let reach = segment * config.jitter();
    let jitter = rng.gen_range(-reach..=reach);

    let final_angle_deg = (f64::from(rotations) * 360.0 + center_offset + jitter).round();

    Ok(SpinResult {
        winner_index,
        rotations,
        duration_ms,
        final_angle_deg,
    })
}
