use thiserror::Error;

/// Reasons an inverse transform cannot produce a finite actuator position.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KinematicsError {
    #[error("target radius {radius} mm is beyond reach of {reach} mm")]
    Unreachable { radius: f64, reach: f64 },
    #[error("target radius {radius} mm is inside the center singularity")]
    Singular { radius: f64 },
    #[error("arm length {arm_length} mm is not a usable geometry")]
    InvalidGeometry { arm_length: f64 },
    #[error("target coordinate is not finite")]
    NonFiniteInput,
    #[error("reference actuator position is not finite")]
    NonFiniteReference,
}

pub type Result<T> = std::result::Result<T, KinematicsError>;
