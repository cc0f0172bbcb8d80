//! Error types for the frame solver

use thiserror::Error;

/// Main error type for frame analysis
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid section or material: {0}")]
    InvalidSection(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Singular stiffness matrix over {free_dofs} free DOFs - structure is unstable or has insufficient supports")]
    SingularMatrix { free_dofs: usize },

    #[error("DOF index {dof} is outside the system range [0, {total})")]
    DofOutOfRange { dof: usize, total: usize },

    #[error("DOF {0} is claimed by more than one node")]
    DuplicateDof(usize),

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Global equilibrium violated: residual [fx, fy, mz] = {residual:?}")]
    EquilibriumViolated { residual: [f64; 3] },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl FrameError {
    /// True for the structural-instability condition raised by the solver
    pub fn is_instability(&self) -> bool {
        matches!(self, FrameError::SingularMatrix { .. })
    }
}

/// Result type for frame operations
pub type FrameResult<T> = Result<T, FrameError>;
