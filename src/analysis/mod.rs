//! Solver options

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Linear solver used for the reduced system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolveMethod {
    /// Dense full-pivot LU on the diagonally scaled free-DOF block
    #[default]
    Dense,
    /// Sparse assembly of the free-DOF block and skyline Cholesky
    Skyline,
}

/// Options for the partitioned solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Linear solver
    pub method: SolveMethod,
    /// Relative pivot below which the free-DOF block is declared singular
    pub pivot_tolerance: f64,
    /// Verify global equilibrium after solving
    pub check_statics: bool,
    /// Relative tolerance for the equilibrium check
    pub statics_tolerance: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            method: SolveMethod::Dense,
            pivot_tolerance: 1e-10,
            check_statics: false,
            statics_tolerance: 1e-6,
        }
    }
}

impl SolverOptions {
    /// Dense LU solve
    pub fn dense() -> Self {
        Self::default()
    }

    /// Skyline Cholesky solve
    pub fn skyline() -> Self {
        Self {
            method: SolveMethod::Skyline,
            ..Self::default()
        }
    }

    /// Set the singularity threshold
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Enable the equilibrium check with the given relative tolerance
    pub fn with_statics_check(mut self, tol: f64) -> Self {
        self.check_statics = true;
        self.statics_tolerance = tol;
        self
    }

    /// Reject tolerances that are negative, non-finite or >= 1
    pub fn validate(&self) -> FrameResult<()> {
        for (name, tol) in [
            ("pivot_tolerance", self.pivot_tolerance),
            ("statics_tolerance", self.statics_tolerance),
        ] {
            if !(tol.is_finite() && (0.0..1.0).contains(&tol)) {
                return Err(FrameError::InvalidInput(format!(
                    "{} must lie in [0, 1), got {}",
                    name, tol
                )));
            }
        }
        Ok(())
    }

    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> FrameResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SolverOptions::default();
        assert_eq!(options.method, SolveMethod::Dense);
        assert!(!options.check_statics);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let options = SolverOptions::from_json(r#"{ "method": "Skyline", "check_statics": true }"#).unwrap();
        assert_eq!(options.method, SolveMethod::Skyline);
        assert!(options.check_statics);
        assert_eq!(options.pivot_tolerance, 1e-10);
    }

    #[test]
    fn test_json_round_trip() {
        let options = SolverOptions::skyline().with_statics_check(1e-8);
        let back = SolverOptions::from_json(&options.to_json().unwrap()).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_invalid_options() {
        assert!(SolverOptions::dense().with_pivot_tolerance(-1.0).validate().is_err());
        assert!(matches!(
            SolverOptions::from_json("{ not json"),
            Err(FrameError::SerializationError(_))
        ));
    }
}
