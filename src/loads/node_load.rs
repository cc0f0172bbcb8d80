//! Nodal actions - forces and moment applied directly to a node

use serde::{Deserialize, Serialize};

/// Actions applied to a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Actions {
    /// Force in X direction
    pub fx: f64,
    /// Force in Y direction
    pub fy: f64,
    /// Moment about Z axis
    pub mz: f64,
}

impl Actions {
    /// Create actions with all components
    pub fn new(fx: f64, fy: f64, mz: f64) -> Self {
        Self { fx, fy, mz }
    }

    /// Create a force-only action
    pub fn force(fx: f64, fy: f64) -> Self {
        Self::new(fx, fy, 0.0)
    }

    /// Create a moment-only action
    pub fn moment(mz: f64) -> Self {
        Self::new(0.0, 0.0, mz)
    }

    /// Create a load in X direction
    pub fn fx(value: f64) -> Self {
        Self::force(value, 0.0)
    }

    /// Create a load in Y direction
    pub fn fy(value: f64) -> Self {
        Self::force(0.0, value)
    }

    /// Get the actions as an array [FX, FY, MZ]
    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.mz]
    }

    /// Scale the actions by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.fx * factor, self.fy * factor, self.mz * factor)
    }

    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_defaults_to_zero() {
        assert_eq!(Actions::default().as_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_scaled() {
        let a = Actions::new(1.0, -2.0, 3.0).scaled(-2.0);
        assert_eq!(a.as_array(), [-2.0, 4.0, -6.0]);
        assert!(!Actions::fy(f64::NAN).is_finite());
    }
}
