//! Displacement constraints at a node

use serde::{Deserialize, Serialize};

/// State of a single displacement component
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Constraint {
    /// Unknown, solved for
    #[default]
    Free,
    /// Known displacement (zero for a support, non-zero for a settlement)
    Prescribed(f64),
}

impl Constraint {
    /// A restrained component with zero displacement
    pub fn fixed() -> Self {
        Constraint::Prescribed(0.0)
    }

    /// The prescribed value, or `None` when free
    pub fn value(&self) -> Option<f64> {
        match *self {
            Constraint::Free => None,
            Constraint::Prescribed(v) => Some(v),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Constraint::Free)
    }
}

/// Constraints on the three DOFs of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// Translation in X
    pub ux: Constraint,
    /// Translation in Y
    pub uy: Constraint,
    /// Rotation about Z
    pub rz: Constraint,
}

impl Constraints {
    /// Create constraints from the three components
    pub fn new(ux: Constraint, uy: Constraint, rz: Constraint) -> Self {
        Self { ux, uy, rz }
    }

    /// No restraints
    pub fn free() -> Self {
        Self::default()
    }

    /// Fully fixed (all DOFs restrained)
    pub fn fixed() -> Self {
        Self::new(Constraint::fixed(), Constraint::fixed(), Constraint::fixed())
    }

    /// Pinned (translations restrained, rotation free)
    pub fn pinned() -> Self {
        Self::new(Constraint::fixed(), Constraint::fixed(), Constraint::Free)
    }

    /// Roller restraining X translation only
    pub fn roller_x() -> Self {
        Self::new(Constraint::fixed(), Constraint::Free, Constraint::Free)
    }

    /// Roller restraining Y translation only
    pub fn roller_y() -> Self {
        Self::new(Constraint::Free, Constraint::fixed(), Constraint::Free)
    }

    /// Enforce a displacement in X
    pub fn with_settlement_ux(mut self, value: f64) -> Self {
        self.ux = Constraint::Prescribed(value);
        self
    }

    /// Enforce a displacement in Y
    pub fn with_settlement_uy(mut self, value: f64) -> Self {
        self.uy = Constraint::Prescribed(value);
        self
    }

    /// Enforce a rotation about Z
    pub fn with_settlement_rz(mut self, value: f64) -> Self {
        self.rz = Constraint::Prescribed(value);
        self
    }

    /// Components in DOF order [UX, UY, RZ]
    pub fn as_array(&self) -> [Constraint; 3] {
        [self.ux, self.uy, self.rz]
    }

    /// Local indices (0-2) and values of the prescribed components
    pub fn prescribed_dofs(&self) -> Vec<(usize, f64)> {
        self.as_array()
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.value().map(|v| (i, v)))
            .collect()
    }

    /// Local indices (0-2) of the free components
    pub fn free_dofs(&self) -> Vec<usize> {
        self.as_array()
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.is_free().then_some(i))
            .collect()
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.as_array().iter().any(|c| !c.is_free())
    }

    pub fn num_prescribed(&self) -> usize {
        self.prescribed_dofs().len()
    }
}
