//! Node element - a point in the XY plane owning three global DOFs

use serde::Serialize;

use super::support::Constraints;
use crate::loads::Actions;

/// Hands out global DOF indices, three per node, in creation order
///
/// One allocator belongs to one analysis; indices are never reused.
#[derive(Debug, Clone, Default)]
pub struct DofAllocator {
    next: usize,
}

impl DofAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next [UX, UY, RZ] triple
    pub fn allocate(&mut self) -> [usize; 3] {
        let base = self.next;
        self.next += 3;
        [base, base + 1, base + 2]
    }

    /// Index the next allocated DOF will receive
    pub fn next_dof(&self) -> usize {
        self.next
    }

    /// Number of DOFs handed out so far
    pub fn allocated(&self) -> usize {
        self.next
    }
}

/// A 2D node in the frame model
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Identifier used in diagnostics
    pub label: String,
    /// Applied forces and moment
    pub actions: Actions,
    /// Displacement constraints
    pub constraints: Constraints,

    /// Global DOF indices [UX, UY, RZ]
    dofs: [usize; 3],
}

impl Node {
    /// Create a free, unloaded node, drawing its DOFs from `allocator`
    pub fn new(allocator: &mut DofAllocator, label: &str, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            label: label.to_string(),
            actions: Actions::default(),
            constraints: Constraints::default(),
            dofs: allocator.allocate(),
        }
    }

    /// Set applied actions
    pub fn with_actions(mut self, actions: Actions) -> Self {
        self.actions = actions;
        self
    }

    /// Set displacement constraints
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Global DOF indices [UX, UY, RZ]
    pub fn dofs(&self) -> [usize; 3] {
        self.dofs
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}
