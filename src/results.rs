//! Result types for frame analysis

use serde::{Deserialize, Serialize};

use crate::math::{Vec as FEVec, Vec6};

/// Full displacement and reaction vectors, indexed by global DOF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Displacements [UX, UY, RZ] per node in DOF order
    pub displacements: FEVec,
    /// Reactions at prescribed DOFs, zero at free DOFs
    pub reactions: FEVec,
}

impl Solution {
    /// Number of DOFs covered by the solution
    pub fn len(&self) -> usize {
        self.displacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displacements.is_empty()
    }

    /// Displacements at a DOF triple
    pub fn displacement_at(&self, dofs: [usize; 3]) -> NodeDisplacement {
        NodeDisplacement::from_array(dofs.map(|d| self.displacements[d]))
    }

    /// Reactions at a DOF triple
    pub fn reaction_at(&self, dofs: [usize; 3]) -> Reactions {
        Reactions::from_array(dofs.map(|d| self.reactions[d]))
    }
}

/// Displacement results at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub ux: f64,
    /// Displacement in Y direction
    pub uy: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [UX, UY, RZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            ux: arr[0],
            uy: arr[1],
            rz: arr[2],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.ux.powi(2) + self.uy.powi(2)).sqrt()
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, MZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            mz: arr[2],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2)).sqrt()
    }
}

/// Internal forces at one end of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force in local y direction
    pub shear: f64,
    /// Bending moment
    pub moment: f64,
}

/// Internal forces of an element at both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementForces {
    /// Local end force vector [N_i, V_i, M_i, N_j, V_j, M_j] acting on the element
    pub local: [f64; 6],
}

impl ElementForces {
    pub fn from_local(f: &Vec6) -> Self {
        let mut local = [0.0; 6];
        local.copy_from_slice(f.as_slice());
        Self { local }
    }

    /// Internal forces at the i-node
    pub fn i_end(&self) -> EndForces {
        EndForces {
            axial: -self.local[0],
            shear: self.local[1],
            moment: self.local[2],
        }
    }

    /// Internal forces at the j-node
    pub fn j_end(&self) -> EndForces {
        EndForces {
            axial: self.local[3],
            shear: -self.local[4],
            moment: self.local[5],
        }
    }

    /// Maximum absolute end moment
    pub fn max_moment(&self) -> f64 {
        self.local[2].abs().max(self.local[5].abs())
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements
    pub num_elements: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
    /// Prescribed DOFs
    pub prescribed_dofs: usize,
    /// Maximum translation magnitude
    pub max_displacement: f64,
    /// Node with maximum translation
    pub max_disp_node: String,
    /// Maximum reaction force magnitude
    pub max_reaction: f64,
    /// Node with maximum reaction
    pub max_reaction_node: String,
    /// Maximum absolute element end moment
    pub max_moment: f64,
}
