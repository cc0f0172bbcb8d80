//! Frame2D Solver - linear static analysis of plane frames
//!
//! Nodes carry three DOFs (UX, UY, RZ) drawn from an explicit [`DofAllocator`],
//! elements are Euler-Bernoulli beams with axial stiffness, and a [`System`]
//! assembles them and solves the partitioned equations for displacements and
//! support reactions.
//!
//! ## Example
//! ```rust
//! use frame2d_solver::prelude::*;
//!
//! let mut dofs = DofAllocator::new();
//!
//! // 10 m cantilever fixed at N1, 10 kN down at the tip (kN, cm)
//! let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::fixed());
//! let n2 = Node::new(&mut dofs, "N2", 1000.0, 0.0).with_actions(Actions::fy(-10.0));
//!
//! let beam = Element::new(&n1, &n2, 21000.0, 100.0, 8000.0).unwrap();
//! let system = System::new(vec![beam]).unwrap();
//! let solution = system.solve().unwrap();
//!
//! let tip = system.node_displacement(&n2, &solution).unwrap();
//! let expected = -10.0 * 1000.0_f64.powi(3) / (3.0 * 21000.0 * 8000.0);
//! assert!((tip.uy - expected).abs() < 1e-9 * expected.abs());
//! ```
//!
//! [`DofAllocator`]: elements::DofAllocator
//! [`System`]: system::System

pub mod analysis;
pub mod assembly;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod results;
pub mod solver;
pub mod system;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{SolveMethod, SolverOptions};
    pub use crate::elements::{Constraint, Constraints, DofAllocator, Element, Node, Section};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::Actions;
    pub use crate::results::{
        AnalysisSummary, ElementForces, EndForces, NodeDisplacement, Reactions, Solution,
    };
    pub use crate::system::System;
}
