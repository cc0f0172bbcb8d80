//! System - assembled frame ready to be solved

use std::collections::BTreeMap;

use log::debug;

use crate::analysis::SolverOptions;
use crate::assembly;
use crate::elements::{Element, Node};
use crate::error::{FrameError, FrameResult};
use crate::math::{Mat, Vec as FEVec};
use crate::results::{AnalysisSummary, ElementForces, NodeDisplacement, Reactions, Solution};
use crate::solver;

/// A frame built from a fixed list of elements
///
/// The global stiffness matrix, load vector and prescribed DOFs are computed
/// eagerly in [`System::new`] and are immutable afterwards, so [`System::solve`]
/// always returns the same result.
#[derive(Debug, Clone)]
pub struct System<'a> {
    elements: Vec<Element<'a>>,
    nodes: Vec<&'a Node>,
    k: Mat,
    f: FEVec,
    prescribed: BTreeMap<usize, f64>,
    options: SolverOptions,
}

impl<'a> System<'a> {
    /// Assemble a system with default solver options
    pub fn new(elements: Vec<Element<'a>>) -> FrameResult<Self> {
        Self::with_options(elements, SolverOptions::default())
    }

    /// Assemble a system with the given solver options
    pub fn with_options(elements: Vec<Element<'a>>, options: SolverOptions) -> FrameResult<Self> {
        options.validate()?;
        if elements.is_empty() {
            return Err(FrameError::InvalidInput("System has no elements".to_string()));
        }

        let nodes = assembly::collect_nodes(&elements)?;
        let total = 3 * nodes.len();

        let k = assembly::assemble_stiffness(&elements, total)?;
        let f = assembly::assemble_loads(&nodes, &elements, total)?;

        let mut prescribed = BTreeMap::new();
        for node in &nodes {
            let dofs = node.dofs();
            for (local, value) in node.constraints.prescribed_dofs() {
                prescribed.insert(dofs[local], value);
            }
        }

        debug!(
            "Assembled {} elements over {} nodes ({} DOFs, {} prescribed)",
            elements.len(),
            nodes.len(),
            total,
            prescribed.len()
        );

        Ok(Self {
            elements,
            nodes,
            k,
            f,
            prescribed,
            options,
        })
    }

    pub fn elements(&self) -> &[Element<'a>] {
        &self.elements
    }

    /// Distinct nodes in global DOF order
    pub fn nodes(&self) -> &[&'a Node] {
        &self.nodes
    }

    /// Global stiffness matrix K
    pub fn stiffness(&self) -> &Mat {
        &self.k
    }

    /// Global load vector F
    pub fn loads(&self) -> &FEVec {
        &self.f
    }

    /// Prescribed DOF -> prescribed value
    pub fn prescribed(&self) -> &BTreeMap<usize, f64> {
        &self.prescribed
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn num_dofs(&self) -> usize {
        self.f.len()
    }

    /// Solve for displacements and reactions
    pub fn solve(&self) -> FrameResult<Solution> {
        let solution = solver::solve_partitioned(&self.k, &self.f, &self.prescribed, &self.options)?;

        if self.options.check_statics {
            self.check_equilibrium(&solution)?;
        }

        Ok(solution)
    }

    fn check_solution(&self, solution: &Solution) -> FrameResult<()> {
        if solution.len() != self.num_dofs() || solution.reactions.len() != self.num_dofs() {
            return Err(FrameError::DimensionMismatch {
                expected: self.num_dofs(),
                found: solution.len(),
            });
        }
        Ok(())
    }

    fn owns(&self, node: &Node) -> FrameResult<()> {
        if self.nodes.iter().any(|n| std::ptr::eq(*n, node)) {
            Ok(())
        } else {
            Err(FrameError::InvalidInput(format!(
                "Node {} is not part of this system",
                node.label
            )))
        }
    }

    /// Global [sum FX, sum FY, sum MZ about the origin] of applied loads plus reactions
    ///
    /// Zero up to rounding for any solution produced by [`System::solve`].
    pub fn equilibrium_residual(&self, solution: &Solution) -> FrameResult<[f64; 3]> {
        self.check_solution(solution)?;

        let mut residual = [0.0; 3];
        for node in &self.nodes {
            let [dx, dy, dm] = node.dofs();
            let fx = self.f[dx] + solution.reactions[dx];
            let fy = self.f[dy] + solution.reactions[dy];
            let mz = self.f[dm] + solution.reactions[dm];

            residual[0] += fx;
            residual[1] += fy;
            residual[2] += mz + node.x * fy - node.y * fx;
        }

        Ok(residual)
    }

    fn check_equilibrium(&self, solution: &Solution) -> FrameResult<()> {
        let residual = self.equilibrium_residual(solution)?;

        let mut force_scale = 0.0;
        let mut moment_scale = 0.0;
        for node in &self.nodes {
            let [dx, dy, dm] = node.dofs();
            for v in [&self.f, &solution.reactions] {
                force_scale += v[dx].abs() + v[dy].abs();
                moment_scale += v[dm].abs() + (node.x * v[dy]).abs() + (node.y * v[dx]).abs();
            }
        }

        let tol = self.options.statics_tolerance;
        let balanced = residual[0].abs() <= tol * force_scale
            && residual[1].abs() <= tol * force_scale
            && residual[2].abs() <= tol * moment_scale;

        if balanced {
            Ok(())
        } else {
            Err(FrameError::EquilibriumViolated { residual })
        }
    }

    /// Displacements of a node of this system
    pub fn node_displacement(&self, node: &Node, solution: &Solution) -> FrameResult<NodeDisplacement> {
        self.owns(node)?;
        self.check_solution(solution)?;
        Ok(solution.displacement_at(node.dofs()))
    }

    /// Reactions at a node of this system (zero at free DOFs)
    pub fn node_reaction(&self, node: &Node, solution: &Solution) -> FrameResult<Reactions> {
        self.owns(node)?;
        self.check_solution(solution)?;
        Ok(solution.reaction_at(node.dofs()))
    }

    /// Local end forces of element `index`
    pub fn element_forces(&self, index: usize, solution: &Solution) -> FrameResult<ElementForces> {
        let element = self.elements.get(index).ok_or_else(|| {
            FrameError::InvalidInput(format!(
                "Element index {} out of range ({} elements)",
                index,
                self.elements.len()
            ))
        })?;
        self.check_solution(solution)?;

        let forces = element.local_end_forces(&solution.displacements)?;
        Ok(ElementForces::from_local(&forces))
    }

    /// Get analysis summary
    pub fn summary(&self, solution: &Solution) -> FrameResult<AnalysisSummary> {
        self.check_solution(solution)?;

        let mut summary = AnalysisSummary {
            num_nodes: self.nodes.len(),
            num_elements: self.elements.len(),
            total_dofs: self.num_dofs(),
            prescribed_dofs: self.prescribed.len(),
            free_dofs: self.num_dofs() - self.prescribed.len(),
            ..Default::default()
        };

        for node in &self.nodes {
            let disp = solution.displacement_at(node.dofs()).translation_magnitude();
            if disp > summary.max_displacement {
                summary.max_displacement = disp;
                summary.max_disp_node = node.label.clone();
            }

            let rxn = solution.reaction_at(node.dofs()).force_magnitude();
            if rxn > summary.max_reaction {
                summary.max_reaction = rxn;
                summary.max_reaction_node = node.label.clone();
            }
        }

        for index in 0..self.elements.len() {
            let forces = self.element_forces(index, solution)?;
            summary.max_moment = summary.max_moment.max(forces.max_moment());
        }

        Ok(summary)
    }
}
