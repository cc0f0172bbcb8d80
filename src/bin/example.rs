//! Frame2D Solver Example - point-loaded and uniformly loaded beams
//!
//! Units: cm, kN, kN/cm². Set `RUST_LOG=debug` to see assembly and solve logs.

use anyhow::{Context, Result};
use frame2d_solver::prelude::*;

// Steel, 100 cm² / 8000 cm⁴ section
const E: f64 = 21000.0;
const A: f64 = 100.0;
const I: f64 = 8000.0;

fn main() -> Result<()> {
    env_logger::init();

    point_load_beam()?;
    uniform_load_beam()?;

    Ok(())
}

/// Pinned/roller beam, 10 m span, 100 kN at 7.5 m
///
/// ```text
///              100 kN
///                |
///                v
///   N1 ---------- N2 ---- N3
///   ^                     o
/// ```
fn point_load_beam() -> Result<()> {
    println!("=== Simply supported beam, point load ===\n");

    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::pinned());
    let n2 = Node::new(&mut dofs, "N2", 750.0, 0.0).with_actions(Actions::fy(-100.0));
    let n3 = Node::new(&mut dofs, "N3", 1000.0, 0.0).with_constraints(Constraints::roller_y());

    let system = System::with_options(
        vec![
            Element::new(&n1, &n2, E, A, I)?,
            Element::new(&n2, &n3, E, A, I)?,
        ],
        SolverOptions::default().with_statics_check(1e-9),
    )?;

    let solution = system.solve().context("point load beam failed to solve")?;
    report(&system, &solution)
}

/// Pinned/roller beam, 10 m span, 5 kN/m downward
fn uniform_load_beam() -> Result<()> {
    println!("\n=== Simply supported beam, uniform load ===\n");

    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::pinned());
    let n2 = Node::new(&mut dofs, "N2", 1000.0, 0.0).with_constraints(Constraints::roller_y());

    let beam = Element::new(&n1, &n2, E, A, I)?.with_uniform_load(-0.05)?;
    let system = System::with_options(vec![beam], SolverOptions::skyline())?;

    let solution = system.solve().context("uniform load beam failed to solve")?;
    report(&system, &solution)
}

fn report(system: &System, solution: &Solution) -> Result<()> {
    println!("Node displacements:");
    for node in system.nodes() {
        let d = system.node_displacement(node, solution)?;
        println!(
            "  {}: UX={:.6e} cm, UY={:.6e} cm, RZ={:.6e} rad",
            node.label, d.ux, d.uy, d.rz
        );
    }

    println!("\nSupport reactions:");
    for node in system.nodes().iter().filter(|n| n.constraints.is_supported()) {
        let r = system.node_reaction(node, solution)?;
        println!(
            "  {}: FX={:.3} kN, FY={:.3} kN, MZ={:.3} kN·cm",
            node.label, r.fx, r.fy, r.mz
        );
    }

    println!("\nElement end forces:");
    for (index, element) in system.elements().iter().enumerate() {
        let forces = system.element_forces(index, solution)?;
        let (i, j) = (forces.i_end(), forces.j_end());
        println!(
            "  {}-{}: N={:.3}/{:.3} kN, V={:.3}/{:.3} kN, M={:.3}/{:.3} kN·cm",
            element.node_i().label,
            element.node_j().label,
            i.axial,
            j.axial,
            i.shear,
            j.shear,
            i.moment,
            j.moment
        );
    }

    let summary = system.summary(solution)?;
    println!(
        "\nMax displacement {:.6e} cm at {}, max reaction {:.3} kN at {}",
        summary.max_displacement, summary.max_disp_node, summary.max_reaction, summary.max_reaction_node
    );

    let residual = system.equilibrium_residual(solution)?;
    log::info!("Equilibrium residual {:?}", residual);

    Ok(())
}
