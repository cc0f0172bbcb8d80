//! Closed-form beam scenarios (units: cm, kN, kN/cm²)

use approx::assert_relative_eq;
use frame2d_solver::prelude::*;

const E: f64 = 21000.0;
const A: f64 = 100.0;
const I: f64 = 8000.0;

fn both_methods() -> [SolverOptions; 2] {
    [
        SolverOptions::dense().with_statics_check(1e-8),
        SolverOptions::skyline().with_statics_check(1e-8),
    ]
}

#[test]
fn cantilever_tip_load() {
    let l = 1000.0;
    let p = -10.0;

    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::fixed());
    let n2 = Node::new(&mut dofs, "N2", l, 0.0).with_actions(Actions::fy(p));

    for options in both_methods() {
        let system = System::with_options(vec![Element::new(&n1, &n2, E, A, I).unwrap()], options).unwrap();
        let solution = system.solve().unwrap();

        let tip = system.node_displacement(&n2, &solution).unwrap();
        assert_relative_eq!(tip.uy, p * l.powi(3) / (3.0 * E * I), max_relative = 1e-9);
        assert_relative_eq!(tip.rz, p * l.powi(2) / (2.0 * E * I), max_relative = 1e-9);
        assert_relative_eq!(tip.ux, 0.0, epsilon = 1e-12);

        let rxn = system.node_reaction(&n1, &solution).unwrap();
        assert_relative_eq!(rxn.fx, 0.0, epsilon = 1e-9);
        assert_relative_eq!(rxn.fy, 10.0, max_relative = 1e-9);
        // Counter-clockwise support moment balancing 10 kN at 1000 cm
        assert_relative_eq!(rxn.mz, 10.0 * 1000.0, max_relative = 1e-9);

        // Free DOFs carry no reaction
        let free = system.node_reaction(&n2, &solution).unwrap();
        assert_eq!((free.fx, free.fy, free.mz), (0.0, 0.0, 0.0));

        let forces = system.element_forces(0, &solution).unwrap();
        assert_relative_eq!(forces.i_end().shear, 10.0, max_relative = 1e-9);
        assert_relative_eq!(forces.i_end().moment, 10_000.0, max_relative = 1e-9);
        assert_relative_eq!(forces.j_end().moment, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn simply_supported_two_elements() {
    let p = -100.0;
    let (a, b, l) = (750.0, 250.0, 1000.0);

    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::pinned());
    let n2 = Node::new(&mut dofs, "N2", a, 0.0).with_actions(Actions::fy(p));
    let n3 = Node::new(&mut dofs, "N3", l, 0.0).with_constraints(Constraints::roller_y());

    for options in both_methods() {
        let system = System::with_options(
            vec![
                Element::new(&n1, &n2, E, A, I).unwrap(),
                Element::new(&n2, &n3, E, A, I).unwrap(),
            ],
            options,
        )
        .unwrap();
        assert_eq!(system.num_dofs(), 9);
        assert_eq!(system.prescribed().keys().copied().collect::<Vec<_>>(), vec![0, 1, 7]);

        let solution = system.solve().unwrap();

        let r1 = system.node_reaction(&n1, &solution).unwrap();
        let r3 = system.node_reaction(&n3, &solution).unwrap();
        assert_relative_eq!(r1.fy + r3.fy, 100.0, max_relative = 1e-9);
        assert_relative_eq!(r1.fy, 100.0 * b / l, max_relative = 1e-9);
        assert_relative_eq!(r3.fy, 100.0 * a / l, max_relative = 1e-9);
        assert_relative_eq!(r1.mz, 0.0, epsilon = 1e-12);

        let mid = system.node_displacement(&n2, &solution).unwrap();
        let expected = p * a * a * b * b / (3.0 * E * I * l);
        assert_relative_eq!(mid.uy, expected, max_relative = 1e-9);

        // Moment under the load
        let forces = system.element_forces(0, &solution).unwrap();
        assert_relative_eq!(forces.j_end().moment.abs(), 100.0 * a * b / l, max_relative = 1e-9);
    }
}

#[test]
fn unsupported_element_is_unstable() {
    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0);
    let n2 = Node::new(&mut dofs, "N2", 500.0, 0.0).with_actions(Actions::fy(-1.0));

    for options in both_methods() {
        let system = System::with_options(vec![Element::new(&n1, &n2, E, A, I).unwrap()], options).unwrap();
        let err = system.solve().unwrap_err();
        assert!(err.is_instability(), "unexpected error: {err}");
    }
}

#[test]
fn horizontal_mechanism_is_unstable() {
    // Two rollers leave the beam free to slide along X
    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::roller_y());
    let n2 = Node::new(&mut dofs, "N2", 400.0, 300.0).with_actions(Actions::fy(-5.0));
    let n3 = Node::new(&mut dofs, "N3", 800.0, 0.0).with_constraints(Constraints::roller_y());

    let system = System::new(vec![
        Element::new(&n1, &n2, E, A, I).unwrap(),
        Element::new(&n2, &n3, E, A, I).unwrap(),
    ])
    .unwrap();
    assert!(matches!(system.solve(), Err(FrameError::SingularMatrix { free_dofs: 7 })));
}

#[test]
fn simply_supported_uniform_load() {
    let (w, l) = (0.1, 600.0);

    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::pinned());
    let n2 = Node::new(&mut dofs, "N2", l, 0.0).with_constraints(Constraints::roller_y());

    let beam = Element::new(&n1, &n2, E, A, I).unwrap().with_uniform_load(-w).unwrap();
    let system = System::new(vec![beam]).unwrap();
    let solution = system.solve().unwrap();

    let r1 = system.node_reaction(&n1, &solution).unwrap();
    let r2 = system.node_reaction(&n2, &solution).unwrap();
    assert_relative_eq!(r1.fy, w * l / 2.0, max_relative = 1e-9);
    assert_relative_eq!(r2.fy, w * l / 2.0, max_relative = 1e-9);

    let theta = w * l.powi(3) / (24.0 * E * I);
    assert_relative_eq!(system.node_displacement(&n1, &solution).unwrap().rz, -theta, max_relative = 1e-9);
    assert_relative_eq!(system.node_displacement(&n2, &solution).unwrap().rz, theta, max_relative = 1e-9);
}

#[test]
fn cantilever_uniform_load() {
    let (w, l) = (0.05, 400.0);

    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::fixed());
    let n2 = Node::new(&mut dofs, "N2", l, 0.0);

    let beam = Element::new(&n1, &n2, E, A, I).unwrap().with_uniform_load(-w).unwrap();
    let system = System::new(vec![beam]).unwrap();
    let solution = system.solve().unwrap();

    let tip = system.node_displacement(&n2, &solution).unwrap();
    assert_relative_eq!(tip.uy, -w * l.powi(4) / (8.0 * E * I), max_relative = 1e-9);

    let rxn = system.node_reaction(&n1, &solution).unwrap();
    assert_relative_eq!(rxn.fy, w * l, max_relative = 1e-9);
    assert_relative_eq!(rxn.mz, w * l * l / 2.0, max_relative = 1e-9);

    // Free end carries no internal moment once the fixed end forces are added back
    let forces = system.element_forces(0, &solution).unwrap();
    assert_relative_eq!(forces.j_end().moment, 0.0, epsilon = 1e-6);
    assert_relative_eq!(forces.j_end().shear, 0.0, epsilon = 1e-9);
}

#[test]
fn fully_fixed_beam_returns_fixed_end_reactions() {
    let (w, l) = (0.2, 500.0);

    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::fixed());
    let n2 = Node::new(&mut dofs, "N2", l, 0.0).with_constraints(Constraints::fixed());

    let beam = Element::new(&n1, &n2, E, A, I).unwrap().with_uniform_load(-w).unwrap();
    let system = System::new(vec![beam]).unwrap();
    let solution = system.solve().unwrap();

    assert!(solution.displacements.iter().all(|&u| u == 0.0));

    let r1 = system.node_reaction(&n1, &solution).unwrap();
    let r2 = system.node_reaction(&n2, &solution).unwrap();
    assert_relative_eq!(r1.fy, w * l / 2.0, max_relative = 1e-12);
    assert_relative_eq!(r2.fy, w * l / 2.0, max_relative = 1e-12);
    assert_relative_eq!(r1.mz, w * l * l / 12.0, max_relative = 1e-12);
    assert_relative_eq!(r2.mz, -w * l * l / 12.0, max_relative = 1e-12);
}

#[test]
fn propped_cantilever_settlement() {
    let (l, delta) = (800.0, -1.5);

    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::fixed());
    let n2 = Node::new(&mut dofs, "N2", l, 0.0)
        .with_constraints(Constraints::roller_y().with_settlement_uy(delta));

    let system = System::new(vec![Element::new(&n1, &n2, E, A, I).unwrap()]).unwrap();
    let solution = system.solve().unwrap();

    let end = system.node_displacement(&n2, &solution).unwrap();
    assert_eq!(end.uy, delta);

    let r2 = system.node_reaction(&n2, &solution).unwrap();
    assert_relative_eq!(r2.fy, 3.0 * E * I * delta / l.powi(3), max_relative = 1e-9);

    let r1 = system.node_reaction(&n1, &solution).unwrap();
    assert_relative_eq!(r1.fy, -r2.fy, max_relative = 1e-9);
}

#[test]
fn portal_frame_lateral_load() {
    let (h, span, load) = (400.0, 600.0, 20.0);

    let mut dofs = DofAllocator::new();
    let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0).with_constraints(Constraints::fixed());
    let n2 = Node::new(&mut dofs, "N2", 0.0, h).with_actions(Actions::fx(load));
    let n3 = Node::new(&mut dofs, "N3", span, h);
    let n4 = Node::new(&mut dofs, "N4", span, 0.0).with_constraints(Constraints::fixed());

    let column = Section::rectangular(30.0, 30.0);
    let girder = Section::wide_flange(40.0, 20.0, 1.5, 1.0);

    let (p1, p2, p3, p4) = (&n1, &n2, &n3, &n4);
    let build = move |options: SolverOptions| {
        System::with_options(
            vec![
                Element::from_section(p1, p2, E, &column).unwrap(),
                Element::from_section(p2, p3, E, &girder).unwrap(),
                Element::from_section(p4, p3, E, &column).unwrap(),
            ],
            options,
        )
        .unwrap()
    };

    let [dense, skyline] = both_methods().map(|options| build(options).solve().unwrap());
    assert_relative_eq!(dense.displacements, skyline.displacements, max_relative = 1e-8);
    assert_relative_eq!(dense.reactions, skyline.reactions, max_relative = 1e-8, epsilon = 1e-9);

    let system = build(SolverOptions::default());
    let r1 = system.node_reaction(&n1, &dense).unwrap();
    let r4 = system.node_reaction(&n4, &dense).unwrap();
    assert_relative_eq!(r1.fx + r4.fx, -load, max_relative = 1e-9);
    assert!(r1.fy * r4.fy < 0.0, "overturning couple expected");

    // Girder sways almost as a unit and is squeezed by the load
    let d2 = system.node_displacement(&n2, &dense).unwrap();
    let d3 = system.node_displacement(&n3, &dense).unwrap();
    assert!(d2.ux > d3.ux && d3.ux > 0.0);
    assert_relative_eq!(d2.ux, d3.ux, max_relative = 0.1);

    let summary = system.summary(&dense).unwrap();
    assert_eq!(summary.num_elements, 3);
    assert_eq!(summary.free_dofs, 6);
    assert!(summary.max_disp_node == "N2" || summary.max_disp_node == "N3");
}
