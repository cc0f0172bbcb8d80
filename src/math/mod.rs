//! Mathematical utilities for frame calculations

pub mod sparse;

use nalgebra::{DMatrix, DVector, Matrix3, Matrix6, Vector6};

pub use sparse::{SkylineCholesky, SparseMatrixBuilder};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;

/// 6x6 matrix for element stiffness and rotation
pub type Mat6 = Matrix6<f64>;
/// 6-element vector for element forces/displacements
pub type Vec6 = Vector6<f64>;

/// Direction cosine block for a member at `angle` (radians) from global X
///
/// Maps global (X, Y, RZ) components to local (axial, transverse, RZ).
pub fn rotation_block(angle: f64) -> Mat3 {
    let c = angle.cos();
    let s = angle.sin();

    #[rustfmt::skip]
    let r = Mat3::new(
         c,   s,   0.0,
        -s,   c,   0.0,
         0.0, 0.0, 1.0,
    );
    r
}

/// Compute the transformation matrix for a 2D frame element
///
/// # Arguments
/// * `angle` - Orientation of the member, `atan2(dy, dx)` of j relative to i
///
/// # Returns
/// 6x6 block-diagonal matrix `T` with `d_local = T * d_global`
pub fn beam_transformation_matrix(angle: f64) -> Mat6 {
    let r = rotation_block(angle);
    let mut t = Mat6::zeros();
    t.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
    t.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
    t
}

/// Compute the local stiffness matrix for a 2D Euler-Bernoulli frame element
///
/// DOF order: [axial_i, transverse_i, rotation_i, axial_j, transverse_j, rotation_j]
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `a` - Cross-sectional area
/// * `i` - Second moment of area
/// * `length` - Member length
pub fn beam_local_stiffness(e: f64, a: f64, i: f64, length: f64) -> Mat6 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let ei_l3 = e * i / l3;
    let ei_l2 = e * i / l2;
    let ei_l = e * i / l;

    #[rustfmt::skip]
    let data = [
        ea_l,   0.0,          0.0,         -ea_l,  0.0,          0.0,
        0.0,    12.0*ei_l3,   6.0*ei_l2,    0.0,  -12.0*ei_l3,   6.0*ei_l2,
        0.0,    6.0*ei_l2,    4.0*ei_l,     0.0,  -6.0*ei_l2,    2.0*ei_l,
        -ea_l,  0.0,          0.0,          ea_l,  0.0,          0.0,
        0.0,   -12.0*ei_l3,  -6.0*ei_l2,    0.0,   12.0*ei_l3,  -6.0*ei_l2,
        0.0,    6.0*ei_l2,    2.0*ei_l,     0.0,  -6.0*ei_l2,    4.0*ei_l,
    ];

    Mat6::from_row_slice(&data)
}

/// Equivalent nodal loads of a uniform transverse load in local coordinates
///
/// `q` acts along local +y over the whole member. These are the negated fixed
/// end reactions of a built-in beam.
pub fn uniform_load_equivalent(q: f64, length: f64) -> Vec6 {
    let l = length;
    let l2 = l * l;

    Vec6::new(
        0.0,
        q * l / 2.0,
        q * l2 / 12.0,
        0.0,
        q * l / 2.0,
        -q * l2 / 12.0,
    )
}

/// Solve a symmetric stiffness system with a full-pivot LU decomposition
///
/// The matrix is scaled to unit diagonal first so that `pivot_tolerance` is a
/// relative threshold. Returns `None` when a pivot falls below it or when a
/// diagonal entry is not strictly positive.
pub fn solve_linear_system(a: &Mat, b: &Vec, pivot_tolerance: f64) -> Option<Vec> {
    let n = a.nrows();
    if n == 0 {
        return Some(Vec::zeros(0));
    }

    let mut scale = Vec::zeros(n);
    for k in 0..n {
        let d = a[(k, k)];
        if !(d.is_finite() && d > 0.0) {
            return None;
        }
        scale[k] = 1.0 / d.sqrt();
    }

    let scaled = Mat::from_fn(n, n, |r, c| a[(r, c)] * scale[r] * scale[c]);
    let lu = scaled.full_piv_lu();

    let min_pivot = lu
        .u()
        .diagonal()
        .iter()
        .fold(f64::INFINITY, |m, p| m.min(p.abs()));
    if !(min_pivot > pivot_tolerance) {
        return None;
    }

    let rhs = b.component_mul(&scale);
    lu.solve(&rhs).map(|y| y.component_mul(&scale))
}
