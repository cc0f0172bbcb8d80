//! Partitioned solve of the assembled system
//!
//! DOFs are split into free (f) and prescribed (c) sets:
//!
//! ```text
//! K = [Kff Kfc]   F = [Ff]   u = [uf]
//!     [Kcf Kcc]       [Fc]       [uc]
//! ```
//!
//! `Kff * uf = Ff - Kfc * uc` gives the unknown displacements and
//! `Rc = Kcf * uf + Kcc * uc - Fc` the reactions.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::analysis::{SolveMethod, SolverOptions};
use crate::error::{FrameError, FrameResult};
use crate::math::{self, Mat, SkylineCholesky, SparseMatrixBuilder, Vec as FEVec};
use crate::results::Solution;

/// Free/prescribed split of the global DOFs, both in ascending order
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub free: Vec<usize>,
    pub prescribed: Vec<usize>,
    /// Prescribed values, aligned with `prescribed`
    pub values: FEVec,
}

/// Split `0..total` into free and prescribed DOFs
pub fn partition_dofs(total: usize, prescribed: &BTreeMap<usize, f64>) -> FrameResult<Partition> {
    if let Some((&dof, _)) = prescribed.range(total..).next() {
        return Err(FrameError::DofOutOfRange { dof, total });
    }
    if let Some((dof, value)) = prescribed.iter().find(|(_, v)| !v.is_finite()) {
        return Err(FrameError::InvalidInput(format!(
            "Prescribed value {} at DOF {} is not finite",
            value, dof
        )));
    }

    let free: Vec<usize> = (0..total).filter(|d| !prescribed.contains_key(d)).collect();
    let fixed: Vec<usize> = prescribed.keys().copied().collect();
    let values = FEVec::from_iterator(fixed.len(), prescribed.values().copied());

    Ok(Partition {
        free,
        prescribed: fixed,
        values,
    })
}

/// Solve `K u = F` with the prescribed displacements imposed
///
/// Returns full-length displacement and reaction vectors in global DOF order.
pub fn solve_partitioned(
    k: &Mat,
    f: &FEVec,
    prescribed: &BTreeMap<usize, f64>,
    options: &SolverOptions,
) -> FrameResult<Solution> {
    options.validate()?;

    let total = k.nrows();
    if k.ncols() != total {
        return Err(FrameError::DimensionMismatch {
            expected: total,
            found: k.ncols(),
        });
    }
    if f.len() != total {
        return Err(FrameError::DimensionMismatch {
            expected: total,
            found: f.len(),
        });
    }

    let part = partition_dofs(total, prescribed)?;
    let (free, fixed) = (&part.free, &part.prescribed);
    debug!(
        "Partitioned {} DOFs: {} free, {} prescribed",
        total,
        free.len(),
        fixed.len()
    );

    let k_ff = k.select_rows(free).select_columns(free);
    let k_fc = k.select_rows(free).select_columns(fixed);
    let k_cf = k.select_rows(fixed).select_columns(free);
    let k_cc = k.select_rows(fixed).select_columns(fixed);
    let f_f = f.select_rows(free);
    let f_c = f.select_rows(fixed);
    let u_c = &part.values;

    let rhs = &f_f - &k_fc * u_c;
    let u_f = solve_reduced(&k_ff, &rhs, options)?;

    let mut displacements = FEVec::zeros(total);
    for (i, &dof) in free.iter().enumerate() {
        displacements[dof] = u_f[i];
    }
    for (i, &dof) in fixed.iter().enumerate() {
        displacements[dof] = u_c[i];
    }

    let r_c = &k_cf * &u_f + &k_cc * u_c - &f_c;
    let mut reactions = FEVec::zeros(total);
    for (i, &dof) in fixed.iter().enumerate() {
        reactions[dof] = r_c[i];
    }

    Ok(Solution {
        displacements,
        reactions,
    })
}

/// Solve `Kff * uf = rhs`, failing on a singular free-DOF block
fn solve_reduced(k_ff: &Mat, rhs: &FEVec, options: &SolverOptions) -> FrameResult<FEVec> {
    let n_free = k_ff.nrows();
    if n_free == 0 {
        return Ok(FEVec::zeros(0));
    }

    let singular = FrameError::SingularMatrix { free_dofs: n_free };

    match options.method {
        SolveMethod::Dense => {
            trace!("Dense LU on {} free DOFs", n_free);
            math::solve_linear_system(k_ff, rhs, options.pivot_tolerance).ok_or(singular)
        }
        SolveMethod::Skyline => {
            let csr = SparseMatrixBuilder::from_dense(k_ff).to_csr();
            let mut chol = SkylineCholesky::new(&csr);
            trace!(
                "Skyline Cholesky on {} free DOFs, profile {}",
                n_free,
                chol.profile()
            );
            if chol.factorize(options.pivot_tolerance).is_err() {
                return Err(singular);
            }
            chol.solve(rhs).ok_or(singular)
        }
    }
}
