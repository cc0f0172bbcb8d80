//! Assembly of the global stiffness matrix and load vector
//!
//! Each element contributes its 6x6 global-frame matrix at the DOFs of its two
//! nodes. Contributions at shared DOFs are summed, never overwritten.

use std::collections::HashSet;

use crate::elements::{Element, Node};
use crate::error::{FrameError, FrameResult};
use crate::math::{Mat, Mat6, Vec as FEVec, Vec6};

/// Distinct nodes referenced by `elements`, ordered by global DOF
///
/// Nodes are distinct by identity, not by value. The DOFs of the returned
/// nodes must cover `0..3 * nodes.len()` exactly.
pub fn collect_nodes<'a>(elements: &[Element<'a>]) -> FrameResult<Vec<&'a Node>> {
    let mut seen: HashSet<*const Node> = HashSet::new();
    let mut nodes: Vec<&'a Node> = Vec::new();

    for element in elements {
        for node in [element.node_i(), element.node_j()] {
            if seen.insert(node as *const Node) {
                nodes.push(node);
            }
        }
    }

    nodes.sort_by_key(|node| node.dofs()[0]);

    let total = 3 * nodes.len();
    let mut claimed: HashSet<usize> = HashSet::with_capacity(total);
    for node in &nodes {
        for dof in node.dofs() {
            if dof >= total {
                return Err(FrameError::DofOutOfRange { dof, total });
            }
            if !claimed.insert(dof) {
                return Err(FrameError::DuplicateDof(dof));
            }
        }
    }

    Ok(nodes)
}

fn check_dofs(dofs: &[usize], total: usize) -> FrameResult<()> {
    match dofs.iter().find(|&&d| d >= total) {
        Some(&dof) => Err(FrameError::DofOutOfRange { dof, total }),
        None => Ok(()),
    }
}

/// Add an element matrix into `k` at `dofs`
#[inline]
pub fn scatter_matrix(k: &mut Mat, dofs: &[usize; 6], k_elem: &Mat6) {
    for (a, &da) in dofs.iter().enumerate() {
        for (b, &db) in dofs.iter().enumerate() {
            k[(da, db)] += k_elem[(a, b)];
        }
    }
}

/// Add an element vector into `f` at `dofs`
#[inline]
pub fn scatter_vector(f: &mut FEVec, dofs: &[usize; 6], f_elem: &Vec6) {
    for (a, &da) in dofs.iter().enumerate() {
        f[da] += f_elem[a];
    }
}

/// Build the n x n global stiffness matrix
pub fn assemble_stiffness(elements: &[Element], total: usize) -> FrameResult<Mat> {
    let mut k = Mat::zeros(total, total);

    for element in elements {
        let dofs = element.dofs();
        check_dofs(&dofs, total)?;
        scatter_matrix(&mut k, &dofs, element.global_stiffness());
    }

    Ok(k)
}

/// Build the global load vector from nodal actions and element loads
pub fn assemble_loads(nodes: &[&Node], elements: &[Element], total: usize) -> FrameResult<FEVec> {
    let mut f = FEVec::zeros(total);

    for node in nodes {
        if !node.actions.is_finite() {
            return Err(FrameError::InvalidInput(format!(
                "Node {} has non-finite actions",
                node.label
            )));
        }
        let dofs = node.dofs();
        check_dofs(&dofs, total)?;
        for (dof, value) in dofs.iter().zip(node.actions.as_array()) {
            f[*dof] += value;
        }
    }

    for element in elements.iter().filter(|e| e.has_distributed_load()) {
        let dofs = element.dofs();
        check_dofs(&dofs, total)?;
        scatter_vector(&mut f, &dofs, &element.equivalent_nodal_loads());
    }

    Ok(f)
}
