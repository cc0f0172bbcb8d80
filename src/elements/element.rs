//! Element - 2D Euler-Bernoulli frame element between two nodes

use super::node::Node;
use super::section::Section;
use crate::error::{FrameError, FrameResult};
use crate::math::{self, Mat6, Vec, Vec6};

/// A 2D frame element (axial + bending, no shear deformation)
///
/// Borrows its end nodes; the stiffness matrices are computed once in
/// [`Element::new`] and never change afterwards.
#[derive(Debug, Clone)]
pub struct Element<'a> {
    node_i: &'a Node,
    node_j: &'a Node,
    /// Modulus of elasticity
    e: f64,
    /// Cross-sectional area
    a: f64,
    /// Second moment of area
    i: f64,
    /// Uniform transverse load along local +y
    q: f64,

    length: f64,
    angle: f64,
    k_local: Mat6,
    t: Mat6,
    k_global: Mat6,
}

impl<'a> Element<'a> {
    /// Create an element from node i to node j
    ///
    /// Fails on coincident nodes or non-positive section/material values.
    pub fn new(node_i: &'a Node, node_j: &'a Node, e: f64, a: f64, i: f64) -> FrameResult<Self> {
        for (name, value) in [("E", e), ("A", a), ("I", i)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FrameError::InvalidSection(format!(
                    "{} must be positive, got {} on element {}-{}",
                    name, value, node_i.label, node_j.label
                )));
            }
        }

        let dx = node_j.x - node_i.x;
        let dy = node_j.y - node_i.y;
        let length = node_i.distance_to(node_j);

        if !(length.is_finite() && length > 0.0) {
            return Err(FrameError::InvalidGeometry(format!(
                "Element has zero length: i={}, j={}",
                node_i.label, node_j.label
            )));
        }

        let angle = dy.atan2(dx);
        let k_local = math::beam_local_stiffness(e, a, i, length);
        let t = math::beam_transformation_matrix(angle);

        // K_global = T^T * K_local * T
        let k_global = t.transpose() * k_local * t;

        Ok(Self {
            node_i,
            node_j,
            e,
            a,
            i,
            q: 0.0,
            length,
            angle,
            k_local,
            t,
            k_global,
        })
    }

    /// Create an element taking A and I from a section
    pub fn from_section(node_i: &'a Node, node_j: &'a Node, e: f64, section: &Section) -> FrameResult<Self> {
        Self::new(node_i, node_j, e, section.a, section.i)
    }

    /// Apply a uniform transverse load `q` (force per length, local +y)
    pub fn with_uniform_load(mut self, q: f64) -> FrameResult<Self> {
        if !q.is_finite() {
            return Err(FrameError::InvalidInput(format!(
                "Distributed load on element {}-{} is not finite",
                self.node_i.label, self.node_j.label
            )));
        }
        self.q = q;
        Ok(self)
    }

    pub fn node_i(&self) -> &'a Node {
        self.node_i
    }

    pub fn node_j(&self) -> &'a Node {
        self.node_j
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn i(&self) -> f64 {
        self.i
    }

    /// Uniform transverse load
    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Orientation from global X, radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn local_stiffness(&self) -> &Mat6 {
        &self.k_local
    }

    /// Rotation matrix T with d_local = T * d_global
    pub fn rotation(&self) -> &Mat6 {
        &self.t
    }

    pub fn global_stiffness(&self) -> &Mat6 {
        &self.k_global
    }

    /// Global DOFs: node i [UX, UY, RZ] then node j [UX, UY, RZ]
    pub fn dofs(&self) -> [usize; 6] {
        let di = self.node_i.dofs();
        let dj = self.node_j.dofs();
        [di[0], di[1], di[2], dj[0], dj[1], dj[2]]
    }

    /// Equivalent nodal loads of the distributed load, local axes
    pub fn equivalent_nodal_loads_local(&self) -> Vec6 {
        math::uniform_load_equivalent(self.q, self.length)
    }

    /// Equivalent nodal loads of the distributed load, global axes
    pub fn equivalent_nodal_loads(&self) -> Vec6 {
        self.t.transpose() * self.equivalent_nodal_loads_local()
    }

    pub fn has_distributed_load(&self) -> bool {
        self.q != 0.0
    }

    /// Gather this element's global displacements from the system vector
    pub fn global_displacements(&self, u: &Vec) -> FrameResult<Vec6> {
        let dofs = self.dofs();
        if let Some(&dof) = dofs.iter().find(|&&d| d >= u.len()) {
            return Err(FrameError::DofOutOfRange { dof, total: u.len() });
        }
        Ok(Vec6::from_fn(|r, _| u[dofs[r]]))
    }

    /// Local end forces from the system displacement vector
    ///
    /// `F = K_local * T * d - f_eq`, i.e. the elastic end forces plus the fixed
    /// end reactions of the distributed load, in local axes.
    pub fn local_end_forces(&self, u: &Vec) -> FrameResult<Vec6> {
        let d_local = self.t * self.global_displacements(u)?;
        Ok(self.k_local * d_local - self.equivalent_nodal_loads_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::DofAllocator;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_element_geometry() {
        let mut dofs = DofAllocator::new();
        let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0);
        let n2 = Node::new(&mut dofs, "N2", 0.0, 300.0);
        let el = Element::new(&n1, &n2, 21000.0, 100.0, 8000.0).unwrap();

        assert_relative_eq!(el.length(), 300.0);
        assert_relative_eq!(el.angle(), FRAC_PI_2);
        assert_eq!(el.dofs(), [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_vertical_element_axial_term_lands_on_uy() {
        let mut dofs = DofAllocator::new();
        let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0);
        let n2 = Node::new(&mut dofs, "N2", 0.0, 100.0);
        let el = Element::new(&n1, &n2, 10.0, 5.0, 1.0).unwrap();
        let k = el.global_stiffness();

        assert_relative_eq!(k[(1, 1)], 0.5, epsilon = 1e-12);
        assert_relative_eq!(k[(0, 0)], 12.0 * 10.0 / 1e6, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut dofs = DofAllocator::new();
        let n1 = Node::new(&mut dofs, "N1", 5.0, 5.0);
        let n2 = Node::new(&mut dofs, "N2", 5.0, 5.0);
        let err = Element::new(&n1, &n2, 1.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, FrameError::InvalidGeometry(_)));
    }

    #[test]
    fn test_non_positive_properties_rejected() {
        let mut dofs = DofAllocator::new();
        let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0);
        let n2 = Node::new(&mut dofs, "N2", 1.0, 0.0);
        for (e, a, i) in [(0.0, 1.0, 1.0), (1.0, -1.0, 1.0), (1.0, 1.0, f64::NAN)] {
            let err = Element::new(&n1, &n2, e, a, i).unwrap_err();
            assert!(matches!(err, FrameError::InvalidSection(_)));
        }
    }

    #[test]
    fn test_inclined_equivalent_loads_preserve_resultant() {
        let mut dofs = DofAllocator::new();
        let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0);
        let n2 = Node::new(&mut dofs, "N2", 3.0, 4.0);
        let el = Element::new(&n1, &n2, 1.0, 1.0, 1.0)
            .unwrap()
            .with_uniform_load(-2.0)
            .unwrap();

        // Total load 10 along local -y = (4/5, -3/5) * 10
        let f = el.equivalent_nodal_loads();
        assert_relative_eq!(f[0] + f[3], 8.0, epsilon = 1e-12);
        assert_relative_eq!(f[1] + f[4], -6.0, epsilon = 1e-12);
        assert_relative_eq!(f[2] + f[5], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_load_rejected() {
        let mut dofs = DofAllocator::new();
        let n1 = Node::new(&mut dofs, "N1", 0.0, 0.0);
        let n2 = Node::new(&mut dofs, "N2", 1.0, 0.0);
        let el = Element::new(&n1, &n2, 1.0, 1.0, 1.0).unwrap();
        assert!(el.with_uniform_load(f64::INFINITY).is_err());
    }
}
