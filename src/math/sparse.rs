//! Sparse matrix utilities for banded stiffness solves
//!
//! Frame stiffness matrices are banded once DOFs follow node order, so the
//! reduced system can be stored by skyline profile and factored in place.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Sparse matrix builder using COO format
/// Duplicate entries are summed on conversion
pub struct SparseMatrixBuilder {
    size: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl SparseMatrixBuilder {
    /// Create a new sparse matrix builder
    pub fn new(size: usize) -> Self {
        // 3 DOFs per node, a handful of neighbours per node
        let estimated_nnz = size * 15;
        Self {
            size,
            entries: Vec::with_capacity(estimated_nnz),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Add a value to the matrix (accumulates if already exists)
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        if value != 0.0 {
            self.entries.push((row, col, value));
        }
    }

    /// Copy the non-zero entries of a dense matrix
    pub fn from_dense(mat: &DMatrix<f64>) -> Self {
        let mut builder = Self::new(mat.nrows());
        for (c, column) in mat.column_iter().enumerate() {
            for (r, &value) in column.iter().enumerate() {
                builder.add(r, c, value);
            }
        }
        builder
    }

    /// Convert to CSR format for efficient solves
    pub fn to_csr(&self) -> CsrMatrix<f64> {
        let mut coo = CooMatrix::new(self.size, self.size);

        for &(row, col, val) in &self.entries {
            coo.push(row, col, val);
        }

        CsrMatrix::from(&coo)
    }

    /// Convert to dense matrix
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut mat = DMatrix::zeros(self.size, self.size);

        for &(row, col, val) in &self.entries {
            mat[(row, col)] += val;
        }

        mat
    }

    /// Number of stored (unmerged) entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }
}

/// Why a skyline factorization stopped
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactorizationError {
    /// Pivot at this row fell below the relative tolerance
    NotPositiveDefinite(usize),
}

/// Skyline Cholesky solver for symmetric positive definite matrices
///
/// Rows are stored from their first non-zero column up to the diagonal.
pub struct SkylineCholesky {
    size: usize,
    rows: Vec<Vec<f64>>,
    heights: Vec<usize>,
    factored: bool,
}

impl SkylineCholesky {
    /// Build the skyline profile from the lower triangle of a CSR matrix
    pub fn new(csr: &CsrMatrix<f64>) -> Self {
        let size = csr.nrows();

        let mut heights = vec![0usize; size];
        for (row, col, _val) in csr.triplet_iter() {
            if col < row {
                heights[row] = heights[row].max(row - col);
            }
        }

        let mut rows: Vec<Vec<f64>> = heights.iter().map(|&h| vec![0.0; h + 1]).collect();

        for (row, col, &val) in csr.triplet_iter() {
            if col <= row {
                let start = row - heights[row];
                rows[row][col - start] += val;
            }
        }

        Self {
            size,
            rows,
            heights,
            factored: false,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Sum of row heights plus the diagonal, i.e. stored entries
    pub fn profile(&self) -> usize {
        self.heights.iter().map(|h| h + 1).sum()
    }

    /// Factorize in place into L with A = L * L^T
    ///
    /// A pivot is rejected when it drops to `pivot_tolerance` times the
    /// original diagonal entry or below.
    pub fn factorize(&mut self, pivot_tolerance: f64) -> Result<(), FactorizationError> {
        for i in 0..self.size {
            let hi = self.heights[i];
            let start_i = i - hi;
            let a_ii = self.rows[i][hi];

            for j in start_i..i {
                let start_j = j - self.heights[j];
                let start = start_i.max(start_j);

                let mut sum = 0.0;
                for k in start..j {
                    sum += self.get(i, k) * self.get(j, k);
                }

                let diag_j = self.rows[j][self.heights[j]];
                let idx = j - start_i;
                self.rows[i][idx] = (self.rows[i][idx] - sum) / diag_j;
            }

            let mut sum = 0.0;
            for j in start_i..i {
                let val = self.get(i, j);
                sum += val * val;
            }

            let diag = a_ii - sum;
            if !(a_ii > 0.0) || !(diag > pivot_tolerance * a_ii) {
                return Err(FactorizationError::NotPositiveDefinite(i));
            }
            self.rows[i][hi] = diag.sqrt();
        }

        self.factored = true;
        Ok(())
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> f64 {
        if col > row {
            return self.get(col, row);
        }
        let start = row - self.heights[row];
        if col < start {
            return 0.0;
        }
        self.rows[row][col - start]
    }

    /// Solve L * L^T * x = b; `None` before a successful `factorize`
    pub fn solve(&self, b: &DVector<f64>) -> Option<DVector<f64>> {
        if !self.factored || b.len() != self.size {
            return None;
        }
        let mut x = b.clone();

        // Forward substitution: L * y = b
        for i in 0..self.size {
            let start = i - self.heights[i];
            let mut sum = 0.0;
            for j in start..i {
                sum += self.get(i, j) * x[j];
            }
            x[i] = (x[i] - sum) / self.get(i, i);
        }

        // Backward substitution: L^T * x = y
        for i in (0..self.size).rev() {
            x[i] /= self.get(i, i);
            let start = i - self.heights[i];
            for j in start..i {
                x[j] -= self.get(i, j) * x[i];
            }
        }

        Some(x)
    }
}
