//! Naive matrix multiplication
//!
//! The unoptimized O(n³) baseline: flat row-major buffers addressed as
//! `row * n + col`, loop order i, j, k, no blocking and no SIMD. There is no
//! expected value; the result is a checksum for cross-run comparison.

use crate::error::{HarnessError, try_filled};
use crate::harness::Benchmark;
use crate::validate::Expectation;
use serde::Deserialize;

pub const DEFAULT_SIZE: usize = 128;

/// Square matrix stored as one row-major buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// An n×n matrix of zeros
    pub fn zeros(n: usize, what: &'static str) -> Result<Self, HarnessError> {
        let len = n
            .checked_mul(n)
            .ok_or(HarnessError::Allocation { what, elements: usize::MAX })?;
        Ok(Matrix {
            n,
            data: try_filled(what, len, 0.0)?,
        })
    }

    /// Build from rows; every row must be `rows.len()` long
    pub fn from_rows(rows: &[&[f64]]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return None;
        }
        Some(Matrix {
            n,
            data: rows.iter().flat_map(|row| row.iter().copied()).collect(),
        })
    }

    /// Fill from the flat index: `data[i] = f(i)`
    pub fn fill_with(&mut self, f: impl Fn(usize) -> f64) {
        for (i, x) in self.data.iter_mut().enumerate() {
            *x = f(i);
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// `out = self * rhs` by the definition C[i][j] = Σ_k A[i][k] * B[k][j]
    ///
    /// Summation order is fixed, so the result is bit-for-bit reproducible.
    pub fn multiply_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<(), HarnessError> {
        let n = self.n;
        if rhs.n != n || out.n != n {
            return Err(HarnessError::DimensionMismatch {
                lhs: n,
                rhs: rhs.n,
                out: out.n,
            });
        }
        let (a, b, c) = (&self.data, &rhs.data, &mut out.data);
        for i in 0..n {
            for j in 0..n {
                let mut sum = 0.0;
                for k in 0..n {
                    sum += a[i * n + k] * b[k * n + j];
                }
                c[i * n + j] = sum;
            }
        }
        Ok(())
    }

    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, HarnessError> {
        if rhs.n != self.n {
            return Err(HarnessError::DimensionMismatch {
                lhs: self.n,
                rhs: rhs.n,
                out: self.n,
            });
        }
        let mut out = Matrix::zeros(self.n, "matrix C")?;
        self.multiply_into(rhs, &mut out)?;
        Ok(out)
    }

    /// Sequential sum of all entries, truncated to i64
    pub fn checksum(&self) -> i64 {
        let mut sum = 0.0;
        for x in &self.data {
            sum += x;
        }
        sum as i64
    }
}

/// Inputs and the preallocated output
#[derive(Debug)]
pub struct Operands {
    pub a: Matrix,
    pub b: Matrix,
    pub c: Matrix,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixMultiply {
    pub size: usize,
}

impl Default for MatrixMultiply {
    fn default() -> Self {
        MatrixMultiply { size: DEFAULT_SIZE }
    }
}

impl Benchmark for MatrixMultiply {
    type Input = Operands;
    type Output = Matrix;

    fn name(&self) -> &'static str {
        "matrix-multiply"
    }

    /// Allocate A, B, C and fill `A[i] = i mod 100`, `B[i] = 2i mod 100`
    fn startup(&self) -> Result<Operands, HarnessError> {
        let mut a = Matrix::zeros(self.size, "matrix A")?;
        let mut b = Matrix::zeros(self.size, "matrix B")?;
        let c = Matrix::zeros(self.size, "matrix C")?;
        a.fill_with(|i| (i % 100) as f64);
        b.fill_with(|i| ((i * 2) % 100) as f64);
        Ok(Operands { a, b, c })
    }

    fn compute(&self, input: Operands) -> Result<Matrix, HarnessError> {
        let Operands { a, b, mut c } = input;
        a.multiply_into(&b, &mut c)?;
        Ok(c)
    }

    fn result(&self, output: &Matrix) -> i64 {
        output.checksum()
    }

    fn expectation(&self) -> Option<Expectation> {
        None
    }
}
