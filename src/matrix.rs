//! Core matrix data structure and operations.
//!
//! # Dense Matrix Engine
//!
//! This module defines the dense 2-D buffer every other part of the engine
//! computes with, along with the full set of algebraic operations the layer
//! and network code is built from.
//!
//! It supports:
//! - Construction of `rows x columns` matrices with row-major data layout
//! - Matrix product, transpose, and elementwise arithmetic
//! - In-place scalar arithmetic and parameter-update helpers
//! - Uniform randomization through a caller-supplied RNG
//! - A `matrix!` macro for 2-D literals
//!
//! ## Design Highlights
//! - Element type is `f32` throughout; no NaN/Inf guards beyond the explicit
//!   shape checks
//! - Shape extents are stored directly and enforced at construction; the
//!   `data.len() == rows * columns` invariant cannot be broken from outside
//!   this module
//! - Every matrix exclusively owns its buffer; results of `multiply`,
//!   `transpose`, `subtract`, and `clone` never alias their operands
//! - Fallible operations return [`Result`](crate::Result) and leave their
//!   operands untouched on failure
//!
//! ## Contract asymmetry
//! `add` mutates the receiver in place while `subtract` returns a new owned
//! matrix. Callers depend on that split: parameter updates accumulate in
//! place, while the loss gradient must be a fresh value.
//!
//! ## Example
//!
//! ```rust
//! use gradnet::Matrix;
//!
//! let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(m.shape(), (2, 3));
//! assert_eq!(m[(1, 2)], 6.0);
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use rand::Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};

/// A dense 2-D `f32` matrix with row-major storage.
///
/// Element `(i, j)` lives at flat index `i * columns + j`. Both extents are
/// always positive and `data.len() == rows * columns` holds for every value
/// of this type.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a zero-initialized matrix of the given shape.
    ///
    /// # Errors
    /// Returns [`Error::Allocation`] if either extent is zero.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(Error::Allocation { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            data: vec![0.0; rows * columns],
        })
    }

    /// Creates a matrix of the given shape from an existing row-major buffer.
    ///
    /// # Errors
    /// Returns [`Error::Allocation`] if either extent is zero, or
    /// [`Error::DataLength`] if `data.len() != rows * columns`.
    pub fn from_vec(rows: usize, columns: usize, data: Vec<f32>) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(Error::Allocation { rows, columns });
        }
        if data.len() != rows * columns {
            return Err(Error::DataLength {
                rows,
                columns,
                len: data.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            data,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)` pair.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major view of the elements.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable flat row-major view of the elements.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns element `(row, column)`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        if row < self.rows && column < self.columns {
            Some(self.data[row * self.columns + column])
        } else {
            None
        }
    }

    /// Computes the matrix product `self x other`.
    ///
    /// Output rows are filled in parallel with `rayon`; the inner loop is a
    /// plain dot product.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if
    /// `self.columns() != other.rows()`. Neither operand is modified.
    ///
    /// # Example
    /// ```rust
    /// use gradnet::matrix;
    ///
    /// let a = matrix!([[1.0, 2.0], [3.0, 4.0]]);
    /// let b = matrix!([[5.0], [6.0]]);
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c.data(), &[17.0, 39.0]);
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.columns != other.rows {
            return Err(Error::dimension_mismatch(
                "multiply",
                self.shape(),
                other.shape(),
            ));
        }

        let (m, k, n) = (self.rows, self.columns, other.columns);
        let mut out = vec![0.0f32; m * n];

        out.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for l in 0..k {
                    sum += self.data[i * k + l] * other.data[l * n + j];
                }
                *cell = sum;
            }
        });

        Ok(Matrix {
            rows: m,
            columns: n,
            data: out,
        })
    }

    /// Returns a new `columns x rows` matrix with `t[(j, i)] = self[(i, j)]`.
    #[must_use]
    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0.0f32; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.columns {
                data[j * self.rows + i] = self.data[i * self.columns + j];
            }
        }
        Matrix {
            rows: self.columns,
            columns: self.rows,
            data,
        }
    }

    /// Adds `other` to `self` elementwise, in place.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if the shapes differ; `self` is
    /// left unmodified.
    pub fn add(&mut self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::dimension_mismatch(
                "add",
                self.shape(),
                other.shape(),
            ));
        }
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(())
    }

    /// Returns the elementwise difference `self - other` as a new matrix.
    ///
    /// Unlike [`add`](Matrix::add) this does not mutate either operand; the
    /// asymmetry is part of the contract.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if the shapes differ.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(Error::dimension_mismatch(
                "subtract",
                self.shape(),
                other.shape(),
            ));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a - b)
            .collect();
        Ok(Matrix {
            rows: self.rows,
            columns: self.columns,
            data,
        })
    }

    /// Adds `k * other` to `self` elementwise, in place.
    ///
    /// This is the fused gradient-descent step: `w.add_scaled(&dw, -lr)`
    /// applies `w -= lr * dw` without a temporary.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if the shapes differ; `self` is
    /// left unmodified.
    pub fn add_scaled(&mut self, other: &Matrix, k: f32) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::dimension_mismatch(
                "add_scaled",
                self.shape(),
                other.shape(),
            ));
        }
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += k * b;
        }
        Ok(())
    }

    /// Multiplies every element by `k`, in place.
    pub fn scale(&mut self, k: f32) {
        for v in &mut self.data {
            *v *= k;
        }
    }

    /// Adds `k` to every element, in place.
    pub fn add_scalar(&mut self, k: f32) {
        for v in &mut self.data {
            *v += k;
        }
    }

    /// Subtracts `k` from every element, in place.
    pub fn subtract_scalar(&mut self, k: f32) {
        for v in &mut self.data {
            *v -= k;
        }
    }

    /// Sets every element to zero, in place.
    pub fn zero(&mut self) {
        for v in &mut self.data {
            *v = 0.0;
        }
    }

    /// Sets every element to an independent uniform draw from `[0, 1)`.
    ///
    /// Naive initialization path only; dense layers use Glorot-style
    /// scaling at construction instead.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for v in &mut self.data {
            *v = rng.random();
        }
    }

    /// Flat row-major index of the maximum element.
    ///
    /// Ties resolve to the first occurrence. Used for classification
    /// readout.
    #[must_use]
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, &v) in self.data.iter().enumerate() {
            if v > self.data[best] {
                best = i;
            }
        }
        best
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    /// # Panics
    /// Panics if the index is out of bounds.
    fn index(&self, (row, column): (usize, usize)) -> &f32 {
        assert!(
            row < self.rows && column < self.columns,
            "index ({row}, {column}) out of bounds for {}x{} matrix",
            self.rows,
            self.columns
        );
        &self.data[row * self.columns + column]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    /// # Panics
    /// Panics if the index is out of bounds.
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f32 {
        assert!(
            row < self.rows && column < self.columns,
            "index ({row}, {column}) out of bounds for {}x{} matrix",
            self.rows,
            self.columns
        );
        &mut self.data[row * self.columns + column]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            if i > 0 {
                writeln!(f)?;
            }
            for j in 0..self.columns {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{:.6}", self.data[i * self.columns + j])?;
            }
        }
        Ok(())
    }
}

/// Defines a matrix from a nested 2-D literal.
///
/// # Panics
/// Panics if the rows have mismatched lengths.
///
/// # Example
/// ```
/// use gradnet::matrix;
/// let m = matrix!([[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(m.shape(), (2, 2));
/// ```
#[macro_export]
macro_rules! matrix {
    ([ $( [ $( $x:expr ),+ $(,)? ] ),+ $(,)? ]) => {{
        let rows: ::std::vec::Vec<::std::vec::Vec<f32>> =
            vec![ $( vec![ $( $x as f32 ),+ ] ),+ ];
        let columns = rows[0].len();
        assert!(
            rows.iter().all(|r| r.len() == columns),
            "ragged matrix literal (rows have mismatched lengths)"
        );
        let count = rows.len();
        let mut data = ::std::vec::Vec::with_capacity(count * columns);
        for row in rows {
            data.extend(row);
        }
        $crate::matrix::Matrix::from_vec(count, columns, data)
            .expect("matrix literal shape")
    }};
}
