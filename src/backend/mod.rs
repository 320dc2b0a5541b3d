//! # Backend Abstraction
//!
//! This module provides a trait-based abstraction over matrix storage, so the
//! scalers in [`crate::preprocessing`] run unchanged on a plain `Vec` buffer or
//! on an `ndarray` array, in single or double precision.
//!
//! ## Layout
//!
//! Every 2D tensor is a feature matrix: **rows are features, columns are
//! samples**. All reductions the scalers need (`row_min_2d`, `row_max_2d`,
//! `row_mean_2d`) therefore run along a row, and all broadcasts apply the
//! `i`-th entry of a 1D tensor to every element of row `i`.
//!
//! ## Available Backends
//!
//! | Backend             | Feature   | Storage                      |
//! |---------------------|-----------|------------------------------|
//! | `CpuBackend<F>`     | `cpu`     | row-major `Vec<F>`           |
//! | `NdarrayBackend<F>` | `ndarray` | `ndarray::Array2<F>`         |
//!
//! `F` is `f32` or `f64` (see [`ScalarOps`]) and defaults to `f64`.
//!
//! ## Example
//!
//! ```rust
//! use featscale::backend::{CpuBackend, Tensor2D};
//!
//! // Two features, three samples.
//! let x: Tensor2D<CpuBackend> = Tensor2D::new(vec![1.0, 2.0, 3.0, 10.0, 20.0, 30.0], 2, 3);
//! assert_eq!(x.shape(), (2, 3));
//! assert_eq!(x.row(1), vec![10.0, 20.0, 30.0]);
//! ```

use std::fmt::Debug;

#[cfg(feature = "cpu")]
pub mod cpu;
#[cfg(feature = "cpu")]
/// Pure-Rust backend over a row-major `Vec`.
pub use cpu::{CpuBackend, CpuTensor2D};

#[cfg(feature = "ndarray")]
pub mod ndarray_backend;
#[cfg(feature = "ndarray")]
/// Backend backed by the `ndarray` crate for ecosystem interoperability.
pub use ndarray_backend::{NdarrayBackend, NdarrayTensor2D};

/// Element type trait and its `f32`/`f64` implementations.
pub mod scalar;
/// One-dimensional tensor abstraction.
pub mod tensor1d;
/// Two-dimensional tensor abstraction.
pub mod tensor2d;

pub use scalar::ScalarOps;
pub use tensor1d::Tensor1D;
pub use tensor2d::Tensor2D;

/// Abstraction over matrix storage and the handful of operations the scalers need.
///
/// Backends are zero-sized marker types selected at compile time; all methods
/// are associated functions over the backend's concrete tensor types.
///
/// # Panics
///
/// Shape-checked constructors (`from_vec_2d`) panic on inconsistent shapes.
/// Broadcasting operations expect `v.len() == rows` and may panic otherwise;
/// the scalers validate feature counts before calling them.
pub trait Backend: Clone + Copy + Debug + Send + Sync + 'static {
    /// Element type.
    type Scalar: ScalarOps;
    /// One-dimensional tensor type, one entry per feature.
    type Tensor1D: Clone + Debug + Send + Sync;
    /// Two-dimensional tensor type (features x samples).
    type Tensor2D: Clone + Debug + Send + Sync;

    // --- Constructors ---

    /// Constructs a 1D tensor from owned data.
    fn from_vec_1d(data: Vec<Self::Scalar>) -> Self::Tensor1D;

    /// Constructs a 2D tensor from row-major ordered data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    fn from_vec_2d(data: Vec<Self::Scalar>, rows: usize, cols: usize) -> Self::Tensor2D;

    /// Creates a 2D tensor filled with zeros.
    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D;

    // --- Access ---

    /// Returns `(rows, cols)`.
    fn shape(t: &Self::Tensor2D) -> (usize, usize);

    /// Number of elements of a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;

    /// Copies a 1D tensor into a host vector.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<Self::Scalar>;

    /// Copies a 2D tensor into a host vector in row-major order.
    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<Self::Scalar>;

    /// Copies row `i` into a host vector.
    ///
    /// # Panics
    /// If `i` is out of bounds.
    fn row_2d(t: &Self::Tensor2D, i: usize) -> Vec<Self::Scalar>;

    /// Element at row `i`, column `j`.
    ///
    /// # Panics
    /// If the index is out of bounds.
    fn get_2d(t: &Self::Tensor2D, i: usize, j: usize) -> Self::Scalar;

    // --- Row-wise reductions ---

    /// Arithmetic mean of each row.
    fn row_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    /// Minimum of each row. NaN entries are skipped.
    fn row_min_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    /// Maximum of each row. NaN entries are skipped.
    fn row_max_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    // --- Element-wise ops ---

    /// Element-wise subtraction of two 1D tensors.
    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Adds a scalar to each element of a 2D tensor.
    fn add_scalar_2d(t: &Self::Tensor2D, s: Self::Scalar) -> Self::Tensor2D;

    // --- Broadcasting: v[i] applied to every element of row i ---

    /// `out[i][j] = t[i][j] - v[i]`
    fn broadcast_sub_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// `out[i][j] = t[i][j] + v[i]`
    fn broadcast_add_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// `out[i][j] = t[i][j] * v[i]`
    fn broadcast_mul_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// `out[i][j] = t[i][j] / v[i]`
    fn broadcast_div_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;
}
