//! # featscale
//!
//! Reversible, per-feature rescaling of dense numeric matrices, for use as a
//! preprocessing step in front of numeric algorithms.
//!
//! ## Layout
//!
//! A feature matrix has **one row per feature and one column per sample**.
//! Every statistic is computed per row, and every element is rescaled using
//! only its own row's statistics.
//!
//! ## Transformers
//!
//! - [`MeanNormalization`]: `(x - mean) / (max - min)`
//! - [`MinMaxScaler`]: maps `[min, max]` of each feature onto a target range,
//!   `[0, 1]` by default
//!
//! Both invert exactly (up to rounding) and treat constant features as a
//! named, non-fatal case: the divisor becomes `1` and the feature index is
//! recorded in the fitted state.
//!
//! ## Quick Start
//!
//! ```rust
//! use featscale::{CpuBackend, MinMaxScaler, Tensor2D};
//!
//! let data = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], 1, 5);
//!
//! let mut scaler = MinMaxScaler::<CpuBackend>::new();
//! let scaled = scaler.transform(&data).unwrap();
//! assert_eq!(scaled.to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//!
//! let restored = scaler.inverse_transform(&scaled).unwrap();
//! assert_eq!(restored.to_vec(), data.to_vec());
//! ```
//!
//! ## Module Structure
//!
//! - `backend`: Matrix storage abstraction (`Tensor1D`, `Tensor2D`, `CpuBackend`, `NdarrayBackend`)
//! - `preprocessing`: The scalers, their traits and error type
//! - `serialization`: Byte encoding of fitted parameters
//!
//! ## Logging
//!
//! Fitting emits `tracing` events at `debug` level (one per constant feature
//! plus a summary); transforms emit at `trace`. No subscriber is installed.
//!
//! ## Threading
//!
//! Fitted scalers are immutable and `Send + Sync`. The stateful wrappers need
//! `&mut self` to refit, so sharing one across threads requires external
//! synchronization or one instance per thread.

pub mod backend;

/// Reversible feature-scaling transformers.
pub mod preprocessing;

/// Byte encoding of fitted scaler parameters.
pub mod serialization;

#[cfg(feature = "cpu")]
pub use backend::CpuBackend;
#[cfg(feature = "ndarray")]
pub use backend::NdarrayBackend;
pub use backend::{Backend, ScalarOps, Tensor1D, Tensor2D};
pub use preprocessing::{
    FittedMeanNormalization, FittedMinMaxScaler, FittedTransformer, MeanNormalization,
    MinMaxScaler, PreprocessingError, Transformer,
};
