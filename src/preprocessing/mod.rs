//! Reversible feature-scaling transformers.
//!
//! # Two ways to use a scaler
//!
//! - **Stateful**: `MeanNormalization::transform(&mut self, ..)` fits and
//!   transforms in one call and keeps the statistics for later
//!   `inverse_transform` calls. Calling `inverse_transform` first is an error.
//! - **Split**: [`Transformer::fit`] returns an immutable fitted value
//!   (`FittedMeanNormalization`, `FittedMinMaxScaler`) that transforms,
//!   inverts and persists. It is `Send + Sync` and can be shared across
//!   threads without locking.
//!
//! # Available Transformers
//!
//! - [`MeanNormalization`]: center on the mean, divide by the range
//! - [`MinMaxScaler`]: map the observed range onto `[0, 1]` or a custom range
//!
//! # Example
//!
//! ```
//! use featscale::backend::{CpuBackend, Tensor2D};
//! use featscale::preprocessing::{FittedMinMaxScaler, FittedTransformer, MinMaxScaler, Transformer};
//!
//! let training = Tensor2D::<CpuBackend>::new(vec![0.0, 4.0, 8.0], 1, 3);
//! let fitted = MinMaxScaler::<CpuBackend>::new().fit(&training).unwrap();
//!
//! // Persist and restore the statistics
//! let path = std::env::temp_dir().join("featscale_doc_minmax.bin");
//! fitted.save_to_file(&path).unwrap();
//! let loaded = FittedMinMaxScaler::<CpuBackend>::load_from_file(&path).unwrap();
//! # std::fs::remove_file(&path).ok();
//!
//! let scaled = loaded.transform(&Tensor2D::new(vec![2.0, 16.0], 1, 2)).unwrap();
//! assert_eq!(scaled.to_vec(), vec![0.25, 2.0]);
//! ```

pub mod error;
pub mod scaling;
pub mod traits;

pub use error::PreprocessingError;
pub use scaling::{
    FittedMeanNormalization, FittedMinMaxScaler, MeanNormalization, MeanNormalizationParams,
    MinMaxScaler, MinMaxScalerConfig, MinMaxScalerParams,
};
pub use traits::{FittedTransformer, Transformer};
