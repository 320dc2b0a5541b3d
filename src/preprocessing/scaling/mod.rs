//! Scaling transformers for feature normalization.
//!
//! Both transformers learn per-feature (per-row) statistics and apply an affine
//! map to every sample of that feature, so each one inverts exactly.
//!
//! | Transformer | Map | Constant feature |
//! |-------------|-----|------------------|
//! | [`MeanNormalization`] | `(x - mean) / (max - min)` | maps to `0` |
//! | [`MinMaxScaler`] | `(x - min) * (hi - lo) / (max - min) + lo` | maps to `lo` |
//!
//! # Example
//!
//! ```
//! use featscale::backend::{CpuBackend, Tensor2D};
//! use featscale::preprocessing::MinMaxScaler;
//!
//! let data = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], 1, 5);
//! let mut scaler = MinMaxScaler::<CpuBackend>::new();
//! let scaled = scaler.transform(&data).unwrap();
//! assert_eq!(scaled.to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//! ```

pub mod mean_normalization;
pub mod minmax;

pub use mean_normalization::{
    FittedMeanNormalization, MeanNormalization, MeanNormalizationParams,
};
pub use minmax::{FittedMinMaxScaler, MinMaxScaler, MinMaxScalerConfig, MinMaxScalerParams};

use crate::backend::{Backend, Tensor2D};
use crate::preprocessing::error::PreprocessingError;

/// Rejects matrices without features or without samples; returns the shape.
pub(crate) fn check_non_empty<B: Backend>(
    data: &Tensor2D<B>,
    name: &str,
) -> Result<(usize, usize), PreprocessingError> {
    let (rows, cols) = data.shape();
    if rows == 0 || cols == 0 {
        return Err(PreprocessingError::InvalidInput(format!(
            "Cannot fit {} on empty data ({} features, {} samples)",
            name, rows, cols
        )));
    }
    Ok((rows, cols))
}

/// A feature whose `max - min` (or derived scale) does not fit the element type.
pub(crate) fn non_finite_range(feature: usize) -> PreprocessingError {
    PreprocessingError::NumericalError(format!(
        "range of feature {} is not finite in the element type",
        feature
    ))
}

/// Consistency checks shared by the `from_params` implementations.
pub(crate) fn validate_params(
    n_features: usize,
    lengths: &[(&str, usize)],
    scale: &[f64],
    degenerate_features: &[usize],
) -> Result<(), PreprocessingError> {
    if n_features == 0 {
        return Err(PreprocessingError::InvalidParameter(
            "n_features must be positive".to_string(),
        ));
    }
    if let Some((name, len)) = lengths.iter().find(|(_, len)| *len != n_features) {
        return Err(PreprocessingError::InvalidParameter(format!(
            "{} has {} entries, expected {}",
            name, len, n_features
        )));
    }
    if let Some(i) = scale.iter().position(|&s| s == 0.0) {
        return Err(PreprocessingError::InvalidParameter(format!(
            "scale of feature {} is zero",
            i
        )));
    }
    if let Some(&i) = degenerate_features.iter().find(|&&i| i >= n_features) {
        return Err(PreprocessingError::InvalidParameter(format!(
            "degenerate feature index {} out of range",
            i
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_params_length_mismatch() {
        let result = validate_params(2, &[("item_min", 1), ("scale", 2)], &[1.0, 1.0], &[]);
        match result {
            Err(PreprocessingError::InvalidParameter(msg)) => assert!(msg.contains("item_min")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_params_degenerate_out_of_range() {
        let result = validate_params(1, &[("scale", 1)], &[1.0], &[3]);
        assert!(matches!(result, Err(PreprocessingError::InvalidParameter(_))));
    }

    #[test]
    fn test_validate_params_ok() {
        assert!(validate_params(1, &[("scale", 1)], &[2.0], &[]).is_ok());
    }
}
