//! Min-Max Scaler.
//!
//! Transforms features by scaling each feature to a given range (default [0, 1]).
//!
//! The transformation is given by:
//! ```text
//! scale    = (max - min) / (X_max - X_min)
//! X_scaled = (X - X_min) * scale + min
//! ```
//!
//! A constant feature (`X_max == X_min`) gets `scale = 1` and maps to `min`
//! for every sample. A zero-width target range (`max == min`) also falls back
//! to `scale = 1`, which shifts the feature so its minimum lands on `min`.
//!
//! # Example
//! ```
//! use featscale::backend::{CpuBackend, Tensor2D};
//! use featscale::preprocessing::MinMaxScaler;
//!
//! let data = Tensor2D::<CpuBackend>::new(vec![0.0, 1.0, 2.0], 1, 3);
//!
//! let mut scaler = MinMaxScaler::<CpuBackend>::with_range(-1.0, 1.0);
//! let scaled = scaler.transform(&data).unwrap();
//! assert_eq!(scaled.to_vec(), vec![-1.0, 0.0, 1.0]);
//! assert_eq!(scaler.scale_min(), -1.0);
//! ```

use super::{check_non_empty, non_finite_range, validate_params};
use crate::backend::{Backend, ScalarOps, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use num_traits::{Float, One, Zero};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Configuration for MinMaxScaler.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScalerConfig {
    /// Minimum value of the target range.
    pub min: f64,
    /// Maximum value of the target range.
    pub max: f64,
}

impl Default for MinMaxScalerConfig {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Serializable parameters for a fitted MinMaxScaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MinMaxScalerParams {
    /// Configuration options.
    pub config: MinMaxScalerConfig,
    /// Minimum of each feature.
    pub item_min: Vec<f64>,
    /// Maximum of each feature.
    pub item_max: Vec<f64>,
    /// Scale factor for each feature: (max - min) / (feature_max - feature_min).
    pub scale: Vec<f64>,
    /// Features whose zero guard fired at fit time.
    pub degenerate_features: Vec<usize>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// MinMaxScaler transformer.
///
/// The target range is fixed at construction. Statistics come from the most
/// recent [`transform`](Self::transform) call; use [`Transformer::fit`] for an
/// immutable [`FittedMinMaxScaler`].
///
/// `min < max` is not checked; `min == max` is accepted (see module docs).
#[derive(Clone, Debug)]
pub struct MinMaxScaler<B: Backend> {
    config: MinMaxScalerConfig,
    fitted: Option<FittedMinMaxScaler<B>>,
}

impl<B: Backend> Default for MinMaxScaler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> MinMaxScaler<B> {
    /// Create a new MinMaxScaler with default range [0, 1].
    pub fn new() -> Self {
        Self::from_config(MinMaxScalerConfig::default())
    }

    /// Create a MinMaxScaler targeting `[min, max]`.
    pub fn with_range(min: f64, max: f64) -> Self {
        Self::from_config(MinMaxScalerConfig { min, max })
    }

    /// Create a MinMaxScaler from a configuration.
    pub fn from_config(config: MinMaxScalerConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    /// The configured target range.
    pub fn config(&self) -> &MinMaxScalerConfig {
        &self.config
    }

    /// Lower bound of the target range.
    pub fn scale_min(&self) -> f64 {
        self.config.min
    }

    /// Upper bound of the target range.
    pub fn scale_max(&self) -> f64 {
        self.config.max
    }

    /// Fit statistics on `data`, replacing any previous fit, and return the
    /// scaled matrix.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidInput`] if `data` has no features or no
    /// samples, [`PreprocessingError::NumericalError`] if a feature's range or
    /// scale factor is not finite. The previous fit is kept in either case.
    pub fn transform(&mut self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PreprocessingError> {
        let fitted = self.fit(data)?;
        let output = fitted.transform(data)?;
        self.fitted = Some(fitted);
        Ok(output)
    }

    /// Map scaled values back to original units using the last fit.
    ///
    /// # Errors
    /// [`PreprocessingError::StateMismatch`] if nothing has been fitted yet or
    /// the feature count differs from the fit.
    pub fn inverse_transform(&self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PreprocessingError> {
        match &self.fitted {
            Some(fitted) => fitted.inverse_transform(data),
            None => Err(PreprocessingError::StateMismatch {
                expected_features: None,
                got_features: data.shape().0,
            }),
        }
    }

    /// Whether [`transform`](Self::transform) has succeeded at least once.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// The statistics of the last fit.
    pub fn fitted(&self) -> Option<&FittedMinMaxScaler<B>> {
        self.fitted.as_ref()
    }

    /// Per-feature minimum of the last fit.
    pub fn item_min(&self) -> Option<&Tensor1D<B>> {
        self.fitted.as_ref().map(FittedMinMaxScaler::item_min)
    }

    /// Per-feature maximum of the last fit.
    pub fn item_max(&self) -> Option<&Tensor1D<B>> {
        self.fitted.as_ref().map(FittedMinMaxScaler::item_max)
    }

    /// Per-feature scale factor of the last fit.
    pub fn scale(&self) -> Option<&Tensor1D<B>> {
        self.fitted.as_ref().map(FittedMinMaxScaler::scale)
    }
}

impl<B: Backend> Transformer<B> for MinMaxScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = MinMaxScalerParams;
    type Fitted = FittedMinMaxScaler<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = check_non_empty(data, "MinMaxScaler")?;

        let item_min = data.row_min();
        let item_max = data.row_max();

        // scale = (target_max - target_min) / (feature_max - feature_min)
        let target_range = B::Scalar::from_f64(self.config.max - self.config.min);
        let mut degenerate_features = Vec::new();
        let scale_vals = item_max
            .sub(&item_min)
            .to_vec()
            .into_iter()
            .enumerate()
            .map(|(i, range)| {
                let scale = if range.is_zero() {
                    B::Scalar::zero()
                } else {
                    target_range / range
                };
                if !Float::is_finite(range) || !Float::is_finite(scale) {
                    return Err(non_finite_range(i));
                }
                if scale.is_zero() {
                    debug!(feature = i, "zero range, using unit scale");
                    degenerate_features.push(i);
                    Ok(B::Scalar::one())
                } else {
                    Ok(scale)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            n_features = rows,
            n_samples = cols,
            degenerate = degenerate_features.len(),
            min = self.config.min,
            max = self.config.max,
            "fitted MinMaxScaler"
        );

        Ok(FittedMinMaxScaler {
            config: self.config,
            item_min,
            item_max,
            scale: Tensor1D::new(scale_vals),
            degenerate_features,
            n_features: rows,
        })
    }
}

/// Fitted MinMaxScaler ready for inference.
#[derive(Clone, Debug)]
pub struct FittedMinMaxScaler<B: Backend> {
    config: MinMaxScalerConfig,
    item_min: Tensor1D<B>,
    item_max: Tensor1D<B>,
    scale: Tensor1D<B>,
    degenerate_features: Vec<usize>,
    n_features: usize,
}

impl<B: Backend> FittedMinMaxScaler<B> {
    /// Get the minimum values for each feature.
    pub fn item_min(&self) -> &Tensor1D<B> {
        &self.item_min
    }

    /// Get the maximum values for each feature.
    pub fn item_max(&self) -> &Tensor1D<B> {
        &self.item_max
    }

    /// Get the scale factor for each feature. Never zero.
    pub fn scale(&self) -> &Tensor1D<B> {
        &self.scale
    }

    /// Lower bound of the target range.
    pub fn scale_min(&self) -> f64 {
        self.config.min
    }

    /// Upper bound of the target range.
    pub fn scale_max(&self) -> f64 {
        self.config.max
    }

    /// Indices of features whose zero guard fired at fit time.
    pub fn degenerate_features(&self) -> &[usize] {
        &self.degenerate_features
    }

    /// Get the data range (max - min) for each feature.
    pub fn data_range(&self) -> Tensor1D<B> {
        self.item_max.sub(&self.item_min)
    }

    fn check_features(&self, data: &Tensor2D<B>) -> Result<(), PreprocessingError> {
        let (rows, _) = data.shape();
        if rows != self.n_features {
            return Err(PreprocessingError::StateMismatch {
                expected_features: Some(self.n_features),
                got_features: rows,
            });
        }
        Ok(())
    }
}

impl<B: Backend> FittedTransformer<B> for FittedMinMaxScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = MinMaxScalerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        self.check_features(data)?;
        trace!(shape = ?data.shape(), "MinMaxScaler transform");

        // X_scaled = (X - X_min) * scale + target_min
        let centered = data.sub_per_row(&self.item_min);
        Ok(centered
            .mul_per_row(&self.scale)
            .add_scalar(B::Scalar::from_f64(self.config.min)))
    }

    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        self.check_features(data)?;
        trace!(shape = ?data.shape(), "MinMaxScaler inverse transform");

        // X = (X_scaled - target_min) / scale + X_min
        let centered = data.add_scalar(B::Scalar::from_f64(-self.config.min));
        Ok(centered
            .div_per_row(&self.scale)
            .add_per_row(&self.item_min))
    }

    fn extract_params(&self) -> Self::Params {
        MinMaxScalerParams {
            config: self.config,
            item_min: self.item_min.to_f64_vec(),
            item_max: self.item_max.to_f64_vec(),
            scale: self.scale.to_f64_vec(),
            degenerate_features: self.degenerate_features.clone(),
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        validate_params(
            params.n_features,
            &[
                ("item_min", params.item_min.len()),
                ("item_max", params.item_max.len()),
                ("scale", params.scale.len()),
            ],
            &params.scale,
            &params.degenerate_features,
        )?;

        Ok(Self {
            config: params.config,
            item_min: Tensor1D::from_f64_slice(&params.item_min)?,
            item_max: Tensor1D::from_f64_slice(&params.item_max)?,
            scale: Tensor1D::from_f64_slice(&params.scale)?,
            degenerate_features: params.degenerate_features,
            n_features: params.n_features,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;
    use approx::assert_relative_eq;

    fn create_test_data() -> Tensor2D<CpuBackend> {
        // feature 0: [0, 0, 1], feature 1: [1, 1, 3]
        Tensor2D::new(vec![0.0, 0.0, 1.0, 1.0, 1.0, 3.0], 2, 3)
    }

    #[test]
    fn test_minmax_scaler_fit() {
        let fitted = MinMaxScaler::<CpuBackend>::new()
            .fit(&create_test_data())
            .unwrap();

        assert_eq!(fitted.item_min().to_vec(), vec![0.0, 1.0]);
        assert_eq!(fitted.item_max().to_vec(), vec![1.0, 3.0]);

        // Scale: (1 - 0) / (1 - 0) = 1, (1 - 0) / (3 - 1) = 0.5
        let scale = fitted.scale().to_vec();
        assert_relative_eq!(scale[0], 1.0);
        assert_relative_eq!(scale[1], 0.5);
    }

    #[test]
    fn test_minmax_scaler_transform() {
        let mut scaler = MinMaxScaler::<CpuBackend>::new();
        let transformed = scaler.transform(&create_test_data()).unwrap();

        assert_eq!(transformed.row(0), vec![0.0, 0.0, 1.0]);
        assert_eq!(transformed.row(1), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_minmax_scaler_one_to_five() {
        let data = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], 1, 5);
        let mut scaler = MinMaxScaler::<CpuBackend>::new();
        let transformed = scaler.transform(&data).unwrap();
        assert_eq!(transformed.to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_minmax_scaler_inverse_transform() {
        let data = create_test_data();
        let mut scaler = MinMaxScaler::<CpuBackend>::new();
        let transformed = scaler.transform(&data).unwrap();
        let recovered = scaler.inverse_transform(&transformed).unwrap();

        for (o, r) in data.to_vec().iter().zip(recovered.to_vec().iter()) {
            assert_relative_eq!(o, r, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_minmax_scaler_custom_range() {
        let mut scaler = MinMaxScaler::<CpuBackend>::with_range(-1.0, 1.0);
        let transformed = scaler.transform(&create_test_data()).unwrap();

        // [0, 0, 1] -> [-1, -1, 1] and [1, 1, 3] -> [-1, -1, 1]
        assert_eq!(transformed.row(0), vec![-1.0, -1.0, 1.0]);
        assert_eq!(transformed.row(1), vec![-1.0, -1.0, 1.0]);
        assert_eq!(scaler.scale_min(), -1.0);
        assert_eq!(scaler.scale_max(), 1.0);
    }

    #[test]
    fn test_minmax_scaler_zero_range() {
        // All values the same - range is 0
        let data = Tensor2D::<CpuBackend>::new(vec![5.0, 5.0, 5.0, 5.0], 2, 2);
        let mut scaler = MinMaxScaler::<CpuBackend>::with_range(2.0, 3.0);
        let transformed = scaler.transform(&data).unwrap();

        // All values map to target_min
        assert!(transformed.to_vec().iter().all(|&v| v == 2.0));
        assert_eq!(scaler.scale().unwrap().to_vec(), vec![1.0, 1.0]);
        assert_eq!(scaler.fitted().unwrap().degenerate_features(), &[0, 1]);

        let recovered = scaler.inverse_transform(&transformed).unwrap();
        assert_eq!(recovered.to_vec(), data.to_vec());
    }

    #[test]
    fn test_minmax_scaler_zero_width_target() {
        let data = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 4.0], 1, 3);
        let mut scaler = MinMaxScaler::<CpuBackend>::with_range(0.5, 0.5);
        let transformed = scaler.transform(&data).unwrap();

        // Unit scale: shifted so the minimum lands on 0.5
        assert_eq!(transformed.to_vec(), vec![0.5, 1.5, 3.5]);
        assert_eq!(scaler.fitted().unwrap().degenerate_features(), &[0]);
        assert_eq!(scaler.inverse_transform(&transformed).unwrap().to_vec(), data.to_vec());
    }

    #[test]
    fn test_minmax_scaler_range_overflow() {
        let data = Tensor2D::<CpuBackend>::new(vec![-1e308, 0.0, 1e308], 1, 3);
        let mut scaler = MinMaxScaler::<CpuBackend>::new();
        assert!(matches!(
            scaler.transform(&data),
            Err(PreprocessingError::NumericalError(_))
        ));
        assert!(!scaler.is_fitted());
    }

    #[test]
    fn test_minmax_scaler_scale_overflow() {
        // 1 / 1e-320 does not fit in an f64
        let data = Tensor2D::<CpuBackend>::new(vec![0.0, 1e-320], 1, 2);
        assert!(matches!(
            MinMaxScaler::<CpuBackend>::new().fit(&data),
            Err(PreprocessingError::NumericalError(_))
        ));
    }

    #[test]
    fn test_minmax_scaler_large_finite_range() {
        let data = Tensor2D::<CpuBackend>::new(vec![-1e307, 0.0, 1e307], 1, 3);
        let mut scaler = MinMaxScaler::<CpuBackend>::new();
        let transformed = scaler.transform(&data).unwrap();

        assert!(scaler.fitted().unwrap().degenerate_features().is_empty());
        assert!(transformed.to_vec().iter().all(|v| v.is_finite()));
        assert_relative_eq!(transformed.get(0, 1), 0.5, epsilon = 1e-12);
        assert_relative_eq!(transformed.get(0, 2), 1.0, epsilon = 1e-12);
        let recovered = scaler.inverse_transform(&transformed).unwrap();
        for (o, r) in data.to_vec().iter().zip(recovered.to_vec().iter()) {
            assert!((o - r).abs() <= 1e-12 * 1e307);
        }
    }

    #[test]
    fn test_minmax_scaler_inverse_before_fit() {
        let scaler = MinMaxScaler::<CpuBackend>::new();
        assert!(!scaler.is_fitted());
        assert!(matches!(
            scaler.inverse_transform(&create_test_data()),
            Err(PreprocessingError::StateMismatch {
                expected_features: None,
                ..
            })
        ));
        assert!(scaler.scale().is_none());
    }

    #[test]
    fn test_minmax_scaler_feature_mismatch() {
        let fitted = MinMaxScaler::<CpuBackend>::new()
            .fit(&create_test_data())
            .unwrap();

        let wrong_data = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0], 3, 1);
        assert!(matches!(
            fitted.transform(&wrong_data),
            Err(PreprocessingError::StateMismatch {
                expected_features: Some(2),
                got_features: 3
            })
        ));
        assert!(matches!(
            fitted.inverse_transform(&wrong_data),
            Err(PreprocessingError::StateMismatch { .. })
        ));
    }

    #[test]
    fn test_minmax_scaler_empty_data() {
        let scaler = MinMaxScaler::<CpuBackend>::new();
        assert!(matches!(
            scaler.fit(&Tensor2D::zeros(0, 2)),
            Err(PreprocessingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_minmax_scaler_fit_transform() {
        let transformed = MinMaxScaler::<CpuBackend>::new()
            .fit_transform(&create_test_data())
            .unwrap();
        assert_eq!(transformed.row(0), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_minmax_scaler_data_range() {
        let fitted = MinMaxScaler::<CpuBackend>::new()
            .fit(&create_test_data())
            .unwrap();
        assert_eq!(fitted.data_range().to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_minmax_scaler_serialization() {
        let data = create_test_data();
        let fitted = MinMaxScaler::<CpuBackend>::with_range(-2.0, 2.0)
            .fit(&data)
            .unwrap();

        let params = fitted.extract_params();
        assert_eq!(params.config, MinMaxScalerConfig { min: -2.0, max: 2.0 });
        let restored = FittedMinMaxScaler::<CpuBackend>::from_params(params).unwrap();

        assert_eq!(restored.scale_min(), -2.0);
        assert_eq!(
            fitted.transform(&data).unwrap().to_vec(),
            restored.transform(&data).unwrap().to_vec()
        );
    }

    #[test]
    fn test_minmax_scaler_from_params_length_mismatch() {
        let params = MinMaxScalerParams {
            config: MinMaxScalerConfig::default(),
            item_min: vec![0.0, 1.0],
            item_max: vec![1.0],
            scale: vec![1.0, 1.0],
            degenerate_features: vec![],
            n_features: 2,
        };
        assert!(matches!(
            FittedMinMaxScaler::<CpuBackend>::from_params(params),
            Err(PreprocessingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_minmax_scaler_save_load_file() {
        let data = create_test_data();
        let fitted = MinMaxScaler::<CpuBackend>::new().fit(&data).unwrap();

        let temp_file = std::env::temp_dir().join("featscale_test_minmax.bin");
        fitted.save_to_file(&temp_file).unwrap();

        let loaded = FittedMinMaxScaler::<CpuBackend>::load_from_file(&temp_file).unwrap();
        assert_eq!(loaded.n_features_in(), fitted.n_features_in());
        assert_eq!(
            loaded.transform(&data).unwrap().to_vec(),
            fitted.transform(&data).unwrap().to_vec()
        );

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_minmax_scaler_load_corrupt_file() {
        let temp_file = std::env::temp_dir().join("featscale_test_minmax_corrupt.bin");
        std::fs::write(&temp_file, [1u8, 2, 3]).unwrap();
        assert!(matches!(
            FittedMinMaxScaler::<CpuBackend>::load_from_file(&temp_file),
            Err(PreprocessingError::SerializationError(_))
        ));
        std::fs::remove_file(temp_file).ok();
    }
}
