//! Mean normalization.
//!
//! Centers each feature on its mean and divides by its observed range:
//! ```text
//! X_scaled = (X - X_mean) / (X_max - X_min)
//! ```
//! A constant feature (zero range) is divided by `1` instead, so it comes out
//! as all zeros and still inverts exactly.
//!
//! # Example
//! ```
//! use featscale::backend::{CpuBackend, Tensor2D};
//! use featscale::preprocessing::MeanNormalization;
//!
//! let data = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], 1, 5);
//!
//! let mut scaler = MeanNormalization::<CpuBackend>::new();
//! let scaled = scaler.transform(&data).unwrap();
//! assert_eq!(scaled.to_vec(), vec![-0.5, -0.25, 0.0, 0.25, 0.5]);
//!
//! let restored = scaler.inverse_transform(&scaled).unwrap();
//! assert_eq!(restored.to_vec(), data.to_vec());
//! ```

use super::{check_non_empty, non_finite_range, validate_params};
use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use num_traits::{Float, One, Zero};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Serializable parameters for a fitted MeanNormalization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeanNormalizationParams {
    /// Mean of each feature.
    pub item_mean: Vec<f64>,
    /// Minimum of each feature.
    pub item_min: Vec<f64>,
    /// Maximum of each feature.
    pub item_max: Vec<f64>,
    /// Divisor for each feature: `max - min`, or `1` for constant features.
    pub scale: Vec<f64>,
    /// Features whose range was zero at fit time.
    pub degenerate_features: Vec<usize>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// Mean normalization transformer.
///
/// Holds the statistics of the most recent [`transform`](Self::transform) call;
/// each call refits from scratch. Use [`Transformer::fit`] instead to get an
/// immutable [`FittedMeanNormalization`] that can be shared across threads.
#[derive(Clone, Debug)]
pub struct MeanNormalization<B: Backend> {
    fitted: Option<FittedMeanNormalization<B>>,
}

impl<B: Backend> Default for MeanNormalization<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> MeanNormalization<B> {
    /// Create an unfitted normalizer.
    pub fn new() -> Self {
        Self { fitted: None }
    }

    /// Fit statistics on `data`, replacing any previous fit, and return the
    /// normalized matrix.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidInput`] if `data` has no features or no
    /// samples, [`PreprocessingError::NumericalError`] if a feature's range
    /// is not finite. The previous fit is kept in either case.
    pub fn transform(&mut self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PreprocessingError> {
        let fitted = self.fit(data)?;
        let output = fitted.transform(data)?;
        self.fitted = Some(fitted);
        Ok(output)
    }

    /// Map normalized values back to original units using the last fit.
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
    pub fn fitted(&self) -> Option<&FittedMeanNormalization<B>> {
        self.fitted.as_ref()
    }

    /// Per-feature mean of the last fit.
    pub fn item_mean(&self) -> Option<&Tensor1D<B>> {
        self.fitted.as_ref().map(FittedMeanNormalization::item_mean)
    }

    /// Per-feature minimum of the last fit.
    pub fn item_min(&self) -> Option<&Tensor1D<B>> {
        self.fitted.as_ref().map(FittedMeanNormalization::item_min)
    }

    /// Per-feature maximum of the last fit.
    pub fn item_max(&self) -> Option<&Tensor1D<B>> {
        self.fitted.as_ref().map(FittedMeanNormalization::item_max)
    }

    /// Per-feature divisor of the last fit.
    pub fn scale(&self) -> Option<&Tensor1D<B>> {
        self.fitted.as_ref().map(FittedMeanNormalization::scale)
    }
}

impl<B: Backend> Transformer<B> for MeanNormalization<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = MeanNormalizationParams;
    type Fitted = FittedMeanNormalization<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = check_non_empty(data, "MeanNormalization")?;

        let item_mean = data.row_mean();
        let item_min = data.row_min();
        let item_max = data.row_max();

        let mut degenerate_features = Vec::new();
        let scale_vals = item_max
            .sub(&item_min)
            .to_vec()
            .into_iter()
            .enumerate()
            .map(|(i, range)| {
                if !Float::is_finite(range) {
                    return Err(non_finite_range(i));
                }
                if range.is_zero() {
                    debug!(feature = i, "constant feature, using unit scale");
                    degenerate_features.push(i);
                    Ok(B::Scalar::one())
                } else {
                    Ok(range)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            n_features = rows,
            n_samples = cols,
            degenerate = degenerate_features.len(),
            "fitted MeanNormalization"
        );

        Ok(FittedMeanNormalization {
            item_mean,
            item_min,
            item_max,
            scale: Tensor1D::new(scale_vals),
            degenerate_features,
            n_features: rows,
        })
    }
}

/// Fitted MeanNormalization ready for inference.
#[derive(Clone, Debug)]
pub struct FittedMeanNormalization<B: Backend> {
    item_mean: Tensor1D<B>,
    item_min: Tensor1D<B>,
    item_max: Tensor1D<B>,
    scale: Tensor1D<B>,
    degenerate_features: Vec<usize>,
    n_features: usize,
}

impl<B: Backend> FittedMeanNormalization<B> {
    /// Get the mean of each feature.
    pub fn item_mean(&self) -> &Tensor1D<B> {
        &self.item_mean
    }

    /// Get the minimum of each feature.
    pub fn item_min(&self) -> &Tensor1D<B> {
        &self.item_min
    }

    /// Get the maximum of each feature.
    pub fn item_max(&self) -> &Tensor1D<B> {
        &self.item_max
    }

    /// Get the divisor of each feature. Never zero.
    pub fn scale(&self) -> &Tensor1D<B> {
        &self.scale
    }

    /// Indices of features that were constant at fit time.
    pub fn degenerate_features(&self) -> &[usize] {
        &self.degenerate_features
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

impl<B: Backend> FittedTransformer<B> for FittedMeanNormalization<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = MeanNormalizationParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        self.check_features(data)?;
        trace!(shape = ?data.shape(), "MeanNormalization transform");

        // X_scaled = (X - mean) / scale
        Ok(data.sub_per_row(&self.item_mean).div_per_row(&self.scale))
    }

    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        self.check_features(data)?;
        trace!(shape = ?data.shape(), "MeanNormalization inverse transform");

        // X = X_scaled * scale + mean
        Ok(data.mul_per_row(&self.scale).add_per_row(&self.item_mean))
    }

    fn extract_params(&self) -> Self::Params {
        MeanNormalizationParams {
            item_mean: self.item_mean.to_f64_vec(),
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
                ("item_mean", params.item_mean.len()),
                ("item_min", params.item_min.len()),
                ("item_max", params.item_max.len()),
                ("scale", params.scale.len()),
            ],
            &params.scale,
            &params.degenerate_features,
        )?;

        Ok(Self {
            item_mean: Tensor1D::from_f64_slice(&params.item_mean)?,
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
