use super::scalar::ScalarOps;
use crate::backend::Backend;
use crate::preprocessing::PreprocessingError;
use num_traits::Float;
use std::marker::PhantomData;

/// Backend-typed 1D tensor, used for per-feature statistics.
///
/// Wraps a backend's native 1D representation (`B::Tensor1D`) while carrying
/// phantom type information about its originating backend, so statistics
/// fitted on one backend cannot be mixed with tensors of another.
///
/// ```compile_fail
/// use featscale::backend::{CpuBackend, Tensor1D};
///
/// let a: Tensor1D<CpuBackend<f64>> = Tensor1D::new(vec![1.0]);
/// let b: Tensor1D<CpuBackend<f32>> = Tensor1D::new(vec![1.0]);
/// let _ = a.sub(&b); // mismatched backends
/// ```
///
/// # Example
/// ```
/// use featscale::backend::{CpuBackend, Tensor1D};
///
/// let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.0, 3.0]);
/// assert_eq!(x.len(), 3);
/// assert_eq!(x.to_vec(), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor1D<B> {
    /// Creates a new 1D tensor from values in the backend's precision.
    pub fn new(data: Vec<B::Scalar>) -> Self {
        Self::from_raw(B::from_vec_1d(data))
    }

    pub(crate) fn from_raw(data: B::Tensor1D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Builds a tensor from persisted `f64` values.
    ///
    /// # Errors
    /// [`PreprocessingError::NumericalError`] if a finite value overflows the
    /// backend's element type.
    pub fn from_f64_slice(values: &[f64]) -> Result<Self, PreprocessingError> {
        let converted = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = B::Scalar::from_f64(v);
                if v.is_finite() && !x.is_finite() {
                    Err(PreprocessingError::NumericalError(format!(
                        "value {} at index {} is out of range for the element type",
                        v, i
                    )))
                } else {
                    Ok(x)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(converted))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    /// Returns `true` if the tensor has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element-wise `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Self::from_raw(B::sub_1d(&self.data, &other.data))
    }

    /// Copies the values into a host vector.
    pub fn to_vec(&self) -> Vec<B::Scalar> {
        B::to_vec_1d(&self.data)
    }

    /// Copies the values into a host vector widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.to_vec().into_iter().map(ScalarOps::to_f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_sub() {
        let a = Tensor1D::<CpuBackend>::new(vec![5.0, 7.0, 9.0]);
        let b = Tensor1D::<CpuBackend>::new(vec![2.0, 3.0, 4.0]);
        assert_eq!(a.sub(&b).to_vec(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_from_f64_slice_f32_overflow() {
        let result = Tensor1D::<CpuBackend<f32>>::from_f64_slice(&[1.0, 1e300]);
        assert!(matches!(result, Err(PreprocessingError::NumericalError(_))));
    }

    #[test]
    fn test_from_f64_slice_keeps_infinities() {
        let t = Tensor1D::<CpuBackend<f32>>::from_f64_slice(&[f64::INFINITY]).unwrap();
        assert!(t.to_vec()[0].is_infinite());
    }

    #[test]
    fn test_empty() {
        let t = Tensor1D::<CpuBackend>::new(vec![]);
        assert!(t.is_empty());
    }
}
