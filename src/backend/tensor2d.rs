use super::tensor1d::Tensor1D;
use crate::backend::Backend;
use crate::preprocessing::PreprocessingError;
use std::marker::PhantomData;

/// Backend-typed feature matrix: rows are features, columns are samples.
///
/// # Example
/// ```
/// use featscale::backend::{CpuBackend, Tensor2D};
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(x.shape(), (2, 2));
/// assert_eq!(x.get(1, 0), 3.0);
/// ```
#[derive(Clone, Debug)]
pub struct Tensor2D<B: Backend> {
    pub(crate) data: B::Tensor2D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor2D<B> {
    /// Creates a matrix from row-major data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    pub fn new(data: Vec<B::Scalar>, rows: usize, cols: usize) -> Self {
        Self::from_raw(B::from_vec_2d(data, rows, cols))
    }

    /// Creates a matrix from one vector per feature.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidInput`] if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<B::Scalar>]) -> Result<Self, PreprocessingError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(i) = rows.iter().position(|r| r.len() != cols) {
            return Err(PreprocessingError::InvalidInput(format!(
                "row {} has {} columns, expected {}",
                i,
                rows[i].len(),
                cols
            )));
        }
        let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Ok(Self::new(data, rows.len(), cols))
    }

    /// Creates a matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_raw(B::zeros_2d(rows, cols))
    }

    pub(crate) fn from_raw(data: B::Tensor2D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Returns `(features, samples)`.
    pub fn shape(&self) -> (usize, usize) {
        B::shape(&self.data)
    }

    /// Copies the values into a host vector in row-major order.
    pub fn to_vec(&self) -> Vec<B::Scalar> {
        B::to_vec_2d(&self.data)
    }

    /// Copies row `i` (one feature across all samples).
    ///
    /// # Panics
    /// If `i` is out of bounds.
    pub fn row(&self, i: usize) -> Vec<B::Scalar> {
        B::row_2d(&self.data, i)
    }

    /// Element at feature `i`, sample `j`.
    ///
    /// # Panics
    /// If the index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> B::Scalar {
        B::get_2d(&self.data, i, j)
    }

    /// Per-feature mean.
    pub fn row_mean(&self) -> Tensor1D<B> {
        Tensor1D::from_raw(B::row_mean_2d(&self.data))
    }

    /// Per-feature minimum.
    pub fn row_min(&self) -> Tensor1D<B> {
        Tensor1D::from_raw(B::row_min_2d(&self.data))
    }

    /// Per-feature maximum.
    pub fn row_max(&self) -> Tensor1D<B> {
        Tensor1D::from_raw(B::row_max_2d(&self.data))
    }

    /// Adds `s` to every element.
    pub fn add_scalar(&self, s: B::Scalar) -> Self {
        Self::from_raw(B::add_scalar_2d(&self.data, s))
    }

    /// Subtracts `v[i]` from every element of row `i`.
    pub fn sub_per_row(&self, v: &Tensor1D<B>) -> Self {
        Self::from_raw(B::broadcast_sub_1d_per_row(&self.data, &v.data))
    }

    /// Adds `v[i]` to every element of row `i`.
    pub fn add_per_row(&self, v: &Tensor1D<B>) -> Self {
        Self::from_raw(B::broadcast_add_1d_per_row(&self.data, &v.data))
    }

    /// Multiplies every element of row `i` by `v[i]`.
    pub fn mul_per_row(&self, v: &Tensor1D<B>) -> Self {
        Self::from_raw(B::broadcast_mul_1d_per_row(&self.data, &v.data))
    }

    /// Divides every element of row `i` by `v[i]`.
    pub fn div_per_row(&self, v: &Tensor1D<B>) -> Self {
        Self::from_raw(B::broadcast_div_1d_per_row(&self.data, &v.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    fn sample() -> Tensor2D<CpuBackend> {
        // feature 0: [1, 2, 3], feature 1: [10, 40, 70]
        Tensor2D::new(vec![1.0, 2.0, 3.0, 10.0, 40.0, 70.0], 2, 3)
    }

    #[test]
    fn test_row_reductions() {
        let x = sample();
        assert_eq!(x.row_mean().to_vec(), vec![2.0, 40.0]);
        assert_eq!(x.row_min().to_vec(), vec![1.0, 10.0]);
        assert_eq!(x.row_max().to_vec(), vec![3.0, 70.0]);
    }

    #[test]
    fn test_broadcast_per_row() {
        let x = sample();
        let v = Tensor1D::new(vec![1.0, 10.0]);
        assert_eq!(
            x.sub_per_row(&v).to_vec(),
            vec![0.0, 1.0, 2.0, 0.0, 30.0, 60.0]
        );
        assert_eq!(
            x.div_per_row(&v).to_vec(),
            vec![1.0, 2.0, 3.0, 1.0, 4.0, 7.0]
        );
        assert_eq!(x.mul_per_row(&v).row(1), vec![100.0, 400.0, 700.0]);
        assert_eq!(x.add_per_row(&v).row(0), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(PreprocessingError::InvalidInput(_))));
    }

    #[test]
    fn test_from_rows_empty() {
        let x = Tensor2D::<CpuBackend>::from_rows(&[]).unwrap();
        assert_eq!(x.shape(), (0, 0));
    }

    #[test]
    fn test_add_scalar_and_get() {
        let x = sample().add_scalar(0.5);
        assert_eq!(x.get(0, 2), 3.5);
    }

    #[test]
    #[should_panic]
    fn test_new_inconsistent_shape() {
        let _ = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0], 2, 2);
    }
}
