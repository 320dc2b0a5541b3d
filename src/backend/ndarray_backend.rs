use super::scalar::running_mean;
use super::{Backend, ScalarOps};
use ndarray::{Array1, Array2, Axis};
use std::marker::PhantomData;

/// Backend storing matrices as `ndarray::Array2<F>`.
///
/// # Type mappings
/// - `Scalar`: `F` (`f32` or `f64`)
/// - `Tensor1D`: `ndarray::Array1<F>`
/// - `Tensor2D`: [`NdarrayTensor2D`] wrapper around `ndarray::Array2<F>`
#[derive(Clone, Copy, Debug, Default)]
pub struct NdarrayBackend<F = f64>(PhantomData<F>);

/// Wrapper type for 2D tensors using ndarray's `Array2<F>`.
///
/// # Example
/// ```
/// use featscale::backend::ndarray_backend::NdarrayTensor2D;
///
/// let tensor = NdarrayTensor2D::from(&[
///     vec![1.0f64, 2.0, 3.0],
///     vec![4.0f64, 5.0, 6.0],
/// ][..]);
/// assert_eq!(tensor.0.shape(), &[2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct NdarrayTensor2D<F>(pub Array2<F>);

impl<F: Copy> From<&[Vec<F>]> for NdarrayTensor2D<F> {
    /// Converts a slice of row vectors into a 2D tensor.
    ///
    /// # Panics
    /// Panics if rows have inconsistent lengths.
    fn from(x: &[Vec<F>]) -> Self {
        let rows = x.len();
        let cols = x.first().map_or(0, Vec::len);
        assert!(
            x.iter().all(|r| r.len() == cols),
            "All rows must have same length"
        );
        NdarrayTensor2D(Array2::from_shape_fn((rows, cols), |(i, j)| x[i][j]))
    }
}

impl<F: Copy> From<Array2<F>> for NdarrayTensor2D<F> {
    fn from(a: Array2<F>) -> Self {
        NdarrayTensor2D(a)
    }
}

/// Column view of a per-feature vector, broadcastable against `(rows, cols)`.
fn per_row<F>(v: &Array1<F>) -> ndarray::ArrayView2<'_, F> {
    v.view().insert_axis(Axis(1))
}

impl<F: ScalarOps> Backend for NdarrayBackend<F> {
    type Scalar = F;
    type Tensor1D = Array1<F>;
    type Tensor2D = NdarrayTensor2D<F>;

    // --- Constructors ---

    fn from_vec_1d(data: Vec<F>) -> Self::Tensor1D {
        Array1::from(data)
    }

    fn from_vec_2d(data: Vec<F>, rows: usize, cols: usize) -> Self::Tensor2D {
        assert_eq!(data.len(), rows * cols, "Inconsistent shape");
        NdarrayTensor2D(Array2::from_shape_fn((rows, cols), |(i, j)| {
            data[i * cols + j]
        }))
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(Array2::from_elem((rows, cols), F::zero()))
    }

    // --- Access ---

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        t.0.dim()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<F> {
        t.to_vec()
    }

    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<F> {
        t.0.iter().copied().collect()
    }

    fn row_2d(t: &Self::Tensor2D, i: usize) -> Vec<F> {
        t.0.row(i).to_vec()
    }

    fn get_2d(t: &Self::Tensor2D, i: usize, j: usize) -> F {
        t.0[[i, j]]
    }

    // --- Row-wise reductions ---

    fn row_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.map_axis(Axis(1), |row| running_mean(row.iter().copied()))
    }

    fn row_min_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.map_axis(Axis(1), |row| {
            row.iter().copied().fold(F::infinity(), F::min)
        })
    }

    fn row_max_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.map_axis(Axis(1), |row| {
            row.iter().copied().fold(F::neg_infinity(), F::max)
        })
    }

    // --- Element-wise ops ---

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a - b
    }

    fn add_scalar_2d(t: &Self::Tensor2D, s: F) -> Self::Tensor2D {
        NdarrayTensor2D(t.0.mapv(|x| x + s))
    }

    // --- Broadcasting ---

    fn broadcast_sub_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 - &per_row(v))
    }

    fn broadcast_add_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 + &per_row(v))
    }

    fn broadcast_mul_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 * &per_row(v))
    }

    fn broadcast_div_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 / &per_row(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Nd = NdarrayBackend<f64>;

    fn tensor2d_from(data: &[Vec<f64>]) -> NdarrayTensor2D<f64> {
        NdarrayTensor2D::from(data)
    }

    #[test]
    fn test_from_vec_2d_row_major() {
        let t = Nd::from_vec_2d(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        assert_eq!(t.0[[0, 2]], 3.0);
        assert_eq!(t.0[[1, 0]], 4.0);
        assert_eq!(Nd::to_vec_2d(&t), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_row_reductions() {
        let t = tensor2d_from(&[vec![1.0, 5.0, 3.0], vec![-2.0, -2.0, -8.0]]);
        assert_eq!(Nd::row_mean_2d(&t).to_vec(), vec![3.0, -4.0]);
        assert_eq!(Nd::row_min_2d(&t).to_vec(), vec![1.0, -8.0]);
        assert_eq!(Nd::row_max_2d(&t).to_vec(), vec![5.0, -2.0]);
    }

    #[test]
    fn test_broadcast_per_row() {
        let t = tensor2d_from(&[vec![2.0, 4.0], vec![9.0, 12.0]]);
        let v = Array1::from(vec![2.0, 3.0]);
        assert_eq!(Nd::to_vec_2d(&Nd::broadcast_div_1d_per_row(&t, &v)), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Nd::to_vec_2d(&Nd::broadcast_sub_1d_per_row(&t, &v)), vec![0.0, 2.0, 6.0, 9.0]);
    }

    #[test]
    fn test_row_mean_large_values() {
        let t = tensor2d_from(&[vec![1e308, 1e308], vec![-1e308, 1e308]]);
        assert_eq!(Nd::row_mean_2d(&t).to_vec(), vec![1e308, 0.0]);
    }

    #[test]
    fn test_row_and_get() {
        let t = tensor2d_from(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(Nd::row_2d(&t, 1), vec![3.0, 4.0]);
        assert_eq!(Nd::get_2d(&t, 0, 1), 2.0);
    }

    #[test]
    fn test_f32_backend() {
        let t = NdarrayBackend::<f32>::from_vec_2d(vec![1.0, 3.0], 1, 2);
        assert_eq!(NdarrayBackend::<f32>::row_mean_2d(&t).to_vec(), vec![2.0f32]);
    }
}
