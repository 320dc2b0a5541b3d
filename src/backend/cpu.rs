use super::scalar::running_mean;
use super::{Backend, ScalarOps};
use std::marker::PhantomData;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Pure-Rust backend storing matrices as row-major `Vec<F>`.
///
/// With the `parallel` feature, per-row work runs on rayon's global pool.
/// Each row is processed independently, so results are identical either way.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend<F = f64>(PhantomData<F>);

/// Row-major matrix: `(data, rows, cols)`.
#[derive(Debug, Clone)]
pub struct CpuTensor2D<F>(pub Vec<F>, pub usize, pub usize);

impl<F> CpuTensor2D<F> {
    pub fn new(data: Vec<F>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "Inconsistent shape");
        Self(data, rows, cols)
    }
}

impl<F: Copy> From<&[Vec<F>]> for CpuTensor2D<F> {
    fn from(x: &[Vec<F>]) -> Self {
        if x.is_empty() {
            return CpuTensor2D::new(Vec::new(), 0, 0);
        }
        let rows = x.len();
        let cols = x[0].len();
        assert!(
            x.iter().all(|row| row.len() == cols),
            "All rows must have same length"
        );
        let data: Vec<F> = x.iter().flat_map(|row| row.iter()).copied().collect();
        CpuTensor2D::new(data, rows, cols)
    }
}

/// Applies `op(x, v[i])` to every element `x` of row `i`.
fn map_per_row<F, Op>(t: &CpuTensor2D<F>, v: &[F], op: Op) -> CpuTensor2D<F>
where
    F: ScalarOps,
    Op: Fn(F, F) -> F + Send + Sync,
{
    assert_eq!(v.len(), t.1, "Broadcast length must match row count");
    let mut out = t.0.clone();
    if t.2 == 0 {
        return CpuTensor2D::new(out, t.1, t.2);
    }

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(t.2)
        .zip(v.par_iter())
        .for_each(|(row, &s)| row.iter_mut().for_each(|x| *x = op(*x, s)));

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(t.2)
        .zip(v.iter())
        .for_each(|(row, &s)| row.iter_mut().for_each(|x| *x = op(*x, s)));

    CpuTensor2D::new(out, t.1, t.2)
}

/// Reduces every row to a single value.
fn reduce_rows<F, R>(t: &CpuTensor2D<F>, reduce: R) -> Vec<F>
where
    F: ScalarOps,
    R: Fn(&[F]) -> F + Send + Sync,
{
    if t.2 == 0 {
        return (0..t.1).map(|_| reduce(&[])).collect();
    }

    #[cfg(feature = "parallel")]
    let out = t.0.par_chunks(t.2).map(|row| reduce(row)).collect();

    #[cfg(not(feature = "parallel"))]
    let out = t.0.chunks(t.2).map(|row| reduce(row)).collect();

    out
}

impl<F: ScalarOps> Backend for CpuBackend<F> {
    type Scalar = F;
    type Tensor1D = Vec<F>;
    type Tensor2D = CpuTensor2D<F>;

    // --- Constructors ---
    fn from_vec_1d(data: Vec<F>) -> Self::Tensor1D {
        data
    }
    fn from_vec_2d(data: Vec<F>, rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(data, rows, cols)
    }
    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(vec![F::zero(); rows * cols], rows, cols)
    }

    // --- Access ---
    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        (t.1, t.2)
    }
    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<F> {
        t.clone()
    }
    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<F> {
        t.0.clone()
    }
    fn row_2d(t: &Self::Tensor2D, i: usize) -> Vec<F> {
        assert!(i < t.1, "row {} out of bounds for {} rows", i, t.1);
        t.0[i * t.2..(i + 1) * t.2].to_vec()
    }
    fn get_2d(t: &Self::Tensor2D, i: usize, j: usize) -> F {
        assert!(i < t.1 && j < t.2, "index ({}, {}) out of bounds", i, j);
        t.0[i * t.2 + j]
    }

    // --- Row-wise reductions ---
    fn row_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        reduce_rows(t, |row| running_mean(row.iter().copied()))
    }
    fn row_min_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        reduce_rows(t, |row| row.iter().copied().fold(F::infinity(), F::min))
    }
    fn row_max_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        reduce_rows(t, |row| row.iter().copied().fold(F::neg_infinity(), F::max))
    }

    // --- Element-wise ops ---
    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a.iter().zip(b.iter()).map(|(&a, &b)| a - b).collect()
    }
    fn add_scalar_2d(t: &Self::Tensor2D, s: F) -> Self::Tensor2D {
        CpuTensor2D::new(t.0.iter().map(|&x| x + s).collect(), t.1, t.2)
    }

    // --- Broadcasting ---
    fn broadcast_sub_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        map_per_row(t, v, |x, s| x - s)
    }
    fn broadcast_add_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        map_per_row(t, v, |x, s| x + s)
    }
    fn broadcast_mul_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        map_per_row(t, v, |x, s| x * s)
    }
    fn broadcast_div_1d_per_row(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        map_per_row(t, v, |x, s| x / s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Cpu = CpuBackend<f64>;

    #[test]
    fn test_from_nested_vec() {
        let t = CpuTensor2D::from(&[vec![1.0, 2.0], vec![3.0, 4.0]][..]);
        assert_eq!(Cpu::shape(&t), (2, 2));
        assert_eq!(Cpu::to_vec_2d(&t), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_row_min_max_skip_nan() {
        let t = Cpu::from_vec_2d(vec![3.0, f64::NAN, 1.0], 1, 3);
        assert_eq!(Cpu::row_min_2d(&t), vec![1.0]);
        assert_eq!(Cpu::row_max_2d(&t), vec![3.0]);
    }

    #[test]
    fn test_row_mean_f32() {
        let t = CpuBackend::<f32>::from_vec_2d(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        assert_eq!(CpuBackend::<f32>::row_mean_2d(&t), vec![1.5, 3.5]);
    }

    #[test]
    fn test_zero_columns() {
        let t = Cpu::zeros_2d(2, 0);
        let v = vec![1.0, 2.0];
        let out = Cpu::broadcast_sub_1d_per_row(&t, &v);
        assert_eq!(Cpu::shape(&out), (2, 0));
        assert_eq!(Cpu::row_min_2d(&t), vec![f64::INFINITY, f64::INFINITY]);
    }

    #[test]
    fn test_row_mean_large_constant_row() {
        let t = Cpu::from_vec_2d(vec![1e308, 1e308, -3.0, 5.0], 2, 2);
        assert_eq!(Cpu::row_mean_2d(&t), vec![1e308, 1.0]);
    }

    #[test]
    fn test_row_and_get() {
        let t = Cpu::from_vec_2d(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        assert_eq!(Cpu::row_2d(&t, 1), vec![4.0, 5.0, 6.0]);
        assert_eq!(Cpu::get_2d(&t, 0, 2), 3.0);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_bounds() {
        let t = Cpu::zeros_2d(2, 2);
        let _ = Cpu::row_2d(&t, 2);
    }

    #[test]
    #[should_panic]
    fn test_broadcast_length_mismatch() {
        let t = Cpu::zeros_2d(2, 2);
        let _ = Cpu::broadcast_mul_1d_per_row(&t, &vec![1.0]);
    }
}
