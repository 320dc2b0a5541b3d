use num_traits::Float;
use std::fmt::Debug;

/// Element type of a backend's tensors.
///
/// Builds on [`num_traits::Float`] for arithmetic, comparisons, `zero()`/`one()`
/// and infinities, and adds the host conversions the scalers need when
/// persisting parameters (always stored as `f64`).
///
/// # Example
/// ```
/// use featscale::backend::ScalarOps;
///
/// assert_eq!(<f32 as ScalarOps>::from_f64(0.5), 0.5f32);
/// assert_eq!(2.5f32.to_f64(), 2.5);
/// assert_eq!(<f64 as ScalarOps>::from_usize(4), 4.0);
/// ```
pub trait ScalarOps: Float + Debug + Default + Send + Sync + 'static {
    /// Converts an `f64` host value to this type, rounding if needed.
    ///
    /// Values beyond this type's range become infinite.
    fn from_f64(v: f64) -> Self;

    /// Widens this value to `f64`.
    fn to_f64(self) -> f64;

    /// Converts a count (e.g. number of samples) to this type.
    fn from_usize(n: usize) -> Self;
}

impl ScalarOps for f64 {
    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn from_usize(n: usize) -> Self {
        n as f64
    }
}

impl ScalarOps for f32 {
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_usize(n: usize) -> Self {
        n as f32
    }
}

/// Incremental mean, `m_k = m_{k-1} + (x_k - m_{k-1}) / k`.
///
/// Stays finite for finite input where a plain sum would overflow, and
/// returns the value itself for a constant sequence. `NaN` when empty.
pub(crate) fn running_mean<F, I>(values: I) -> F
where
    F: ScalarOps,
    I: IntoIterator<Item = F>,
{
    let mut mean = F::zero();
    let mut count = 0usize;
    for x in values {
        count += 1;
        let n = F::from_usize(count);
        let mut step = (x - mean) / n;
        if !step.is_finite() {
            // x and mean have opposite signs near the type's limit
            step = x / n - mean / n;
        }
        mean = mean + step;
    }
    if count == 0 {
        F::nan()
    } else {
        mean
    }
}
