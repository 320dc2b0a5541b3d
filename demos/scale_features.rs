// Run with: RUST_LOG=featscale=debug cargo run --example scale_features

use featscale::preprocessing::{FittedTransformer, Transformer};
use featscale::serialization::SerializableParams;
use featscale::{CpuBackend, MeanNormalization, MinMaxScaler, Tensor2D};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three features (rows), five samples (columns). The second feature is constant.
    let data = Tensor2D::<CpuBackend>::from_rows(&[
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
        vec![7.0, 7.0, 7.0, 7.0, 7.0],
        vec![-10.0, 0.0, 10.0, 20.0, 30.0],
    ])?;

    let mut mean_norm = MeanNormalization::<CpuBackend>::new();
    let scaled = mean_norm.transform(&data)?;
    println!("mean normalization:");
    for i in 0..3 {
        println!("  feature {}: {:?}", i, scaled.row(i));
    }
    let restored = mean_norm.inverse_transform(&scaled)?;
    println!("  restored feature 2: {:?}", restored.row(2));

    let fitted = MinMaxScaler::<CpuBackend>::with_range(-1.0, 1.0).fit(&data)?;
    let scaled = fitted.transform(&data)?;
    println!("min-max onto [-1, 1]:");
    for i in 0..3 {
        println!("  feature {}: {:?}", i, scaled.row(i));
    }
    println!("  constant features: {:?}", fitted.degenerate_features());

    // Statistics learned on training data apply to new samples too.
    let unseen = Tensor2D::<CpuBackend>::from_rows(&[vec![6.0], vec![7.0], vec![40.0]])?;
    let projected = fitted.transform(&unseen)?;
    println!("  unseen sample: {:?}", projected.to_vec());

    let bytes = fitted.extract_params().to_bytes()?;
    println!("  serialized parameters: {} bytes", bytes.len());

    Ok(())
}
