// Run with: cargo run --example scale_features_ndarray --features ndarray

use featscale::preprocessing::{FittedTransformer, Transformer};
use featscale::{MeanNormalization, MinMaxScaler, NdarrayBackend, Tensor2D};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data = Tensor2D::<NdarrayBackend>::from_rows(&[
        vec![0.5, 1.5, 2.5, 3.5],
        vec![100.0, 300.0, 200.0, 400.0],
    ])?;

    let fitted = MeanNormalization::<NdarrayBackend>::new().fit(&data)?;
    let scaled = fitted.transform(&data)?;
    println!("means: {:?}", fitted.item_mean().to_vec());
    println!("scaled: {:?}", scaled.to_vec());
    println!("restored: {:?}", fitted.inverse_transform(&scaled)?.to_vec());

    let mut minmax = MinMaxScaler::<NdarrayBackend>::new();
    let scaled = minmax.transform(&data)?;
    println!("min-max: {:?}", scaled.to_vec());
    println!("restored: {:?}", minmax.inverse_transform(&scaled)?.to_vec());

    Ok(())
}
