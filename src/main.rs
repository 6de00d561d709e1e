//! Writes the dark QR code assets for scipi.ro into `public/`

use anyhow::Context;
use scipi_qr::{AssetConfig, AssetGenerator, logging};
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let config = AssetConfig::load(None).context("failed to load configuration")?;
    logging::init(&config.logging).context("failed to initialise logging")?;

    let generator = AssetGenerator::new(config);
    let assets = generator
        .generate()
        .context("failed to generate QR assets")?;

    for asset in &assets {
        println!("{} QR code saved to {}", asset.variant, asset.path.display());
        if let Err(err) = generator.verify(asset) {
            warn!("{err}");
        }
    }

    Ok(())
}
