//! scipi-qr - branded QR code assets for scipi.ro
//!
//! Renders the two dark-theme QR images the website ships with: a styled
//! variant on a rounded card with a glowing logo badge, and a simple variant
//! with the logo badge drawn straight onto the symbol.
//!
//! # Example
//!
//! ```no_run
//! use scipi_qr::{AssetConfig, AssetGenerator};
//!
//! fn main() -> scipi_qr::Result<()> {
//!     let generator = AssetGenerator::new(AssetConfig::default());
//!     for asset in generator.generate()? {
//!         generator.verify(&asset)?;
//!         println!("{} -> {}", asset.variant, asset.path.display());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod canvas;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use canvas::Logo;
pub use config::{AssetConfig, LogRotation, LoggingOptions};
pub use generator::{AssetGenerator, GeneratedAsset, Variant, render_simple, render_styled};
pub use qr::{QrDecoder, QrEncoder, QrPayload, QrSymbol, SymbolStyle};
