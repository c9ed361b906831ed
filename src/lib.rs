//! barcode_registry - symbology configuration for barcode decoding engines
//!
//! Selects which of the 28 supported symbologies a decoder runs, tunes
//! per-symbology parameters (length ranges, checksum modes, expected counts),
//! gates symbologies by license, and hands decode engines a configuration
//! they can resolve by integer handle.
//!
//! # Example
//! ```
//! use barcode_registry::{DecoderType, LicenseGrant, Registry, StaticLicenseService};
//!
//! let service = StaticLicenseService::new().with_key("KEY", LicenseGrant::full("device-1"));
//! let registry = Registry::new(service);
//!
//! let response = registry.initialize_with_license_key("KEY");
//! let config = response.into_config().expect("licensed");
//! let handle = {
//!     let mut config = config.write();
//!     config.set_enabled_decoders(&[DecoderType::QR, DecoderType::Code128]);
//!     config.set_length_range(DecoderType::Code128, 4, 20).unwrap();
//!     config.handle()
//! };
//!
//! let resolved = registry.get_by_handle(handle).unwrap();
//! assert!(resolved.read().is_enabled(DecoderType::QR));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Decoder configuration aggregate
pub mod config;
/// Decode engine contract
pub mod engine;
mod env;
/// Error types
pub mod error;
/// Registry-wide options (threads, GPU, multicode caching)
pub mod global_options;
/// License validation boundary
pub mod license;
/// Core data types (DecoderType, SpecificConfig, RegionOfInterest, ...)
pub mod models;
/// Factory, license gate and handle registry
pub mod registry;
/// Result envelope for configuration operations
pub mod response;

pub use config::{Config, SharedConfig};
pub use engine::DecodeEngine;
pub use error::{Error, Result};
pub use global_options::{GlobalOption, GlobalOptions, GlobalSettings};
pub use license::{LicenseError, LicenseGrant, LicenseService, StaticLicenseService, trial_decoders};
pub use models::{
    Checksum, Code11Checksum, DecoderParams, DecoderSet, DecoderType, DecodingSpeed, Formatting,
    MsiChecksum, PixelRect, RegionOfInterest, SpecificConfig,
};
pub use registry::{Handle, Registry};
pub use response::{ConfigResponse, ConfigResult};

/// Library version
pub fn lib_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
