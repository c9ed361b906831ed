/// Symbology identifiers and sets
pub mod decoder_type;
/// Enumerated option values
pub mod options;
/// Region of interest
pub mod region;
/// Per-symbology configuration
pub mod specific_config;

pub use decoder_type::{DecoderSet, DecoderType};
pub use options::{Checksum, Code11Checksum, DecodingSpeed, Formatting, MsiChecksum};
pub use region::{PixelRect, RegionOfInterest};
pub use specific_config::{DecoderParams, SpecificConfig};
