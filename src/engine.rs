use crate::config::Config;
use crate::global_options::GlobalSettings;
use image::GrayImage;

/// Decoder backend driven by a [`Config`]
///
/// The registry resolves the handle and passes a copy of the configuration
/// and the global options, both captured at dispatch time. The configuration
/// lock is not held while the engine runs. See
/// [`Registry::decode`](crate::Registry::decode).
pub trait DecodeEngine {
    /// Decoded results
    type Output;

    /// Decode `image` using `config`
    fn decode(&self, config: &Config, settings: &GlobalSettings, image: &GrayImage) -> Self::Output;
}
