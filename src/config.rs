//! Decoder configuration
//!
//! A [`Config`] owns one [`SpecificConfig`] per symbology plus the settings
//! that apply to every decoder. Configurations are created by the
//! [`Registry`](crate::Registry), which assigns the handle and the
//! entitlement, and are shared with decode engines as [`SharedConfig`].

use crate::error::Result;
use crate::models::{
    DecoderSet, DecoderType, DecodingSpeed, Formatting, RegionOfInterest, SpecificConfig,
};
use crate::registry::Handle;
use crate::response::ConfigResponse;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration shared between its owner and decode engines
pub type SharedConfig = Arc<RwLock<Config>>;

/// Decoder configuration
#[derive(Debug)]
pub struct Config {
    handle: Handle,
    entitlement: DecoderSet,
    decoders: [SpecificConfig; DecoderType::COUNT],
    region_of_interest: RegionOfInterest,
    maximum_results_count: i32,
    duplicates_delay_ms: i32,
    custom_params: HashMap<String, i32>,
    /// Slower speeds are more robust on damaged symbols
    pub decoding_speed: DecodingSpeed,
    /// Result formatting mode
    pub formatting: Formatting,
    /// Forced character set name, empty = detect
    pub encoding_character_set: String,
    /// Deblur pass for UPC/EAN
    pub upc_ean_deblur: bool,
    /// Accept curved or skewed 1D symbols
    pub enable_misshaped_1d: bool,
    /// Apply VIN rules to Code 39 / Code 128 / Data Matrix / QR
    pub enable_vin_restrictions: bool,
}

impl Config {
    /// Every decoder disabled, default settings; unregistered until the
    /// registry assigns a handle
    pub(crate) fn new(entitlement: DecoderSet) -> Self {
        Self {
            handle: 0,
            entitlement,
            decoders: DecoderType::ALL.map(SpecificConfig::new),
            region_of_interest: RegionOfInterest::full(),
            maximum_results_count: 1,
            duplicates_delay_ms: 0,
            custom_params: HashMap::new(),
            decoding_speed: DecodingSpeed::default(),
            formatting: Formatting::default(),
            encoding_character_set: String::new(),
            upc_ean_deblur: false,
            enable_misshaped_1d: false,
            enable_vin_restrictions: false,
        }
    }

    /// Field-for-field copy, detached from the lock it was read through
    pub(crate) fn snapshot(&self) -> Self {
        Self {
            handle: self.handle,
            entitlement: self.entitlement,
            decoders: self.decoders.clone(),
            region_of_interest: self.region_of_interest,
            maximum_results_count: self.maximum_results_count,
            duplicates_delay_ms: self.duplicates_delay_ms,
            custom_params: self.custom_params.clone(),
            decoding_speed: self.decoding_speed,
            formatting: self.formatting,
            encoding_character_set: self.encoding_character_set.clone(),
            upc_ean_deblur: self.upc_ean_deblur,
            enable_misshaped_1d: self.enable_misshaped_1d,
            enable_vin_restrictions: self.enable_vin_restrictions,
        }
    }

    pub(crate) fn assign_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    /// Stable identity for engine-side lookup
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Symbologies the license behind this configuration permits
    pub fn entitlement(&self) -> DecoderSet {
        self.entitlement
    }

    /// Whether the license behind this configuration covers `decoder`
    pub fn is_licensed(&self, decoder: DecoderType) -> bool {
        self.entitlement.contains(decoder)
    }

    /// Replace the enabled set
    ///
    /// Requested symbologies the license does not cover are skipped and
    /// reported through a [`ConfigResult::Warning`](crate::ConfigResult::Warning).
    pub fn set_enabled_decoders(&mut self, decoders: &[DecoderType]) -> ConfigResponse {
        let requested: DecoderSet = decoders.iter().copied().collect();
        let mut skipped = DecoderSet::empty();

        for config in self.decoders.iter_mut() {
            let decoder = config.decoder();
            let wanted = requested.contains(decoder);
            if wanted && !self.entitlement.contains(decoder) {
                skipped.insert(decoder);
            }
            config.enabled = wanted && self.entitlement.contains(decoder);
        }

        debug!(
            handle = self.handle,
            enabled = self.enabled_set().len(),
            skipped = skipped.len(),
            "Enabled decoder set replaced"
        );

        if skipped.is_empty() {
            ConfigResponse::ok(None)
        } else {
            let names: Vec<&str> = skipped.iter().map(DecoderType::type_name).collect();
            warn!(handle = self.handle, skipped = ?names, "Unlicensed decoders were not enabled");
            ConfigResponse::warning(format!("Not licensed: {}", names.join(", ")), None)
        }
    }

    /// Enabled symbologies in declaration order
    pub fn enabled_decoders(&self) -> Vec<DecoderType> {
        self.enabled_set().to_vec()
    }

    /// Enabled symbologies as a set
    pub fn enabled_set(&self) -> DecoderSet {
        self.decoders
            .iter()
            .filter(|c| c.enabled)
            .map(SpecificConfig::decoder)
            .collect()
    }

    /// Symbologies the license permits, enabled or not
    pub fn available_decoders(&self) -> Vec<DecoderType> {
        self.entitlement.to_vec()
    }

    /// Whether `decoder` is enabled
    pub fn is_enabled(&self, decoder: DecoderType) -> bool {
        self.config_for_decoder(decoder).enabled
    }

    /// Enable `decoder`; a no-op when the license does not cover it
    pub fn enable(&mut self, decoder: DecoderType) {
        if !self.is_licensed(decoder) {
            debug!(handle = self.handle, %decoder, "Ignoring enable of unlicensed decoder");
            return;
        }
        self.config_for_decoder_mut(decoder).enabled = true;
    }

    /// Disable `decoder`
    pub fn disable(&mut self, decoder: DecoderType) {
        self.config_for_decoder_mut(decoder).enabled = false;
    }

    /// Set both length bounds of `decoder`, see [`SpecificConfig::set_length_range`]
    pub fn set_length_range(&mut self, decoder: DecoderType, minimum: i32, maximum: i32) -> Result<()> {
        self.config_for_decoder_mut(decoder)
            .set_length_range(minimum, maximum)
    }

    /// Minimum length of `decoder`, 0 = unlimited
    pub fn minimum_length(&self, decoder: DecoderType) -> i32 {
        self.config_for_decoder(decoder).minimum_length()
    }

    /// Maximum length of `decoder`, 0 = unlimited
    pub fn maximum_length(&self, decoder: DecoderType) -> i32 {
        self.config_for_decoder(decoder).maximum_length()
    }

    /// Set the expected per-frame count of `decoder`
    pub fn set_expected_count(&mut self, decoder: DecoderType, count: i32) -> Result<()> {
        self.config_for_decoder_mut(decoder).set_expected_count(count)
    }

    /// Expected per-frame count of `decoder`
    pub fn expected_count(&self, decoder: DecoderType) -> i32 {
        self.config_for_decoder(decoder).expected_count()
    }

    /// Display name of `decoder`
    pub fn type_name(&self, decoder: DecoderType) -> &'static str {
        self.config_for_decoder(decoder).type_name()
    }

    /// Set the region of interest, percentages of the frame
    ///
    /// Stored verbatim; the engine clamps against the real frame.
    pub fn set_region_of_interest(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.region_of_interest = RegionOfInterest::new(left, top, width, height);
    }

    /// Region of interest, percentages of the frame
    pub fn region_of_interest(&self) -> RegionOfInterest {
        self.region_of_interest
    }

    /// Per-symbology configuration
    pub fn config_for_decoder(&self, decoder: DecoderType) -> &SpecificConfig {
        &self.decoders[decoder.index()]
    }

    /// Per-symbology configuration, mutable
    pub fn config_for_decoder_mut(&mut self, decoder: DecoderType) -> &mut SpecificConfig {
        &mut self.decoders[decoder.index()]
    }

    /// All per-symbology configurations in declaration order
    pub fn specific_configs(&self) -> &[SpecificConfig] {
        &self.decoders
    }

    /// Upper bound on results returned per frame
    pub fn maximum_results_count(&self) -> i32 {
        self.maximum_results_count
    }

    /// Set the per-frame result cap, at least 1
    pub fn set_maximum_results_count(&mut self, count: i32) -> Result<()> {
        if count < 1 {
            return Err(crate::Error::invalid(format!(
                "maximum results count must be at least 1 (got {})",
                count
            )));
        }
        self.maximum_results_count = count;
        Ok(())
    }

    /// Window in which a repeated result is suppressed, 0 = report every time
    pub fn duplicates_delay_ms(&self) -> i32 {
        self.duplicates_delay_ms
    }

    /// Set the duplicate suppression window
    pub fn set_duplicates_delay_ms(&mut self, delay_ms: i32) -> Result<()> {
        if delay_ms < 0 {
            return Err(crate::Error::invalid(format!(
                "duplicates delay must not be negative (got {})",
                delay_ms
            )));
        }
        self.duplicates_delay_ms = delay_ms;
        Ok(())
    }

    /// Store a free-form tuning parameter
    pub fn set_custom_option(&mut self, option: impl Into<String>, value: i32) {
        self.custom_params.insert(option.into(), value);
    }

    /// Free-form tuning parameter, 0 when never set
    pub fn custom_option(&self, option: &str) -> i32 {
        self.custom_params.get(option).copied().unwrap_or(0)
    }

    /// Every free-form tuning parameter
    pub fn custom_options(&self) -> &HashMap<String, i32> {
        &self.custom_params
    }
}
