//! Per-symbology configuration
//!
//! Every symbology shares the same base fields (enabled flag, length range,
//! expected count). Symbology-specific knobs live in [`DecoderParams`], a
//! closed sum type with exactly one variant per [`DecoderType`].

use super::decoder_type::{DecoderSet, DecoderType};
use super::options::{Checksum, Code11Checksum, MsiChecksum};
use crate::error::{Error, Result};

/// Symbology-specific parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderParams {
    /// Aztec
    Aztec,
    /// Aztec compact
    AztecCompact,
    /// QR
    QR {
        /// Merge structured-append parts into one result
        multi_part_merge: bool,
    },
    /// Micro QR
    QRMicro,
    /// Code 128
    Code128,
    /// Code 93
    Code93,
    /// Code 39
    Code39 {
        /// Mod 43 check digit
        checksum: Checksum,
    },
    /// Codabar
    Codabar,
    /// Code 11
    Code11 {
        /// C / K check digits
        checksum: Code11Checksum,
    },
    /// MSI
    Msi {
        /// Check digit algorithm
        checksum: MsiChecksum,
    },
    /// UPC-A
    UpcA,
    /// UPC-E
    UpcE {
        /// Report the expanded UPC-A number
        expand_to_upca: bool,
    },
    /// UPC-E1
    UpcE1 {
        /// Report the expanded UPC-A number
        expand_to_upca: bool,
    },
    /// EAN-13
    Ean13,
    /// EAN-8
    Ean8,
    /// PDF417
    PDF417,
    /// MicroPDF417
    PDF417Micro,
    /// Data Matrix
    Datamatrix {
        /// Direct part marking (dot peen / laser etched) mode
        dpm_mode: bool,
    },
    /// Standard 2 of 5
    Code25 {
        /// Check digit
        checksum: Checksum,
    },
    /// Interleaved 2 of 5
    Interleaved25 {
        /// Check digit
        checksum: Checksum,
    },
    /// ITF-14
    ITF14,
    /// IATA 2 of 5
    IATA25 {
        /// Check digit
        checksum: Checksum,
    },
    /// Matrix 2 of 5
    Matrix25 {
        /// Check digit
        checksum: Checksum,
    },
    /// Datalogic 2 of 5
    Datalogic25 {
        /// Check digit
        checksum: Checksum,
    },
    /// COOP 2 of 5
    COOP25 {
        /// Check digit
        checksum: Checksum,
    },
    /// Code 32
    Code32,
    /// Telepen
    Telepen,
    /// DotCode
    Dotcode,
}

impl DecoderParams {
    /// Default parameters for a symbology
    pub fn for_decoder(decoder: DecoderType) -> Self {
        match decoder {
            DecoderType::Aztec => DecoderParams::Aztec,
            DecoderType::AztecCompact => DecoderParams::AztecCompact,
            DecoderType::QR => DecoderParams::QR {
                multi_part_merge: false,
            },
            DecoderType::QRMicro => DecoderParams::QRMicro,
            DecoderType::Code128 => DecoderParams::Code128,
            DecoderType::Code93 => DecoderParams::Code93,
            DecoderType::Code39 => DecoderParams::Code39 {
                checksum: Checksum::Disabled,
            },
            DecoderType::Codabar => DecoderParams::Codabar,
            DecoderType::Code11 => DecoderParams::Code11 {
                checksum: Code11Checksum::Disabled,
            },
            DecoderType::Msi => DecoderParams::Msi {
                checksum: MsiChecksum::Mod10,
            },
            DecoderType::UpcA => DecoderParams::UpcA,
            DecoderType::UpcE => DecoderParams::UpcE {
                expand_to_upca: false,
            },
            DecoderType::UpcE1 => DecoderParams::UpcE1 {
                expand_to_upca: false,
            },
            DecoderType::Ean13 => DecoderParams::Ean13,
            DecoderType::Ean8 => DecoderParams::Ean8,
            DecoderType::PDF417 => DecoderParams::PDF417,
            DecoderType::PDF417Micro => DecoderParams::PDF417Micro,
            DecoderType::Datamatrix => DecoderParams::Datamatrix { dpm_mode: false },
            DecoderType::Code25 => DecoderParams::Code25 {
                checksum: Checksum::Disabled,
            },
            DecoderType::Interleaved25 => DecoderParams::Interleaved25 {
                checksum: Checksum::Disabled,
            },
            DecoderType::ITF14 => DecoderParams::ITF14,
            DecoderType::IATA25 => DecoderParams::IATA25 {
                checksum: Checksum::Disabled,
            },
            DecoderType::Matrix25 => DecoderParams::Matrix25 {
                checksum: Checksum::Disabled,
            },
            DecoderType::Datalogic25 => DecoderParams::Datalogic25 {
                checksum: Checksum::Disabled,
            },
            DecoderType::COOP25 => DecoderParams::COOP25 {
                checksum: Checksum::Disabled,
            },
            DecoderType::Code32 => DecoderParams::Code32,
            DecoderType::Telepen => DecoderParams::Telepen,
            DecoderType::Dotcode => DecoderParams::Dotcode,
        }
    }

    /// Symbology these parameters belong to
    pub fn decoder(&self) -> DecoderType {
        match self {
            DecoderParams::Aztec => DecoderType::Aztec,
            DecoderParams::AztecCompact => DecoderType::AztecCompact,
            DecoderParams::QR { .. } => DecoderType::QR,
            DecoderParams::QRMicro => DecoderType::QRMicro,
            DecoderParams::Code128 => DecoderType::Code128,
            DecoderParams::Code93 => DecoderType::Code93,
            DecoderParams::Code39 { .. } => DecoderType::Code39,
            DecoderParams::Codabar => DecoderType::Codabar,
            DecoderParams::Code11 { .. } => DecoderType::Code11,
            DecoderParams::Msi { .. } => DecoderType::Msi,
            DecoderParams::UpcA => DecoderType::UpcA,
            DecoderParams::UpcE { .. } => DecoderType::UpcE,
            DecoderParams::UpcE1 { .. } => DecoderType::UpcE1,
            DecoderParams::Ean13 => DecoderType::Ean13,
            DecoderParams::Ean8 => DecoderType::Ean8,
            DecoderParams::PDF417 => DecoderType::PDF417,
            DecoderParams::PDF417Micro => DecoderType::PDF417Micro,
            DecoderParams::Datamatrix { .. } => DecoderType::Datamatrix,
            DecoderParams::Code25 { .. } => DecoderType::Code25,
            DecoderParams::Interleaved25 { .. } => DecoderType::Interleaved25,
            DecoderParams::ITF14 => DecoderType::ITF14,
            DecoderParams::IATA25 { .. } => DecoderType::IATA25,
            DecoderParams::Matrix25 { .. } => DecoderType::Matrix25,
            DecoderParams::Datalogic25 { .. } => DecoderType::Datalogic25,
            DecoderParams::COOP25 { .. } => DecoderType::COOP25,
            DecoderParams::Code32 => DecoderType::Code32,
            DecoderParams::Telepen => DecoderType::Telepen,
            DecoderParams::Dotcode => DecoderType::Dotcode,
        }
    }
}

/// Minimum symbol length a decoder can physically read, 0 when unrestricted
fn default_minimum_length(decoder: DecoderType) -> i32 {
    match decoder {
        DecoderType::Msi => 5,
        DecoderType::Codabar => 4,
        _ => 0,
    }
}

/// Configuration for one symbology
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificConfig {
    /// Whether the decoder runs at all
    pub enabled: bool,
    minimum_length: i32,
    maximum_length: i32,
    expected_count: i32,
    params: DecoderParams,
}

impl SpecificConfig {
    /// Disabled configuration with the symbology's default parameters
    pub fn new(decoder: DecoderType) -> Self {
        Self {
            enabled: false,
            minimum_length: default_minimum_length(decoder),
            maximum_length: 0,
            expected_count: 0,
            params: DecoderParams::for_decoder(decoder),
        }
    }

    /// Symbology this configuration belongs to
    pub fn decoder(&self) -> DecoderType {
        self.params.decoder()
    }

    /// Display name of the symbology ("Upc-A", "PDF 417 Micro", ...)
    pub fn type_name(&self) -> &'static str {
        self.decoder().type_name()
    }

    /// Symbology-specific parameters
    pub fn params(&self) -> &DecoderParams {
        &self.params
    }

    /// Minimum accepted symbol length, 0 = unlimited
    pub fn minimum_length(&self) -> i32 {
        self.minimum_length
    }

    /// Maximum accepted symbol length, 0 = unlimited
    pub fn maximum_length(&self) -> i32 {
        self.maximum_length
    }

    /// Number of symbols of this type expected per frame, 0 = unknown
    pub fn expected_count(&self) -> i32 {
        self.expected_count
    }

    /// Set both length bounds at once
    ///
    /// Fails if a bound is negative, or if both are positive and
    /// `maximum < minimum`. On failure the previous bounds are kept.
    pub fn set_length_range(&mut self, minimum: i32, maximum: i32) -> Result<()> {
        if minimum < 0 || maximum < 0 {
            return Err(Error::invalid(format!(
                "{}: length must be a positive number (got {}..{})",
                self.type_name(),
                minimum,
                maximum
            )));
        }
        if minimum > 0 && maximum > 0 && maximum < minimum {
            return Err(Error::invalid(format!(
                "{}: maximum length {} can't be smaller than minimum {}",
                self.type_name(),
                maximum,
                minimum
            )));
        }
        self.minimum_length = minimum;
        self.maximum_length = maximum;
        Ok(())
    }

    /// Set the expected per-frame count
    pub fn set_expected_count(&mut self, count: i32) -> Result<()> {
        if count < 0 {
            return Err(Error::invalid(format!(
                "{}: expected count must not be negative (got {})",
                self.type_name(),
                count
            )));
        }
        self.expected_count = count;
        Ok(())
    }

    /// True if `length` passes the configured range
    pub fn accepts_length(&self, length: usize) -> bool {
        let length = i64::try_from(length).unwrap_or(i64::MAX);
        (self.minimum_length == 0 || length >= i64::from(self.minimum_length))
            && (self.maximum_length == 0 || length <= i64::from(self.maximum_length))
    }

    /// Whether `entitlement` covers this symbology
    pub fn is_licensed(&self, entitlement: &DecoderSet) -> bool {
        entitlement.contains(self.decoder())
    }

    fn unsupported(&self, parameter: &'static str) -> Error {
        Error::UnsupportedParameter {
            decoder: self.decoder(),
            parameter,
        }
    }

    /// On/off checksum (Code 39 and the 2 of 5 family)
    pub fn checksum(&self) -> Option<Checksum> {
        match self.params {
            DecoderParams::Code39 { checksum }
            | DecoderParams::Code25 { checksum }
            | DecoderParams::Interleaved25 { checksum }
            | DecoderParams::IATA25 { checksum }
            | DecoderParams::Matrix25 { checksum }
            | DecoderParams::Datalogic25 { checksum }
            | DecoderParams::COOP25 { checksum } => Some(checksum),
            _ => None,
        }
    }

    /// Set the on/off checksum (Code 39 and the 2 of 5 family)
    pub fn set_checksum(&mut self, value: Checksum) -> Result<()> {
        match &mut self.params {
            DecoderParams::Code39 { checksum }
            | DecoderParams::Code25 { checksum }
            | DecoderParams::Interleaved25 { checksum }
            | DecoderParams::IATA25 { checksum }
            | DecoderParams::Matrix25 { checksum }
            | DecoderParams::Datalogic25 { checksum }
            | DecoderParams::COOP25 { checksum } => {
                *checksum = value;
                Ok(())
            }
            _ => Err(self.unsupported("checksum")),
        }
    }

    /// Code 11 checksum mode
    pub fn code11_checksum(&self) -> Option<Code11Checksum> {
        match self.params {
            DecoderParams::Code11 { checksum } => Some(checksum),
            _ => None,
        }
    }

    /// Set the Code 11 checksum mode
    pub fn set_code11_checksum(&mut self, value: Code11Checksum) -> Result<()> {
        match &mut self.params {
            DecoderParams::Code11 { checksum } => {
                *checksum = value;
                Ok(())
            }
            _ => Err(self.unsupported("code11 checksum")),
        }
    }

    /// MSI checksum algorithm
    pub fn msi_checksum(&self) -> Option<MsiChecksum> {
        match self.params {
            DecoderParams::Msi { checksum } => Some(checksum),
            _ => None,
        }
    }

    /// Set the MSI checksum algorithm
    pub fn set_msi_checksum(&mut self, value: MsiChecksum) -> Result<()> {
        match &mut self.params {
            DecoderParams::Msi { checksum } => {
                *checksum = value;
                Ok(())
            }
            _ => Err(self.unsupported("msi checksum")),
        }
    }

    /// QR structured-append merging
    pub fn multi_part_merge(&self) -> Option<bool> {
        match self.params {
            DecoderParams::QR { multi_part_merge } => Some(multi_part_merge),
            _ => None,
        }
    }

    /// Enable or disable QR structured-append merging
    pub fn set_multi_part_merge(&mut self, value: bool) -> Result<()> {
        match &mut self.params {
            DecoderParams::QR { multi_part_merge } => {
                *multi_part_merge = value;
                Ok(())
            }
            _ => Err(self.unsupported("multi part merge")),
        }
    }

    /// Data Matrix DPM mode
    pub fn dpm_mode(&self) -> Option<bool> {
        match self.params {
            DecoderParams::Datamatrix { dpm_mode } => Some(dpm_mode),
            _ => None,
        }
    }

    /// Enable or disable Data Matrix DPM mode
    pub fn set_dpm_mode(&mut self, value: bool) -> Result<()> {
        match &mut self.params {
            DecoderParams::Datamatrix { dpm_mode } => {
                *dpm_mode = value;
                Ok(())
            }
            _ => Err(self.unsupported("dpm mode")),
        }
    }

    /// UPC-E / UPC-E1 expansion to UPC-A
    pub fn expand_to_upca(&self) -> Option<bool> {
        match self.params {
            DecoderParams::UpcE { expand_to_upca } | DecoderParams::UpcE1 { expand_to_upca } => {
                Some(expand_to_upca)
            }
            _ => None,
        }
    }

    /// Enable or disable UPC-E / UPC-E1 expansion to UPC-A
    pub fn set_expand_to_upca(&mut self, value: bool) -> Result<()> {
        match &mut self.params {
            DecoderParams::UpcE { expand_to_upca } | DecoderParams::UpcE1 { expand_to_upca } => {
                *expand_to_upca = value;
                Ok(())
            }
            _ => Err(self.unsupported("expand to upca")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_for_every_decoder() {
        for decoder in DecoderType::ALL {
            let config = SpecificConfig::new(decoder);
            assert_eq!(config.decoder(), decoder);
            assert_eq!(config.type_name(), decoder.type_name());
            assert!(!config.enabled);
            assert_eq!(config.expected_count(), 0);
            assert_eq!(config.maximum_length(), 0);
        }
    }

    #[test]
    fn test_default_minimum_lengths() {
        assert_eq!(SpecificConfig::new(DecoderType::Msi).minimum_length(), 5);
        assert_eq!(SpecificConfig::new(DecoderType::Codabar).minimum_length(), 4);
        assert_eq!(SpecificConfig::new(DecoderType::Code128).minimum_length(), 0);
    }

    #[test]
    fn test_length_range_validation() {
        let mut config = SpecificConfig::new(DecoderType::Code39);
        config.set_length_range(2, 20).unwrap();

        let err = config.set_length_range(5, 3).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!((config.minimum_length(), config.maximum_length()), (2, 20));

        assert!(config.set_length_range(-1, 10).is_err());
        assert!(config.set_length_range(3, -1).is_err());
        assert_eq!((config.minimum_length(), config.maximum_length()), (2, 20));

        // one side unlimited
        config.set_length_range(10, 0).unwrap();
        config.set_length_range(0, 0).unwrap();
        assert!(config.accepts_length(1));
        assert!(config.accepts_length(10_000));
    }

    #[test]
    fn test_accepts_length() {
        let mut config = SpecificConfig::new(DecoderType::Msi);
        assert!(!config.accepts_length(4));
        assert!(config.accepts_length(5));
        config.set_length_range(5, 8).unwrap();
        assert!(config.accepts_length(8));
        assert!(!config.accepts_length(9));
    }

    #[test]
    fn test_expected_count() {
        let mut config = SpecificConfig::new(DecoderType::QR);
        config.set_expected_count(3).unwrap();
        assert_eq!(config.expected_count(), 3);
        assert!(config.set_expected_count(-2).is_err());
        assert_eq!(config.expected_count(), 3);
    }

    #[test]
    fn test_variant_parameters() {
        let mut msi = SpecificConfig::new(DecoderType::Msi);
        assert_eq!(msi.msi_checksum(), Some(MsiChecksum::Mod10));
        msi.set_msi_checksum(MsiChecksum::Mod1110IBM).unwrap();
        assert_eq!(msi.msi_checksum(), Some(MsiChecksum::Mod1110IBM));

        let mut matrix = SpecificConfig::new(DecoderType::Matrix25);
        matrix.set_checksum(Checksum::Enabled).unwrap();
        assert_eq!(matrix.checksum(), Some(Checksum::Enabled));
        // family members hold independent values
        assert_eq!(SpecificConfig::new(DecoderType::Code25).checksum(), Some(Checksum::Disabled));

        let mut upce1 = SpecificConfig::new(DecoderType::UpcE1);
        upce1.set_expand_to_upca(true).unwrap();
        assert_eq!(upce1.expand_to_upca(), Some(true));

        let mut dm = SpecificConfig::new(DecoderType::Datamatrix);
        dm.set_dpm_mode(true).unwrap();
        assert_eq!(dm.params(), &DecoderParams::Datamatrix { dpm_mode: true });

        let mut qr = SpecificConfig::new(DecoderType::QR);
        qr.set_multi_part_merge(true).unwrap();
        assert_eq!(qr.multi_part_merge(), Some(true));
    }

    #[test]
    fn test_unsupported_parameter() {
        let mut qr = SpecificConfig::new(DecoderType::QR);
        let err = qr.set_checksum(Checksum::Enabled).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedParameter {
                decoder: DecoderType::QR,
                ..
            }
        ));
        assert_eq!(qr.checksum(), None);
        assert!(qr.set_code11_checksum(Code11Checksum::Single).is_err());
        assert!(SpecificConfig::new(DecoderType::ITF14).set_checksum(Checksum::Enabled).is_err());
    }

    #[test]
    fn test_is_licensed() {
        let entitlement = DecoderSet::from([DecoderType::QR]);
        assert!(SpecificConfig::new(DecoderType::QR).is_licensed(&entitlement));
        assert!(!SpecificConfig::new(DecoderType::Aztec).is_licensed(&entitlement));
    }
}
