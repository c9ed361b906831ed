use crate::error::Error;

/// Decoding effort; slower speeds are more robust on damaged symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodingSpeed {
    /// Single pass, first hit wins
    Fast = 0,
    /// Balanced
    #[default]
    Normal = 1,
    /// Exhaustive
    Slow = 2,
}

impl TryFrom<i32> for DecodingSpeed {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DecodingSpeed::Fast),
            1 => Ok(DecodingSpeed::Normal),
            2 => Ok(DecodingSpeed::Slow),
            _ => Err(Error::invalid(format!("unknown decoding speed {}", value))),
        }
    }
}

/// Post-decode formatting applied to result text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formatting {
    /// Raw payload
    #[default]
    Disabled = 0,
    /// Pick GS1 or AAMVA from the payload
    Automatic = 1,
    /// GS1 application identifiers
    GS1 = 2,
    /// AAMVA driver licence fields
    AAMVA = 3,
}

impl TryFrom<i32> for Formatting {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Formatting::Disabled),
            1 => Ok(Formatting::Automatic),
            2 => Ok(Formatting::GS1),
            3 => Ok(Formatting::AAMVA),
            _ => Err(Error::invalid(format!("unknown formatting mode {}", value))),
        }
    }
}

/// On/off check digit verification (Code 39 and the 2 of 5 family)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Checksum {
    /// Check digit not verified
    #[default]
    Disabled = 0,
    /// Check digit verified and stripped
    Enabled = 1,
}

impl TryFrom<i32> for Checksum {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Checksum::Disabled),
            1 => Ok(Checksum::Enabled),
            _ => Err(Error::invalid(format!("unknown checksum mode {}", value))),
        }
    }
}

/// Code 11 check digit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Code11Checksum {
    /// No check digit
    #[default]
    Disabled = 0,
    /// One check digit (C)
    Single = 1,
    /// Two check digits (C and K)
    Double = 2,
}

impl TryFrom<i32> for Code11Checksum {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Code11Checksum::Disabled),
            1 => Ok(Code11Checksum::Single),
            2 => Ok(Code11Checksum::Double),
            _ => Err(Error::invalid(format!("unknown Code 11 checksum {}", value))),
        }
    }
}

/// MSI Plessey check digit algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MsiChecksum {
    /// No check digit
    Disabled = 0,
    /// Luhn mod 10
    #[default]
    Mod10 = 1,
    /// Mod 11 (NCR weights)
    Mod11 = 2,
    /// Two mod 10 digits
    Mod1010 = 3,
    /// Mod 11 followed by mod 10
    Mod1110 = 4,
    /// Mod 11 with IBM weights
    Mod11IBM = 5,
    /// Mod 11 IBM followed by mod 10
    Mod1110IBM = 6,
}

impl TryFrom<i32> for MsiChecksum {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MsiChecksum::Disabled),
            1 => Ok(MsiChecksum::Mod10),
            2 => Ok(MsiChecksum::Mod11),
            3 => Ok(MsiChecksum::Mod1010),
            4 => Ok(MsiChecksum::Mod1110),
            5 => Ok(MsiChecksum::Mod11IBM),
            6 => Ok(MsiChecksum::Mod1110IBM),
            _ => Err(Error::invalid(format!("unknown MSI checksum {}", value))),
        }
    }
}
