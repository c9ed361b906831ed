use crate::error::Error;
use std::fmt;

/// Barcode symbology a decoder can be configured for
///
/// Discriminants are the stable ids shared with binding layers (0..=27).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecoderType {
    /// Aztec (full range)
    Aztec = 0,
    /// Aztec compact
    AztecCompact = 1,
    /// QR Model 2
    QR = 2,
    /// Micro QR
    QRMicro = 3,
    /// Code 128
    Code128 = 4,
    /// Code 93
    Code93 = 5,
    /// Code 39
    Code39 = 6,
    /// Codabar
    Codabar = 7,
    /// Code 11
    Code11 = 8,
    /// MSI Plessey
    Msi = 9,
    /// UPC-A
    UpcA = 10,
    /// UPC-E
    UpcE = 11,
    /// UPC-E1
    UpcE1 = 12,
    /// EAN-13
    Ean13 = 13,
    /// EAN-8
    Ean8 = 14,
    /// PDF417
    PDF417 = 15,
    /// MicroPDF417
    PDF417Micro = 16,
    /// Data Matrix
    Datamatrix = 17,
    /// Standard 2 of 5
    Code25 = 18,
    /// Interleaved 2 of 5
    Interleaved25 = 19,
    /// ITF-14
    ITF14 = 20,
    /// IATA 2 of 5
    IATA25 = 21,
    /// Matrix 2 of 5
    Matrix25 = 22,
    /// Datalogic 2 of 5
    Datalogic25 = 23,
    /// COOP 2 of 5
    COOP25 = 24,
    /// Code 32 (Italian pharmacode)
    Code32 = 25,
    /// Telepen
    Telepen = 26,
    /// DotCode
    Dotcode = 27,
}

impl DecoderType {
    /// Number of symbologies
    pub const COUNT: usize = 28;

    /// Every symbology in declaration order
    pub const ALL: [DecoderType; Self::COUNT] = [
        DecoderType::Aztec,
        DecoderType::AztecCompact,
        DecoderType::QR,
        DecoderType::QRMicro,
        DecoderType::Code128,
        DecoderType::Code93,
        DecoderType::Code39,
        DecoderType::Codabar,
        DecoderType::Code11,
        DecoderType::Msi,
        DecoderType::UpcA,
        DecoderType::UpcE,
        DecoderType::UpcE1,
        DecoderType::Ean13,
        DecoderType::Ean8,
        DecoderType::PDF417,
        DecoderType::PDF417Micro,
        DecoderType::Datamatrix,
        DecoderType::Code25,
        DecoderType::Interleaved25,
        DecoderType::ITF14,
        DecoderType::IATA25,
        DecoderType::Matrix25,
        DecoderType::Datalogic25,
        DecoderType::COOP25,
        DecoderType::Code32,
        DecoderType::Telepen,
        DecoderType::Dotcode,
    ];

    /// Stable numeric id
    pub fn id(self) -> i32 {
        self as i32
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// User-visible display name
    pub fn type_name(self) -> &'static str {
        match self {
            DecoderType::Aztec => "Aztec",
            DecoderType::AztecCompact => "Aztec Compact",
            DecoderType::QR => "QR",
            DecoderType::QRMicro => "QR Micro",
            DecoderType::Code128 => "Code 128",
            DecoderType::Code93 => "Code 93",
            DecoderType::Code39 => "Code 39",
            DecoderType::Codabar => "Codabar",
            DecoderType::Code11 => "Code 11",
            DecoderType::Msi => "MSI",
            DecoderType::UpcA => "Upc-A",
            DecoderType::UpcE => "Upc-E",
            DecoderType::UpcE1 => "Upc-E1",
            DecoderType::Ean13 => "Ean-13",
            DecoderType::Ean8 => "Ean-8",
            DecoderType::PDF417 => "PDF 417",
            DecoderType::PDF417Micro => "PDF 417 Micro",
            DecoderType::Datamatrix => "Data Matrix",
            DecoderType::Code25 => "Code 25",
            DecoderType::Interleaved25 => "Interleaved 2 of 5",
            DecoderType::ITF14 => "ITF 14",
            DecoderType::IATA25 => "IATA 25",
            DecoderType::Matrix25 => "Matrix 25",
            DecoderType::Datalogic25 => "Datalogic 25",
            DecoderType::COOP25 => "COOP 25",
            DecoderType::Code32 => "Code 32",
            DecoderType::Telepen => "Telepen",
            DecoderType::Dotcode => "Dotcode",
        }
    }

    /// True for linear (1D) symbologies
    pub fn is_linear(self) -> bool {
        !matches!(
            self,
            DecoderType::Aztec
                | DecoderType::AztecCompact
                | DecoderType::QR
                | DecoderType::QRMicro
                | DecoderType::PDF417
                | DecoderType::PDF417Micro
                | DecoderType::Datamatrix
                | DecoderType::Dotcode
        )
    }
}

impl TryFrom<i32> for DecoderType {
    type Error = Error;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| Error::invalid(format!("unknown decoder id {}", id)))
    }
}

impl fmt::Display for DecoderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Compact set of symbologies, iterated in declaration order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DecoderSet(u32);

impl DecoderSet {
    /// Empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every symbology
    pub const fn all() -> Self {
        Self((1u32 << DecoderType::COUNT) - 1)
    }

    fn bit(decoder: DecoderType) -> u32 {
        1u32 << decoder.index()
    }

    /// Add a symbology
    pub fn insert(&mut self, decoder: DecoderType) {
        self.0 |= Self::bit(decoder);
    }

    /// Remove a symbology
    pub fn remove(&mut self, decoder: DecoderType) {
        self.0 &= !Self::bit(decoder);
    }

    /// Membership test
    pub fn contains(&self, decoder: DecoderType) -> bool {
        self.0 & Self::bit(decoder) != 0
    }

    /// Number of symbologies in the set
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True when no symbology is present
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when every symbology is present
    pub fn is_full(&self) -> bool {
        *self == Self::all()
    }

    /// Iterate members in declaration order
    pub fn iter(&self) -> impl Iterator<Item = DecoderType> + '_ {
        DecoderType::ALL.into_iter().filter(|d| self.contains(*d))
    }

    /// Members as a vector, declaration order
    pub fn to_vec(&self) -> Vec<DecoderType> {
        self.iter().collect()
    }
}

impl FromIterator<DecoderType> for DecoderSet {
    fn from_iter<I: IntoIterator<Item = DecoderType>>(iter: I) -> Self {
        let mut set = DecoderSet::empty();
        for decoder in iter {
            set.insert(decoder);
        }
        set
    }
}

impl<const N: usize> From<[DecoderType; N]> for DecoderSet {
    fn from(decoders: [DecoderType; N]) -> Self {
        decoders.into_iter().collect()
    }
}
