//! License validation boundary
//!
//! Key cryptography and device identity live outside this crate behind
//! [`LicenseService`]. The registry calls it once per initialization and
//! caches the resulting [`LicenseGrant`] on every configuration it creates.

use crate::models::{DecoderSet, DecoderType};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// Reasons a license key is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LicenseError {
    /// No key supplied
    #[error("License key is empty")]
    EmptyKey,

    /// Key is malformed or unknown
    #[error("Invalid license key: {0}")]
    Invalid(String),

    /// Key was valid until the given instant
    #[error("License expired on {0}")]
    Expired(DateTime<Utc>),

    /// Key belongs to another product or covers no symbology
    #[error("License key is not valid for this product")]
    WrongProduct,

    /// Validation could not be completed
    #[error("License service error: {0}")]
    Service(String),
}

/// What a validated key entitles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseGrant {
    /// Symbologies the key permits
    pub entitled: DecoderSet,
    /// Device identity the key was validated for
    pub device_id: String,
    /// End of validity, `None` for perpetual keys
    pub expires_at: Option<DateTime<Utc>>,
    /// Evaluation key
    pub trial: bool,
}

impl LicenseGrant {
    /// Perpetual grant covering every symbology
    pub fn full(device_id: impl Into<String>) -> Self {
        Self {
            entitled: DecoderSet::all(),
            device_id: device_id.into(),
            expires_at: None,
            trial: false,
        }
    }

    /// Perpetual grant covering `entitled` only
    pub fn restricted(device_id: impl Into<String>, entitled: DecoderSet) -> Self {
        Self {
            entitled,
            device_id: device_id.into(),
            expires_at: None,
            trial: false,
        }
    }

    /// Mark as an evaluation grant
    pub fn with_trial(mut self, trial: bool) -> Self {
        self.trial = trial;
        self
    }

    /// Set the end of validity
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// True if the grant is past its expiry at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// True if some symbology is withheld or the grant is a trial
    pub fn is_restricted(&self) -> bool {
        self.trial || !self.entitled.is_full()
    }
}

/// Symbologies usable without any license key
pub fn trial_decoders() -> DecoderSet {
    DecoderSet::from([
        DecoderType::QR,
        DecoderType::QRMicro,
        DecoderType::Code128,
        DecoderType::Code39,
        DecoderType::UpcA,
        DecoderType::UpcE,
        DecoderType::Ean13,
        DecoderType::Ean8,
        DecoderType::PDF417,
        DecoderType::Datamatrix,
    ])
}

/// Validates license keys
///
/// Implementations may block (network, crypto); the registry never holds a
/// lock while calling [`LicenseService::validate`].
pub trait LicenseService: Send + Sync {
    /// Validate `license_key` and report its entitlements
    fn validate(&self, license_key: &str) -> Result<LicenseGrant, LicenseError>;
}

impl<F> LicenseService for F
where
    F: Fn(&str) -> Result<LicenseGrant, LicenseError> + Send + Sync,
{
    fn validate(&self, license_key: &str) -> Result<LicenseGrant, LicenseError> {
        self(license_key)
    }
}

/// In-memory key table, for evaluation builds and tests
#[derive(Debug, Clone, Default)]
pub struct StaticLicenseService {
    keys: HashMap<String, LicenseGrant>,
}

impl StaticLicenseService {
    /// Empty table; every key is rejected
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `key` with `grant`
    pub fn with_key(mut self, key: impl Into<String>, grant: LicenseGrant) -> Self {
        self.keys.insert(key.into(), grant);
        self
    }
}

impl LicenseService for StaticLicenseService {
    fn validate(&self, license_key: &str) -> Result<LicenseGrant, LicenseError> {
        self.keys
            .get(license_key)
            .cloned()
            .ok_or_else(|| LicenseError::Invalid("unknown key".to_string()))
    }
}
