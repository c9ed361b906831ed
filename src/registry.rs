//! Configuration registry and license gate
//!
//! The [`Registry`] is the only way to create a [`Config`]. It validates
//! license keys, assigns handles, keeps every live configuration addressable
//! by handle until it is released, and owns the global option store.
//!
//! # Locking
//!
//! - The handle map sits behind one `RwLock`; a configuration is fully built
//!   before it is inserted, so lookups never see a partial entry.
//! - Each configuration has its own `RwLock`. A decode copies the
//!   configuration and releases the lock before the engine runs, so writers
//!   never wait on a decode: the last write wins and the next decode sees it.
//! - The license service is called without holding any registry lock.
//! - Handles come from a counter and are allocated under the map lock; a
//!   handle that is still live is never handed out again.

use crate::config::{Config, SharedConfig};
use crate::engine::DecodeEngine;
use crate::error::{Error, Result};
use crate::global_options::{GlobalOption, GlobalOptions};
use crate::license::{LicenseError, LicenseGrant, LicenseService, trial_decoders};
use crate::models::{DecoderSet, DecoderType};
use crate::response::ConfigResponse;
use chrono::Utc;
use image::GrayImage;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tracing::{debug, info, warn};

/// Integer identity of a registered configuration
pub type Handle = i32;

/// Outcome of the most recent license validation
#[derive(Debug, Clone, Default)]
struct LicenseState {
    entitlement: DecoderSet,
    device_id: String,
    error_message: String,
}

/// Factory, license gate and handle registry for [`Config`]s
pub struct Registry {
    license_service: Box<dyn LicenseService>,
    configs: RwLock<HashMap<Handle, SharedConfig>>,
    next_handle: AtomicI32,
    license: RwLock<LicenseState>,
    options: GlobalOptions,
}

impl Registry {
    /// Create a registry validating keys with `license_service`
    pub fn new(license_service: impl LicenseService + 'static) -> Self {
        Self {
            license_service: Box::new(license_service),
            configs: RwLock::new(HashMap::new()),
            next_handle: AtomicI32::new(1),
            license: RwLock::new(LicenseState::default()),
            options: GlobalOptions::new(),
        }
    }

    /// Validate `license_key` and create a configuration for its entitlements
    ///
    /// Every entitled symbology starts enabled. Returns
    /// - `OK` with the configuration for a full, non-trial key,
    /// - `Warning` with a restricted configuration for trial or partial keys,
    /// - `Error` without configuration when the key is refused.
    pub fn initialize_with_license_key(&self, license_key: &str) -> ConfigResponse {
        let grant = match self.validate(license_key) {
            Ok(grant) => grant,
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, "License validation failed");
                self.license.write().error_message = message.clone();
                return ConfigResponse::error(message);
            }
        };

        let warning = restriction_message(&grant);
        {
            let mut state = self.license.write();
            state.entitlement = grant.entitled;
            state.device_id = grant.device_id.clone();
            state.error_message = warning.clone().unwrap_or_default();
        }

        let config = self.register(self.build(grant.entitled));
        let handle = config.read().handle();
        info!(
            handle,
            entitled = grant.entitled.len(),
            trial = grant.trial,
            "Configuration initialized from license key"
        );

        match warning {
            None => ConfigResponse::ok(Some(config)),
            Some(message) => ConfigResponse::warning(message, Some(config)),
        }
    }

    /// Create an evaluation configuration without contacting the license service
    ///
    /// Only the trial symbologies are available; the response is always a
    /// `Warning`.
    pub fn default_config(&self) -> ConfigResponse {
        let entitled = trial_decoders();
        let config = self.register(self.build(entitled));
        let handle = config.read().handle();
        info!(handle, "Unlicensed evaluation configuration created");
        ConfigResponse::warning(
            format!(
                "Unlicensed configuration: {} of {} symbologies available",
                entitled.len(),
                DecoderType::COUNT
            ),
            Some(config),
        )
    }

    fn validate(&self, license_key: &str) -> std::result::Result<LicenseGrant, LicenseError> {
        if license_key.trim().is_empty() {
            return Err(LicenseError::EmptyKey);
        }
        let grant = self.license_service.validate(license_key)?;
        if let Some(expired_at) = grant.expires_at.filter(|_| grant.is_expired_at(Utc::now())) {
            return Err(LicenseError::Expired(expired_at));
        }
        if grant.entitled.is_empty() {
            return Err(LicenseError::WrongProduct);
        }
        Ok(grant)
    }

    fn build(&self, entitled: DecoderSet) -> Config {
        let mut config = Config::new(entitled);
        for decoder in entitled.iter() {
            config.enable(decoder);
        }
        config
    }

    // Counter wraps from i32::MAX back to 1; handles still live are skipped.
    fn allocate_handle(&self, live: &HashMap<Handle, SharedConfig>) -> Handle {
        let advance = |h: Handle| Some(if h <= 0 || h == Handle::MAX { 1 } else { h + 1 });
        loop {
            let (Ok(candidate) | Err(candidate)) =
                self.next_handle
                    .fetch_update(Ordering::Relaxed, Ordering::Relaxed, advance);
            if candidate > 0 && !live.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn register(&self, mut config: Config) -> SharedConfig {
        let mut configs = self.configs.write();
        let handle = self.allocate_handle(&configs);
        config.assign_handle(handle);
        let shared = Arc::new(RwLock::new(config));
        configs.insert(handle, Arc::clone(&shared));
        drop(configs);
        debug!(handle, "Configuration registered");
        shared
    }

    /// Configuration registered under `handle`
    ///
    /// `None` if the handle is unknown or was released; a decode engine must
    /// drop that request rather than fall back to defaults.
    pub fn get_by_handle(&self, handle: Handle) -> Option<SharedConfig> {
        self.configs.read().get(&handle).cloned()
    }

    /// Remove `handle` from the registry
    ///
    /// Holders of the [`SharedConfig`] keep a usable copy, but the handle no
    /// longer resolves. Returns false if nothing was registered under it.
    pub fn release(&self, handle: Handle) -> bool {
        let removed = self.configs.write().remove(&handle).is_some();
        if removed {
            debug!(handle, "Configuration released");
        }
        removed
    }

    /// Register a copy of the configuration behind `handle` under a new handle
    pub fn duplicate(&self, handle: Handle) -> Option<SharedConfig> {
        let source = self.get_by_handle(handle)?;
        let copy = source.read().snapshot();
        Some(self.register(copy))
    }

    /// Number of live configurations
    pub fn len(&self) -> usize {
        self.configs.read().len()
    }

    /// True if no configuration is registered
    pub fn is_empty(&self) -> bool {
        self.configs.read().is_empty()
    }

    /// Whether the most recently validated license covers `decoder`
    pub fn is_licensed(&self, decoder: DecoderType) -> bool {
        self.license.read().entitlement.contains(decoder)
    }

    /// Device identity reported by the most recent successful validation
    pub fn device_id(&self) -> String {
        self.license.read().device_id.clone()
    }

    /// Message from the most recent validation, empty if it fully succeeded
    pub fn license_error_message(&self) -> String {
        self.license.read().error_message.clone()
    }

    /// Set a global option, returning the value now in effect
    pub fn set_global_option(&self, option: GlobalOption, value: i32) -> i32 {
        self.options.set(option, value)
    }

    /// Value in effect for a global option
    pub fn global_option(&self, option: GlobalOption) -> i32 {
        self.options.get(option)
    }

    /// Global option store
    pub fn global_options(&self) -> &GlobalOptions {
        &self.options
    }

    /// Run `engine` on `image` with the configuration behind `handle`
    ///
    /// The engine works on a copy taken when the call starts; writes made
    /// while it runs apply to the next decode. Fails with
    /// [`Error::HandleNotFound`] for an unknown or released handle; only this
    /// request is affected.
    pub fn decode<E: DecodeEngine>(&self, handle: Handle, engine: &E, image: &GrayImage) -> Result<E::Output> {
        let Some(config) = self.get_by_handle(handle) else {
            warn!(handle, "Decode requested for unknown configuration");
            return Err(Error::HandleNotFound(handle));
        };
        let settings = self.options.snapshot();
        let snapshot = config.read().snapshot();
        Ok(engine.decode(&snapshot, &settings, image))
    }
}

fn restriction_message(grant: &LicenseGrant) -> Option<String> {
    if !grant.is_restricted() {
        return None;
    }
    let mut message = if grant.trial {
        String::from("Trial license")
    } else {
        String::from("Restricted license")
    };
    message.push_str(&format!(
        ": {} of {} symbologies licensed",
        grant.entitled.len(),
        DecoderType::COUNT
    ));
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global_options::GlobalSettings;
    use crate::license::StaticLicenseService;
    use crate::response::ConfigResult;
    use chrono::Duration;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;

    fn registry() -> Registry {
        let service = StaticLicenseService::new()
            .with_key("FULL", LicenseGrant::full("device-full"))
            .with_key("TRIAL", LicenseGrant::full("device-trial").with_trial(true))
            .with_key(
                "QR-ONLY",
                LicenseGrant::restricted("device-qr", DecoderSet::from([DecoderType::QR])),
            )
            .with_key(
                "EXPIRED",
                LicenseGrant::full("device-old").with_expiry(Utc::now() - Duration::days(1)),
            )
            .with_key("EMPTY", LicenseGrant::restricted("device-x", DecoderSet::empty()));
        Registry::new(service)
    }

    #[test]
    fn test_full_license() {
        let registry = registry();
        let response = registry.initialize_with_license_key("FULL");
        assert_eq!(response.result(), ConfigResult::OK);
        assert_eq!(response.message(), "");
        let config = response.into_config().unwrap();
        let config = config.read();
        assert_eq!(config.enabled_decoders().len(), DecoderType::COUNT);
        assert_eq!(registry.device_id(), "device-full");
        assert!(registry.is_licensed(DecoderType::Dotcode));
        assert_eq!(registry.license_error_message(), "");
    }

    #[test]
    fn test_restricted_license_warns() {
        let registry = registry();
        let response = registry.initialize_with_license_key("QR-ONLY");
        assert_eq!(response.result(), ConfigResult::Warning);
        let config = response.config().unwrap().read();
        assert_eq!(config.available_decoders(), vec![DecoderType::QR]);
        assert_eq!(config.enabled_decoders(), vec![DecoderType::QR]);
        assert!(!registry.is_licensed(DecoderType::Aztec));

        let trial = registry.initialize_with_license_key("TRIAL");
        assert_eq!(trial.result(), ConfigResult::Warning);
        assert!(trial.message().starts_with("Trial license"));
    }

    #[test]
    fn test_refused_keys() {
        let registry = registry();
        for key in ["", "   ", "UNKNOWN", "EXPIRED", "EMPTY"] {
            let response = registry.initialize_with_license_key(key);
            assert_eq!(response.result(), ConfigResult::Error, "key {:?}", key);
            assert!(response.config().is_none());
            assert!(!registry.license_error_message().is_empty());
        }
        assert!(registry.is_empty());
        assert!(registry.license_error_message().contains("not valid for this product"));
    }

    #[test]
    fn test_empty_key_skips_service() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = Registry::new(move |_key: &str| -> std::result::Result<LicenseGrant, LicenseError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(LicenseGrant::full("d"))
        });
        assert!(registry.initialize_with_license_key("").is_error());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(registry.initialize_with_license_key("k").is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_default_config() {
        let registry = registry();
        let response = registry.default_config();
        assert_eq!(response.result(), ConfigResult::Warning);
        let config = response.config().unwrap().read();
        assert_eq!(config.entitlement(), trial_decoders());
        assert!(config.is_enabled(DecoderType::QR));
        assert!(!config.is_licensed(DecoderType::Dotcode));
        // no license attempt was made
        assert_eq!(registry.device_id(), "");
    }

    #[test]
    fn test_handles() {
        let registry = registry();
        let first = registry.default_config().into_config().unwrap();
        let h1 = first.read().handle();
        let h2 = registry.default_config().into_config().unwrap().read().handle();
        assert_ne!(h1, h2);

        let found = registry.get_by_handle(h1).unwrap();
        assert_eq!(found.read().handle(), h1);
        assert!(Arc::ptr_eq(&found, &first));

        assert!(registry.release(h1));
        assert!(!registry.release(h1));
        assert!(registry.get_by_handle(h1).is_none());
        assert!(registry.get_by_handle(9999).is_none());

        let h3 = registry.default_config().into_config().unwrap().read().handle();
        assert_ne!(h3, h1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate() {
        let registry = registry();
        let source = registry.initialize_with_license_key("FULL").into_config().unwrap();
        let handle = {
            let mut config = source.write();
            config.set_enabled_decoders(&[DecoderType::Aztec]);
            config.set_custom_option("x", 4);
            config.handle()
        };

        let copy = registry.duplicate(handle).unwrap();
        let copy_handle = copy.read().handle();
        assert_ne!(copy_handle, handle);
        assert_eq!(copy.read().enabled_decoders(), vec![DecoderType::Aztec]);

        // independent after the copy
        copy.write().enable(DecoderType::QR);
        assert!(!source.read().is_enabled(DecoderType::QR));
        assert!(registry.duplicate(12345).is_none());
    }

    struct EnabledCount;

    impl DecodeEngine for EnabledCount {
        type Output = (usize, usize, (u32, u32));

        fn decode(&self, config: &Config, settings: &GlobalSettings, image: &GrayImage) -> Self::Output {
            let region = config.region_of_interest().crop(image);
            (config.enabled_decoders().len(), settings.maximum_threads, region.dimensions())
        }
    }

    #[test]
    fn test_decode_dispatch() {
        let registry = registry();
        let config = registry.initialize_with_license_key("FULL").into_config().unwrap();
        let handle = {
            let mut config = config.write();
            config.set_enabled_decoders(&[DecoderType::QR, DecoderType::Ean13]);
            config.set_region_of_interest(0.0, 0.0, 50.0, 50.0);
            config.handle()
        };
        registry.set_global_option(GlobalOption::MaximumThreads, 3);

        let image = GrayImage::new(40, 20);
        let output = registry.decode(handle, &EnabledCount, &image).unwrap();
        assert_eq!(output, (2, 3, (20, 10)));

        registry.release(handle);
        let err = registry.decode(handle, &EnabledCount, &image).unwrap_err();
        assert!(matches!(err, Error::HandleNotFound(h) if h == handle));
    }

    /// Parks inside decode until the caller reports a finished write
    struct WaitsForWrite {
        started: mpsc::Sender<()>,
        written: mpsc::Receiver<()>,
    }

    impl DecodeEngine for WaitsForWrite {
        type Output = (bool, bool);

        fn decode(&self, config: &Config, _settings: &GlobalSettings, _image: &GrayImage) -> Self::Output {
            self.started.send(()).unwrap();
            let write_finished = self
                .written
                .recv_timeout(std::time::Duration::from_secs(5))
                .is_ok();
            (write_finished, config.is_enabled(DecoderType::QR))
        }
    }

    #[test]
    fn test_writes_complete_while_decode_runs() {
        let registry = registry();
        let config = registry.initialize_with_license_key("FULL").into_config().unwrap();
        let handle = config.read().handle();
        let (started_tx, started_rx) = mpsc::channel();
        let (written_tx, written_rx) = mpsc::channel();
        let engine = WaitsForWrite {
            started: started_tx,
            written: written_rx,
        };
        let image = GrayImage::new(4, 4);

        let (registry_ref, image_ref) = (&registry, &image);
        let (write_finished, qr_enabled) = std::thread::scope(|scope| {
            let decode = scope.spawn(move || registry_ref.decode(handle, &engine, image_ref).unwrap());
            started_rx.recv().unwrap();
            config.write().disable(DecoderType::QR);
            written_tx.send(()).unwrap();
            decode.join().unwrap()
        });

        assert!(write_finished);
        // the running decode keeps the view it started with
        assert!(qr_enabled);
        assert!(!config.read().is_enabled(DecoderType::QR));
        let (started_tx, _started_rx) = mpsc::channel();
        let (written_tx, written_rx) = mpsc::channel();
        written_tx.send(()).unwrap();
        let engine = WaitsForWrite {
            started: started_tx,
            written: written_rx,
        };
        let (_, qr_enabled) = registry.decode(handle, &engine, &image).unwrap();
        assert!(!qr_enabled);
    }

    #[test]
    fn test_live_handle_is_never_handed_out_twice() {
        let registry = registry();
        let first = registry.default_config().into_config().unwrap();
        let h1 = first.read().handle();

        registry.next_handle.store(h1, Ordering::Relaxed);
        let h2 = registry.default_config().into_config().unwrap().read().handle();
        assert_ne!(h2, h1);
        assert!(Arc::ptr_eq(&registry.get_by_handle(h1).unwrap(), &first));

        registry.next_handle.store(Handle::MAX, Ordering::Relaxed);
        let last = registry.default_config().into_config().unwrap().read().handle();
        assert_eq!(last, Handle::MAX);
        // wraps to 1, skipping h1 and h2
        let wrapped = registry.default_config().into_config().unwrap().read().handle();
        assert_eq!((h1, h2, wrapped), (1, 2, 3));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_concurrent_creation_yields_unique_handles() {
        let registry = registry();
        let mut handles: Vec<Handle> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..25)
                            .map(|_| {
                                let config = registry.default_config().into_config().unwrap();
                                let handle = config.read().handle();
                                assert!(registry.get_by_handle(handle).is_some());
                                handle
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            workers
                .into_iter()
                .flat_map(|w| w.join().unwrap())
                .collect()
        });
        handles.sort_unstable();
        handles.dedup();
        assert_eq!(handles.len(), 200);
        assert_eq!(registry.len(), 200);
    }
}
