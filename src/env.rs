//! Environment overrides for global option defaults
//!
//! Read once per process; later changes to the environment are ignored.

use std::sync::OnceLock;

fn parse_env_i32(name: &str) -> Option<i32> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<i32>().ok())
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

fn available_cpus() -> i32 {
    std::thread::available_parallelism()
        .map(|n| i32::try_from(n.get()).unwrap_or(i32::MAX))
        .unwrap_or(1)
}

static DEFAULT_MAX_THREADS: OnceLock<i32> = OnceLock::new();

pub(crate) fn default_max_threads() -> i32 {
    *DEFAULT_MAX_THREADS.get_or_init(|| {
        parse_env_i32("BK_MAX_THREADS")
            .filter(|v| *v > 0)
            .unwrap_or_else(available_cpus)
    })
}

static DEFAULT_USE_GPU: OnceLock<bool> = OnceLock::new();

pub(crate) fn default_use_gpu() -> bool {
    *DEFAULT_USE_GPU.get_or_init(|| parse_env_bool_u8("BK_USE_GPU", false))
}

static DEFAULT_CACHING_ENABLED: OnceLock<bool> = OnceLock::new();

pub(crate) fn default_multicode_caching_enabled() -> bool {
    *DEFAULT_CACHING_ENABLED.get_or_init(|| parse_env_bool_u8("BK_MULTICODE_CACHING_ENABLED", false))
}

static DEFAULT_CACHING_DURATION_MS: OnceLock<i32> = OnceLock::new();

pub(crate) fn default_multicode_caching_duration_ms() -> i32 {
    *DEFAULT_CACHING_DURATION_MS.get_or_init(|| {
        parse_env_i32("BK_MULTICODE_CACHING_DURATION_MS")
            .filter(|v| *v > 0)
            .unwrap_or(1000)
    })
}
