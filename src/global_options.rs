//! Options shared by every configuration of a registry
//!
//! Values are read when decode work starts; changing an option never affects
//! a decode that is already running.

use crate::env;
use crate::error::{Error, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;
use tracing::debug;

/// Registry-wide integer option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalOption {
    /// Worker threads used for decoding (positive)
    MaximumThreads = 0,
    /// Use the GPU path where available (0/1)
    UseGpu = 1,
    /// Cache multicode results across frames (0/1)
    MulticodeCachingEnabled = 2,
    /// Multicode cache lifetime in milliseconds (positive)
    MulticodeCachingDuration = 3,
}

impl TryFrom<i32> for GlobalOption {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(GlobalOption::MaximumThreads),
            1 => Ok(GlobalOption::UseGpu),
            2 => Ok(GlobalOption::MulticodeCachingEnabled),
            3 => Ok(GlobalOption::MulticodeCachingDuration),
            _ => Err(Error::invalid(format!("unknown global option {}", value))),
        }
    }
}

// 0 in a positive-valued slot means "use the default"
const UNSET: i32 = 0;

/// Lock-free store for [`GlobalOption`] values
#[derive(Debug)]
pub struct GlobalOptions {
    maximum_threads: AtomicI32,
    use_gpu: AtomicI32,
    caching_enabled: AtomicI32,
    caching_duration_ms: AtomicI32,
}

impl GlobalOptions {
    /// Defaults, honouring the `BK_*` environment overrides
    pub fn new() -> Self {
        Self {
            maximum_threads: AtomicI32::new(UNSET),
            use_gpu: AtomicI32::new(env::default_use_gpu() as i32),
            caching_enabled: AtomicI32::new(env::default_multicode_caching_enabled() as i32),
            caching_duration_ms: AtomicI32::new(UNSET),
        }
    }

    fn slot(&self, option: GlobalOption) -> &AtomicI32 {
        match option {
            GlobalOption::MaximumThreads => &self.maximum_threads,
            GlobalOption::UseGpu => &self.use_gpu,
            GlobalOption::MulticodeCachingEnabled => &self.caching_enabled,
            GlobalOption::MulticodeCachingDuration => &self.caching_duration_ms,
        }
    }

    /// Store `value` and return the value now in effect
    ///
    /// Zero or negative thread counts and durations restore the default.
    /// Boolean options store 1 for any non-zero value.
    pub fn set(&self, option: GlobalOption, value: i32) -> i32 {
        let stored = match option {
            GlobalOption::MaximumThreads | GlobalOption::MulticodeCachingDuration => value.max(UNSET),
            GlobalOption::UseGpu | GlobalOption::MulticodeCachingEnabled => (value != 0) as i32,
        };
        self.slot(option).store(stored, Ordering::Release);
        let effective = self.get(option);
        debug!(?option, requested = value, effective, "Global option set");
        effective
    }

    /// Value in effect for `option`
    pub fn get(&self, option: GlobalOption) -> i32 {
        let raw = self.slot(option).load(Ordering::Acquire);
        match option {
            GlobalOption::MaximumThreads if raw == UNSET => env::default_max_threads(),
            GlobalOption::MulticodeCachingDuration if raw == UNSET => {
                env::default_multicode_caching_duration_ms()
            }
            _ => raw,
        }
    }

    /// Consistent view for one unit of decode work
    pub fn snapshot(&self) -> GlobalSettings {
        GlobalSettings {
            maximum_threads: usize::try_from(self.get(GlobalOption::MaximumThreads)).unwrap_or(1).max(1),
            use_gpu: self.get(GlobalOption::UseGpu) != 0,
            multicode_caching_enabled: self.get(GlobalOption::MulticodeCachingEnabled) != 0,
            multicode_caching_duration: Duration::from_millis(
                u64::try_from(self.get(GlobalOption::MulticodeCachingDuration)).unwrap_or(0),
            ),
        }
    }
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Global options captured when decode work starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalSettings {
    /// Worker threads, at least 1
    pub maximum_threads: usize,
    /// GPU path requested
    pub use_gpu: bool,
    /// Multicode caching on
    pub multicode_caching_enabled: bool,
    /// Multicode cache lifetime
    pub multicode_caching_duration: Duration,
}

impl GlobalSettings {
    /// Build a worker pool sized by [`GlobalSettings::maximum_threads`]
    pub fn build_thread_pool(&self) -> Result<ThreadPool> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.maximum_threads)
            .thread_name(|i| format!("bk-decode-{}", i))
            .build()?;
        Ok(pool)
    }
}
