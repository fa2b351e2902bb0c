//! Configuration for the array sort

use crate::error::SortError;
pub use crate::register::{Backend, RegisterWidth};

/// Slices shorter than this go straight to the scalar sort
pub const DEFAULT_SCALAR_THRESHOLD: usize = 256;

/// Environment variable overriding the detected backend
pub const BACKEND_ENV: &str = "VECSORT_BACKEND";

/// Environment variable overriding the register width
pub const WIDTH_ENV: &str = "VECSORT_WIDTH";

/// Configuration for [`sort_with`](super::sort_with)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    /// Instruction set the registers are implemented with
    pub backend: Backend,

    /// Register width; fixes the lane count and the block size
    pub width: RegisterWidth,

    /// Slices shorter than this skip the networks entirely
    pub scalar_threshold: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::auto_detect()
    }
}

impl SortConfig {
    /// Create a config for a specific backend at its widest register
    pub fn for_backend(backend: Backend) -> Self {
        Self {
            backend,
            width: backend.widest(),
            scalar_threshold: DEFAULT_SCALAR_THRESHOLD,
        }
    }

    pub fn with_width(mut self, width: RegisterWidth) -> Self {
        self.width = width;
        self
    }

    pub fn with_scalar_threshold(mut self, scalar_threshold: usize) -> Self {
        self.scalar_threshold = scalar_threshold;
        self
    }

    /// Detect the backend, then apply `VECSORT_BACKEND` / `VECSORT_WIDTH`
    ///
    /// Overrides naming an unknown value, a backend this CPU lacks, or a
    /// width the backend does not have are ignored.
    pub fn auto_detect() -> Self {
        let mut config = Self::for_backend(detect_backend());

        if let Ok(name) = std::env::var(BACKEND_ENV) {
            match parse_backend(&name) {
                Some(backend) if backend.is_available() => {
                    log::debug!("{}={} selects the {} backend", BACKEND_ENV, name, backend);
                    config = Self::for_backend(backend);
                }
                Some(backend) => {
                    log::warn!("{} backend requested but not available, using {}", backend, config.backend);
                }
                None => {
                    log::warn!("ignoring unknown {} value {:?}", BACKEND_ENV, name);
                }
            }
        }

        if let Ok(name) = std::env::var(WIDTH_ENV) {
            match parse_width(&name) {
                Some(width) if config.backend.supports(width) => {
                    log::debug!("{}={} selects {} registers", WIDTH_ENV, name, width);
                    config.width = width;
                }
                Some(width) => {
                    log::warn!("the {} backend has no {} registers", config.backend, width);
                }
                None => {
                    log::warn!("ignoring unknown {} value {:?}", WIDTH_ENV, name);
                }
            }
        }

        config
    }

    /// Check that the backend exists on this CPU and has the chosen width
    pub fn validate(&self) -> Result<(), SortError> {
        if !self.backend.supports(self.width) {
            return Err(SortError::UnsupportedWidth {
                backend: self.backend,
                width: self.width,
            });
        }
        if !self.backend.is_available() {
            return Err(SortError::BackendUnavailable(self.backend));
        }
        Ok(())
    }
}

/// Detects the fastest backend the current CPU supports
pub fn detect_backend() -> Backend {
    let backend = if Backend::Avx512.is_available() {
        Backend::Avx512
    } else if Backend::Avx2.is_available() {
        Backend::Avx2
    } else {
        Backend::Portable
    };
    log::debug!("detected {} backend", backend);
    backend
}

fn parse_backend(name: &str) -> Option<Backend> {
    match name.trim().to_lowercase().as_str() {
        "portable" => Some(Backend::Portable),
        "avx2" => Some(Backend::Avx2),
        "avx512" | "avx512f" => Some(Backend::Avx512),
        _ => None,
    }
}

fn parse_width(name: &str) -> Option<RegisterWidth> {
    match name.trim().to_lowercase().as_str() {
        "narrow" | "256" => Some(RegisterWidth::Narrow),
        "wide" | "512" => Some(RegisterWidth::Wide),
        _ => None,
    }
}
