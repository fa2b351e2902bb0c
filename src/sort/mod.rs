//! Array sort: any length, any supported element type
//!
//! ```
//! let mut data = vec![3.5f64, -1.0, f64::INFINITY, 0.0, -0.0];
//! vecsort::sort(&mut data);
//! assert_eq!(data[0], -1.0);
//! assert!(data[1].is_sign_negative());
//! ```

pub mod config;
pub mod merge;

pub use config::{detect_backend, SortConfig, DEFAULT_SCALAR_THRESHOLD};

use crate::element::SortElement;
use crate::error::SortError;
use crate::register::{Backend, RegisterWidth};

/// Sort `data` ascending with the detected backend
///
/// Floats are ordered by IEEE 754 `totalOrder`, so NaNs of either sign and
/// both zeros end up in well-defined positions.
pub fn sort<T: SortElement>(data: &mut [T]) {
    if data.len() < DEFAULT_SCALAR_THRESHOLD {
        merge::scalar_sort(data);
        return;
    }

    let config = SortConfig::default();
    if let Err(err) = sort_with(data, &config) {
        log::warn!("{}; falling back to the scalar sort", err);
        merge::scalar_sort(data);
    }
}

/// Sort `data` ascending with an explicit backend and register width
///
/// # Errors
///
/// Returns an error, leaving `data` untouched, if the backend is not
/// available on this CPU or has no registers of the requested width.
pub fn sort_with<T: SortElement>(data: &mut [T], config: &SortConfig) -> Result<(), SortError> {
    config.validate()?;

    if data.len() < config.scalar_threshold.max(2) {
        merge::scalar_sort(data);
        return Ok(());
    }

    log::trace!(
        "sorting {} elements ({} full blocks) with {} {} registers",
        data.len(),
        data.len() / config.width.block_len(std::mem::size_of::<T>()),
        config.backend,
        config.width
    );

    match (config.backend, config.width) {
        (Backend::Portable, RegisterWidth::Narrow) => merge::sort_slice::<T::Narrow>(data),
        (Backend::Portable, RegisterWidth::Wide) => merge::sort_slice::<T::Wide>(data),
        (Backend::Avx2, RegisterWidth::Wide) => {
            return Err(SortError::UnsupportedWidth {
                backend: Backend::Avx2,
                width: RegisterWidth::Wide,
            })
        }
        (Backend::Avx512, RegisterWidth::Narrow) => {
            return Err(SortError::UnsupportedWidth {
                backend: Backend::Avx512,
                width: RegisterWidth::Narrow,
            })
        }
        // validate() confirmed the instruction set is present
        #[cfg(target_arch = "x86_64")]
        (Backend::Avx2, RegisterWidth::Narrow) => unsafe { merge::sort_slice_avx2::<T::Avx2>(data) },
        #[cfg(target_arch = "x86_64")]
        (Backend::Avx512, RegisterWidth::Wide) => unsafe { merge::sort_slice_avx512::<T::Avx512>(data) },
        #[cfg(not(target_arch = "x86_64"))]
        (backend @ (Backend::Avx2 | Backend::Avx512), _) => return Err(SortError::BackendUnavailable(backend)),
    }

    Ok(())
}
