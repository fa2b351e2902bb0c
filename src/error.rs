//! Errors reported by the checked entry points

use thiserror::Error;

use crate::register::{Backend, RegisterWidth};

/// Contract violations detected before any element is touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("block must hold exactly {expected} elements, got {actual}")]
    BlockLength { expected: usize, actual: usize },

    #[error("buffer must be aligned to {required} bytes")]
    Misaligned { required: usize },

    #[error("the {0} backend is not available on this CPU")]
    BackendUnavailable(Backend),

    #[error("the {backend} backend has no {width} registers")]
    UnsupportedWidth {
        backend: Backend,
        width: RegisterWidth,
    },
}
