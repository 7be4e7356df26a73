//! Error types for the medium layer.
//!
//! Errors at this level are transport-focused. No semantic errors like
//! "invalid path" or "decode failure" - those belong in higher layers.

/// Errors raised by a [`crate::Medium`] implementation.
///
/// These are transport and system-level errors only. Codec failures and
/// path problems are reported by the orchestrating layer.
#[derive(thiserror::Error, Debug)]
pub enum MediumError {
    /// Generic I/O or transport failure.
    ///
    /// Use this for file I/O errors, network errors, IPC failures, etc.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The operation is not supported by this medium.
    ///
    /// For example, clearing a read-only medium.
    #[error("operation not supported")]
    NotSupported,

    /// A shared medium handle's lock was poisoned by a panicking holder.
    #[error("medium lock poisoned")]
    LockPoisoned,
}

impl From<std::io::Error> for MediumError {
    fn from(e: std::io::Error) -> Self {
        MediumError::Transport(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_works() {
        let e = MediumError::NotSupported;
        assert_eq!(format!("{}", e), "operation not supported");

        let e = MediumError::LockPoisoned;
        assert_eq!(format!("{}", e), "medium lock poisoned");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MediumError = io_err.into();
        assert!(matches!(err, MediumError::Transport(_)));
    }

    #[test]
    fn transport_error_has_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: MediumError = io_err.into();
        assert!(err.source().is_some());
    }
}
