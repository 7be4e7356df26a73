//! Error types for the core layer.
//!
//! These are the semantic errors - invalid medium inputs, codec failures
//! tagged with the offending key or path - layered over the transport
//! errors of `stash-medium`.

use stash_medium::MediumError;

/// Errors surfaced by storage construction and operations.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Construction-time: the medium input matched none of the accepted
    /// shapes (in practice, an unknown predefined medium name).
    #[error("not a valid storage medium: {message}")]
    InvalidMedium { message: String },

    /// A stored blob could not be decoded into a value.
    #[error("failed to decode value stored at '{key}': {message}")]
    Decode { key: String, message: String },

    /// A value could not be encoded into a storable blob.
    #[error("failed to encode value for '{path}': {message}")]
    Encode { path: String, message: String },

    /// A codec or medium rejected a value shape it cannot represent.
    ///
    /// Nothing in this workspace constructs it: [`crate::JsonCodec`] can
    /// represent every `Value`, so its failures surface as `Decode` or
    /// `Encode`. The variant is part of the taxonomy for external codec
    /// and medium implementations with narrower value models.
    #[error("unsupported value at '{path}': {message}")]
    UnsupportedValue { path: String, message: String },

    /// The operation needs a non-empty path.
    #[error("invalid path: {message}")]
    InvalidPath { message: String },

    /// Transport failure propagated from the medium.
    #[error("medium error: {0}")]
    Medium(#[from] MediumError),
}
