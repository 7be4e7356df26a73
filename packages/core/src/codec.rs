//! Codec: converting between Value trees and stored string blobs.

use serde_json::Value;

/// A codec failure, independent of the key or path being operated on.
///
/// The orchestrator wraps this into [`crate::Error::Decode`] or
/// [`crate::Error::Encode`] with the offending key/path attached.
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct CodecError {
    pub message: String,
}

impl CodecError {
    pub fn new(message: impl Into<String>) -> Self {
        CodecError {
            message: message.into(),
        }
    }
}

/// Converts between [`Value`] trees and the string blobs a medium stores.
///
/// A `Storage` instance carries exactly one codec; the default is
/// [`JsonCodec`]. Implement this trait to store blobs in another text
/// encoding.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Codec>` or
/// `Arc<dyn Codec>`.
pub trait Codec: Send + Sync {
    /// Encode a value into a storable blob.
    fn encode(&self, value: &Value) -> Result<String, CodecError>;

    /// Decode a stored blob into a value.
    fn decode(&self, raw: &str) -> Result<Value, CodecError>;
}

/// The default codec: standard JSON text via serde_json.
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(|e| CodecError::new(e.to_string()))
    }

    fn decode(&self, raw: &str) -> Result<Value, CodecError> {
        serde_json::from_str(raw).map_err(|e| CodecError::new(e.to_string()))
    }
}

impl<T: Codec + ?Sized> Codec for Box<T> {
    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        self.as_ref().encode(value)
    }

    fn decode(&self, raw: &str) -> Result<Value, CodecError> {
        self.as_ref().decode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_roundtrip() {
        let value = json!({"name": {"first": "John"}, "age": 42});
        let encoded = JsonCodec.encode(&value).unwrap();
        let decoded = JsonCodec.decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn encodes_primitives() {
        assert_eq!(JsonCodec.encode(&json!(null)).unwrap(), "null");
        assert_eq!(JsonCodec.encode(&json!(1)).unwrap(), "1");
        assert_eq!(JsonCodec.encode(&json!("s")).unwrap(), "\"s\"");
        assert_eq!(JsonCodec.encode(&json!({})).unwrap(), "{}");
        assert_eq!(JsonCodec.encode(&json!([])).unwrap(), "[]");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(JsonCodec.decode("undefined").is_err());
        assert!(JsonCodec.decode("{not json").is_err());
        assert!(JsonCodec.decode("").is_err());
    }

    #[test]
    fn boxed_codec_delegates() {
        let codec: Box<dyn Codec> = Box::new(JsonCodec);
        assert_eq!(codec.decode("null").unwrap(), json!(null));
        assert_eq!(codec.encode(&json!(true)).unwrap(), "true");
    }
}
