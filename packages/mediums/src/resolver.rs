//! Resolving the accepted medium inputs into a concrete medium.

use std::collections::BTreeMap;

use stash_core::{Error, KeyPath, Storage};
use stash_medium::Medium;

use crate::memory::MemoryMedium;
use crate::registry;

/// The shapes of input accepted when opening a storage.
///
/// Construction is usually implicit through the `From` conversions: a
/// string names a predefined medium, a map of strings seeds a private
/// in-memory medium with raw blobs, and a boxed [`Medium`] is used as-is.
pub enum MediumInput {
    /// The default: a fresh private in-memory medium per resolution.
    /// Use `"page"` by name for the process-wide shared one.
    Default,
    /// A predefined medium by name: `"page"`, `"local"`, or `"session"`.
    /// Any other name is rejected at resolution time.
    Named(String),
    /// A caller-supplied medium implementation.
    Custom(Box<dyn Medium>),
    /// Raw encoded blobs seeding a fresh private in-memory medium.
    Strings(BTreeMap<String, String>),
}

impl Default for MediumInput {
    fn default() -> Self {
        MediumInput::Default
    }
}

impl From<&str> for MediumInput {
    fn from(name: &str) -> Self {
        MediumInput::Named(name.to_string())
    }
}

impl From<String> for MediumInput {
    fn from(name: String) -> Self {
        MediumInput::Named(name)
    }
}

impl From<Box<dyn Medium>> for MediumInput {
    fn from(medium: Box<dyn Medium>) -> Self {
        MediumInput::Custom(medium)
    }
}

impl From<BTreeMap<String, String>> for MediumInput {
    fn from(blobs: BTreeMap<String, String>) -> Self {
        MediumInput::Strings(blobs)
    }
}

/// Resolve an input into a concrete medium.
///
/// The only failing case is a name that matches no predefined medium,
/// reported as [`Error::InvalidMedium`].
pub fn resolve(input: MediumInput) -> Result<Box<dyn Medium>, Error> {
    match input {
        MediumInput::Default => Ok(Box::new(MemoryMedium::new())),
        MediumInput::Named(name) => match name.as_str() {
            "page" => Ok(Box::new(registry::page())),
            "local" => Ok(registry::local()),
            "session" => Ok(Box::new(registry::session())),
            other => Err(Error::InvalidMedium {
                message: format!(
                    "'{}' is not a predefined medium (expected \"page\", \"local\", or \"session\")",
                    other
                ),
            }),
        },
        MediumInput::Custom(medium) => Ok(medium),
        MediumInput::Strings(blobs) => Ok(Box::new(MemoryMedium::from_map(blobs))),
    }
}

/// Open a storage over the resolved medium, with no namespace.
pub fn open(input: impl Into<MediumInput>) -> Result<Storage<Box<dyn Medium>>, Error> {
    Ok(Storage::new(resolve(input.into())?))
}

/// Open a storage over the resolved medium, namespaced under `namespace`.
///
/// A dotted namespace string splits into multiple segments, exactly like
/// an operation path.
pub fn open_namespace(
    input: impl Into<MediumInput>,
    namespace: impl Into<KeyPath>,
) -> Result<Storage<Box<dyn Medium>>, Error> {
    Ok(Storage::with_namespace(resolve(input.into())?, namespace))
}
