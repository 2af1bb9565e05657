//! Error and warning taxonomies for package validation
//!
//! The two taxonomies are independent and never conflated: a fatal
//! [`PackageError`] aborts installation entirely, while a [`Warning`] is
//! surfaced alongside a successful verdict and the block-vs-override policy
//! belongs to the caller.

use serde::Serialize;
use thiserror::Error;

/// Fatal validation errors. Any of these terminates the validation pass and
/// no payload is exposed, even when some blobs were already read and
/// digest-checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackageError {
    /// The archive stream could not be opened or read at all
    #[error("package archive could not be read")]
    Archive,

    /// Manifest entry missing, malformed, missing a required key, or
    /// compatible with nothing
    #[error("package manifest is missing or malformed")]
    InvalidManifest,

    /// Manifest declares a schema version other than the supported one
    #[error("unsupported manifest schema version {found} (supported: 1)")]
    UnsupportedSchemaVersion {
        /// Version the manifest declared
        found: i64,
    },

    /// Manifest `type` is not one of `BLE`, `DRV`, `BMS`
    #[error("unrecognized firmware type {token:?}")]
    InvalidType {
        /// Token the manifest carried
        token: String,
    },

    /// Manifest `encryption` is not one of `both`, `plain`, `encrypted`
    #[error("unrecognized encryption flag {token:?}")]
    InvalidEncryptionFlag {
        /// Token the manifest carried
        token: String,
    },

    /// Encryption flag requires a plain-variant digest and none is declared
    #[error("manifest omits the plain-variant digest required by its encryption flag")]
    MissingPlainDigest,

    /// Encryption flag requires an encrypted-variant digest and none is declared
    #[error("manifest omits the encrypted-variant digest required by its encryption flag")]
    MissingEncryptedDigest,

    /// Encryption flag requires the plain payload and the archive lacks it
    #[error("archive is missing the plain firmware payload")]
    MissingPlainPayload,

    /// Encryption flag requires the encrypted payload and the archive lacks it
    #[error("archive is missing the encrypted firmware payload")]
    MissingEncryptedPayload,

    /// Recomputed plain-payload digest differs from the declared one
    #[error("plain payload digest mismatch (declared {declared}, computed {computed})")]
    PlainDigestMismatch {
        /// Digest the manifest declared
        declared: String,
        /// Digest recomputed over the payload bytes
        computed: String,
    },

    /// Recomputed encrypted-payload digest differs from the declared one
    #[error("encrypted payload digest mismatch (declared {declared}, computed {computed})")]
    EncryptedDigestMismatch {
        /// Digest the manifest declared
        declared: String,
        /// Digest recomputed over the payload bytes
        computed: String,
    },

    /// Catch-all for unexpected internal failures; validation always
    /// produces a verdict instead of propagating a raw error
    #[error("unexpected failure while validating package")]
    Unknown,
}

/// Non-fatal advisories raised by the compatibility cross-check.
///
/// A package can validate successfully while carrying a warning; it never
/// succeeds with a fatal error. When both conditions fire, `Incompatible`
/// is retained as the stricter, safety-relevant signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Warning {
    /// No advisory
    #[default]
    None,
    /// Manifest enforces a model and it differs from the device's
    ModelMismatch,
    /// Selected board id is not certified by the package
    Incompatible,
}

impl Warning {
    /// True when no advisory was raised.
    pub fn is_none(&self) -> bool {
        matches!(self, Warning::None)
    }
}
