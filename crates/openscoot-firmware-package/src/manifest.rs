//! Manifest schema and staged validation
//!
//! The manifest (`info.json`) is validated in stages so each failure maps
//! to its specific fatal code: structural decode problems and missing
//! required keys are [`PackageError::InvalidManifest`], while recognized
//! keys carrying unrecognized tokens get their own codes
//! ([`PackageError::InvalidType`], [`PackageError::InvalidEncryptionFlag`],
//! the missing-digest pair). Decoding straight into the typed metadata
//! would conflate all of those into one serde error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PackageError;

/// The single schema version this validator accepts.
pub const SUPPORTED_SCHEMA_VERSION: i64 = 1;

/// Manifest keys that must all be present under `firmware`.
pub const REQUIRED_KEYS: [&str; 7] = [
    "displayName",
    "model",
    "enforceModel",
    "type",
    "compatible",
    "encryption",
    "md5",
];

/// Subsystem a firmware package targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FirmwareKind {
    /// Wireless radio
    #[serde(rename = "BLE")]
    Ble,
    /// Motor controller
    #[serde(rename = "DRV")]
    Drv,
    /// Battery management unit
    #[serde(rename = "BMS")]
    Bms,
}

impl FirmwareKind {
    /// Wire token as it appears in the manifest.
    pub fn as_str(&self) -> &'static str {
        match self {
            FirmwareKind::Ble => "BLE",
            FirmwareKind::Drv => "DRV",
            FirmwareKind::Bms => "BMS",
        }
    }

    fn parse(token: &str) -> Result<Self, PackageError> {
        match token {
            "BLE" => Ok(FirmwareKind::Ble),
            "DRV" => Ok(FirmwareKind::Drv),
            "BMS" => Ok(FirmwareKind::Bms),
            _ => Err(PackageError::InvalidType {
                token: token.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for FirmwareKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which payload variants a package ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EncryptionFlag {
    /// Plain and encrypted variants are both present
    #[serde(rename = "both")]
    Both,
    /// Only the plain variant
    #[serde(rename = "plain")]
    Plain,
    /// Only the encrypted variant
    #[serde(rename = "encrypted")]
    Encrypted,
}

impl EncryptionFlag {
    /// Wire token as it appears in the manifest.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncryptionFlag::Both => "both",
            EncryptionFlag::Plain => "plain",
            EncryptionFlag::Encrypted => "encrypted",
        }
    }

    /// Whether the plain payload (and its digest) must be present.
    pub fn requires_plain(&self) -> bool {
        matches!(self, EncryptionFlag::Both | EncryptionFlag::Plain)
    }

    /// Whether the encrypted payload (and its digest) must be present.
    pub fn requires_encrypted(&self) -> bool {
        matches!(self, EncryptionFlag::Both | EncryptionFlag::Encrypted)
    }

    fn parse(token: &str) -> Result<Self, PackageError> {
        match token {
            "both" => Ok(EncryptionFlag::Both),
            "plain" => Ok(EncryptionFlag::Plain),
            "encrypted" => Ok(EncryptionFlag::Encrypted),
            _ => Err(PackageError::InvalidEncryptionFlag {
                token: token.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EncryptionFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared MD5 digests keyed by payload variant, lowercase hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestSet {
    /// Digest of the plain payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    /// Digest of the encrypted payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enc: Option<String>,
}

/// `firmware` object as it appears on the wire. Serde enforces the
/// required-key set; token fields stay raw strings here.
#[derive(Debug, Deserialize)]
struct RawFirmware {
    #[serde(rename = "displayName")]
    display_name: String,
    model: String,
    #[serde(rename = "enforceModel")]
    enforce_model: bool,
    #[serde(rename = "type")]
    kind: String,
    compatible: Vec<String>,
    encryption: String,
    md5: DigestSet,
}

/// Validated package metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    /// Human-readable package name
    pub display_name: String,
    /// Model the package declares itself for
    pub model: String,
    /// Whether a model mismatch should be surfaced as a warning
    pub enforce_model: bool,
    /// Subsystem this package targets
    pub kind: FirmwareKind,
    /// Payload variants the package ships
    pub encryption: EncryptionFlag,
    /// Declared payload digests
    pub digests: DigestSet,
    /// Board identifiers the package is certified for; never empty
    pub compatible: Vec<String>,
}

/// Parse and validate the manifest bytes into typed metadata.
///
/// # Errors
///
/// Every failure maps to one of the closed fatal codes; see the module
/// docs for the staging rationale.
pub fn parse_manifest(bytes: &[u8]) -> Result<PackageMetadata, PackageError> {
    let root: serde_json::Value = serde_json::from_slice(bytes).map_err(|err| {
        debug!(error = %err, "manifest is not valid JSON");
        PackageError::InvalidManifest
    })?;

    let schema_version = root
        .get("schemaVersion")
        .and_then(serde_json::Value::as_i64)
        .ok_or(PackageError::InvalidManifest)?;
    if schema_version != SUPPORTED_SCHEMA_VERSION {
        return Err(PackageError::UnsupportedSchemaVersion {
            found: schema_version,
        });
    }

    let firmware = root.get("firmware").ok_or(PackageError::InvalidManifest)?;
    let raw = RawFirmware::deserialize(firmware).map_err(|err| {
        debug!(error = %err, "firmware object rejected");
        PackageError::InvalidManifest
    })?;

    let kind = FirmwareKind::parse(&raw.kind)?;
    let encryption = EncryptionFlag::parse(&raw.encryption)?;
    if encryption.requires_encrypted() && raw.md5.enc.is_none() {
        return Err(PackageError::MissingEncryptedDigest);
    }
    if encryption.requires_plain() && raw.md5.bin.is_none() {
        return Err(PackageError::MissingPlainDigest);
    }
    // a package compatible with nothing is malformed, not merely incompatible
    if raw.compatible.is_empty() {
        return Err(PackageError::InvalidManifest);
    }

    Ok(PackageMetadata {
        display_name: raw.display_name,
        model: raw.model,
        enforce_model: raw.enforce_model,
        kind,
        encryption,
        digests: raw.md5,
        compatible: raw.compatible,
    })
}
