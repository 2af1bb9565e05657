//! Single-pass validation pipeline
//!
//! Stages run in a fixed order, each terminal on failure: archive walk →
//! manifest validation → digest verification → compatibility cross-check.
//! There are no retries; a caller wanting another attempt re-invokes with a
//! fresh byte stream. The whole pass is synchronous and blocking — package
//! sizes are bounded and no partial result is meaningful.

use openscoot_device_identity::{BoardId, DeviceIdentity};
use tracing::{debug, info, warn};

use crate::archive::read_archive;
use crate::digest::{compute_md5, digests_match};
use crate::error::{PackageError, Warning};
use crate::manifest::{FirmwareKind, PackageMetadata, parse_manifest};

/// Device-side inputs to the compatibility cross-check: the expected model
/// token plus a read-only snapshot of the derived board identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTarget {
    /// Model the caller expects the package to declare
    pub model: String,
    /// Wireless radio board id
    pub ble_board: BoardId,
    /// Motor controller board id
    pub drv_board: BoardId,
    /// Battery management board id
    pub bms_board: BoardId,
}

impl DeviceTarget {
    /// Build a target from explicit board ids.
    pub fn new(
        model: impl Into<String>,
        ble_board: BoardId,
        drv_board: BoardId,
        bms_board: BoardId,
    ) -> Self {
        Self {
            model: model.into(),
            ble_board,
            drv_board,
            bms_board,
        }
    }

    /// Snapshot a connected device's identity. Take this after both
    /// handshake register reads have completed, or the DRV/BMS boards will
    /// still hold their `undefined` sentinels and any DRV/BMS package will
    /// be flagged incompatible.
    pub fn from_identity(identity: &DeviceIdentity) -> Self {
        let boards = identity.boards();
        Self {
            model: identity.attributes().model.clone(),
            ble_board: boards.ble.clone(),
            drv_board: boards.drv.clone(),
            bms_board: boards.bms.clone(),
        }
    }

    /// Board id a package of the given kind is matched against.
    fn board_for(&self, kind: FirmwareKind) -> &BoardId {
        match kind {
            FirmwareKind::Ble => &self.ble_board,
            FirmwareKind::Drv => &self.drv_board,
            FirmwareKind::Bms => &self.bms_board,
        }
    }
}

/// Outcome of a successful validation pass.
///
/// Owns the extracted payloads; the caller hands them to the flashing layer
/// and is responsible for disposal afterwards. Only payload variants that
/// were digest-verified are carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPackage {
    metadata: PackageMetadata,
    plain: Option<Vec<u8>>,
    encrypted: Option<Vec<u8>>,
    params: Option<String>,
    warning: Warning,
}

impl ValidatedPackage {
    /// Validated package metadata.
    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Digest-verified plain payload, when the package ships one.
    pub fn plain_payload(&self) -> Option<&[u8]> {
        self.plain.as_deref()
    }

    /// Digest-verified encrypted payload, when the package ships one.
    pub fn encrypted_payload(&self) -> Option<&[u8]> {
        self.encrypted.as_deref()
    }

    /// Free-text flashing parameters, when present.
    pub fn params(&self) -> Option<&str> {
        self.params.as_deref()
    }

    /// Non-fatal advisory raised by the compatibility cross-check. Must be
    /// surfaced to the user before any flashing proceeds.
    pub fn warning(&self) -> Warning {
        self.warning
    }

    /// Consume the package, yielding the payload blobs for the flashing
    /// layer as `(plain, encrypted)`.
    pub fn into_payloads(self) -> (Option<Vec<u8>>, Option<Vec<u8>>) {
        (self.plain, self.encrypted)
    }
}

/// Validate a package archive against a device target.
///
/// Always produces a verdict: internal zip, JSON and IO failures surface as
/// typed [`PackageError`]s, never as panics or raw errors escaping to the
/// caller.
///
/// # Errors
///
/// One of the closed fatal codes in [`PackageError`]. On error no payload
/// is exposed, even when some blobs were already read and digest-checked.
pub fn validate(
    archive_bytes: &[u8],
    target: &DeviceTarget,
) -> Result<ValidatedPackage, PackageError> {
    let contents = read_archive(archive_bytes)?;
    let manifest_bytes = contents
        .manifest
        .as_deref()
        .ok_or(PackageError::InvalidManifest)?;
    let metadata = parse_manifest(manifest_bytes)?;
    debug!(name = %metadata.display_name, kind = %metadata.kind, "manifest accepted");

    let plain = verify_payload(
        contents.plain,
        metadata.encryption.requires_plain(),
        metadata.digests.bin.as_deref(),
        PayloadVariant::Plain,
    )?;
    let encrypted = verify_payload(
        contents.encrypted,
        metadata.encryption.requires_encrypted(),
        metadata.digests.enc.as_deref(),
        PayloadVariant::Encrypted,
    )?;

    let warning = check_compatibility(&metadata, target);
    if warning.is_none() {
        info!(name = %metadata.display_name, kind = %metadata.kind, "package validated");
    } else {
        warn!(name = %metadata.display_name, ?warning, "package validated with warning");
    }

    Ok(ValidatedPackage {
        metadata,
        plain,
        encrypted,
        params: contents.params,
        warning,
    })
}

#[derive(Clone, Copy)]
enum PayloadVariant {
    Plain,
    Encrypted,
}

impl PayloadVariant {
    fn missing_payload(self) -> PackageError {
        match self {
            PayloadVariant::Plain => PackageError::MissingPlainPayload,
            PayloadVariant::Encrypted => PackageError::MissingEncryptedPayload,
        }
    }

    fn missing_digest(self) -> PackageError {
        match self {
            PayloadVariant::Plain => PackageError::MissingPlainDigest,
            PayloadVariant::Encrypted => PackageError::MissingEncryptedDigest,
        }
    }

    fn mismatch(self, declared: String, computed: String) -> PackageError {
        match self {
            PayloadVariant::Plain => PackageError::PlainDigestMismatch { declared, computed },
            PayloadVariant::Encrypted => {
                PackageError::EncryptedDigestMismatch { declared, computed }
            }
        }
    }
}

/// Verify one payload variant against its declared digest. Variants not
/// required by the encryption flag are dropped rather than carried
/// unverified.
fn verify_payload(
    payload: Option<Vec<u8>>,
    required: bool,
    declared: Option<&str>,
    variant: PayloadVariant,
) -> Result<Option<Vec<u8>>, PackageError> {
    if !required {
        return Ok(None);
    }
    let payload = payload.ok_or_else(|| variant.missing_payload())?;
    let declared = declared.ok_or_else(|| variant.missing_digest())?;
    let computed = compute_md5(&payload);
    if !digests_match(declared, &computed) {
        warn!(declared, computed = %computed, "payload digest mismatch");
        return Err(variant.mismatch(declared.to_string(), computed));
    }
    Ok(Some(payload))
}

/// Cross-check the package against the device. Both advisories may fire;
/// `Incompatible` is retained as the stricter signal.
fn check_compatibility(metadata: &PackageMetadata, target: &DeviceTarget) -> Warning {
    let mut warning = Warning::None;
    if metadata.enforce_model && metadata.model != target.model {
        warning = Warning::ModelMismatch;
    }
    let board = target.board_for(metadata.kind);
    let certified = metadata.compatible.iter().any(|id| id == board.as_str());
    if !certified || board.is_sentinel() {
        warning = Warning::Incompatible;
    }
    warning
}
