//! Convenience re-exports for common package-validation types

pub use crate::archive::{ArchiveContents, entry, read_archive};
pub use crate::digest::{compute_md5, digests_match};
pub use crate::error::{PackageError, Warning};
pub use crate::manifest::{
    DigestSet, EncryptionFlag, FirmwareKind, PackageMetadata, SUPPORTED_SCHEMA_VERSION,
    parse_manifest,
};
pub use crate::validator::{DeviceTarget, ValidatedPackage, validate};
