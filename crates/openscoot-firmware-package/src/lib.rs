//! Firmware package validation for scooter subsystems
//!
//! A firmware distribution package is a zip archive carrying a JSON
//! manifest (`info.json`), a plain and/or encrypted firmware binary, and
//! optional flashing parameters. This crate runs the whole validation
//! pipeline as one synchronous pass — archive walk, manifest schema checks,
//! MD5 digest verification, device compatibility cross-check — and returns
//! a verdict the flashing layer can act on.
//!
//! # Architecture
//!
//! - [`archive`]: zip entry walk into raw contents
//! - [`manifest`]: manifest schema and staged validation
//! - [`digest`]: MD5 helpers
//! - [`validator`]: pipeline driver and compatibility cross-check
//! - [`error`]: fatal error and warning taxonomies
//!
//! # Safety model
//!
//! Fatal errors ([`PackageError`]) abort installation and expose no
//! payload. Warnings ([`Warning`]) accompany a successful verdict and must
//! be surfaced before flashing — installing onto an incompatible board can
//! brick the device; whether to block or prompt is the caller's policy.
//!
//! # Example
//!
//! ```no_run
//! use openscoot_device_identity::prelude::*;
//! use openscoot_firmware_package::{DeviceTarget, validate};
//!
//! # fn example(archive_bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let attrs = DeviceAttributes::new(VendorFamily::Ninebot, "max", "g30", "Ninebot Max");
//! let mut identity = DeviceIdentity::new(attrs);
//! identity.record_chip_type(0);
//! identity.record_bms_version(0x1100);
//!
//! let target = DeviceTarget::from_identity(&identity);
//! let package = validate(archive_bytes, &target)?;
//! if package.warning().is_none() {
//!     // hand package.into_payloads() to the flashing layer
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod archive;
pub mod digest;
pub mod error;
pub mod manifest;
pub mod prelude;
pub mod validator;

pub use archive::{ArchiveContents, entry, read_archive};
pub use digest::{compute_md5, digests_match};
pub use error::{PackageError, Warning};
pub use manifest::{
    DigestSet, EncryptionFlag, FirmwareKind, PackageMetadata, REQUIRED_KEYS,
    SUPPORTED_SCHEMA_VERSION, parse_manifest,
};
pub use validator::{DeviceTarget, ValidatedPackage, validate};
