//! Board identity resolution for scooter subsystems
//!
//! Connected scooters expose three independently flashable subsystems: the
//! wireless radio (BLE), the motor controller (DRV) and the battery
//! management unit (BMS). Firmware packages declare the boards they are
//! compatible with as canonical string identifiers; this crate derives those
//! identifiers for a connected device from its static attributes plus two
//! one-shot register reads performed during the connection handshake.
//!
//! # Architecture
//!
//! - [`board`]: board identifier and MCU classification types
//! - [`derive`]: pure derivation rules (attributes + register value → id)
//! - [`identity`]: per-session [`DeviceIdentity`] lifecycle and telemetry
//!
//! # Lifecycle
//!
//! A [`DeviceIdentity`] is created once per connection with the BLE board
//! already derived from static attributes. The DRV and BMS boards stay at
//! their `undefined` sentinel until [`DeviceIdentity::record_chip_type`] and
//! [`DeviceIdentity::record_bms_version`] deliver the handshake register
//! reads. Derivation never fails: unrecognized model/register combinations
//! fall through to deterministic `UNKNOWN`/`undefined` sentinels, which the
//! package compatibility check downstream treats as "do not flash".

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod board;
pub mod derive;
pub mod identity;
pub mod prelude;

pub use board::{BoardId, BoardIdentity, McuFamily, VendorFamily};
pub use derive::{derive_ble_board, derive_bms_board, derive_drv_board};
pub use identity::{DeviceAttributes, DeviceIdentity, TelemetrySink, TracingSink};
