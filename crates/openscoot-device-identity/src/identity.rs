//! Per-session device identity lifecycle
//!
//! A [`DeviceIdentity`] is owned by the device-session object for the life
//! of one connection. It is created in the *constructed* state with only the
//! BLE board derived; the two handshake register reads move it to the
//! *resolved* state, re-deriving the DRV and BMS boards exactly once each.

use serde::Serialize;
use tracing::debug;

use crate::board::{BoardIdentity, McuFamily, VendorFamily};
use crate::derive::{derive_ble_board, derive_bms_board, derive_drv_board};

/// Static attributes describing a connected device, as reported by the
/// transport during discovery. Immutable for the life of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceAttributes {
    /// Vendor family
    pub family: VendorFamily,
    /// Model code token, e.g. `"m365"`, `"max"`, `"d18"`
    pub model: String,
    /// Variant code within the model
    pub variant: String,
    /// Human-readable model name for display
    pub display_name: String,
}

impl DeviceAttributes {
    /// Build attributes from the transport's discovery data.
    pub fn new(
        family: VendorFamily,
        model: impl Into<String>,
        variant: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            family,
            model: model.into(),
            variant: variant.into(),
            display_name: display_name.into(),
        }
    }

    /// Whether this is a Xiaomi-family device.
    pub fn is_xiaomi(&self) -> bool {
        self.family == VendorFamily::Xiaomi
    }

    /// Whether the model carries a BMS reachable as a separate flash target.
    pub fn has_external_bms(&self) -> bool {
        matches!(self.model.as_str(), "esx" | "e")
    }
}

/// Observer for identity telemetry published during a session.
///
/// The MCU classification is published once at construction (as `n/a`) and
/// again on every chip-type read, so connection-state displays can track it
/// without polling the session.
pub trait TelemetrySink {
    /// Called whenever the controller MCU classification is (re)derived.
    fn mcu_classified(&self, mcu: McuFamily);
}

/// Default sink that reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn mcu_classified(&self, mcu: McuFamily) {
        tracing::info!(mcu = %mcu, "controller mcu classified");
    }
}

/// Derived identity of one connected device.
///
/// The two register values are late-bound: each is set once by the
/// connection handshake, triggering re-derivation of the corresponding
/// board id. Repeated delivery of the same register value is permitted and
/// re-derives to an identical result.
pub struct DeviceIdentity {
    attrs: DeviceAttributes,
    chip_type: Option<u32>,
    bms_version: Option<u32>,
    boards: BoardIdentity,
    sink: Box<dyn TelemetrySink + Send + Sync>,
}

impl DeviceIdentity {
    /// Create the identity for a freshly connected device, deriving the BLE
    /// board from static attributes. DRV and BMS boards start `undefined`.
    pub fn new(attrs: DeviceAttributes) -> Self {
        Self::with_sink(attrs, TracingSink)
    }

    /// Like [`DeviceIdentity::new`] with a custom telemetry sink.
    pub fn with_sink(
        attrs: DeviceAttributes,
        sink: impl TelemetrySink + Send + Sync + 'static,
    ) -> Self {
        let mut boards = BoardIdentity::unresolved();
        boards.ble = derive_ble_board(attrs.family, &attrs.model);
        debug!(model = %attrs.model, ble = %boards.ble, "session identity created");
        let identity = Self {
            attrs,
            chip_type: None,
            bms_version: None,
            boards,
            sink: Box::new(sink),
        };
        identity.sink.mcu_classified(identity.boards.drv_mcu);
        identity
    }

    /// Static attributes this identity was built from.
    pub fn attributes(&self) -> &DeviceAttributes {
        &self.attrs
    }

    /// Snapshot of the currently derived board identity.
    pub fn boards(&self) -> &BoardIdentity {
        &self.boards
    }

    /// Chip-type register value, once read.
    pub fn chip_type(&self) -> Option<u32> {
        self.chip_type
    }

    /// BMS version register value, once read.
    pub fn bms_version(&self) -> Option<u32> {
        self.bms_version
    }

    /// True once both handshake reads have been recorded.
    pub fn is_resolved(&self) -> bool {
        self.chip_type.is_some() && self.bms_version.is_some()
    }

    /// Record the chip-type register read (DRV register 0x46) and re-derive
    /// the controller board id and MCU classification.
    pub fn record_chip_type(&mut self, chip_type: u32) {
        let (drv, mcu) = derive_drv_board(self.attrs.family, &self.attrs.model, chip_type);
        debug!(chip_type, drv = %drv, mcu = %mcu, "controller board derived");
        self.chip_type = Some(chip_type);
        self.boards.drv = drv;
        self.boards.drv_mcu = mcu;
        self.sink.mcu_classified(mcu);
    }

    /// Record the BMS version register read and re-derive the
    /// battery-management board id.
    pub fn record_bms_version(&mut self, bms_version: u32) {
        let bms = derive_bms_board(self.attrs.family, &self.attrs.model, bms_version);
        debug!(bms_version, bms = %bms, "bms board derived");
        self.bms_version = Some(bms_version);
        self.boards.bms = bms;
    }
}

impl std::fmt::Debug for DeviceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceIdentity")
            .field("attrs", &self.attrs)
            .field("chip_type", &self.chip_type)
            .field("bms_version", &self.bms_version)
            .field("boards", &self.boards)
            .finish_non_exhaustive()
    }
}
