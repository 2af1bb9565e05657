//! Board identifier and MCU classification types
//!
//! Identifiers are matched verbatim against the `compatible` list of a
//! firmware package manifest, so their string forms are wire format and must
//! not change.

use serde::{Serialize, Serializer};

/// Vendor family of a connected scooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VendorFamily {
    /// Xiaomi-family models; boards live in the `mi_` namespace.
    Xiaomi,
    /// Ninebot-family models; boards live in the `nb_`, `d_` or
    /// model-prefixed namespaces.
    Ninebot,
}

/// Microcontroller family of the motor controller, as classified from the
/// chip-type register. Published to telemetry observers on every
/// (re)derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum McuFamily {
    /// STMicroelectronics STM32F1 series
    #[serde(rename = "STM32F")]
    Stm32F,
    /// GigaDevice GD32E1 series
    #[serde(rename = "GD32E")]
    Gd32E,
    /// GigaDevice GD32F1 series
    #[serde(rename = "GD32F")]
    Gd32F,
    /// Artery AT32F4 series
    #[serde(rename = "AT32F")]
    At32F,
    /// Not yet classified, or the register value matched no known chip
    #[default]
    #[serde(rename = "n/a")]
    Unknown,
}

impl McuFamily {
    /// Canonical label, `"n/a"` when unclassified.
    pub fn as_str(&self) -> &'static str {
        match self {
            McuFamily::Stm32F => "STM32F",
            McuFamily::Gd32E => "GD32E",
            McuFamily::Gd32F => "GD32F",
            McuFamily::At32F => "AT32F",
            McuFamily::Unknown => "n/a",
        }
    }
}

impl std::fmt::Display for McuFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical board identifier for one subsystem.
///
/// The string form is one of a closed vocabulary: a named vendor board, a
/// model-prefixed synthetic id, or the `"undefined"` sentinel. Identifiers
/// are never absent; before the corresponding register read they hold
/// [`BoardId::Undefined`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoardId {
    /// No identification has taken place, or the subsystem has no
    /// separately identified board on this model.
    Undefined,
    /// A board from the fixed vendor vocabulary, e.g. `mi_BLE_LEGACY`.
    Named(&'static str),
    /// Model-prefixed synthetic identifier, e.g. `t10_BLE` or
    /// `g3_DRV_STM32F103CxT6`.
    Derived(String),
}

impl BoardId {
    /// Wire string of the `Undefined` sentinel.
    pub const UNDEFINED: &'static str = "undefined";

    /// Canonical string form, matched against manifest compatibility lists.
    pub fn as_str(&self) -> &str {
        match self {
            BoardId::Undefined => Self::UNDEFINED,
            BoardId::Named(name) => name,
            BoardId::Derived(name) => name.as_str(),
        }
    }

    /// True for the `"undefined"` sentinel.
    pub fn is_undefined(&self) -> bool {
        matches!(self, BoardId::Undefined)
    }

    /// True when the id is a generic/unknown fallback rather than a
    /// positively identified board.
    pub fn is_fallback(&self) -> bool {
        let s = self.as_str();
        s.contains("UNKNOWN") || s.contains("GENERIC")
    }

    /// True when the id must not be trusted for compatibility matching.
    ///
    /// Both sentinels are kept distinct on the wire (`undefined` vs an
    /// `UNKNOWN`/`GENERIC` substring) because they are distinct signals in
    /// existing packages; either one fails the compatibility check.
    pub fn is_sentinel(&self) -> bool {
        self.is_undefined() || self.is_fallback()
    }
}

impl Serialize for BoardId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for BoardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived board identity snapshot for one connected device.
///
/// Callers that share a snapshot across validation calls must take it after
/// both register reads have completed and treat it as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardIdentity {
    /// Wireless radio board id
    pub ble: BoardId,
    /// Motor controller board id
    pub drv: BoardId,
    /// Battery management board id
    pub bms: BoardId,
    /// Motor controller MCU classification
    pub drv_mcu: McuFamily,
}

impl BoardIdentity {
    /// Identity of a device before any derivation has run.
    pub fn unresolved() -> Self {
        Self {
            ble: BoardId::Undefined,
            drv: BoardId::Undefined,
            bms: BoardId::Undefined,
            drv_mcu: McuFamily::Unknown,
        }
    }
}
