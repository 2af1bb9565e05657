//! Convenience re-exports for common device-identity types

pub use crate::board::{BoardId, BoardIdentity, McuFamily, VendorFamily};
pub use crate::derive::{
    BMS_STM32_VERSION_FLOOR, derive_ble_board, derive_bms_board, derive_drv_board,
};
pub use crate::identity::{DeviceAttributes, DeviceIdentity, TelemetrySink, TracingSink};
