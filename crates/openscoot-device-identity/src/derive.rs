//! Pure board-derivation rules
//!
//! Each rule is a total function from static attributes (plus at most one
//! register value) to a canonical identifier. There is no failure path:
//! unmatched combinations fall through to `UNKNOWN`/`undefined` sentinels,
//! which are themselves meaningful input to the compatibility check.

use crate::board::{BoardId, McuFamily, VendorFamily};

/// BMS firmware versions at or above this value run on the STM32-based
/// board generation; older versions run on the ST8 generation.
pub const BMS_STM32_VERSION_FLOOR: u32 = 0x1000;

/// Models with no separately flashed BMS firmware.
const NO_EXTERNAL_BMS_MODELS: [&str; 2] = ["f", "t15"];

/// Ninebot models whose controller boards share the `d_` namespace.
const D_SERIES_MODELS: [&str; 3] = ["d18", "d28", "d38"];

/// Derive the wireless-radio board id from static attributes.
///
/// Runs once at session construction; the BLE board does not depend on any
/// register read.
pub fn derive_ble_board(family: VendorFamily, model: &str) -> BoardId {
    match family {
        VendorFamily::Xiaomi => match model {
            "m365" => BoardId::Named("mi_BLE_LEGACY"),
            "pro" => BoardId::Named("mi_BLE_NRF51822QFAA"),
            _ => BoardId::Named("mi_BLE_NRF51822QFAC"),
        },
        VendorFamily::Ninebot => match model {
            "esx" | "e" => BoardId::Named("nb_BLE_ROUND"),
            "max" | "f" => BoardId::Named("nb_BLE_NRF51822QFAA"),
            _ => BoardId::Derived(format!("{model}_BLE")),
        },
    }
}

/// Derive the motor-controller board id and MCU classification from the
/// chip-type register (DRV register 0x46).
pub fn derive_drv_board(family: VendorFamily, model: &str, chip_type: u32) -> (BoardId, McuFamily) {
    match family {
        VendorFamily::Xiaomi => match chip_type {
            0 | 3 => (BoardId::Named("mi_DRV_STM32F103CxT6"), McuFamily::Stm32F),
            1 => (BoardId::Named("mi_DRV_GD32E103CxT6"), McuFamily::Gd32E),
            2 => (BoardId::Named("mi_DRV_GD32F103CxT6"), McuFamily::Gd32F),
            _ => (BoardId::Named("mi_DRV_UNKNOWN"), McuFamily::Unknown),
        },
        VendorFamily::Ninebot if D_SERIES_MODELS.contains(&model) => match chip_type {
            0 => (BoardId::Named("d_DRV_STM32F103CxT6"), McuFamily::Stm32F),
            1 => (BoardId::Named("d_DRV_AT32F415CxT7"), McuFamily::At32F),
            _ => (BoardId::Named("d_DRV_UNKNOWN"), McuFamily::Unknown),
        },
        VendorFamily::Ninebot => match chip_type {
            0 => (
                BoardId::Derived(format!("{model}_DRV_STM32F103CxT6")),
                McuFamily::Stm32F,
            ),
            1 => (
                BoardId::Derived(format!("{model}_DRV_AT32F415CxT7")),
                McuFamily::At32F,
            ),
            _ => (
                BoardId::Derived(format!("{model}_DRV_UNKNOWN")),
                McuFamily::Unknown,
            ),
        },
    }
}

/// Derive the battery-management board id from the BMS version register.
///
/// Models in the no-external-BMS set yield [`BoardId::Undefined`]
/// unconditionally. Note the ambiguity this inherits: for such a model an
/// `undefined` BMS id still fails the compatibility check of a BMS package,
/// even though the model has no BMS firmware to flash in the first place.
/// Both sentinels are preserved as-is pending product-level clarification.
pub fn derive_bms_board(family: VendorFamily, model: &str, bms_version: u32) -> BoardId {
    if NO_EXTERNAL_BMS_MODELS.contains(&model) {
        return BoardId::Undefined;
    }
    let namespace = match family {
        VendorFamily::Xiaomi => "mi_BMS_".to_string(),
        VendorFamily::Ninebot => match model {
            "esx" | "e" => "esx_e_BMS_".to_string(),
            "max" | "g2" | "g65" => "max_BMS_".to_string(),
            _ => format!("{model}_BMS_"),
        },
    };
    let generation = if bms_version < BMS_STM32_VERSION_FLOOR {
        "ST8"
    } else {
        "STM32"
    };
    BoardId::Derived(format!("{namespace}{generation}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xiaomi_ble_boards() {
        assert_eq!(
            derive_ble_board(VendorFamily::Xiaomi, "m365").as_str(),
            "mi_BLE_LEGACY"
        );
        assert_eq!(
            derive_ble_board(VendorFamily::Xiaomi, "pro").as_str(),
            "mi_BLE_NRF51822QFAA"
        );
        assert_eq!(
            derive_ble_board(VendorFamily::Xiaomi, "pro2").as_str(),
            "mi_BLE_NRF51822QFAC"
        );
    }

    #[test]
    fn ninebot_ble_boards() {
        assert_eq!(
            derive_ble_board(VendorFamily::Ninebot, "esx").as_str(),
            "nb_BLE_ROUND"
        );
        assert_eq!(
            derive_ble_board(VendorFamily::Ninebot, "e").as_str(),
            "nb_BLE_ROUND"
        );
        assert_eq!(
            derive_ble_board(VendorFamily::Ninebot, "max").as_str(),
            "nb_BLE_NRF51822QFAA"
        );
        assert_eq!(
            derive_ble_board(VendorFamily::Ninebot, "f").as_str(),
            "nb_BLE_NRF51822QFAA"
        );
        assert_eq!(
            derive_ble_board(VendorFamily::Ninebot, "t10").as_str(),
            "t10_BLE"
        );
    }

    #[test]
    fn xiaomi_drv_boards() {
        let cases = [
            (0, "mi_DRV_STM32F103CxT6", McuFamily::Stm32F),
            (3, "mi_DRV_STM32F103CxT6", McuFamily::Stm32F),
            (1, "mi_DRV_GD32E103CxT6", McuFamily::Gd32E),
            (2, "mi_DRV_GD32F103CxT6", McuFamily::Gd32F),
            (7, "mi_DRV_UNKNOWN", McuFamily::Unknown),
        ];
        for (chip_type, board, mcu) in cases {
            let (drv, family) = derive_drv_board(VendorFamily::Xiaomi, "m365", chip_type);
            assert_eq!(drv.as_str(), board);
            assert_eq!(family, mcu);
        }
    }

    #[test]
    fn d_series_drv_boards_use_shared_namespace() {
        for model in ["d18", "d28", "d38"] {
            let (drv, mcu) = derive_drv_board(VendorFamily::Ninebot, model, 0);
            assert_eq!(drv.as_str(), "d_DRV_STM32F103CxT6");
            assert_eq!(mcu, McuFamily::Stm32F);

            let (drv, mcu) = derive_drv_board(VendorFamily::Ninebot, model, 1);
            assert_eq!(drv.as_str(), "d_DRV_AT32F415CxT7");
            assert_eq!(mcu, McuFamily::At32F);

            let (drv, mcu) = derive_drv_board(VendorFamily::Ninebot, model, 9);
            assert_eq!(drv.as_str(), "d_DRV_UNKNOWN");
            assert_eq!(mcu, McuFamily::Unknown);
        }
    }

    #[test]
    fn generic_ninebot_drv_boards_are_model_prefixed() {
        let (drv, mcu) = derive_drv_board(VendorFamily::Ninebot, "g3", 0);
        assert_eq!(drv.as_str(), "g3_DRV_STM32F103CxT6");
        assert_eq!(mcu, McuFamily::Stm32F);

        let (drv, mcu) = derive_drv_board(VendorFamily::Ninebot, "g3", 1);
        assert_eq!(drv.as_str(), "g3_DRV_AT32F415CxT7");
        assert_eq!(mcu, McuFamily::At32F);

        let (drv, _) = derive_drv_board(VendorFamily::Ninebot, "g3", 42);
        assert_eq!(drv.as_str(), "g3_DRV_UNKNOWN");
        assert!(drv.is_fallback());
    }

    #[test]
    fn no_external_bms_models_stay_undefined() {
        assert!(derive_bms_board(VendorFamily::Ninebot, "f", 0).is_undefined());
        assert!(derive_bms_board(VendorFamily::Ninebot, "f", 0x2000).is_undefined());
        assert!(derive_bms_board(VendorFamily::Ninebot, "t15", 0x500).is_undefined());
    }

    #[test]
    fn bms_namespaces() {
        assert_eq!(
            derive_bms_board(VendorFamily::Xiaomi, "m365", 0x800).as_str(),
            "mi_BMS_ST8"
        );
        assert_eq!(
            derive_bms_board(VendorFamily::Ninebot, "esx", 0x1000).as_str(),
            "esx_e_BMS_STM32"
        );
        assert_eq!(
            derive_bms_board(VendorFamily::Ninebot, "e", 0xfff).as_str(),
            "esx_e_BMS_ST8"
        );
        assert_eq!(
            derive_bms_board(VendorFamily::Ninebot, "max", 0x1234).as_str(),
            "max_BMS_STM32"
        );
        assert_eq!(
            derive_bms_board(VendorFamily::Ninebot, "g2", 0x1234).as_str(),
            "max_BMS_STM32"
        );
        assert_eq!(
            derive_bms_board(VendorFamily::Ninebot, "g65", 0x1234).as_str(),
            "max_BMS_STM32"
        );
        assert_eq!(
            derive_bms_board(VendorFamily::Ninebot, "t10", 0x999).as_str(),
            "t10_BMS_ST8"
        );
    }

    #[test]
    fn bms_generation_threshold_boundary() {
        assert_eq!(
            derive_bms_board(VendorFamily::Xiaomi, "m365", 0x0fff).as_str(),
            "mi_BMS_ST8"
        );
        assert_eq!(
            derive_bms_board(VendorFamily::Xiaomi, "m365", 0x1000).as_str(),
            "mi_BMS_STM32"
        );
    }
}
