//! Property-based tests for board derivation rules

use openscoot_device_identity::prelude::*;
use proptest::prelude::*;

fn arb_family() -> impl Strategy<Value = VendorFamily> {
    prop_oneof![Just(VendorFamily::Xiaomi), Just(VendorFamily::Ninebot)]
}

fn arb_model() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,4}".prop_map(|s| s)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_m365_radio_board_is_legacy_for_any_variant(
        variant in "[a-z0-9]{0,4}",
        chip_type in any::<u32>(),
    ) {
        let attrs = DeviceAttributes::new(VendorFamily::Xiaomi, "m365", variant, "Mi M365");
        let mut identity = DeviceIdentity::new(attrs);
        identity.record_chip_type(chip_type);
        prop_assert_eq!(identity.boards().ble.as_str(), "mi_BLE_LEGACY");
    }

    #[test]
    fn prop_drv_derivation_is_deterministic(
        family in arb_family(),
        model in arb_model(),
        chip_type in any::<u32>(),
    ) {
        let first = derive_drv_board(family, &model, chip_type);
        let second = derive_drv_board(family, &model, chip_type);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_chip_type_read_always_yields_one_board_and_one_mcu(
        family in arb_family(),
        model in arb_model(),
        chip_type in any::<u32>(),
    ) {
        let (drv, _mcu) = derive_drv_board(family, &model, chip_type);
        // every outcome is a concrete id, never the undefined sentinel
        prop_assert!(!drv.is_undefined());
    }

    #[test]
    fn prop_bms_generation_suffix_follows_threshold(
        family in arb_family(),
        model in arb_model(),
        bms_version in any::<u32>(),
    ) {
        let bms = derive_bms_board(family, &model, bms_version);
        if matches!(model.as_str(), "f" | "t15") {
            prop_assert!(bms.is_undefined());
        } else if bms_version < BMS_STM32_VERSION_FLOOR {
            prop_assert!(bms.as_str().ends_with("ST8"));
        } else {
            prop_assert!(bms.as_str().ends_with("STM32"));
        }
    }

    #[test]
    fn prop_board_ids_never_empty(
        family in arb_family(),
        model in arb_model(),
        raw in any::<u32>(),
    ) {
        prop_assert!(!derive_ble_board(family, &model).as_str().is_empty());
        prop_assert!(!derive_drv_board(family, &model, raw).0.as_str().is_empty());
        prop_assert!(!derive_bms_board(family, &model, raw).as_str().is_empty());
    }
}
