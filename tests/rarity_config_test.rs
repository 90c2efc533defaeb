//! Rarity configuration: editing, mode toggling, validation and the save gate.

use packforge::core::PROBABILITY_EPSILON;
use packforge::rarity::{has_mismatch, EditorMode};
use packforge::{
    validate_configuration, AdvancedTier, PackError, PackRarityConfig, RarityEditor, RarityMode,
    SimpleTier,
};

fn three_tiers() -> Vec<SimpleTier> {
    vec![
        SimpleTier::new("Common", 0.7),
        SimpleTier::new("Uncommon", 0.25),
        SimpleTier::new("Rare", 0.05),
    ]
}

// =========================================================================
// Probability sums
// =========================================================================

#[test]
fn test_valid_simple_config_has_no_mismatch() {
    let config = PackRarityConfig::simple(three_tiers(), 10, 20.0);
    let report = validate_configuration(&config);
    assert!(!report.base_mismatch);
    assert!(report.is_savable());
    assert!(report.messages().is_empty());
}

#[test]
fn test_perturbing_any_tier_beyond_tolerance_is_a_mismatch() {
    for i in 0..3 {
        for delta in [PROBABILITY_EPSILON * 2.0, -PROBABILITY_EPSILON * 2.0, 0.01] {
            let mut tiers = three_tiers();
            tiers[i].probability += delta;
            let report = validate_configuration(&PackRarityConfig::simple(tiers, 10, 0.0));
            assert!(report.base_mismatch, "tier {} delta {}", i, delta);
            assert!(!report.is_savable());
        }
    }
}

#[test]
fn test_perturbation_within_tolerance_is_accepted() {
    let mut tiers = three_tiers();
    tiers[0].probability += PROBABILITY_EPSILON / 2.0;
    let report = validate_configuration(&PackRarityConfig::simple(tiers, 10, 0.0));
    assert!(!report.base_mismatch);
}

#[test]
fn test_mismatch_message_shows_delta() {
    let config = PackRarityConfig::simple(
        vec![SimpleTier::new("Common", 0.9), SimpleTier::new("Rare", 0.05)],
        5,
        0.0,
    );
    let messages = validate_configuration(&config).messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("95.0000%"));
    assert!(messages[0].contains("-5.0000%"));
}

#[test]
fn test_has_mismatch_is_symmetric() {
    assert!(!has_mismatch(1.0, 1.0));
    assert!(has_mismatch(1.1, 1.0));
    assert!(has_mismatch(0.9, 1.0));
    assert!(has_mismatch(f64::NAN, 1.0));
}

// =========================================================================
// Advanced mode checks
// =========================================================================

#[test]
fn test_special_sum_ignored_without_special_slots() {
    let config = PackRarityConfig::advanced(
        vec![
            AdvancedTier::new("Common", 1.0),
            AdvancedTier::new("Foil", 0.0).with_fixed(1),
        ],
        0,
        5,
        0.0,
    );
    let report = validate_configuration(&config);
    assert!(!report.special_mismatch);
    assert_eq!(report.fixed_total, 1);
    assert_eq!(report.basic_slots, 4);
    assert!(report.is_savable());
}

#[test]
fn test_special_sum_checked_with_special_slots() {
    let config = PackRarityConfig::advanced(
        vec![
            AdvancedTier::new("Common", 0.8).with_special(0.5),
            AdvancedTier::new("Rare", 0.2).with_special(0.3),
        ],
        1,
        5,
        0.0,
    );
    let report = validate_configuration(&config);
    assert!(!report.base_mismatch);
    assert!(report.special_mismatch);
    assert!((report.special_delta() + 0.2).abs() < 1e-9);
}

#[test]
fn test_slot_overflow_blocks_save() {
    let config = PackRarityConfig::advanced(
        vec![AdvancedTier::new("Common", 1.0).with_special(1.0).with_fixed(3)],
        3,
        5,
        0.0,
    );
    let report = validate_configuration(&config);
    assert!(report.slots_negative);
    assert_eq!(report.basic_slots, 0);

    let mut editor = RarityEditor::from_config(&config);
    assert!(matches!(
        editor.save(),
        Err(PackError::SlotOverflow {
            fixed: 3,
            special: 3,
            slots_per_pack: 5
        })
    ));

    editor.set_slots_per_pack(6);
    assert!(editor.save().is_ok());
}

// =========================================================================
// Editor
// =========================================================================

#[test]
fn test_toggle_round_trip_restores_simple_tiers() {
    let original = PackRarityConfig::simple(three_tiers(), 10, 20.0);
    let mut editor = RarityEditor::from_config(&original);

    editor.toggle_mode();
    assert_eq!(editor.mode(), EditorMode::Advanced);
    match &editor.config().mode {
        RarityMode::Advanced {
            tiers,
            special_slot_count,
        } => {
            assert_eq!(*special_slot_count, 0);
            assert_eq!(tiers.len(), 3);
            assert!(tiers
                .iter()
                .all(|t| t.special_probability == 0.0 && t.fixed_count == 0));
        }
        RarityMode::Simple { .. } => panic!("expected advanced mode"),
    }

    editor.toggle_mode();
    assert_eq!(editor.mode(), EditorMode::Simple);
    let restored = editor.config();
    assert_eq!(restored.mode, original.mode);
    assert_eq!(restored.slots_per_pack, original.slots_per_pack);
    assert_eq!(restored.pack_price, original.pack_price);
}

#[test]
fn test_simple_tiers_survive_saving_in_advanced_mode() {
    let original = PackRarityConfig::simple(three_tiers(), 10, 20.0);
    let mut editor = RarityEditor::from_config(&original);
    editor.toggle_mode();
    editor.set_probability(0, 0.6).unwrap();
    editor.set_probability(1, 0.3).unwrap();
    editor.set_probability(2, 0.1).unwrap();
    editor.set_fixed_count(2, 1).unwrap();

    // Persist and reload as a stored pack would be
    let json = serde_json::to_string(&editor.save().unwrap()).unwrap();
    let stored: PackRarityConfig = serde_json::from_str(&json).unwrap();
    assert!(stored.mode.is_advanced());

    let mut reloaded = RarityEditor::from_config(&stored);
    reloaded.toggle_mode();
    assert_eq!(reloaded.config().mode, original.mode);

    reloaded.toggle_mode();
    match &reloaded.config().mode {
        RarityMode::Advanced { tiers, .. } => assert_eq!(tiers[2].fixed_count, 1),
        RarityMode::Simple { .. } => panic!("expected advanced mode"),
    }
}

#[test]
fn test_toggle_keeps_advanced_edits() {
    let mut editor = RarityEditor::from_config(&PackRarityConfig::simple(three_tiers(), 10, 0.0));
    editor.toggle_mode();
    editor.set_fixed_count(2, 1).unwrap();
    editor.toggle_mode();
    editor.toggle_mode();

    match &editor.config().mode {
        RarityMode::Advanced { tiers, .. } => assert_eq!(tiers[2].fixed_count, 1),
        RarityMode::Simple { .. } => panic!("expected advanced mode"),
    }
}

#[test]
fn test_build_config_from_scratch() {
    let mut editor = RarityEditor::new();
    editor.set_label(0, "Common").unwrap();
    editor.add_tier("Rare");
    editor.set_probability_percent(0, 75.0).unwrap();
    editor.set_probability_percent(1, 25.0).unwrap();
    editor.set_slots_per_pack(8);
    editor.set_pack_price(40.0);

    let saved = editor.save().unwrap();
    assert_eq!(saved.slots_per_pack, 8);
    assert_eq!(saved.mode.labels(), vec!["Common", "Rare"]);
}

#[test]
fn test_unsaved_draft_reports_mismatch() {
    let mut editor = RarityEditor::new();
    editor.add_tier("Rare");
    editor.set_probability(1, 0.3).unwrap();

    assert!(editor.validate().base_mismatch);
    assert!(matches!(
        editor.save(),
        Err(PackError::ProbabilityMismatch { .. })
    ));
}

#[test]
fn test_advanced_fields_rejected_in_simple_mode() {
    let mut editor = RarityEditor::new();
    assert!(matches!(
        editor.set_special_slot_count(1),
        Err(PackError::AdvancedOnly { .. })
    ));
    assert!(matches!(
        editor.set_fixed_count(0, 1),
        Err(PackError::AdvancedOnly { .. })
    ));
}

#[test]
fn test_cannot_remove_last_tier() {
    let mut editor = RarityEditor::new();
    assert!(matches!(editor.remove_tier(0), Err(PackError::LastTier)));
    assert!(matches!(
        editor.remove_tier(3),
        Err(PackError::TierNotFound { index: 3 })
    ));
}

// =========================================================================
// Persistence format
// =========================================================================

#[test]
fn test_advanced_config_json_shape() {
    let config = PackRarityConfig::advanced(
        vec![AdvancedTier::new("Common", 1.0).with_special(1.0)],
        1,
        5,
        10.0,
    );
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["mode"], "advanced");
    assert_eq!(value["special_slot_count"], 1);
    assert_eq!(value["slots_per_pack"], 5);

    let back: PackRarityConfig = serde_json::from_value(value).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_simple_config_json_rejects_unknown_mode() {
    let json = r#"{"mode": "mystery", "tiers": [], "slots_per_pack": 5}"#;
    assert!(serde_json::from_str::<PackRarityConfig>(json).is_err());
}
