//! Integration tests for the host save/load lifecycle.
//!
//! Exercises: gameplay edits → card save → card reload in each load phase,
//! through the public API and the in-memory host only.

use kkpregnancy_core::prelude::*;
use kkpregnancy_logic::constants::{DATA_KEY, LEAVE_WEEK};

// ── Helpers ────────────────────────────────────────────────────────────

const HEROINE: CharacterId = CharacterId(10);

fn host_with_calendar() -> MemoryHost {
    MemoryHost::new().with_status(HEROINE, DayKind::Risky)
}

fn progressed_controller(week: i32) -> PregnancyController {
    let mut controller = PregnancyController::new(HEROINE);
    controller.set_gameplay_enabled(true);
    controller.set_fertility(0.75);
    controller.set_schedule(MenstruationSchedule::AlwaysRisky);
    controller.set_week(week);
    controller
}

// ── Save / reload ──────────────────────────────────────────────────────

#[test]
fn reload_restores_all_four_fields() {
    let mut host = host_with_calendar();
    let original = progressed_controller(14);
    original.on_before_save(&mut host).unwrap();
    assert!(host.get_blob(HEROINE, DATA_KEY).is_some());

    let mut reloaded = PregnancyController::new(HEROINE);
    reloaded.on_after_load(&mut host, LoadPhase::Gameplay);
    assert_eq!(reloaded.week(), 14);
    assert!(reloaded.gameplay_enabled());
    assert_eq!(reloaded.fertility(), 0.75);
    assert_eq!(reloaded.schedule(), MenstruationSchedule::AlwaysRisky);
}

#[test]
fn card_without_data_loads_as_not_pregnant() {
    let mut host = host_with_calendar();
    let mut controller = progressed_controller(30);
    let outcome = controller.on_after_load(&mut host, LoadPhase::Gameplay);

    assert!(outcome.applied);
    assert!(!controller.is_pregnant());
    assert_eq!(controller.state(), &PregnancyState::default());
    assert_eq!(host.menstruation_status(HEROINE), Some(DayKind::Risky));
}

#[test]
fn corrupted_card_data_loads_as_not_pregnant() {
    let mut host = host_with_calendar();
    host.set_blob(HEROINE, DATA_KEY, vec![9, 9, 9]);

    let mut controller = PregnancyController::new(HEROINE);
    controller.on_after_load(&mut host, LoadPhase::Gameplay);
    assert_eq!(controller.state(), &PregnancyState::default());
}

#[test]
fn removing_blob_resets_on_next_load() {
    let mut host = host_with_calendar();
    progressed_controller(5).on_before_save(&mut host).unwrap();

    let mut controller = PregnancyController::new(HEROINE);
    controller.on_after_load(&mut host, LoadPhase::Gameplay);
    assert_eq!(controller.week(), 5);

    host.clear_blob(HEROINE, DATA_KEY);
    controller.on_after_load(&mut host, LoadPhase::Gameplay);
    assert_eq!(controller.week(), 0);
}

// ── Load phases ────────────────────────────────────────────────────────

#[test]
fn editor_phases_decide_application() {
    let mut host = host_with_calendar();
    progressed_controller(8).on_before_save(&mut host).unwrap();

    let cases = [
        (LoadPhase::Gameplay, true),
        (LoadPhase::EditorInitialLoad, true),
        (LoadPhase::EditorReload { load_parameters: true }, true),
        (LoadPhase::EditorReload { load_parameters: false }, false),
    ];
    for (phase, expect_applied) in cases {
        let mut controller = PregnancyController::new(HEROINE);
        let outcome = controller.on_after_load(&mut host, phase);
        assert_eq!(outcome.applied, expect_applied, "{:?}", phase);
        assert_eq!(controller.week() == 8, expect_applied, "{:?}", phase);
    }
}

#[test]
fn pregnant_character_is_forced_to_safe_day() {
    let mut host = host_with_calendar();
    progressed_controller(LEAVE_WEEK).on_before_save(&mut host).unwrap();

    let mut controller = PregnancyController::new(HEROINE);
    let outcome = controller.on_after_load(&mut host, LoadPhase::Gameplay);

    assert!(outcome.forced_safe_day);
    assert_eq!(host.menstruation_status(HEROINE), Some(DayKind::Safe));
    assert_eq!(controller.belly_size_percent(), 1.0);
}

#[test]
fn bone_effect_is_registered_exactly_once() {
    let mut host = host_with_calendar();
    progressed_controller(3).on_before_save(&mut host).unwrap();

    let mut controller = PregnancyController::new(HEROINE);
    controller.on_after_load(&mut host, LoadPhase::EditorReload { load_parameters: false });
    assert_eq!(host.bone_effect_count(HEROINE), 0);

    for _ in 0..5 {
        controller.on_after_load(&mut host, LoadPhase::Gameplay);
    }
    assert_eq!(host.bone_effect_count(HEROINE), 1);

    let effect = controller.bone_effect().expect("effect registered");
    assert!(effect.strength(&controller) > 0.0);
}
