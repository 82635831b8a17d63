//! KK Pregnancy Headless Lifecycle Harness
//!
//! Validates pregnancy logic, blob persistence and the save/load lifecycle
//! against an in-memory host. Runs entirely in-process — no game, no cards.
//!
//! Usage:
//!   cargo run -p kkpregnancy-simtest
//!   cargo run -p kkpregnancy-simtest -- --verbose
//!   cargo run -p kkpregnancy-simtest -- --config tuning.json --seed 7 --json

use kkpregnancy_core::controller::{LoadOutcome, PregnancyController};
use kkpregnancy_core::host::{CharacterHost, CharacterId, LoadPhase, MemoryHost};
use kkpregnancy_core::persistence::{deserialize_state, serialize_state, try_deserialize_state};
use kkpregnancy_core::roster::PregnancyRoster;
use kkpregnancy_logic::config::{validate_config, PregnancyConfig};
use kkpregnancy_logic::constants::{CYCLE_DAYS, LEAVE_WEEK};
use kkpregnancy_logic::pregnancy::{PregnancyState, WeekChange};
use kkpregnancy_logic::schedule::{DayKind, MenstruationSchedule, ScheduleTables};
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

struct Args {
    verbose: bool,
    json: bool,
    seed: u64,
    config_path: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        verbose: false,
        json: false,
        seed: 42,
        config_path: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--json" => args.json = true,
            "--seed" => {
                if let Some(seed) = iter.next().and_then(|s| s.parse().ok()) {
                    args.seed = seed;
                }
            }
            "--config" => args.config_path = iter.next(),
            other => eprintln!("ignoring unknown argument {}", other),
        }
    }
    args
}

fn parse_config(json: &str) -> Result<PregnancyConfig, String> {
    serde_json::from_str(json).map_err(|e| format!("config parse error: {}", e))
}

fn load_config(path: Option<&str>) -> Result<PregnancyConfig, String> {
    match path {
        None => Ok(PregnancyConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path, e))?;
            parse_config(&text)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args();
    println!("=== KK Pregnancy Lifecycle Harness ===\n");

    let config = match load_config(args.config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let mut results = Vec::new();

    // 1. Config
    results.extend(validate_configuration(&config));

    // 2. Schedule tables
    results.extend(validate_schedules(args.verbose));

    // 3. Belly curve
    results.extend(validate_belly_curve(args.verbose));

    // 4. Blob persistence
    results.extend(validate_persistence());

    // 5. Host lifecycle hooks
    results.extend(validate_lifecycle());

    // 6. Multi-week season
    let (season_results, report) = run_season(&config, args.seed, args.verbose);
    results.extend(season_results);

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("\n{}", json),
            Err(e) => error!("report serialization failed: {}", e),
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_configuration(config: &PregnancyConfig) -> Vec<TestResult> {
    println!("--- Config ---");
    let errors = validate_config(config);
    let detail = if errors.is_empty() {
        format!(
            "default fertility {:.2}, base chance {:.2}",
            config.default_fertility, config.base_conception_chance
        )
    } else {
        errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    };
    vec![check("config_valid", errors.is_empty(), detail)]
}

// ── 2. Schedules ────────────────────────────────────────────────────────

fn validate_schedules(verbose: bool) -> Vec<TestResult> {
    println!("--- Schedules ---");
    let mut results = Vec::new();
    let tables = ScheduleTables::default();

    for schedule in MenstruationSchedule::ALL {
        let safe = tables.days_of_kind(schedule, DayKind::Safe);
        let risky = tables.days_of_kind(schedule, DayKind::Risky);
        if verbose {
            println!(
                "  {:<13} safe={:?} risky={:?}",
                schedule.name(),
                safe,
                risky
            );
        }
        results.push(check(
            &format!("schedule_{:?}_both_kinds", schedule),
            !safe.is_empty() && !risky.is_empty() && safe.len() + risky.len() == CYCLE_DAYS,
            format!("{} safe, {} risky", safe.len(), risky.len()),
        ));
    }

    let always_safe_risky = tables.days_of_kind(MenstruationSchedule::AlwaysSafe, DayKind::Risky);
    results.push(check(
        "always_safe_single_risky_day",
        always_safe_risky == vec![4],
        format!("risky days {:?}", always_safe_risky),
    ));

    let always_risky_safe = tables.days_of_kind(MenstruationSchedule::AlwaysRisky, DayKind::Safe);
    results.push(check(
        "always_risky_single_safe_day",
        always_risky_safe == vec![0],
        format!("safe days {:?}", always_risky_safe),
    ));

    results.push(check(
        "rejects_single_kind_host_table",
        ScheduleTables::new([0; CYCLE_DAYS]).is_err(),
        "all-safe host table refused",
    ));

    results
}

// ── 3. Belly curve ──────────────────────────────────────────────────────

fn validate_belly_curve(verbose: bool) -> Vec<TestResult> {
    println!("--- Belly Curve ---");
    let at = |week| PregnancyState {
        week,
        ..Default::default()
    };

    let zero_early = (-10..=1).all(|w| at(w).belly_size_percent() == 0.0);
    let saturated = (LEAVE_WEEK..LEAVE_WEEK + 20).all(|w| at(w).belly_size_percent() == 1.0);
    let monotonic = (1..LEAVE_WEEK)
        .all(|w| at(w + 1).belly_size_percent() >= at(w).belly_size_percent());

    if verbose {
        for w in [0, 1, 2, LEAVE_WEEK / 2, LEAVE_WEEK - 1, LEAVE_WEEK] {
            println!("  week {:>3}: {:.3}", w, at(w).belly_size_percent());
        }
    }

    vec![
        check("belly_zero_until_week_one", zero_early, "weeks -10..=1"),
        check("belly_saturates_at_leave", saturated, format!("weeks >= {}", LEAVE_WEEK)),
        check("belly_monotonic", monotonic, format!("weeks 1..={}", LEAVE_WEEK)),
    ]
}

// ── 4. Persistence ──────────────────────────────────────────────────────

fn validate_persistence() -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut mismatches = 0;
    for schedule in MenstruationSchedule::ALL {
        for week in [-3, 0, 1, 20, LEAVE_WEEK, LEAVE_WEEK + 5] {
            for gameplay_enabled in [false, true] {
                let state = PregnancyState {
                    week,
                    gameplay_enabled,
                    fertility: 0.1 * week as f32,
                    schedule,
                };
                let ok = serialize_state(&state)
                    .ok()
                    .and_then(|b| try_deserialize_state(&b).ok())
                    .map_or(false, |s| s == state);
                if !ok {
                    mismatches += 1;
                }
            }
        }
    }
    results.push(check(
        "blob_roundtrip",
        mismatches == 0,
        format!("{} mismatches", mismatches),
    ));

    results.push(check(
        "absent_blob_defaults",
        deserialize_state(None) == PregnancyState::default(),
        "missing blob loads as not pregnant",
    ));

    results.push(check(
        "garbage_blob_defaults",
        deserialize_state(Some(&[0xFF, 0x01][..])) == PregnancyState::default(),
        "unreadable blob loads as not pregnant",
    ));

    results
}

// ── 5. Lifecycle ────────────────────────────────────────────────────────

fn validate_lifecycle() -> Vec<TestResult> {
    println!("--- Lifecycle ---");
    let mut results = Vec::new();
    let id = CharacterId(1);
    let mut host = MemoryHost::new().with_status(id, DayKind::Risky);

    let mut original = PregnancyController::new(id);
    original.set_week(LEAVE_WEEK);
    original.set_gameplay_enabled(true);
    original.set_schedule(MenstruationSchedule::MostlyRisky);
    let saved = original.on_before_save(&mut host).is_ok();
    results.push(check("save_hook", saved, "blob written"));

    let mut skipped = PregnancyController::new(id);
    let outcome = skipped.on_after_load(
        &mut host,
        LoadPhase::EditorReload {
            load_parameters: false,
        },
    );
    results.push(check(
        "editor_reload_without_parameters",
        outcome == LoadOutcome::default() && skipped.week() == 0,
        format!("{:?}", outcome),
    ));

    let mut loaded = PregnancyController::new(id);
    let first = loaded.on_after_load(&mut host, LoadPhase::EditorInitialLoad);
    let second = loaded.on_after_load(&mut host, LoadPhase::Gameplay);
    results.push(check(
        "initial_editor_load_applies",
        first.applied && loaded.state() == original.state(),
        format!("week {}", loaded.week()),
    ));
    results.push(check(
        "bone_effect_once",
        first.registered_bone_effect
            && !second.registered_bone_effect
            && host.bone_effect_count(id) == 1,
        format!("{} registrations", host.bone_effect_count(id)),
    ));
    results.push(check(
        "safe_day_forced",
        first.forced_safe_day && host.menstruation_status(id) == Some(DayKind::Safe),
        format!("status {:?}", host.menstruation_status(id)),
    ));

    results
}

// ── 6. Season ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize)]
struct SeasonReport {
    seed: u64,
    characters: usize,
    weeks: usize,
    conceptions: usize,
    leaves: usize,
    returns: usize,
    reload_mismatches: usize,
    final_pregnant: usize,
}

const SEASON_CHARACTERS: u32 = 24;
const SEASON_WEEKS: usize = 120;

fn run_season(config: &PregnancyConfig, seed: u64, verbose: bool) -> (Vec<TestResult>, SeasonReport) {
    println!("--- Season ---");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut roster = PregnancyRoster::new(ScheduleTables::default(), config.clone());
    let mut host = MemoryHost::new();
    let mut report = SeasonReport {
        seed,
        characters: SEASON_CHARACTERS as usize,
        weeks: SEASON_WEEKS,
        ..Default::default()
    };

    for n in 0..SEASON_CHARACTERS {
        let id = CharacterId(n);
        host = host.with_status(id, DayKind::Risky);
        roster.add_character(id);
        if let Some(mut c) = roster.controller_mut(id) {
            c.set_gameplay_enabled(n % 4 != 0);
            c.set_fertility(rng.gen_range(0.1..1.0));
            c.set_schedule(MenstruationSchedule::ALL[n as usize % 4]);
        }
    }

    let mut disabled_moved = false;
    let mut day = 0usize;
    for _week in 0..SEASON_WEEKS {
        for _ in 0..7 {
            for n in 0..SEASON_CHARACTERS {
                if roster.try_conceive(CharacterId(n), day, &mut rng) {
                    report.conceptions += 1;
                    if n % 4 == 0 {
                        disabled_moved = true;
                    }
                }
            }
            day = (day + 1) % CYCLE_DAYS;
        }

        for (id, change) in roster.end_of_week() {
            if id.0 % 4 == 0 {
                disabled_moved = true;
            }
            match change {
                WeekChange::StartedLeave => report.leaves += 1,
                WeekChange::Returned => report.returns += 1,
                _ => {}
            }
        }

        // Save, then reload into a fresh roster and compare
        let before: Vec<PregnancyState> = (0..SEASON_CHARACTERS)
            .filter_map(|n| roster.controller(CharacterId(n)).map(|c| *c.state()))
            .collect();
        if let Err(e) = roster.save_all(&mut host) {
            error!("season save failed: {}", e);
            report.reload_mismatches += 1;
            continue;
        }
        let mut reloaded = PregnancyRoster::new(ScheduleTables::default(), config.clone());
        for n in 0..SEASON_CHARACTERS {
            reloaded.add_character(CharacterId(n));
        }
        reloaded.load_all(&mut host, LoadPhase::Gameplay);
        for (n, state) in before.iter().enumerate() {
            let id = CharacterId(n as u32);
            let same = reloaded
                .controller(id)
                .map_or(false, |c| c.state() == state);
            let status_ok = state.can_have_risk_days()
                || host.menstruation_status(id) == Some(DayKind::Safe);
            if !same || !status_ok {
                report.reload_mismatches += 1;
            }
        }
        roster = reloaded;
    }

    report.final_pregnant = roster.pregnant_count();
    info!("season finished: {:?}", report);
    if verbose {
        println!(
            "  {} conceptions, {} leaves, {} returns, {} pregnant at end",
            report.conceptions, report.leaves, report.returns, report.final_pregnant
        );
    }

    let results = vec![
        check(
            "season_reload_consistent",
            report.reload_mismatches == 0,
            format!("{} mismatches", report.reload_mismatches),
        ),
        check(
            "season_disabled_frozen",
            !disabled_moved,
            "gameplay-disabled characters never changed",
        ),
        check(
            "season_returns_follow_leaves",
            report.returns <= report.leaves && report.leaves <= report.conceptions,
            format!("{} ≤ {} ≤ {}", report.returns, report.leaves, report.conceptions),
        ),
    ];
    (results, report)
}
