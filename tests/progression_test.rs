//! End-to-end progression behaviour over the built-in catalog

mod common;

use common::{fresh_session, settle_levels, untracked};
use creatorxp::{
    Catalog, EngineOptions, EventSource, Platform, ProgressSession, ProgressionEngine,
    UserProgress, content_plan_xp, post_xp, trend_xp,
};
use proptest::prelude::*;

#[test]
fn test_first_content_plan_levels_up_and_unlocks_first_plan() {
    let mut session = fresh_session("alice");
    let report = session.apply_award(120, &EventSource::ContentPlanCreated);

    assert_eq!(session.user_progress().current_xp(), 120);
    assert!(report.leveled_up);
    assert_eq!(report.new_level.unwrap().level, 2);
    assert!(report.achievements_unlocked.iter().any(|a| a.id == "first_plan"));
}

#[test]
fn test_large_award_advances_one_level_per_call() {
    let mut session = fresh_session("bob");
    assert_eq!(session.user_progress().current_level(), 1);

    // 300 XP covers level 3's threshold
    session.apply_award(300, &untracked());
    assert_eq!(session.current_level().level, 2);

    let report = session.apply_award(0, &untracked());
    assert!(report.leveled_up);
    assert_eq!(session.current_level().level, 3);
}

#[test]
fn test_repeated_trigger_never_duplicates_achievement() {
    let mut session = fresh_session("carol");
    for _ in 0..5 {
        session.apply_award(10, &EventSource::ContentPlanCreated);
    }
    let progress = session.user_progress();
    let first_plans = progress
        .achievements()
        .iter()
        .filter(|a| a.id == "first_plan")
        .count();
    assert_eq!(first_plans, 1);
    assert_eq!(progress.stats().content_plans_created, 5);
}

#[test]
fn test_max_level_reports_full_progress() {
    let mut session = fresh_session("dana");
    session.apply_award(1_000_000, &untracked());
    settle_levels(&mut session);

    let max = Catalog::builtin().levels().max_level();
    assert_eq!(session.current_level().level, max);
    assert!(session.next_level().is_none());

    let progress = session.progress_to_next_level();
    assert_eq!(progress.percentage, 100.0);
    assert_eq!(progress.required, 0);
    assert_eq!(progress.current, 1_000_000);
}

#[test]
fn test_daily_bonus_values() {
    let mut session = fresh_session("erin");
    let mut seen = vec![session.daily_bonus()];
    for _ in 0..11 {
        session.add_daily_streak();
        seen.push(session.daily_bonus());
    }
    assert_eq!(seen[0], 0);
    assert_eq!(seen[1], 5);
    assert_eq!(seen[9], 45);
    assert_eq!(seen[10], 50);
    assert_eq!(seen[11], 50);
}

#[test]
fn test_scoring_examples() {
    assert_eq!(post_xp(Platform::from_name("TikTok"), 40), 18);
    assert_eq!(trend_xp(30), 50);
    assert_eq!(content_plan_xp(80, 45), 37);
}

#[test]
fn test_scored_plan_feeds_engine() {
    let mut session = fresh_session("fay");
    let xp = content_plan_xp(100, 100);
    let report = session.apply_award(xp, &EventSource::ContentPlanCreated);
    assert!(!report.leveled_up);
    assert_eq!(session.progress_to_next_level().current, 45);
    assert_eq!(session.available_achievements().len(), 5);
}

#[test]
fn test_resume_from_serialized_record() {
    let mut session = fresh_session("gus");
    session.apply_award(150, &EventSource::ViralPost);
    let stored = serde_json::to_string(&session.user_progress()).unwrap();

    let record: UserProgress = serde_json::from_str(&stored).unwrap();
    let mut resumed = ProgressSession::resume(ProgressionEngine::builtin(), record);
    let report = resumed.apply_award(10, &EventSource::ViralPost);

    assert!(report.achievements_unlocked.is_empty());
    assert_eq!(resumed.user_progress().current_xp(), 160);
    assert_eq!(resumed.user_progress().stats().viral_posts, 2);
}

#[test]
fn test_seven_day_streak_with_legacy_counting_skips_streak_7() {
    let engine = ProgressionEngine::builtin().with_options(EngineOptions {
        legacy_streak_double_count: true,
    });
    let mut session = ProgressSession::new(engine, "hal");
    for _ in 0..7 {
        session.add_daily_streak();
    }
    assert_eq!(session.user_progress().streaks().daily, 14);
    assert!(!session.user_progress().has_achievement("streak_7"));
}

fn source_strategy() -> impl Strategy<Value = EventSource> {
    prop_oneof![
        Just(EventSource::ContentPlanCreated),
        Just(EventSource::ViralPost),
        Just(EventSource::DailyStreak),
        "[a-z_]{1,12}".prop_map(|s| EventSource::parse(&s)),
    ]
}

proptest! {
    /// XP equals the sum of all awards and never decreases.
    #[test]
    fn xp_is_running_sum(awards in prop::collection::vec((0u64..500, source_strategy()), 0..60)) {
        let mut session = fresh_session("prop");
        let mut expected = 0u64;
        for (amount, source) in &awards {
            let before = session.user_progress().current_xp();
            session.apply_award(*amount, source);
            expected += amount;
            let progress = session.user_progress();
            prop_assert!(progress.current_xp() >= before);
            prop_assert_eq!(progress.current_xp(), expected);
            prop_assert_eq!(progress.total_xp(), expected);
        }
    }

    /// Levels never go down, move at most one step per award, and never
    /// pass the level the XP total covers.
    #[test]
    fn level_moves_at_most_one_step(awards in prop::collection::vec(0u64..2_000, 0..40)) {
        let catalog = Catalog::builtin();
        let mut session = fresh_session("prop");
        for amount in awards {
            let before = session.current_level().level;
            let report = session.apply_award(amount, &untracked());
            let after = session.current_level().level;
            prop_assert!(after == before || after == before + 1);
            prop_assert_eq!(report.leveled_up, after == before + 1);
            let xp = session.user_progress().current_xp();
            prop_assert!(after <= catalog.levels().for_xp(xp).level);
        }
    }

    /// Achievements never repeat and are never revoked.
    #[test]
    fn achievements_unique_and_append_only(sources in prop::collection::vec(source_strategy(), 0..80)) {
        let mut session = fresh_session("prop");
        let mut previous: Vec<String> = Vec::new();
        for source in &sources {
            session.apply_award(1, source);
            let ids: Vec<String> = session
                .user_progress()
                .achievements()
                .iter()
                .map(|a| a.id.clone())
                .collect();
            prop_assert!(ids.starts_with(&previous));
            let mut deduped = ids.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), ids.len());
            previous = ids;
        }
    }
}
