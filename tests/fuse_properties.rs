//! Property-based tests for fuse accounting.
//!
//! These tests verify the session invariants over arbitrary answer and
//! timer sequences using proptest.

use proptest::prelude::*;

use bomb_fuse::{FuseConfig, GameSlot, Session, MAX_GAME_TIME};

/// Strategy for an elapsed-seconds delta, including out-of-range values.
fn delta() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => 0.0f64..5.0,
        1 => Just(-1.0),
        1 => 20.0f64..40.0,
    ]
}

/// Strategy for a config with arbitrary but valid rules.
fn config_strategy() -> impl Strategy<Value = FuseConfig> {
    (1.0f64..120.0, 0u32..50, 0.0f64..30.0, 0.0f64..30.0).prop_map(
        |(max_game_time, points, bonus, penalty)| FuseConfig {
            max_game_time,
            correct_answer_points: points,
            time_for_correct_answer: bonus,
            time_penalty_for_wrong: penalty,
            ..FuseConfig::default()
        },
    )
}

proptest! {
    /// Property: a fresh session always shows a full fuse.
    #[test]
    fn prop_initialize_is_full(total in 0i64..10_000) {
        let mut slot = GameSlot::new(FuseConfig::default());
        slot.initialize(total).unwrap();
        prop_assert_eq!(slot.get_fuse_percentage(), 100.0);
    }

    /// Property: answers never push the fuse above the cap, score is
    /// points times correct answers, and every answer is counted.
    #[test]
    fn prop_answers_bounded_and_counted(
        config in config_strategy(),
        answers in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        let mut session = Session::new(config.clone(), 10).unwrap();
        for &correct in &answers {
            session.answer_question(correct);
            prop_assert!(session.time_remaining() <= config.max_game_time);
            prop_assert!(session.time_remaining() >= 0.0);
            prop_assert!(session.fuse_percentage() <= 100.0);
            prop_assert!(session.fuse_percentage() >= 0.0);
        }

        let correct = answers.iter().filter(|c| **c).count() as u32;
        prop_assert_eq!(session.score(), config.correct_answer_points * correct);
        prop_assert_eq!(session.questions_answered(), answers.len() as u32);
    }

    /// Property: once the timer reports an explosion it sticks.
    #[test]
    fn prop_explosion_sticks(
        deltas in prop::collection::vec(delta(), 1..40),
        answers in prop::collection::vec(any::<bool>(), 0..40),
    ) {
        let mut session = Session::new(FuseConfig::default(), 10).unwrap();
        let mut exploded = false;

        for (i, &d) in deltas.iter().enumerate() {
            if let Some(&correct) = answers.get(i) {
                session.answer_question(correct);
            }
            let now = session.advance_timer(d);
            if exploded {
                prop_assert!(now);
            }
            if now {
                exploded = true;
                prop_assert!(session.is_exploded());
                prop_assert_eq!(session.fuse_percentage(), 0.0);
            }
        }
    }

    /// Property: a paused absolute-clock session never loses fuse, and
    /// resuming charges only time after the next sample.
    #[test]
    fn prop_pause_freezes_fuse(
        start in 0.0f64..1_000.0,
        steps in prop::collection::vec(0.0f64..100.0, 1..20),
        after in 0.0f64..10.0,
    ) {
        let mut session = Session::new(FuseConfig::absolute_clock(), 3).unwrap();
        session.advance_timer(start);
        session.set_paused(true);

        let mut now = start;
        for step in steps {
            now += step;
            prop_assert!(!session.advance_timer(now));
            prop_assert_eq!(session.time_remaining(), MAX_GAME_TIME);
        }

        session.set_paused(false);
        session.advance_timer(now + after);
        let expected = (MAX_GAME_TIME - after).max(0.0);
        prop_assert!((session.time_remaining() - expected).abs() < 1e-9);
    }

    /// Property: once answers drive the fuse to zero, no later answer can
    /// lift it and the next tick detonates.
    #[test]
    fn prop_overdrawn_fuse_cannot_recover(
        leading in prop::collection::vec(any::<bool>(), 0..8),
        trailing in prop::collection::vec(any::<bool>(), 0..16),
    ) {
        let mut session = Session::new(FuseConfig::default(), 10).unwrap();
        for &correct in &leading {
            session.answer_question(correct);
        }
        while !session.is_overdrawn() {
            session.answer_question(false);
        }
        for &correct in &trailing {
            session.answer_question(correct);
            prop_assert_eq!(session.fuse_percentage(), 0.0);
            prop_assert!(session.is_overdrawn());
        }
        prop_assert!(session.advance_timer(0.0));
        prop_assert!(session.is_exploded());
    }

    /// Property: after free, the slot is neutral.
    #[test]
    fn prop_free_is_neutral(answers in prop::collection::vec(any::<bool>(), 0..16)) {
        let mut slot = GameSlot::new(FuseConfig::default());
        slot.initialize(answers.len() as i64).unwrap();
        for &correct in &answers {
            slot.answer(correct);
        }
        slot.free();

        prop_assert_eq!(slot.get_fuse_percentage(), 0.0);
        slot.answer(true);
        prop_assert!(slot.session().is_none());
        prop_assert!(!slot.advance_timer(1.0));
    }
}
