//! Bomb Fuse Demo
//!
//! Plays a scripted quiz session against the fuse engine and verifies
//! that replaying the same inputs reproduces the final state.
//!
//! Usage: `bomb-fuse [config.json]`. Log level via `RUST_LOG`.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bomb_fuse::{
    core::hash::StateHash,
    game::{
        events::GameEventData,
        replay::{replay_session, SessionInput},
    },
    Clock, FuseConfig, GameSlot, ManualClock, TimingMode, VERSION,
};

/// Simulated frame length in seconds.
const FRAME_SECS: f64 = 0.5;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {path}"))?;
            FuseConfig::from_json_str(&json).with_context(|| format!("Invalid config {path}"))?
        }
        None => FuseConfig::default(),
    };

    info!("Bomb Fuse v{}", VERSION);
    info!(
        "Fuse: {}s, +{}s / +{} pts per correct answer, -{}s per wrong answer, {:?} timing",
        config.max_game_time,
        config.time_for_correct_answer,
        config.correct_answer_points,
        config.time_penalty_for_wrong,
        config.timing
    );

    demo_session(config)
}

/// Play a scripted session, then replay it.
fn demo_session(config: FuseConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Session ===");

    // Answer pattern: one answer every 4 frames
    let answers = [true, true, false, true, false, false, true, false];
    let total_questions = answers.len() as i64;

    let mut slot = GameSlot::new(config.clone());
    slot.initialize(total_questions)?;

    let clock = ManualClock::new(0.0);
    let mut recorded: Vec<SessionInput> = Vec::new();
    let mut next_answer = answers.iter();
    let mut frame = 0u32;

    loop {
        let value = match config.timing {
            TimingMode::Delta => FRAME_SECS,
            TimingMode::AbsoluteClock => clock.now_secs(),
        };
        recorded.push(SessionInput::Advance(value));
        let exploded = slot.advance_timer(value);

        for event in slot.take_events() {
            log_event(&event.data);
        }

        if exploded {
            info!("Bomb exploded at frame {}", frame);
            break;
        }

        if frame % 4 == 3 {
            match next_answer.next() {
                Some(&correct) => {
                    recorded.push(SessionInput::Answer(correct));
                    slot.answer(correct);
                }
                None => {
                    info!("All questions answered - bomb defused!");
                    break;
                }
            }
        }

        clock.advance(FRAME_SECS);
        frame += 1;
    }

    let session = slot.session().context("session disappeared mid-game")?;
    let summary = session.summary();
    info!("=== Session Results ===");
    info!("{}", serde_json::to_string(&summary)?);

    let hash = session.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Replay ===");
    let (replayed, events) = replay_session(config, answers.len() as u32, &recorded)?;
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {} ({} events)", hex::encode(replay_hash), events.len());

    verify_replay(&hash, &replay_hash)?;
    info!("REPLAY VERIFIED: Hashes match!");

    slot.free();
    Ok(())
}

/// Fail unless the live and replayed fingerprints agree.
fn verify_replay(live: &StateHash, replayed: &StateHash) -> anyhow::Result<()> {
    if live != replayed {
        anyhow::bail!(
            "Replay failure: live hash {} differs from replay hash {}",
            hex::encode(live),
            hex::encode(replayed)
        );
    }
    Ok(())
}

fn log_event(data: &GameEventData) {
    match data {
        GameEventData::AnswerRecorded {
            correct,
            new_score,
            time_remaining,
            ..
        } => {
            info!(
                "{} answer - score {}, {:.1}s left",
                if *correct { "Correct" } else { "Wrong" },
                new_score,
                time_remaining
            );
        }
        GameEventData::FuseExploded { questions_answered, score } => {
            info!("BOOM after {} answers (score {})", questions_answered, score);
        }
        _ => {}
    }
}
