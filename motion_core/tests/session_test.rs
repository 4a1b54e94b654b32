use motion_core::gameplay::session::DEFAULT_COUNTDOWN_MS;
use motion_core::gameplay::{finalize, Judgment, Phase, Session, SessionError, SessionState, TierTable};
use motion_schema::{JudgmentSource, JudgmentTier};

fn judgment(i: usize, tier: JudgmentTier, at_ms: f64) -> Judgment {
    Judgment::new(format!("note-{i}"), tier, JudgmentSource::Action, at_ms)
}

fn playing_session() -> Session {
    let mut session = Session::new(TierTable::RHYTHM, 60_000.0);
    session.start(0.0, DEFAULT_COUNTDOWN_MS).unwrap();
    assert!(matches!(session.advance(3000.0), Phase::Playing { just_started: true, .. }));
    session
}

#[test]
fn test_ten_perfects_score_1010() {
    let log: Vec<Judgment> = (0..10)
        .map(|i| judgment(i, JudgmentTier::Perfect, i as f64 * 100.0))
        .collect();
    let result = finalize(&TierTable::RHYTHM, &log);
    assert_eq!(result.score, 1010);
    assert_eq!(result.max_combo, 10);
    assert_eq!(result.counts.perfect, 10);
    assert_eq!(result.judged, 10);
}

#[test]
fn test_max_combo_is_longest_run() {
    let tiers = [
        JudgmentTier::Perfect,
        JudgmentTier::Great,
        JudgmentTier::Miss,
        JudgmentTier::Good,
        JudgmentTier::Good,
        JudgmentTier::Perfect,
        JudgmentTier::Miss,
        JudgmentTier::Perfect,
    ];
    let log: Vec<Judgment> = tiers
        .iter()
        .enumerate()
        .map(|(i, &t)| judgment(i, t, i as f64))
        .collect();
    let result = finalize(&TierTable::RHYTHM, &log);
    assert_eq!(result.max_combo, 3);
    assert_eq!(result.score, 100 + 70 + 40 + 40 + 100 + 100);
    assert_eq!(result.judged, tiers.len() as u32);
}

#[test]
fn test_score_without_misses_matches_tier_sum() {
    let log = vec![
        judgment(0, JudgmentTier::Perfect, 0.0),
        judgment(1, JudgmentTier::Great, 1.0),
        judgment(2, JudgmentTier::Good, 2.0),
    ];
    let result = finalize(&TierTable::WHACK_A_MOLE, &log);
    assert_eq!(result.score, 210);
}

#[test]
fn test_finalize_is_idempotent() {
    let mut session = playing_session();
    session.record(judgment(0, JudgmentTier::Perfect, 10.0)).unwrap();
    session.record(judgment(1, JudgmentTier::Miss, 20.0)).unwrap();

    let first = session.finalize();
    let second = session.finalize();
    assert_eq!(first, second);
    assert_eq!(session.state(), SessionState::Finalized);
    assert_eq!(finalize(session.table(), session.log()), first);
}

#[test]
fn test_record_rejects_before_play_and_after_finalize() {
    let mut session = Session::new(TierTable::RHYTHM, 60_000.0);
    assert_eq!(
        session.record(judgment(0, JudgmentTier::Perfect, 0.0)),
        Err(SessionError::NotPlaying("idle"))
    );

    session.start(0.0, 3000.0).unwrap();
    assert!(matches!(session.advance(1000.0), Phase::Countdown { .. }));
    assert_eq!(
        session.record(judgment(0, JudgmentTier::Perfect, 0.0)),
        Err(SessionError::NotPlaying("countdown"))
    );

    session.finalize();
    assert_eq!(
        session.record(judgment(0, JudgmentTier::Perfect, 0.0)),
        Err(SessionError::NotPlaying("finalized"))
    );
}

#[test]
fn test_start_twice_is_an_error() {
    let mut session = Session::new(TierTable::RHYTHM, 60_000.0);
    session.start(0.0, 3000.0).unwrap();
    assert_eq!(session.start(10.0, 3000.0), Err(SessionError::AlreadyStarted("countdown")));
}

#[test]
fn test_out_of_order_judgment_is_rejected() {
    let mut session = playing_session();
    session.record(judgment(0, JudgmentTier::Perfect, 500.0)).unwrap();
    let err = session.record(judgment(1, JudgmentTier::Perfect, 400.0)).unwrap_err();
    assert!(matches!(err, SessionError::OutOfOrder { .. }));
    assert_eq!(session.log().len(), 1);

    // equal timestamps are fine
    session.record(judgment(2, JudgmentTier::Great, 500.0)).unwrap();
}

#[test]
fn test_countdown_then_time_up() {
    let mut session = Session::new(TierTable::RHYTHM, 10_000.0);
    assert_eq!(session.advance(0.0), Phase::Idle);
    session.start(1000.0, 3000.0).unwrap();

    assert_eq!(session.advance(2000.0), Phase::Countdown { remaining_ms: 2000.0 });
    assert_eq!(
        session.advance(4500.0),
        Phase::Playing {
            elapsed_ms: 500.0,
            just_started: true
        }
    );
    assert_eq!(
        session.advance(5000.0),
        Phase::Playing {
            elapsed_ms: 1000.0,
            just_started: false
        }
    );
    // host clock going backwards does not rewind the session
    assert_eq!(
        session.advance(4800.0),
        Phase::Playing {
            elapsed_ms: 1000.0,
            just_started: false
        }
    );
    assert_eq!(session.advance(20_000.0), Phase::TimeUp { elapsed_ms: 10_000.0 });
    assert_eq!(session.elapsed_ms(), 10_000.0);

    session.finalize();
    assert_eq!(session.advance(30_000.0), Phase::Finalized);
}

#[test]
fn test_final_score_is_clamped_but_live_score_is_not() {
    let mut session = playing_session();
    session
        .record(Judgment::new("bomb-0", JudgmentTier::Miss, JudgmentSource::Hazard, 10.0).with_points(-50))
        .unwrap();
    assert_eq!(session.live().score, -50);
    assert_eq!(session.finalize().score, 0);
}

#[test]
fn test_miss_resets_combo_in_live_score() {
    let mut session = playing_session();
    for i in 0..12 {
        session.record(judgment(i, JudgmentTier::Perfect, i as f64)).unwrap();
    }
    let live = session.live();
    assert_eq!(live.combo, 12);
    // combo 10, 11, 12 each add a 10 point bonus
    assert_eq!(live.score, 12 * 100 + 30);

    session.record(judgment(12, JudgmentTier::Miss, 20.0)).unwrap();
    assert_eq!(session.live().combo, 0);
    assert_eq!(session.live().max_combo, 12);
}

#[test]
fn test_early_finalize_covers_partial_log() {
    let mut session = playing_session();
    session.record(judgment(0, JudgmentTier::Great, 100.0)).unwrap();
    let result = session.finalize();
    assert_eq!(result.judged, 1);
    assert_eq!(result.score, 70);
}
