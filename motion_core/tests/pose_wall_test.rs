use motion_core::chart::{EventStatus, Wall};
use motion_core::gameplay::pose_wall::{Dwell, WallJudge, WallResult, HELD_ACCURACY, INSTANT_ACCURACY};
use motion_core::synth;
use motion_schema::{JudgmentSource, JudgmentTier, Landmark};

fn wall(pose: &str, timing: f64) -> Wall {
    Wall {
        id: "wall-0".to_string(),
        timing,
        pose: pose.to_string(),
        hole_shape: "y_shape".to_string(),
        status: EventStatus::default(),
        accuracy: None,
    }
}

fn run(
    judge: &WallJudge,
    walls: &mut [Wall],
    dwell: &mut [Dwell],
    ticks: &[(f64, &[Landmark])],
) -> Vec<WallResult> {
    let mut out = Vec::new();
    for (t, body) in ticks {
        out.extend(judge.update(*t, body, walls, dwell));
    }
    out
}

#[test]
fn test_pose_held_through_dwell_is_perfect() {
    let judge = WallJudge::new(4000.0, 500.0);
    let mut walls = vec![wall("arms_up", 5000.0)];
    let mut dwell = vec![Dwell::Outside];
    let pose = synth::pose_body("arms_up").unwrap();

    let results = run(
        &judge,
        &mut walls,
        &mut dwell,
        &[(4500.0, pose.as_slice()), (4700.0, pose.as_slice()), (4900.0, pose.as_slice()), (5000.0, pose.as_slice())],
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].tier, JudgmentTier::Perfect);
    assert_eq!(results[0].accuracy, HELD_ACCURACY);
    assert_eq!(results[0].source, JudgmentSource::Action);
    assert_eq!(walls[0].accuracy, Some(100));
}

#[test]
fn test_pose_matched_only_at_the_instant_is_great() {
    let judge = WallJudge::new(4000.0, 500.0);
    let mut walls = vec![wall("arms_up", 5000.0)];
    let mut dwell = vec![Dwell::Outside];
    let pose = synth::pose_body("arms_up").unwrap();
    let neutral = synth::neutral_body();

    let results = run(
        &judge,
        &mut walls,
        &mut dwell,
        &[(4600.0, pose.as_slice()), (4800.0, neutral.as_slice()), (5010.0, pose.as_slice())],
    );

    assert_eq!(dwell[0], Dwell::Broken);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].tier, JudgmentTier::Great);
    assert_eq!(results[0].accuracy, INSTANT_ACCURACY);
}

#[test]
fn test_wrong_pose_at_the_instant_fails() {
    let judge = WallJudge::new(4000.0, 500.0);
    let mut walls = vec![wall("t_pose", 5000.0)];
    let mut dwell = vec![Dwell::Outside];
    let pose = synth::pose_body("arms_up").unwrap();

    let results = run(&judge, &mut walls, &mut dwell, &[(5000.0, pose.as_slice())]);
    assert_eq!(results[0].tier, JudgmentTier::Miss);
    assert_eq!(results[0].accuracy, 0);
    assert_eq!(results[0].source, JudgmentSource::Action);
}

#[test]
fn test_nothing_happens_before_the_band() {
    let judge = WallJudge::new(4000.0, 500.0);
    let mut walls = vec![wall("arms_up", 5000.0)];
    let mut dwell = vec![Dwell::Outside];
    let pose = synth::pose_body("arms_up").unwrap();

    assert!(run(&judge, &mut walls, &mut dwell, &[(500.0, pose.as_slice())]).is_empty());
    assert!(!walls[0].status.active);

    assert!(run(&judge, &mut walls, &mut dwell, &[(1000.0, pose.as_slice()), (4400.0, pose.as_slice())]).is_empty());
    assert!(walls[0].status.active);
    assert_eq!(dwell[0], Dwell::Outside);
}

#[test]
fn test_wall_first_seen_too_late_times_out() {
    let judge = WallJudge::new(4000.0, 500.0);
    let mut walls = vec![wall("arms_up", 5000.0)];
    let mut dwell = vec![Dwell::Outside];
    let pose = synth::pose_body("arms_up").unwrap();

    let results = run(&judge, &mut walls, &mut dwell, &[(5401.0, pose.as_slice())]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].tier, JudgmentTier::Miss);
    assert_eq!(results[0].source, JudgmentSource::Timeout);
}

#[test]
fn test_missing_body_fails_the_wall() {
    let judge = WallJudge::new(4000.0, 500.0);
    let mut walls = vec![wall("arms_up", 5000.0)];
    let mut dwell = vec![Dwell::Outside];

    let results = run(&judge, &mut walls, &mut dwell, &[(5000.0, &[] as &[Landmark])]);
    assert_eq!(results[0].tier, JudgmentTier::Miss);
}

#[test]
fn test_each_wall_is_judged_once() {
    let judge = WallJudge::new(4000.0, 500.0);
    let mut walls = vec![wall("arms_up", 5000.0)];
    let mut dwell = vec![Dwell::Outside];
    let pose = synth::pose_body("arms_up").unwrap();

    let results = run(&judge, &mut walls, &mut dwell, &[(5000.0, pose.as_slice()), (5100.0, pose.as_slice()), (9000.0, pose.as_slice())]);
    assert_eq!(results.len(), 1);
    assert!(judge.expire_all(&mut walls).is_empty());
}

#[test]
fn test_expire_all_fails_pending_walls() {
    let judge = WallJudge::new(4000.0, 500.0);
    let mut walls = vec![wall("arms_up", 5000.0), wall("crouch", 9000.0)];
    let results = judge.expire_all(&mut walls);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.tier == JudgmentTier::Miss && r.source == JudgmentSource::Timeout));
    assert!(walls.iter().all(|w| w.accuracy == Some(0)));
}
