use motion_core::chart::{FlightState, FruitKind, Lane};
use motion_core::config::{BubbleConfig, Canvas, FruitNinjaConfig, GameConfig, MoleConfig, PoseMatchConfig, RhythmConfig};
use motion_core::timeline::notes::{NOTE_LEAD_IN_MS, NOTE_TRAILING_MS};
use motion_core::timeline::walls::{allowed_poses, WALL_LEAD_IN_MS, WALL_TRAILING_MS};
use motion_core::timeline::{
    generate_notes, generate_walls, schedule, spawn_bubble, spawn_fruit, spawn_mole, ScheduleParams, SpawnTimer,
};
use motion_schema::Difficulty;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn test_short_sessions_have_no_notes_or_walls() {
    for difficulty in Difficulty::ALL {
        let rhythm = RhythmConfig::for_difficulty(difficulty);
        assert!(generate_notes(&mut rng(1), &rhythm, difficulty, 4000.0).is_empty());
        assert!(generate_notes(&mut rng(1), &rhythm, difficulty, 0.0).is_empty());

        let pose = PoseMatchConfig::for_difficulty(difficulty);
        assert!(generate_walls(&mut rng(1), &pose, difficulty, 6000.0).is_empty());
    }
}

#[test]
fn test_notes_sit_inside_the_lead_in_and_trailing_buffer() {
    let duration = 60_000.0;
    for difficulty in Difficulty::ALL {
        let config = RhythmConfig::for_difficulty(difficulty);
        let notes = generate_notes(&mut rng(7), &config, difficulty, duration);
        assert!(!notes.is_empty());

        for note in &notes {
            assert!(note.timing >= NOTE_LEAD_IN_MS);
            assert!(note.timing < duration - NOTE_TRAILING_MS);
            assert_eq!(note.duration, config.note_duration_ms);
            assert!(!note.status.is_judged());
        }
        for pair in notes.windows(2) {
            assert!(pair[0].timing <= pair[1].timing);
        }
    }
}

#[test]
fn test_note_ids_are_unique() {
    let config = RhythmConfig::for_difficulty(Difficulty::Hard);
    let notes = generate_notes(&mut rng(3), &config, Difficulty::Hard, 60_000.0);
    let mut ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), notes.len());
}

#[test]
fn test_easy_never_doubles_notes() {
    let mut config = RhythmConfig::for_difficulty(Difficulty::Easy);
    config.double_note_chance = 1.0;
    let notes = generate_notes(&mut rng(11), &config, Difficulty::Easy, 60_000.0);
    for pair in notes.windows(2) {
        assert!(pair[0].timing < pair[1].timing);
    }
}

#[test]
fn test_doubles_use_both_lanes() {
    let mut config = RhythmConfig::for_difficulty(Difficulty::Normal);
    config.double_note_chance = 1.0;
    let notes = generate_notes(&mut rng(11), &config, Difficulty::Normal, 60_000.0);
    assert_eq!(notes.len() % 2, 0);
    for pair in notes.chunks(2) {
        assert_eq!(pair[0].timing, pair[1].timing);
        assert_eq!(pair[0].lane, pair[1].lane.other());
    }
    assert!(notes.iter().any(|n| n.lane == Lane::Left));
}

#[test]
fn test_same_seed_same_timeline() {
    let config = RhythmConfig::for_difficulty(Difficulty::Normal);
    let a = generate_notes(&mut rng(42), &config, Difficulty::Normal, 60_000.0);
    let b = generate_notes(&mut rng(42), &config, Difficulty::Normal, 60_000.0);
    assert_eq!(a, b);
}

#[test]
fn test_walls_respect_buffer_and_pose_set() {
    let duration = 60_000.0;
    for difficulty in Difficulty::ALL {
        let config = PoseMatchConfig::for_difficulty(difficulty);
        let walls = generate_walls(&mut rng(5), &config, difficulty, duration);
        let allowed: Vec<&str> = allowed_poses(difficulty).iter().map(|p| p.id).collect();
        assert!(!walls.is_empty());

        for wall in &walls {
            assert!(wall.timing >= WALL_LEAD_IN_MS);
            assert!(wall.timing < duration - WALL_TRAILING_MS);
            assert!(allowed.contains(&wall.pose.as_str()), "{} on {difficulty}", wall.pose);
            assert!(wall.accuracy.is_none());
        }
    }
    assert_eq!(allowed_poses(Difficulty::Easy).len(), 3);
    assert_eq!(allowed_poses(Difficulty::Hard).len(), 8);
}

#[test]
fn test_schedule_guards_non_positive_steps() {
    let params = ScheduleParams {
        lead_in_ms: 0.0,
        trailing_ms: 0.0,
        interval_ms: 0.0,
        variation: 0.2,
    };
    assert!(schedule(&mut rng(1), params, 10_000.0).is_empty());
}

#[test]
fn test_spawn_timer_stops_before_the_end() {
    let mut timer = SpawnTimer::new(1000.0, 1000.0, 10_000.0);
    let mut spawned = Vec::new();
    let mut t = 0.0;
    while t < 10_000.0 {
        if timer.poll(t) {
            spawned.push(t);
        }
        t += 100.0;
    }
    assert_eq!(spawned.first(), Some(&1000.0));
    assert!(spawned.iter().all(|&t| t < 8000.0));
    assert_eq!(spawned.len(), 7);
}

#[test]
fn test_spawn_timer_does_not_burst_after_a_stall() {
    let mut timer = SpawnTimer::new(500.0, 0.0, 60_000.0);
    assert!(timer.poll(0.0));
    assert!(timer.poll(5000.0));
    assert!(!timer.poll(5100.0));
    assert!(timer.poll(5500.0));
}

#[test]
fn test_fruit_launches_upward_from_below() {
    let canvas = Canvas::default();
    let config = FruitNinjaConfig::for_difficulty(Difficulty::Normal);
    let mut r = rng(9);
    for seq in 0..50 {
        let fruit = spawn_fruit(&mut r, &config, canvas, 1000.0, seq);
        assert!(fruit.position.y > canvas.height);
        assert!(fruit.velocity.y < 0.0);
        assert!(fruit.position.x >= 0.2 * canvas.width && fruit.position.x <= 0.8 * canvas.width);
        assert_eq!(fruit.state, FlightState::Flying);
        assert_eq!(fruit.radius, fruit.kind.radius());
        assert_eq!(fruit.id, format!("fruit-{seq}"));
    }
}

#[test]
fn test_bomb_chance_extremes() {
    let canvas = Canvas::default();
    let mut config = FruitNinjaConfig::for_difficulty(Difficulty::Hard);
    config.bomb_chance = 1.0;
    assert_eq!(spawn_fruit(&mut rng(1), &config, canvas, 0.0, 0).kind, FruitKind::Bomb);
    config.bomb_chance = 0.0;
    for seq in 0..20 {
        assert!(!spawn_fruit(&mut rng(seq as u64), &config, canvas, 0.0, seq).kind.is_bomb());
    }
}

#[test]
fn test_bubbles_start_outside_and_head_inward() {
    let canvas = Canvas::default();
    let config = BubbleConfig::for_difficulty(Difficulty::Easy);
    let mut r = rng(2);
    for seq in 0..50 {
        let bubble = spawn_bubble(&mut r, &config, canvas, 0.0, seq);
        let centre = glam::Vec2::new(canvas.width / 2.0, canvas.height / 2.0);
        assert!(bubble.velocity.dot(centre - bubble.position) > 0.0);
        assert!((bubble.velocity.length() - config.speed).abs() < 1e-2);
        assert!(!bubble.entered);
    }
}

#[test]
fn test_moles_only_use_free_holes() {
    let config = MoleConfig::for_difficulty(Difficulty::Normal);
    let occupied: Vec<usize> = (0..8).collect();
    let mole = spawn_mole(&mut rng(4), &config, &occupied, 0.0, 0).unwrap();
    assert_eq!(mole.hole, 8);
    assert!(mole.is_up());

    let full: Vec<usize> = (0..9).collect();
    assert!(spawn_mole(&mut rng(4), &config, &full, 0.0, 1).is_none());
}
