use motion_core::config::{
    BubbleConfig, ConfigError, FruitNinjaConfig, GameConfig, MoleConfig, PoseMatchConfig, RhythmConfig,
    MAX_BOMB_PENALTY, MAX_GRID_SIZE,
};
use motion_schema::{Difficulty, GameType};

fn assert_scales<C: GameConfig>() {
    let easy = C::for_difficulty(Difficulty::Easy);
    let normal = C::for_difficulty(Difficulty::Normal);
    let hard = C::for_difficulty(Difficulty::Hard);

    assert!(easy.event_interval_ms() > normal.event_interval_ms(), "{}", C::GAME);
    assert!(normal.event_interval_ms() > hard.event_interval_ms(), "{}", C::GAME);
    for config in [easy, normal, hard] {
        assert!(config.validate().is_ok(), "{}", C::GAME);
        assert_eq!(config.game_duration_ms(), 60_000.0);
    }
}

#[test]
fn test_harder_difficulties_are_denser() {
    assert_scales::<RhythmConfig>();
    assert_scales::<PoseMatchConfig>();
    assert_scales::<FruitNinjaConfig>();
    assert_scales::<BubbleConfig>();
    assert_scales::<MoleConfig>();
}

#[test]
fn test_harder_difficulties_are_faster() {
    let rhythm = |d| RhythmConfig::for_difficulty(d).travel_ms;
    assert!(rhythm(Difficulty::Easy) > rhythm(Difficulty::Hard));

    let walls = |d| PoseMatchConfig::for_difficulty(d).travel_ms;
    assert!(walls(Difficulty::Easy) > walls(Difficulty::Hard));

    let gravity = |d| FruitNinjaConfig::for_difficulty(d).gravity;
    assert!(gravity(Difficulty::Easy) < gravity(Difficulty::Hard));

    let bubbles = |d| BubbleConfig::for_difficulty(d).speed;
    assert!(bubbles(Difficulty::Easy) < bubbles(Difficulty::Hard));

    let moles = |d| MoleConfig::for_difficulty(d).up_duration_ms;
    assert!(moles(Difficulty::Easy) > moles(Difficulty::Hard));
}

#[test]
fn test_config_games_are_distinct() {
    let games = [
        RhythmConfig::GAME,
        PoseMatchConfig::GAME,
        FruitNinjaConfig::GAME,
        BubbleConfig::GAME,
        MoleConfig::GAME,
    ];
    assert_eq!(games.to_vec(), GameType::ALL.to_vec());
}

#[test]
fn test_validation_errors() {
    let config = RhythmConfig {
        travel_ms: -1.0,
        ..RhythmConfig::for_difficulty(Difficulty::Normal)
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::NonPositive {
            field: "travel_ms",
            value: -1.0
        })
    );

    let config = FruitNinjaConfig {
        bomb_chance: 1.5,
        ..FruitNinjaConfig::for_difficulty(Difficulty::Normal)
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotAProbability { field: "bomb_chance", .. })
    ));

    let config = MoleConfig {
        grid_size: 0,
        ..MoleConfig::for_difficulty(Difficulty::Easy)
    };
    assert!(config.validate().is_err());

    let config = MoleConfig {
        grid_size: 1 << 33,
        ..MoleConfig::for_difficulty(Difficulty::Easy)
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { field: "grid_size", .. })
    ));
    let config = MoleConfig {
        grid_size: MAX_GRID_SIZE,
        ..MoleConfig::for_difficulty(Difficulty::Easy)
    };
    assert!(config.validate().is_ok());

    for bomb_penalty in [i64::MIN, -1, MAX_BOMB_PENALTY + 1] {
        let config = FruitNinjaConfig {
            bomb_penalty,
            ..FruitNinjaConfig::for_difficulty(Difficulty::Normal)
        };
        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::OutOfRange { field: "bomb_penalty", .. })
            ),
            "{bomb_penalty}"
        );
    }

    let config = PoseMatchConfig {
        dwell_ms: f64::NAN,
        ..PoseMatchConfig::for_difficulty(Difficulty::Easy)
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_override_from_json() {
    let json = r#"{
        "game_duration_ms": 30000.0,
        "note_interval_ms": 900.0,
        "travel_ms": 2000.0,
        "note_duration_ms": 300.0,
        "double_note_chance": 0.5
    }"#;
    let config: RhythmConfig = serde_json::from_str(json).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.game_duration_ms(), 30_000.0);
    assert_eq!(config.event_interval_ms(), 900.0);
}

#[test]
fn test_duration_override_keeps_the_rest_of_the_entry() {
    let mut config = MoleConfig::for_difficulty(Difficulty::Hard);
    config.set_game_duration_ms(15_000.0);
    assert_eq!(config.game_duration_ms(), 15_000.0);
    assert_eq!(
        config.event_interval_ms(),
        MoleConfig::for_difficulty(Difficulty::Hard).event_interval_ms()
    );

    config.set_game_duration_ms(0.0);
    assert!(config.validate().is_err());
}
