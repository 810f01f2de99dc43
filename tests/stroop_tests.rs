//! Stroop integration tests.
//!
//! Reaction-time scoring and the statistics of trial generation.

use std::sync::Arc;

use neuro_games::core::{GameRng, ManualClock, StroopConfig};
use neuro_games::{InkColor, MiniGame, StroopGame, Trial};

fn congruent_rate(config: &StroopConfig, seed: u64, draws: usize) -> f64 {
    let mut rng = GameRng::new(seed);
    let congruent = (0..draws)
        .filter(|_| StroopGame::generate_trial(config, &mut rng).is_congruent())
        .count();
    congruent as f64 / draws as f64
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_mixed_session_scoring() {
    let clock = Arc::new(ManualClock::at_epoch());
    let mut game = StroopGame::new(StroopConfig::default(), clock.clone()).unwrap();
    game.start_with_trials(vec![
        Trial::new(InkColor::Red, InkColor::Blue),
        Trial::new(InkColor::Green, InkColor::Green),
        Trial::new(InkColor::Yellow, InkColor::Purple),
        Trial::new(InkColor::Purple, InkColor::Red),
    ]);

    clock.advance_ms(600);
    game.respond(InkColor::Blue).unwrap();
    clock.advance_ms(700);
    game.respond(InkColor::Green).unwrap();
    clock.advance_ms(900);
    // Reading the word instead of the ink
    game.respond(InkColor::Yellow).unwrap();
    clock.advance_ms(1_000);
    let result = game.respond(InkColor::Red).unwrap().into_result().unwrap();

    assert_eq!(game.reaction_times(), &[600, 700, 900, 1_000]);
    assert_eq!(result.summary(), "3 / 4 (Avg RT: 800 ms)");
}

#[test]
fn test_random_session_has_configured_length() {
    let clock = Arc::new(ManualClock::at_epoch());
    let config = StroopConfig::default().with_trial_count(30);
    let mut game = StroopGame::new(config, clock).unwrap();
    game.start(&mut GameRng::new(5));

    assert_eq!(game.trials().len(), 30);
    assert!(game
        .trials()
        .iter()
        .all(|t| InkColor::ALL.contains(&t.word) && InkColor::ALL.contains(&t.ink)));
}

// =============================================================================
// Generation statistics
// =============================================================================

#[test]
fn test_congruence_rate_includes_chance_matches() {
    // 0.4 forced plus 0.6 * 1/5 by chance.
    let rate = congruent_rate(&StroopConfig::default(), 11, 20_000);
    assert!((rate - 0.52).abs() < 0.02, "rate was {rate}");
}

#[test]
fn test_congruence_rate_extremes() {
    let always = StroopConfig::default().with_congruent_probability(1.0);
    assert!((congruent_rate(&always, 2, 1_000) - 1.0).abs() < f64::EPSILON);

    // Only chance matches remain.
    let never = StroopConfig::default().with_congruent_probability(0.0);
    let rate = congruent_rate(&never, 3, 20_000);
    assert!((rate - 0.2).abs() < 0.02, "rate was {rate}");
}

#[test]
fn test_single_color_always_congruent() {
    let config = StroopConfig::default()
        .with_colors(vec![InkColor::Green])
        .with_congruent_probability(0.0);
    assert!((congruent_rate(&config, 4, 100) - 1.0).abs() < f64::EPSILON);
}
