//! Trail-Making integration tests.

use std::sync::Arc;

use neuro_games::core::{GameRng, ManualClock, TrailConfig};
use neuro_games::{MiniGame, TrailGame};
use proptest::prelude::*;

#[test]
fn test_elapsed_measured_to_last_click() {
    let clock = Arc::new(ManualClock::at_epoch());
    let mut game = TrailGame::new(TrailConfig::default(), clock.clone()).unwrap();
    game.start(&mut GameRng::new(8));

    let mut result = None;
    for label in 1..=12 {
        clock.advance_ms(250);
        // Stray click on a later label costs time but no progress
        let _ = game.click(label + 1);
        result = game.click(label).unwrap().into_result();
    }

    assert_eq!(result.unwrap().summary(), "3.00 s");
}

proptest! {
    #[test]
    fn only_expected_label_advances(
        seed in any::<u64>(),
        clicks in proptest::collection::vec(1u32..14, 0..80),
        step_ms in 1i64..500,
    ) {
        let clock = Arc::new(ManualClock::at_epoch());
        let mut game = TrailGame::new(TrailConfig::default(), clock.clone()).unwrap();
        game.start(&mut GameRng::new(seed));

        for label in clicks {
            clock.advance_ms(step_ms);
            let expected = game.next_expected();
            let recorded = game.click_times().len();

            match game.click(label) {
                Ok(progress) => {
                    prop_assert_eq!(label, expected);
                    prop_assert_eq!(game.next_expected(), expected + 1);
                    prop_assert_eq!(game.click_times().len(), recorded + 1);
                    if let Some(result) = progress.into_result() {
                        // Strictly positive: at least one step per item.
                        prop_assert!(result.summary() != "0.00 s");
                        break;
                    }
                }
                Err(_) => {
                    prop_assert_eq!(game.next_expected(), expected);
                    prop_assert_eq!(game.click_times().len(), recorded);
                }
            }
        }
    }
}
