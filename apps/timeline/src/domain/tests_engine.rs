//! Scenario tests for the turn engine.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::game::{DeckEmptyPolicy, GameConfig};
use crate::domain::deck::{DeckProvider, FixedOrderPool};
use crate::domain::engine::Engine;
use crate::domain::events::GameEvent;
use crate::domain::fixtures::{card, cards_with_years};
use crate::domain::placement::valid_indices;
use crate::domain::state::{Command, Phase};
use crate::domain::Card;
use crate::errors::DomainError;

/// Answers each fetch with the next scripted result.
struct ScriptedProvider {
    script: Mutex<VecDeque<Result<Vec<Card>, DomainError>>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Result<Vec<Card>, DomainError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl DeckProvider for ScriptedProvider {
    async fn fetch(&self, _count: usize) -> Result<Vec<Card>, DomainError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(DomainError::insufficient(0, 2)))
    }
}

fn years(timeline: &[Card]) -> Vec<i64> {
    timeline.iter().map(|c| c.year).collect()
}

fn fixed_engine(pool_years: &[i64], config: GameConfig) -> Engine<FixedOrderPool> {
    let pool = cards_with_years(pool_years);
    Engine::new(FixedOrderPool::new(pool), config).unwrap()
}

#[tokio::test]
async fn end_to_end_first_turn() {
    let mut engine = fixed_engine(&[1980, 1990, 2000, 2010, 2020], GameConfig::default());

    let events = engine.start_game().await.unwrap();
    assert_eq!(
        events,
        vec![
            GameEvent::GameStarted { teams: 2, dealt: 3 },
            GameEvent::TurnBecame { team: 0 },
        ]
    );
    assert_eq!(years(&engine.session().teams[0].timeline), vec![1980]);
    assert_eq!(years(&engine.session().teams[1].timeline), vec![1990]);
    assert_eq!(engine.phase(), Phase::TurnStart);

    engine.start_turn().await.unwrap();
    assert_eq!(engine.phase(), Phase::Drawn);
    assert_eq!(engine.session().current_card.as_ref().unwrap().year, 2000);

    let events = engine.place_at(1);
    assert_eq!(events, vec![GameEvent::PlacedCorrect { team: 0, index: 1 }]);
    assert_eq!(years(&engine.session().teams[0].timeline), vec![1980, 2000]);
    assert_eq!(engine.phase(), Phase::ChoiceAfterCorrect);
    assert!(engine.session().current_card.is_none());

    let events = engine.lock_in();
    assert_eq!(
        events,
        vec![
            GameEvent::LockedIn { team: 0, score: 1 },
            GameEvent::TurnBecame { team: 1 },
        ]
    );
    assert_eq!(engine.session().teams[0].score, 1);
    assert_eq!(engine.session().current_team, 1);
    assert_eq!(engine.phase(), Phase::TurnStart);
}

#[tokio::test]
async fn wrong_guess_discards_and_passes_turn() {
    let mut engine = fixed_engine(&[1980, 1990, 2000, 2010], GameConfig::default());
    engine.start_game().await.unwrap();
    engine.start_turn().await.unwrap();

    // 2000 does not go before 1980.
    let events = engine.place_at(0);

    let drawn = cards_with_years(&[1980, 1990, 2000, 2010])[2].clone();
    assert_eq!(
        events,
        vec![
            GameEvent::PlacedWrong {
                team: 0,
                card: drawn,
                index: 0,
            },
            GameEvent::TurnBecame { team: 1 },
        ]
    );
    let session = engine.session();
    assert_eq!(years(&session.teams[0].timeline), vec![1980]);
    assert_eq!(years(&session.discard), vec![2000]);
    assert_eq!(session.teams[0].score, 0);
    assert_eq!(session.current_team, 1);
    assert_eq!(session.phase, Phase::TurnStart);
}

#[tokio::test]
async fn draw_another_keeps_earlier_cards_of_the_turn() {
    let mut engine = fixed_engine(&[1980, 1990, 2000, 1970, 2010], GameConfig::default());
    engine.start_game().await.unwrap();

    engine.start_turn().await.unwrap();
    engine.place_at(1);
    let events = engine.draw_another().await.unwrap();
    assert!(matches!(
        events.as_slice(),
        [GameEvent::CardDrawn { team: 0, .. }]
    ));
    assert_eq!(engine.session().round_baseline.len(), 2);

    // 1970 belongs at index 0; index 2 is wrong.
    engine.place_at(2);
    let session = engine.session();
    assert_eq!(years(&session.teams[0].timeline), vec![1980, 2000]);
    assert_eq!(session.teams[0].score, 0);
    assert_eq!(session.current_team, 1);
}

#[tokio::test]
async fn commands_out_of_phase_are_ignored() {
    let mut engine = fixed_engine(&[1980, 1990, 2000, 2010], GameConfig::default());

    assert!(engine.place_at(0).is_empty());
    assert!(engine.lock_in().is_empty());
    assert!(engine.start_turn().await.unwrap().is_empty());
    assert_eq!(engine.phase(), Phase::Setup);

    engine.start_game().await.unwrap();
    let before = engine.snapshot();
    assert!(engine.start_game().await.unwrap().is_empty());
    assert!(engine.place_at(0).is_empty());
    assert!(engine.draw_another().await.unwrap().is_empty());
    assert!(engine.lock_in().is_empty());
    assert_eq!(engine.snapshot(), before);
}

#[tokio::test]
async fn insufficient_pool_is_recoverable() {
    let provider = ScriptedProvider::new(vec![
        Err(DomainError::insufficient(1, 2)),
        Ok(cards_with_years(&[1980, 1990, 2000])),
    ]);
    let mut engine = Engine::new(provider, GameConfig::default()).unwrap();

    let err = engine.start_game().await.unwrap_err();
    assert_eq!(err, DomainError::insufficient(1, 2));
    assert_eq!(engine.phase(), Phase::Setup);
    assert_eq!(engine.session().last_error, Some(err));
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.last_error.unwrap().code, "INSUFFICIENT_SOURCE_DATA");
    assert_eq!(snapshot.available_commands, vec![Command::StartGame]);

    engine.start_game().await.unwrap();
    assert_eq!(engine.phase(), Phase::TurnStart);
    assert!(engine.session().last_error.is_none());
}

#[tokio::test]
async fn batch_smaller_than_team_count_is_insufficient() {
    let provider = ScriptedProvider::new(vec![Ok(cards_with_years(&[1980, 1990]))]);
    let config = GameConfig::default().with_teams(["A", "B", "C"]);
    let mut engine = Engine::new(provider, config).unwrap();

    let err = engine.start_game().await.unwrap_err();
    assert_eq!(err, DomainError::insufficient(2, 3));
}

#[tokio::test]
async fn empty_deck_tops_up_without_touching_teams() {
    let provider = ScriptedProvider::new(vec![
        Ok(cards_with_years(&[1980, 1990, 2000])),
        // Top-up batch repeats two cards already in play.
        Ok(vec![
            card("c0-1980", 1980),
            card("c2-2000", 2000),
            card("fresh-1", 1975),
            card("fresh-2", 2015),
        ]),
    ]);
    let mut engine = Engine::new(provider, GameConfig::default()).unwrap();
    engine.start_game().await.unwrap();

    engine.start_turn().await.unwrap();
    engine.place_at(1);
    engine.lock_in();
    assert!(engine.session().deck.is_empty());

    let events = engine.start_turn().await.unwrap();
    assert_eq!(events[0], GameEvent::DeckToppedUp { added: 2 });
    assert!(matches!(events[1], GameEvent::CardDrawn { team: 1, .. }));

    let session = engine.session();
    assert_eq!(session.teams[0].score, 1);
    assert_eq!(years(&session.teams[0].timeline), vec![1980, 2000]);
    assert_eq!(session.current_card.as_ref().unwrap().id, "fresh-1");
    assert_eq!(session.deck.len(), 1);
}

#[tokio::test]
async fn fail_policy_surfaces_deck_exhausted() {
    let config = GameConfig::default().with_deck_empty_policy(DeckEmptyPolicy::Fail);
    let mut engine = fixed_engine(&[1980, 1990, 2000], config);
    engine.start_game().await.unwrap();
    engine.start_turn().await.unwrap();
    engine.place_at(1);

    let err = engine.draw_another().await.unwrap_err();
    assert_eq!(err, DomainError::DeckExhausted);

    let session = engine.session();
    assert_eq!(session.phase, Phase::ChoiceAfterCorrect);
    assert_eq!(years(&session.teams[0].timeline), vec![1980, 2000]);
    assert_eq!(session.last_error, Some(DomainError::DeckExhausted));
    assert!(session.allows(Command::StartGame));
    assert!(session.allows(Command::LockIn));

    engine.lock_in();
    assert_eq!(engine.session().teams[0].score, 1);
    assert!(engine.session().last_error.is_none());
}

#[tokio::test]
async fn top_up_with_nothing_new_is_exhausted() {
    let mut engine = fixed_engine(&[1980, 1990, 2000], GameConfig::default());
    engine.start_game().await.unwrap();
    engine.start_turn().await.unwrap();
    engine.place_at(1);

    // The fixed pool only ever deals the three cards already in play.
    let err = engine.draw_another().await.unwrap_err();
    assert_eq!(err, DomainError::DeckExhausted);
    assert_eq!(engine.phase(), Phase::ChoiceAfterCorrect);
}

#[tokio::test]
async fn target_score_ends_the_game() {
    let config = GameConfig::default().with_target_score(2);
    let mut engine = fixed_engine(&[1980, 1990, 2000, 2010, 2020, 2030, 2040], config);
    engine.start_game().await.unwrap();

    // Team 0 scores, team 1 scores, team 0 scores again and wins.
    for _ in 0..3 {
        engine.start_turn().await.unwrap();
        let len = engine.session().active_team().timeline.len();
        engine.place_at(len);
        engine.lock_in();
    }

    let session = engine.session();
    assert_eq!(session.phase, Phase::GameOver);
    assert_eq!(session.winner, Some(0));
    assert_eq!(session.teams[0].score, 2);
    assert_eq!(session.teams[1].score, 1);

    assert!(engine.start_turn().await.unwrap().is_empty());
    assert_eq!(engine.snapshot().available_commands, vec![Command::StartGame]);

    // A new game can be dealt from game over.
    engine.start_game().await.unwrap();
    assert_eq!(engine.phase(), Phase::TurnStart);
    assert!(engine.session().teams.iter().all(|t| t.score == 0));
    assert_eq!(engine.session().winner, None);
}

#[tokio::test]
async fn without_target_play_continues() {
    let mut engine = fixed_engine(&[1980, 1990, 2000, 2010, 2020, 2030], GameConfig::default());
    engine.start_game().await.unwrap();
    for _ in 0..4 {
        engine.start_turn().await.unwrap();
        let len = engine.session().active_team().timeline.len();
        engine.place_at(len);
        engine.lock_in();
    }
    assert_eq!(engine.phase(), Phase::TurnStart);
    assert_eq!(engine.session().winner, None);
}

#[tokio::test]
async fn three_teams_rotate_round_robin() {
    let config = GameConfig::default().with_teams(["Reds", "Blues", "Greens"]);
    let mut engine = fixed_engine(&[1950, 1960, 1970, 1940, 1930, 1920, 1910], config);
    engine.start_game().await.unwrap();

    let mut order = vec![engine.session().current_team];
    for _ in 0..4 {
        engine.start_turn().await.unwrap();
        // Each drawn card is older than every seed, so index 1 is always wrong.
        let events = engine.place_at(1);
        order.extend(events.iter().filter_map(GameEvent::turn_became));
    }
    assert_eq!(order, vec![0, 1, 2, 0, 1]);
    assert_eq!(engine.session().discard.len(), 4);
}

#[tokio::test]
async fn reset_returns_to_setup() {
    let mut engine = fixed_engine(&[1980, 1990, 2000], GameConfig::default());
    engine.start_game().await.unwrap();
    engine.start_turn().await.unwrap();

    assert_eq!(engine.reset(), vec![GameEvent::GameReset]);
    let session = engine.session();
    assert_eq!(session.phase, Phase::Setup);
    assert!(session.current_card.is_none());
    assert!(session.teams.iter().all(|t| t.timeline.is_empty()));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = GameConfig::default().with_teams(["Solo"]);
    let result = Engine::new(FixedOrderPool::new(Vec::new()), config);
    assert!(matches!(result, Err(DomainError::Config(_))));
}

/// Perfect play with single-card turns until the deck can no longer be
/// refilled. Returns the number of draws made.
async fn play_until_exhausted<P: DeckProvider>(engine: &mut Engine<P>) -> usize {
    let mut draws = 0;
    loop {
        match engine.start_turn().await {
            Ok(_) => draws += 1,
            Err(err) => {
                assert_eq!(err, DomainError::DeckExhausted);
                return draws;
            }
        }
        let session = engine.session();
        let card = session.current_card.as_ref().unwrap();
        let index = *valid_indices(session.active_team().timeline.as_slice(), card).start();
        engine.place_at(index);
        engine.lock_in();
        assert!(draws <= 100, "deck never ran dry");
    }
}

#[tokio::test]
async fn top_up_deals_whole_pool_larger_than_deck_size() {
    let pool_years = [1980, 1990, 2000, 2010, 2020, 1970, 1960, 2030];
    let config = GameConfig::default().with_deck_size(3);
    let mut engine = fixed_engine(&pool_years, config);
    engine.start_game().await.unwrap();
    assert_eq!(engine.session().deck.len(), 1);

    let draws = play_until_exhausted(&mut engine).await;

    assert_eq!(draws, pool_years.len() - 2);
    let dealt: HashSet<&str> = engine.session().ids_out_of_deck().collect();
    assert_eq!(dealt.len(), pool_years.len());
    assert_eq!(engine.session().last_error, Some(DomainError::DeckExhausted));
}

#[tokio::test]
async fn top_up_never_holds_more_than_deck_size() {
    let pool_years: Vec<i64> = (0..10).map(|i| 1950 + i * 5).collect();
    let config = GameConfig::default().with_deck_size(3);
    let mut engine = fixed_engine(&pool_years, config);
    engine.start_game().await.unwrap();

    engine.start_turn().await.unwrap();
    engine.place_at(1);
    let events = engine.draw_another().await.unwrap();

    assert_eq!(events[0], GameEvent::DeckToppedUp { added: 3 });
    assert_eq!(engine.session().deck.len(), 2);
}
