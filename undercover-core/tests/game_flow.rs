//! End-to-end game scenarios driven by scripted responders.
//!
//! These tests use `MockResponder` so full games run deterministically
//! without network access. Word pairs are user-provided, which makes setup
//! consume no scripted replies; each round then consumes one speech reply
//! per survivor followed by one vote reply per survivor, in roster order.

use undercover_core::testing::{
    scripted_abstain, scripted_speech, scripted_vote, FailingResponder, MockResponder,
};
use undercover_core::{
    GameSession, RoundStatus, SessionError, SetupConfig, VoteIntent, Winner,
};

async fn new_game(player_count: usize, mock: &MockResponder) -> GameSession {
    let config = SetupConfig::new(player_count).with_words("apple", "pear");
    GameSession::setup(config, Box::new(mock.clone()))
        .await
        .expect("setup succeeds")
}

/// Queue one full round: every active player speaks, then every active
/// player casts the given vote.
fn queue_round(mock: &MockResponder, session: &GameSession, votes: &[String]) {
    let active = session.active_players();
    assert_eq!(active.len(), votes.len());
    for name in &active {
        mock.push(scripted_speech(format!("{name} describes something vague")));
    }
    mock.extend(votes.iter().cloned());
}

#[tokio::test]
async fn exactly_one_spy_never_the_gm() {
    for _ in 0..5 {
        let mock = MockResponder::new();
        let session = new_game(4, &mock).await;

        let spy = session.spy_name().to_string();
        let players = session.players();
        assert!(players.contains(&spy.as_str()));
        assert_ne!(spy, session.gm_name());
        assert_eq!(players.len(), 4);
    }
}

#[tokio::test]
async fn too_few_players_is_rejected() {
    let mock = MockResponder::new();
    let result = GameSession::setup(
        SetupConfig::new(1).with_words("apple", "pear"),
        Box::new(mock),
    )
    .await;
    assert!(matches!(result, Err(SessionError::TooFewPlayers(1))));
}

#[tokio::test]
async fn unanimous_vote_for_spy_ends_game_in_round_one() {
    let mock = MockResponder::new();
    let mut session = new_game(3, &mock).await;
    let spy = session.spy_name().to_string();

    queue_round(&mock, &session, &vec![scripted_vote(&spy); 3]);
    let outcome = session.play_round().await.unwrap();

    assert_eq!(outcome.round, 1);
    assert_eq!(outcome.eliminated.as_deref(), Some(spy.as_str()));
    match &outcome.status {
        RoundStatus::Finished(result) => {
            assert_eq!(result.winner, Winner::Civilians);
            assert_eq!(result.rounds, 1);
            assert_eq!(result.spy_name, spy);
        }
        RoundStatus::Continuing => panic!("expected a finished game"),
    }
    assert!(session.is_over());
    assert_eq!(session.round_index(), 1);
}

#[tokio::test]
async fn three_way_tie_eliminates_nobody() {
    let mock = MockResponder::new();
    let mut session = new_game(3, &mock).await;

    // Each player votes for a different other: 1/1/1 tie at the top.
    let players: Vec<String> = session.players().iter().map(|s| s.to_string()).collect();
    let votes = vec![
        scripted_vote(&players[1]),
        scripted_vote(&players[2]),
        scripted_vote(&players[0]),
    ];
    queue_round(&mock, &session, &votes);
    let outcome = session.play_round().await.unwrap();

    assert!(outcome.eliminated.is_none());
    assert!(matches!(outcome.status, RoundStatus::Continuing));
    assert_eq!(session.active_players().len(), 3);
    assert!(!session.is_over());
}

#[tokio::test]
async fn spy_wins_when_two_remain() {
    let mock = MockResponder::new();
    let mut session = new_game(4, &mock).await;
    let spy = session.spy_name().to_string();
    let civilians: Vec<String> = session
        .players()
        .iter()
        .filter(|p| **p != spy)
        .map(|p| p.to_string())
        .collect();
    assert_eq!(civilians.len(), 3);

    // Round 1: everyone piles on the first civilian. 4 -> 3, game continues.
    queue_round(&mock, &session, &vec![scripted_vote(&civilians[0]); 4]);
    let outcome = session.play_round().await.unwrap();
    assert_eq!(outcome.eliminated.as_deref(), Some(civilians[0].as_str()));
    assert!(matches!(outcome.status, RoundStatus::Continuing));
    assert_eq!(session.active_players().len(), 3);

    // Round 2: the second civilian goes. 3 -> 2 with the spy alive.
    queue_round(&mock, &session, &vec![scripted_vote(&civilians[1]); 3]);
    let outcome = session.play_round().await.unwrap();
    assert_eq!(outcome.eliminated.as_deref(), Some(civilians[1].as_str()));
    match &outcome.status {
        RoundStatus::Finished(result) => {
            assert_eq!(result.winner, Winner::Spy);
            assert_eq!(result.rounds, 2);
        }
        RoundStatus::Continuing => panic!("expected spy victory at two remaining"),
    }
}

#[tokio::test]
async fn roster_shrinks_by_at_most_one_and_never_readmits() {
    let mock = MockResponder::new();
    let mut session = new_game(4, &mock).await;
    let spy = session.spy_name().to_string();
    let victim = session
        .players()
        .iter()
        .find(|p| **p != spy)
        .unwrap()
        .to_string();

    queue_round(&mock, &session, &vec![scripted_vote(&victim); 4]);
    session.play_round().await.unwrap();

    let after_first = session.active_players();
    assert_eq!(after_first.len(), 3);
    assert!(!after_first.contains(&victim.as_str()));

    // A later vote for the eliminated player is stale and counts nothing.
    queue_round(&mock, &session, &vec![scripted_vote(&victim); 3]);
    let outcome = session.play_round().await.unwrap();
    assert!(outcome.eliminated.is_none());
    let after_second = session.active_players();
    assert_eq!(after_second.len(), 3);
    assert!(!after_second.contains(&victim.as_str()));
}

#[tokio::test]
async fn abstain_and_unparsed_votes_are_distinguished_but_count_nothing() {
    let mock = MockResponder::new();
    let mut session = new_game(3, &mock).await;

    let votes = vec![
        scripted_abstain(),
        scripted_speech("I refuse to point fingers"), // no directive at all
        scripted_abstain(),
    ];
    queue_round(&mock, &session, &votes);
    let outcome = session.play_round().await.unwrap();

    let intents: Vec<&VoteIntent> = outcome.ballots.iter().map(|b| &b.intent).collect();
    assert_eq!(intents[0], &VoteIntent::Abstain);
    assert_eq!(intents[1], &VoteIntent::Unparsed);
    assert_eq!(intents[2], &VoteIntent::Abstain);
    assert!(outcome.eliminated.is_none());
    assert!(matches!(outcome.status, RoundStatus::Continuing));
}

#[tokio::test]
async fn responder_failures_degrade_to_error_speech() {
    let config = SetupConfig::new(3).with_words("apple", "pear");
    let mut session = GameSession::setup(config, Box::new(FailingResponder))
        .await
        .unwrap();

    let outcome = session.play_round().await.unwrap();

    // Every "speech" is the error-tagged text; no vote parses; nobody goes.
    assert_eq!(outcome.speeches.len(), 3);
    for speech in &outcome.speeches {
        assert!(speech.public_text.starts_with("[ERROR]: "));
        assert!(speech.private_reasoning.is_none());
    }
    assert!(outcome
        .ballots
        .iter()
        .all(|b| b.intent == VoteIntent::Unparsed));
    assert!(outcome.eliminated.is_none());
    assert!(!session.is_over());
}

#[tokio::test]
async fn terminal_session_rejects_further_rounds() {
    let mock = MockResponder::new();
    let mut session = new_game(3, &mock).await;
    let spy = session.spy_name().to_string();

    queue_round(&mock, &session, &vec![scripted_vote(&spy); 3]);
    session.play_round().await.unwrap();
    assert!(session.is_over());

    let err = session.play_round().await.unwrap_err();
    assert!(matches!(err, SessionError::GameOver));
    // No partial mutation: the round counter did not advance.
    assert_eq!(session.round_index(), 1);
}

#[tokio::test]
async fn generated_words_fall_back_on_unparseable_reply() {
    let mock = MockResponder::new();
    mock.push("<think>hmm</think>\nI cannot decide on a pair today.");

    let session = GameSession::setup(SetupConfig::new(3), Box::new(mock.clone()))
        .await
        .unwrap();

    assert_eq!(session.words(), ("apple", "pear"));
    assert!(session.setup_warning().is_some());
}

#[tokio::test]
async fn generated_words_are_parsed_from_gm_reply() {
    let mock = MockResponder::new();
    mock.push("<think>similar but distinct</think>\nHere we go.\nnormal_word=sea, spy_word=lake");

    let session = GameSession::setup(SetupConfig::new(3), Box::new(mock.clone()))
        .await
        .unwrap();

    assert_eq!(session.words(), ("sea", "lake"));
    assert!(session.setup_warning().is_none());

    // The word-generation exchange is preserved in the GM's audit log,
    // behind the prepended moderator system prompt.
    let gm_log = session.conversation(session.gm_name()).unwrap();
    assert!(gm_log.len() >= 4);
}

#[tokio::test]
async fn chat_history_accumulates_public_statements_only() {
    let mock = MockResponder::new();
    let mut session = new_game(3, &mock).await;
    let players: Vec<String> = session.players().iter().map(|s| s.to_string()).collect();

    let votes = vec![
        scripted_abstain(),
        scripted_abstain(),
        scripted_abstain(),
    ];
    queue_round(&mock, &session, &votes);
    session.play_round().await.unwrap();

    // One public record per speaker; votes are not chat.
    let history = session.chat_history();
    assert_eq!(history.len(), 3);
    for (record, player) in history.iter().zip(&players) {
        assert_eq!(&record.speaker, player);
        assert!(!record.text.contains("<think>"));
    }

    // Per-agent conversations keep the full exchange, reasoning included.
    let convo = session.conversation(&players[0]).unwrap();
    // system + (speak user/assistant) + (vote user/assistant)
    assert_eq!(convo.len(), 5);
}

#[tokio::test]
async fn identical_words_produce_a_degenerate_but_legal_game() {
    let mock = MockResponder::new();
    let config = SetupConfig::new(3).with_words("apple", "apple");
    let session = GameSession::setup(config, Box::new(mock)).await.unwrap();

    assert_eq!(session.words(), ("apple", "apple"));
    assert!(!session.is_over());
}
