//! End-to-end integration tests
//!
//! Wires the full engine the way the serving layer does: store, channel,
//! orchestrator, market, and reputation ledger.

use matchpulse::channel::{MatchChannel, MessageKind, ViewerHandle};
use matchpulse::config::Config;
use matchpulse::event::{InMemoryEventStore, NewMatchEvent};
use matchpulse::live::MatchOrchestrator;
use matchpulse::market::{MarketError, NewPrediction, PredictionMarket};
use matchpulse::reward::{BadgeTier, ReputationLedger};
use std::collections::HashMap;
use std::sync::Arc;

struct Engine {
    channel: Arc<MatchChannel>,
    orchestrator: MatchOrchestrator,
    market: PredictionMarket,
    ledger: Arc<ReputationLedger>,
}

fn engine() -> Engine {
    let config = Config::default();
    let channel = Arc::new(MatchChannel::new());
    let ledger = Arc::new(ReputationLedger::new());
    let orchestrator = MatchOrchestrator::new(
        Arc::new(InMemoryEventStore::new()),
        channel.clone(),
        config.xg.clone(),
    );
    let market = PredictionMarket::with_default_expiry(
        channel.clone(),
        ledger.clone(),
        config.market.default_expiry_secs,
    );

    Engine {
        channel,
        orchestrator,
        market,
        ledger,
    }
}

fn new_event(match_id: &str, minute: u32, event_type: &str, team: &str) -> NewMatchEvent {
    NewMatchEvent {
        match_id: match_id.to_string(),
        event_type: event_type.to_string(),
        minute,
        player_ids: vec![],
        team: team.to_string(),
        x: None,
        y: None,
        meta: HashMap::new(),
        timestamp: None,
    }
}

#[tokio::test]
async fn test_live_match_flow() {
    let engine = engine();
    let (viewer, mut rx) = ViewerHandle::connect(32);
    engine.orchestrator.join("m1", viewer).await;

    engine
        .orchestrator
        .ingest_event(new_event("m1", 1, "shot", "home"))
        .await
        .unwrap();
    engine
        .orchestrator
        .ingest_event(new_event("m1", 2, "goal", "away"))
        .await
        .unwrap();
    engine
        .orchestrator
        .ingest_event(new_event("m1", 3, "goal", "home"))
        .await
        .unwrap();

    // Each ingestion pushes the raw event and the recomputed timeline
    let mut kinds = vec![];
    for _ in 0..6 {
        kinds.push(rx.recv().await.unwrap().kind);
    }
    assert_eq!(
        kinds,
        vec![
            MessageKind::MatchEvent,
            MessageKind::MatchXg,
            MessageKind::MatchEvent,
            MessageKind::MatchXg,
            MessageKind::MatchEvent,
            MessageKind::MatchXg,
        ]
    );

    let timeline = engine.orchestrator.xg_timeline("m1").await.unwrap();
    let last = timeline.last().unwrap();
    assert_eq!(last.xg_home, 1.00);
    assert_eq!(last.xg_away, 0.70);
    assert!(last.win_prob_home > 0.5);

    let history = engine.orchestrator.events("m1", None).await.unwrap();
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn test_prediction_market_flow() {
    let engine = engine();
    let (viewer, mut rx) = ViewerHandle::connect(32);
    engine.orchestrator.join("m1", viewer).await;

    let prediction = engine
        .market
        .create(NewPrediction {
            match_id: "m1".to_string(),
            question: "Goal next 5?".to_string(),
            choices: vec!["yes".to_string(), "no".to_string()],
            expires_in_secs: Some(300),
            creator_id: "creator".to_string(),
        })
        .await
        .unwrap();

    engine.market.submit(prediction.id, "userA", "yes").await.unwrap();
    engine.market.submit(prediction.id, "userB", "no").await.unwrap();

    let resolution = engine
        .market
        .resolve(prediction.id, "yes", "creator", false)
        .await
        .unwrap();
    assert_eq!(resolution.awarded.len(), 1);
    assert_eq!(resolution.awarded[0].user, "userA");
    assert_eq!(resolution.awarded[0].points, 10);

    let err = engine
        .market
        .resolve(prediction.id, "yes", "creator", false)
        .await
        .unwrap_err();
    assert_eq!(err, MarketError::AlreadyResolved);

    // Reward landed in the reputation ledger, badge tier follows
    assert_eq!(engine.ledger.reputation_of("userA").await, 10);
    assert_eq!(engine.ledger.badge_of("userA").await, Some(BadgeTier::Rising));
    assert_eq!(engine.ledger.reputation_of("userB").await, 0);

    // The room saw the full prediction lifecycle
    let mut kinds = vec![];
    for _ in 0..4 {
        kinds.push(rx.recv().await.unwrap().kind);
    }
    assert_eq!(
        kinds,
        vec![
            MessageKind::PredictionNew,
            MessageKind::PredictionUpdate,
            MessageKind::PredictionUpdate,
            MessageKind::PredictionResolved,
        ]
    );

    let snapshot = engine.market.snapshot(prediction.id).await.unwrap();
    assert_eq!(snapshot.counts.get("yes"), Some(&1));
    assert_eq!(snapshot.counts.get("no"), Some(&1));
    assert_eq!(snapshot.prediction.correct_choice.as_deref(), Some("yes"));
}

#[tokio::test]
async fn test_late_viewer_catches_up_through_queries() {
    let engine = engine();

    engine
        .orchestrator
        .ingest_event(new_event("m1", 10, "big_chance", "home"))
        .await
        .unwrap();

    // Joins after the publish: no retroactive delivery, pull instead
    let (viewer, mut rx) = ViewerHandle::connect(8);
    engine.orchestrator.join("m1", viewer).await;
    assert!(rx.try_recv().is_err());

    let timeline = engine.orchestrator.xg_timeline("m1").await.unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].xg_home, 0.5);

    // And receives live pushes from then on
    engine
        .orchestrator
        .ingest_event(new_event("m1", 11, "shot", "away"))
        .await
        .unwrap();
    assert_eq!(rx.recv().await.unwrap().kind, MessageKind::MatchEvent);
    assert_eq!(engine.channel.room_size("m1").await, 1);
}
