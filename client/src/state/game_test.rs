use super::*;
use wheel::board::BoardConfig;
use wheel::config::EngineConfig;

fn room(raw: &str) -> RoomInfo {
    serde_json::from_str(raw).unwrap()
}

fn parse(raw: &str) -> Option<u64> {
    raw.parse().ok()
}

#[test]
fn timer_label_shows_loading_without_clock() {
    let state = GameState::default();
    assert_eq!(state.timer_label(), "Loading...");
    assert!(!state.time_expired());
}

#[test]
fn timer_label_counts_down_from_start() {
    let mut clock = GameClock::from_minutes(30);
    clock.start(1_000);
    let state = GameState { clock: Some(clock), now_ms: 1_000 + 61_500, ..GameState::default() };
    assert_eq!(state.timer_label(), "28:58");
}

#[test]
fn time_expired_after_duration() {
    let mut clock = GameClock::from_minutes(1);
    clock.start(0);
    let state = GameState { clock: Some(clock), now_ms: 60_000, ..GameState::default() };
    assert_eq!(state.timer_label(), "0:00");
    assert!(state.time_expired());
}

#[test]
fn clock_from_room_not_started_keeps_full_duration() {
    let clock = clock_from_room(&room(r#"{"room_code": "R", "time_remaining": 45}"#), parse);
    assert_eq!(clock.started_at_ms, None);
    assert_eq!(clock.remaining_ms(999_999), 45 * 60_000);
}

#[test]
fn clock_from_room_applies_pause_accounting() {
    let raw = r#"{
        "room_code": "R",
        "time_remaining": 10,
        "game_started": true,
        "game_started_at": "1000",
        "game_paused": true,
        "paused_at": "121000",
        "accumulated_pause_time": 20
    }"#;
    let clock = clock_from_room(&room(raw), parse);
    assert_eq!(clock.started_at_ms, Some(1_000));
    assert_eq!(clock.accumulated_pause_ms, 20_000);
    assert!(clock.is_paused());
    // 120s since start minus 20s paused: 100s elapsed, frozen while paused.
    assert_eq!(clock.remaining_ms(500_000), 600_000 - 100_000);
}

#[test]
fn clock_from_room_ignores_pause_fields_when_running() {
    let raw = r#"{"room_code": "R", "game_started": true, "game_started_at": "0", "paused_at": "5"}"#;
    let clock = clock_from_room(&room(raw), parse);
    assert!(!clock.is_paused());
}

#[test]
fn clock_from_room_without_start_instant_stays_unpaused() {
    let raw = r#"{"room_code": "R", "game_started": true, "game_started_at": "garbage", "game_paused": true, "paused_at": "5"}"#;
    let clock = clock_from_room(&room(raw), parse);
    assert_eq!(clock.started_at_ms, None);
    assert!(!clock.is_paused());
}

#[test]
fn sync_from_engine_copies_balance_and_zoom() {
    let mut engine = EngineCore::new(EngineConfig::default(), false);
    engine.load_snapshot(BoardConfig::default(), 17);
    engine.zoom_in();
    let mut state = GameState::default();
    state.sync_from_engine(&engine);
    assert_eq!(state.balance, 17);
    assert_eq!(state.zoom_percent(), "120%");
    assert!(state.can_zoom_out);
}

#[test]
fn circumstance_for_matches_room_assignment() {
    let board: BoardConfig = serde_json::from_str(
        r#"{"name": "b", "circumstances": [{"id": "c1", "title": "Flood", "description": "Water rising"}], "ringData": []}"#,
    )
    .unwrap();
    let info = room(r#"{"room_code": "R", "teams": [{"team_name": "Team Alpha", "circumstance": "Flood"}]}"#);
    let found = circumstance_for(&board.circumstances, &info, "Team Alpha").unwrap();
    assert_eq!(found.description, "Water rising");
    assert!(circumstance_for(&board.circumstances, &info, "Team Beta").is_none());
}

#[test]
fn circumstance_resolves_after_engine_sync() {
    let board: BoardConfig = serde_json::from_str(
        r#"{"circumstances": [{"id": "c1", "title": "Flood", "description": "Water rising"}], "ringData": []}"#,
    )
    .unwrap();
    let mut engine = EngineCore::new(EngineConfig::default(), true);
    engine.load_snapshot(board, 5);
    let mut state = GameState::for_team(wheel::sync::TeamRef::new("R", "Team Alpha"), true);
    assert!(state.circumstance().is_none());
    state.room = Some(room(r#"{"room_code": "R", "teams": [{"team_name": "Team Alpha", "circumstance": "c1"}]}"#));
    state.sync_from_engine(&engine);
    assert_eq!(state.circumstance().map(|c| c.title.as_str()), Some("Flood"));
}

#[test]
fn request_view_bumps_sequence_each_time() {
    let mut state = GameState::default();
    state.request_view(ViewRequest::ZoomIn);
    state.request_view(ViewRequest::ZoomIn);
    assert_eq!(state.view_request, Some(ViewRequest::ZoomIn));
    assert_eq!(state.view_request_seq, 2);
}
