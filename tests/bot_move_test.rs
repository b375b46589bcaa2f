// Integration tests for the Bot's endpoint methods
//
// These go through the same path as the POST /move handler: a GameState in,
// a JSON move out, with history carried between ticks.

use cycles_bot::bot::Bot;
use cycles_bot::config::Config;
use cycles_bot::error::EngineError;
use cycles_bot::types::{BoardSnapshot, Direction, GameState, Position};

fn game_state(tick: u32, board: BoardSnapshot) -> GameState {
    GameState {
        game_id: "test-game".to_string(),
        tick,
        board,
    }
}

fn config() -> Config {
    Config::default_hardcoded()
}

/// Test: open board, first tick picks north (tie broken by enumeration order)
#[tokio::test]
async fn test_first_move_on_open_board() {
    let config = config();
    let name = config.agent.name.clone();
    let bot = Bot::new(config);

    let mut board = BoardSnapshot::empty(5, 5);
    board.add_player(1, &name, Position::new(2, 2));

    let response = bot.get_move(&game_state(0, board)).await.unwrap();
    assert_eq!(response["move"].as_str(), Some("north"));
    assert_eq!(bot.history(), vec![Direction::North]);
}

/// Test: history persists across ticks and stays bounded
#[tokio::test]
async fn test_history_carries_between_ticks() {
    let config = config();
    let name = config.agent.name.clone();
    let bot = Bot::new(config);

    let mut board = BoardSnapshot::empty(15, 15);
    board.add_player(1, &name, Position::new(7, 7));

    for tick in 0..6 {
        let response = bot.get_move(&game_state(tick, board.clone())).await.unwrap();
        let dir: Direction = response["move"].as_str().unwrap().parse().unwrap();

        let next = dir.apply(&board.players[0].position);
        board.occupy(next, 1);
        board.players[0].position = next;
    }

    assert_eq!(bot.history().len(), 4);
}

/// Test: a snapshot without our player is rejected, not guessed at
#[tokio::test]
async fn test_missing_self_is_an_error() {
    let bot = Bot::new(config());

    let mut board = BoardSnapshot::empty(5, 5);
    board.add_player(3, "somebody-else", Position::new(1, 1));

    let result = bot.get_move(&game_state(7, board)).await;
    assert!(matches!(result, Err(EngineError::MissingSelf { .. })));
    assert!(bot.history().is_empty());
}

/// Test: two players sharing our name are rejected and history stays empty
#[tokio::test]
async fn test_duplicate_self_name_is_an_error() {
    let config = config();
    let name = config.agent.name.clone();
    let bot = Bot::new(config);

    let mut board = BoardSnapshot::empty(5, 5);
    board.add_player(1, &name, Position::new(1, 1));
    board.add_player(2, &name, Position::new(3, 3));

    let result = bot.get_move(&game_state(2, board)).await;
    assert!(matches!(result, Err(EngineError::InvalidSnapshot { .. })));
    assert!(bot.history().is_empty());
}

/// Test: a malformed grid is rejected
#[tokio::test]
async fn test_invalid_grid_is_an_error() {
    let config = config();
    let name = config.agent.name.clone();
    let bot = Bot::new(config);

    let mut board = BoardSnapshot::empty(5, 5);
    board.add_player(1, &name, Position::new(1, 1));
    board.grid.truncate(10);

    let result = bot.get_move(&game_state(1, board)).await;
    assert!(matches!(result, Err(EngineError::InvalidSnapshot { .. })));
}

/// Test: trapped agent still answers with a direction
#[tokio::test]
async fn test_trapped_agent_still_answers() {
    let config = config();
    let name = config.agent.name.clone();
    let bot = Bot::new(config);

    let mut board = BoardSnapshot::empty(3, 3);
    board.add_player(1, &name, Position::new(1, 1));
    for pos in [
        Position::new(1, 0),
        Position::new(0, 1),
        Position::new(2, 1),
        Position::new(1, 2),
    ] {
        board.occupy(pos, 2);
    }

    let response = bot.get_move(&game_state(12, board)).await.unwrap();
    assert_eq!(response["move"].as_str(), Some("north"));
}

/// Test: request bodies deserialize from the wire format
#[tokio::test]
async fn test_game_state_from_json() {
    let config = config();
    let name = config.agent.name.clone();
    let bot = Bot::new(config);

    let body = serde_json::json!({
        "game_id": "g-1",
        "tick": 4,
        "board": {
            "width": 3,
            "height": 2,
            "grid": [0, 0, 0, 0, 1, 0],
            "players": [{ "id": 1, "name": &name, "position": { "x": 1, "y": 1 } }]
        }
    });
    let state: GameState = serde_json::from_value(body).unwrap();

    // 3x2 board leaves at most 5 reachable cells, below the trap threshold,
    // so the first legal direction (north) is taken as a fallback
    let response = bot.get_move(&state).await.unwrap();
    assert_eq!(response["move"].as_str(), Some("north"));

    let info = bot.info();
    assert_eq!(info["name"].as_str(), Some(name.as_str()));
}
