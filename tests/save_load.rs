use std::fs;

use othello::error::GameError;
use othello::game::{Game, GameStatus};
use othello::session::{Session, SessionConfig};
use othello::types::{Color, Winner};
use tempfile::{NamedTempFile, TempDir};

fn execute(session: &mut Session, line: &str) -> String {
    let mut out = Vec::new();
    session.execute(line, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn saved_game_loads_into_a_fresh_session() {
    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let mut first = Session::new(SessionConfig::default());
    execute(&mut first, "place C4");
    execute(&mut first, "place C3");
    let out = execute(&mut first, &format!("save {path}"));
    assert_eq!(out, format!("Game saved to {path}\n"));

    let mut second = Session::new(SessionConfig::default());
    let out = execute(&mut second, &format!("load {path}"));

    assert!(out.starts_with(&format!("Game loaded from {path}\n")));
    assert_eq!(second.game().board(), first.game().board());
    assert_eq!(second.game().current_player(), Color::Black);
    assert_eq!(second.game().history().len(), 1);
}

#[test]
fn save_file_uses_the_text_format() {
    let file = NamedTempFile::new().unwrap();
    let mut game = Game::new();
    game.place("C4").unwrap();

    game.save(file.path()).unwrap();

    let text = fs::read_to_string(file.path()).unwrap();
    let expected = "\
........
........
........
..BBB...
...BW...
........
........
........
Turn: W
Score: 4 1
GameEnded: 0
";
    assert_eq!(text, expected);
}

#[test]
fn ended_game_keeps_its_winner_through_a_file() {
    let file = NamedTempFile::new().unwrap();
    let text = "\
BBB.....
........
........
........
........
........
........
........
Turn: W
Score: 3 0
GameEnded: 1
Winner: Black
";
    fs::write(file.path(), text).unwrap();

    let mut game = Game::new();
    game.load(file.path()).unwrap();

    assert_eq!(game.status(), GameStatus::Ended(Winner::Black));
    assert!(matches!(game.place("D4"), Err(GameError::GameOver)));

    let copy = NamedTempFile::new().unwrap();
    game.save(copy.path()).unwrap();
    assert_eq!(fs::read_to_string(copy.path()).unwrap(), text);
}

#[test]
fn unreadable_file_is_reported_and_state_kept() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.oth");

    let mut session = Session::new(SessionConfig::default());
    execute(&mut session, "place C4");
    let out = execute(&mut session, &format!("load {}", missing.display()));

    assert!(out.starts_with("Cannot open file"));
    assert_eq!(session.game().current_player(), Color::White);
    assert_eq!(session.game().history().len(), 2);

    let unwritable = dir.path().join("no_such_dir").join("game.oth");
    let out = execute(&mut session, &format!("save {}", unwritable.display()));
    assert!(out.starts_with("Cannot open file"));
}

#[test]
fn autosave_follows_every_change() {
    let dir = TempDir::new().unwrap();
    let autosave = dir.path().join("autosave.oth");
    let mut session = Session::new(SessionConfig {
        autosave: Some(autosave.clone()),
    });

    execute(&mut session, "place C4");
    let after_move = fs::read_to_string(&autosave).unwrap();
    assert!(after_move.contains("Turn: W\nScore: 4 1\n"));

    execute(&mut session, "undo");
    let after_undo = fs::read_to_string(&autosave).unwrap();
    assert!(after_undo.contains("Turn: B\nScore: 2 2\n"));

    // rejected moves leave the last autosave alone
    fs::remove_file(&autosave).unwrap();
    execute(&mut session, "place A1");
    assert!(!autosave.exists());
}

#[test]
fn full_game_of_first_legal_moves_ends_consistently() {
    let mut game = Game::new();

    while !game.is_ended() {
        let mv = game.board().valid_moves(game.current_player())[0];
        game.play(mv).unwrap();
    }

    let (black, white) = game.board().score();
    assert_eq!(game.player(Color::Black).score(), black);
    assert_eq!(game.player(Color::White).score(), white);
    assert_eq!(game.winner(), Some(Winner::from_scores(black, white)));
    assert!(!game.board().has_valid_moves(Color::Black));
    assert!(!game.board().has_valid_moves(Color::White));

    // walk the whole history back and forward again
    let moves = game.history().len() - 1;
    for _ in 0..moves {
        game.undo().unwrap();
    }
    assert_eq!(game.board().score(), (2, 2));
    for _ in 0..moves {
        game.redo().unwrap();
    }
    assert_eq!(game.board().score(), (black, white));
    assert!(game.is_ended());
}

#[test]
fn stray_non_utf8_byte_still_loads_the_rest() {
    let file = NamedTempFile::new().unwrap();
    let mut game = Game::new();
    game.place("C4").unwrap();
    let mut bytes = game.to_saved().to_string().into_bytes();
    bytes.extend_from_slice(&[0xff, b'\n']);
    fs::write(file.path(), bytes).unwrap();

    let mut loaded = Game::new();
    loaded.load(file.path()).unwrap();

    assert_eq!(loaded.current_player(), Color::White);
    assert_eq!(loaded.board(), game.board());
    assert_eq!(loaded.status(), GameStatus::InProgress);
}
