//! Tests for round and session history bookkeeping.

use live_t3::{
    CompletedGame, GameDocument, GameStatus, GameView, History, HistoryTracker, Move, Position,
    Roster,
};

fn play(roster: &Roster, doc: GameDocument, ids: &[u8]) -> GameDocument {
    ids.iter().fold(doc, |doc, &id| {
        let player = GameView::derive(&doc, roster).current_player().clone();
        let pos = Position::from_square_id(id).expect("valid square id");
        doc.with_move(Move::new(pos, player))
    })
}

fn reset(roster: &Roster, doc: &GameDocument) -> GameDocument {
    HistoryTracker::reset(doc, &GameView::derive(doc, roster))
}

fn new_round(roster: &Roster, doc: &GameDocument) -> GameDocument {
    HistoryTracker::new_round(doc, &GameView::derive(doc, roster))
}

/// Games used to build histories: a win for each player, a tie, and an
/// unfinished game.
const P1_WIN: &[u8] = &[1, 4, 2, 5, 3];
const P2_WIN: &[u8] = &[4, 1, 5, 2, 9, 3];
const TIE: &[u8] = &[1, 2, 3, 4, 5, 7, 6, 9, 8];
const UNFINISHED: &[u8] = &[5, 1];

#[test]
fn test_reset_records_tie() {
    let roster = Roster::default();
    let doc = play(&roster, GameDocument::default(), TIE);
    let before = GameView::derive(&doc, &roster);
    let next = reset(&roster, &doc);

    assert!(next.current_game_moves().is_empty());
    let round = next.history().current_round_games();
    assert_eq!(round.len(), 1);
    assert_eq!(round[0].moves(), before.moves());
    assert_eq!(round[0].status().winner(), None);
    assert!(round[0].status().is_complete());
}

#[test]
fn test_reset_on_unfinished_game_records_nothing() {
    let roster = Roster::default();
    let doc = play(&roster, GameDocument::default(), P1_WIN);
    let doc = reset(&roster, &doc);
    let doc = play(&roster, doc, UNFINISHED);

    let next = reset(&roster, &doc);
    assert!(next.current_game_moves().is_empty());
    assert_eq!(next.history(), doc.history());
}

#[test]
fn test_new_round_equals_reset_then_archive() {
    let roster = Roster::default();
    let mut doc = GameDocument::default();
    for game in [P1_WIN, TIE, P2_WIN] {
        doc = play(&roster, doc, game);
        doc = reset(&roster, &doc);
    }
    doc = play(&roster, doc, P1_WIN);

    let via_reset = reset(&roster, &doc);
    let mut expected_archive = via_reset.history().all_games().clone();
    expected_archive.extend(via_reset.history().current_round_games().iter().cloned());

    let next = new_round(&roster, &doc);
    assert!(next.current_game_moves().is_empty());
    assert!(next.history().current_round_games().is_empty());
    assert_eq!(next.history().all_games(), &expected_archive);
    assert_eq!(next.history().all_games().len(), 4);
}

#[test]
fn test_new_round_with_empty_round_keeps_archive() {
    let roster = Roster::default();
    let doc = play(&roster, GameDocument::default(), P2_WIN);
    let doc = new_round(&roster, &doc);
    let archived = doc.history().all_games().clone();

    let doc = play(&roster, doc, UNFINISHED);
    let next = new_round(&roster, &doc);
    assert_eq!(next.history().all_games(), &archived);
    assert!(next.current_game_moves().is_empty());
}

#[test]
fn test_archive_accumulates_across_rounds_in_order() {
    let roster = Roster::default();
    let mut doc = GameDocument::default();
    for game in [P1_WIN, P2_WIN, TIE] {
        doc = play(&roster, doc, game);
        doc = new_round(&roster, &doc);
    }

    let winners: Vec<Option<u32>> = doc
        .history()
        .all_games()
        .iter()
        .map(|g| g.status().winner().map(|p| *p.id()))
        .collect();
    assert_eq!(winners, vec![Some(1), Some(2), None]);
}

#[test]
fn test_stats_counts_current_round() {
    let roster = Roster::default();
    let mut doc = GameDocument::default();
    for game in [P1_WIN, P1_WIN, P2_WIN, TIE, TIE] {
        doc = play(&roster, doc, game);
        doc = reset(&roster, &doc);
    }

    let stats = HistoryTracker::stats(&doc, &roster);
    assert_eq!(stats.wins_of(0), 2);
    assert_eq!(stats.wins_of(1), 1);
    assert_eq!(*stats.ties(), 2);
    assert_eq!(stats.players()[0].player(), &roster.players()[0]);

    let doc = new_round(&roster, &doc);
    let stats = HistoryTracker::stats(&doc, &roster);
    assert_eq!(stats.total(), 0);
    assert_eq!(HistoryTracker::session_stats(&doc, &roster).total(), 5);
}

#[test]
fn test_stats_total_matches_round_length() {
    let roster = Roster::default();
    let games = [P1_WIN, TIE, P2_WIN, UNFINISHED, TIE, P2_WIN];

    let mut doc = GameDocument::default();
    for (i, game) in games.iter().enumerate() {
        doc = play(&roster, doc, game);
        doc = if i % 3 == 2 {
            new_round(&roster, &doc)
        } else {
            reset(&roster, &doc)
        };

        let stats = HistoryTracker::stats(&doc, &roster);
        assert_eq!(stats.total(), doc.history().current_round_games().len());
    }
}

#[test]
fn test_stats_uses_player_id_not_name() {
    let roster = Roster::default();
    let renamed = live_t3::Player::new(1, "Renamed", "fa-x", "turquoise");
    let game = CompletedGame::new(vec![], GameStatus::new(true, Some(renamed)));
    let doc = GameDocument::new(vec![], History::new(vec![game], vec![]));

    assert_eq!(HistoryTracker::stats(&doc, &roster).wins_of(0), 1);
}
