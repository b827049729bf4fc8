//! Round and session bookkeeping.
//!
//! Both transitions are read-modify-write over a clone of the whole
//! document. The input document is never touched.

use derive_getters::Getters;
use serde::Serialize;
use tracing::{info, instrument};

use super::document::{CompletedGame, GameDocument};
use super::types::{Player, Roster};
use super::view::GameView;

/// Wins for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PlayerStats {
    /// The player.
    player: Player,
    /// Games won by the player.
    wins: usize,
}

/// Win and tie counts over a set of completed games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct RoundStats {
    /// Per-player wins, aligned to roster order.
    players: Vec<PlayerStats>,
    /// Games with no winner.
    ties: usize,
}

impl RoundStats {
    /// Tallies `games` for every player in `roster`.
    ///
    /// A game won by a player id absent from the roster, which only a
    /// hand-edited document can hold, counts as neither a win nor a tie.
    fn tally<'a>(games: impl Iterator<Item = &'a CompletedGame> + Clone, roster: &Roster) -> Self {
        let players = roster
            .players()
            .iter()
            .map(|player| PlayerStats {
                player: player.clone(),
                wins: games
                    .clone()
                    .filter(|game| game.status().winner().is_some_and(|w| w.is(player)))
                    .count(),
            })
            .collect();

        let ties = games
            .filter(|game| game.status().winner().is_none())
            .count();

        Self { players, ties }
    }

    /// Wins of the player at roster index `index`.
    pub fn wins_of(&self, index: usize) -> usize {
        self.players.get(index).map_or(0, |s| s.wins)
    }

    /// Total games counted (wins plus ties).
    ///
    /// Equals the number of tallied games unless some were won by a player
    /// id outside the roster; those are left out.
    pub fn total(&self) -> usize {
        self.players.iter().map(|s| s.wins).sum::<usize>() + self.ties
    }
}

/// Records completed games and rolls rounds into the session history.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryTracker;

impl HistoryTracker {
    /// Ends the active game.
    ///
    /// A complete game is appended to the current round; the move log is
    /// emptied either way. An unfinished game is dropped without a record.
    #[instrument(
        skip(doc, view),
        fields(moves = view.moves().len(), complete = view.status().is_complete())
    )]
    pub fn reset(doc: &GameDocument, view: &GameView) -> GameDocument {
        let mut next = doc.clone();

        if view.status().is_complete() {
            next.history.current_round_games.push(CompletedGame::new(
                view.moves().clone(),
                view.status().clone(),
            ));
            info!(
                winner = ?view.status().winner().map(|p| p.name()),
                round_games = next.history.current_round_games.len(),
                "Recorded completed game"
            );
        } else if !view.moves().is_empty() {
            info!(moves = view.moves().len(), "Discarded unfinished game");
        }

        next.current_game_moves.clear();
        next
    }

    /// Resets the active game, then moves every game of the current round
    /// into the session history.
    #[instrument(skip(doc, view))]
    pub fn new_round(doc: &GameDocument, view: &GameView) -> GameDocument {
        let mut next = Self::reset(doc, view);

        let finished = std::mem::take(&mut next.history.current_round_games);
        info!(
            archived = finished.len(),
            session_games = next.history.all_games.len() + finished.len(),
            "Started new round"
        );
        next.history.all_games.extend(finished);
        next
    }

    /// Wins per player and ties for the current round only.
    #[instrument(skip(doc, roster))]
    pub fn stats(doc: &GameDocument, roster: &Roster) -> RoundStats {
        RoundStats::tally(doc.history().current_round_games().iter(), roster)
    }

    /// Wins per player and ties over every recorded game: finished rounds
    /// followed by the current one.
    #[instrument(skip(doc, roster))]
    pub fn session_stats(doc: &GameDocument, roster: &Roster) -> RoundStats {
        let history = doc.history();
        RoundStats::tally(
            history
                .all_games()
                .iter()
                .chain(history.current_round_games().iter()),
            roster,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::{GameStatus, History, Move, Position};
    use super::*;

    fn play(roster: &Roster, doc: GameDocument, squares: &[u8]) -> GameDocument {
        squares.iter().fold(doc, |doc, &id| {
            let player = GameView::derive(&doc, roster).current_player().clone();
            doc.with_move(Move::new(Position::from_square_id(id).unwrap(), player))
        })
    }

    fn reset(roster: &Roster, doc: &GameDocument) -> GameDocument {
        HistoryTracker::reset(doc, &GameView::derive(doc, roster))
    }

    #[test]
    fn test_reset_complete_game_records_it() {
        let roster = Roster::default();
        let doc = play(&roster, GameDocument::default(), &[1, 4, 2, 5, 3]);
        let view = GameView::derive(&doc, &roster);

        let next = HistoryTracker::reset(&doc, &view);
        assert!(next.current_game_moves().is_empty());
        let recorded = next.history().current_round_games();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].moves(), view.moves());
        assert_eq!(recorded[0].status(), view.status());
        assert_eq!(doc.current_game_moves().len(), 5);
    }

    #[test]
    fn test_reset_unfinished_game_discards_it() {
        let roster = Roster::default();
        let doc = play(&roster, GameDocument::default(), &[1, 4]);
        let next = reset(&roster, &doc);
        assert!(next.current_game_moves().is_empty());
        assert!(next.history().current_round_games().is_empty());
    }

    #[test]
    fn test_new_round_archives_round() {
        let roster = Roster::default();
        let doc = play(&roster, GameDocument::default(), &[1, 4, 2, 5, 3]);
        let doc = reset(&roster, &doc);
        let doc = play(&roster, doc, &[4, 1, 5, 2, 9, 3]);

        let next = HistoryTracker::new_round(&doc, &GameView::derive(&doc, &roster));
        assert!(next.current_game_moves().is_empty());
        assert!(next.history().current_round_games().is_empty());
        let archived = next.history().all_games();
        assert_eq!(archived.len(), 2);
        assert_eq!(archived[0].status().winner(), Some(&roster.players()[0]));
        assert_eq!(archived[1].status().winner(), Some(&roster.players()[1]));
    }

    #[test]
    fn test_new_round_on_empty_round() {
        let roster = Roster::default();
        let doc = GameDocument::default();
        let next = HistoryTracker::new_round(&doc, &GameView::derive(&doc, &roster));
        assert_eq!(next, doc);
    }

    #[test]
    fn test_stats_current_round_only() {
        let roster = Roster::default();
        let doc = play(&roster, GameDocument::default(), &[1, 4, 2, 5, 3]);
        let doc = reset(&roster, &doc);
        let doc = HistoryTracker::new_round(&doc, &GameView::derive(&doc, &roster));
        let doc = play(&roster, doc, &[1, 2, 3, 4, 5, 7, 6, 9, 8]);
        let doc = reset(&roster, &doc);

        let round = HistoryTracker::stats(&doc, &roster);
        assert_eq!(round.wins_of(0), 0);
        assert_eq!(round.wins_of(1), 0);
        assert_eq!(*round.ties(), 1);
        assert_eq!(round.total(), 1);

        let session = HistoryTracker::session_stats(&doc, &roster);
        assert_eq!(session.wins_of(0), 1);
        assert_eq!(*session.ties(), 1);
        assert_eq!(session.total(), 2);
    }

    #[test]
    fn test_stats_skip_winner_outside_roster() {
        let roster = Roster::default();
        let stranger = Player::new(7, "Former", "fa-x", "red");
        let games = vec![
            CompletedGame::new(vec![], GameStatus::new(true, Some(stranger))),
            CompletedGame::new(vec![], GameStatus::new(true, None)),
        ];
        let doc = GameDocument::new(vec![], History::new(games, vec![]));

        let stats = HistoryTracker::stats(&doc, &roster);
        assert_eq!(stats.wins_of(0), 0);
        assert_eq!(stats.wins_of(1), 0);
        assert_eq!(*stats.ties(), 1);
        assert_eq!(stats.total(), 1);
    }
}
