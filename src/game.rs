use log::{debug, info};
use thiserror::Error;

use crate::{
    chess::{Color, Square},
    clock::{Clock, Tick, TickSubscription},
    outcome::{GameResult, Rule},
    player::{Player, PlayerRequest},
    ply::{Ply, Unit},
    position::{Position, STANDARD_SETUP},
    signal::Signal,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Failed to load game: move {index} \"{notation}\" is invalid")]
    Load { index: usize, notation: String },

    #[error("The {expected} player was given a {found} player")]
    PlayerColor { expected: Color, found: Color },
}

/// A unit appearing in a piece notification.
///
/// For a move, `from` and `to` are the squares the unit left and reached. For a capture both are
/// the square the unit was removed from. For a promotion `unit` is the new unit and both squares
/// are the promotion square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PieceEvent {
    pub unit: Unit,
    pub from: Square,
    pub to: Square,
}

/// Notifications emitted by a [`Game`].
#[derive(Clone, Debug, Default)]
pub struct GameSignals {
    pub turn_started: Signal<Color>,
    pub moved: Signal<Ply>,
    pub paused: Signal<()>,
    pub unpaused: Signal<()>,
    pub undo: Signal<()>,
    pub ended: Signal<(GameResult, Rule)>,
    pub piece_moved: Signal<PieceEvent>,
    pub piece_died: Signal<PieceEvent>,
    pub piece_promoted: Signal<PieceEvent>,
}

/// A game between two players.
///
/// The game keeps every position reached since it was created, the last one being the current
/// position. Players submit requests through [`Game::request`]; requests are only accepted while
/// the game is started, and moves only from the side to move.
#[derive(Debug)]
pub struct Game {
    history: Vec<Position>,
    players: [Player; Color::COUNT],
    clock: Option<Clock>,
    started: bool,
    result: GameResult,
    rule: Option<Rule>,
    hold_count: u32,
    pending_evaluation: bool,
    paused: bool,
    show_paused_overlay: bool,

    pub signals: GameSignals,
}

impl Game {
    /// Creates a game that is not started yet.
    pub fn new(position: Position, white: Player, black: Player) -> Result<Self, GameError> {
        for (expected, player) in [(Color::White, white), (Color::Black, black)] {
            if player.color() != expected {
                return Err(GameError::PlayerColor { expected, found: player.color() });
            }
        }

        let mut game = Self::from_position(position);
        game.players = [white, black];
        Ok(game)
    }

    /// Creates a game from the standard setup between two local humans.
    pub fn standard() -> Self {
        Self::from_position(Position::from_fen(STANDARD_SETUP))
    }

    fn from_position(position: Position) -> Self {
        Self {
            history: vec![position],
            players: [Player::new(Color::White, true), Player::new(Color::Black, true)],
            clock: None,
            started: false,
            result: GameResult::InProgress,
            rule: None,
            hold_count: 0,
            pending_evaluation: false,
            paused: false,
            show_paused_overlay: false,
            signals: GameSignals::default(),
        }
    }

    /// Creates a game from a board-state encoding and the moves played since.
    ///
    /// The moves are applied in order; the first one that is not legal aborts the load. The game
    /// is not started, so no outcome is evaluated until [`Game::start`].
    pub fn load<'a>(fen: &str, moves: impl IntoIterator<Item = &'a str>) -> Result<Self, GameError> {
        let mut game = Self::from_position(Position::from_fen(fen));
        for (index, notation) in moves.into_iter().enumerate() {
            let color = game.side_to_move();
            if !game.do_move(color, notation, true) {
                debug!("Failed to load move {index} \"{notation}\"");
                return Err(GameError::Load { index, notation: notation.to_string() });
            }
        }
        Ok(game)
    }

    pub fn current_position(&self) -> &Position {
        // The history always holds the starting position.
        &self.history[self.history.len() - 1]
    }

    /// Every position of the game, the most recent first.
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.history.iter().rev()
    }

    /// The moves played, in order.
    pub fn moves(&self) -> impl Iterator<Item = &Ply> {
        self.history.iter().filter_map(Position::last_ply)
    }

    pub fn n_moves(&self) -> usize {
        self.history.len() - 1
    }

    pub fn side_to_move(&self) -> Color {
        self.current_position().side_to_move()
    }

    pub fn player(&self, color: Color) -> Player {
        self.players[usize::from(color)]
    }

    pub fn current_player(&self) -> Player {
        self.player(self.side_to_move())
    }

    pub fn opponent(&self) -> Player {
        self.player(!self.side_to_move())
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// The rule that ended the game, if it ended.
    pub fn rule(&self) -> Option<Rule> {
        self.rule
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn should_show_paused_overlay(&self) -> bool {
        self.show_paused_overlay
    }

    pub fn clock(&self) -> Option<&Clock> {
        self.clock.as_ref()
    }

    /// Attaches a clock. Ignored once the game is started.
    pub fn set_clock(&mut self, clock: Clock) {
        if self.started {
            debug!("Ignoring clock change on a started game");
            return;
        }
        self.clock = Some(clock);
    }

    pub fn remaining_seconds(&self, color: Color) -> Option<i64> {
        self.clock.as_ref().map(|clock| clock.remaining_seconds(color))
    }

    //==================================================================================================================
    // Repetition and move counters
    //==================================================================================================================

    /// Number of positions in the history, the current one included, that are repetitions of the
    /// current position.
    pub fn repetition_count(&self) -> usize {
        let current = self.current_position();
        self.history.iter().filter(|position| *position == current).count()
    }

    pub fn is_three_fold_repeat(&self) -> bool {
        matches!(self.repetition_count(), 3 | 4)
    }

    pub fn is_five_fold_repeat(&self) -> bool {
        self.repetition_count() >= 5
    }

    /// Fifty moves per side without a capture or a pawn move, but not yet seventy-five.
    pub fn is_fifty_move_rule_fulfilled(&self) -> bool {
        (100..150).contains(&self.current_position().halfmove_clock())
    }

    pub fn is_seventy_five_move_rule_fulfilled(&self) -> bool {
        self.current_position().halfmove_clock() >= 150
    }

    pub fn can_claim_draw(&self) -> bool {
        self.is_fifty_move_rule_fulfilled() || self.is_three_fold_repeat()
    }

    //==================================================================================================================
    // Lifecycle
    //==================================================================================================================

    /// Starts the game: binds the clock to the side to move and announces the first turn. A loaded
    /// game already in a final position ends right away. No effect if the game is started or over.
    pub fn start(&mut self) {
        if !self.result.is_in_progress() || self.started {
            return;
        }
        self.started = true;
        info!("Game started, {} to move", self.side_to_move());

        let side = self.side_to_move();
        if let Some(clock) = &mut self.clock {
            clock.bind_active_color(side);
            clock.start();
        }

        self.complete_move();
    }

    /// Ends the game with `result`. No effect unless the game is started.
    pub fn stop(&mut self, result: GameResult, rule: Rule) {
        if !self.started {
            return;
        }
        self.result = result;
        self.rule = Some(rule);
        self.started = false;
        self.paused = false;
        self.show_paused_overlay = false;
        if let Some(clock) = &mut self.clock {
            clock.stop();
        }
        info!("Game ended {result} by {rule}");
        self.signals.ended.emit(&(result, rule));
    }

    /// Defers outcome evaluation until the matching [`Game::remove_hold`].
    pub fn add_hold(&mut self) {
        self.hold_count += 1;
    }

    /// Releases a hold. Releasing the last one runs the evaluation deferred since the first, if a
    /// move was played meanwhile.
    pub fn remove_hold(&mut self) {
        if self.hold_count == 0 {
            debug!("Ignoring the release of a hold that was never taken");
            return;
        }
        self.hold_count -= 1;
        self.evaluate_pending();
    }

    pub fn hold_count(&self) -> u32 {
        self.hold_count
    }

    /// Pauses the clock. `show_overlay` is carried for the presentation layer.
    pub fn pause(&mut self, show_overlay: bool) {
        if !self.started || self.paused {
            return;
        }
        if let Some(clock) = &mut self.clock {
            clock.pause();
        }
        self.paused = true;
        self.show_paused_overlay = show_overlay;
        self.signals.paused.emit(&());
    }

    pub fn unpause(&mut self) {
        if !self.started || !self.paused {
            return;
        }
        if let Some(clock) = &mut self.clock {
            clock.unpause();
        }
        self.paused = false;
        self.show_paused_overlay = false;
        self.signals.unpaused.emit(&());
    }

    /// Delivers a clock tick. A side running out of time loses the game.
    pub fn tick(&mut self, subscription: TickSubscription) -> Tick {
        let Some(clock) = &mut self.clock else {
            return Tick::Stale;
        };

        let tick = clock.tick(subscription);
        if let Tick::Expired(color) = tick {
            self.stop(GameResult::win_for(!color), Rule::Timeout);
        }
        tick
    }

    //==================================================================================================================
    // Requests
    //==================================================================================================================

    /// Handles a request from `player`. Returns whether the request had an effect (or, for a
    /// move that is not applied, whether it is legal).
    pub fn request(&mut self, player: Player, request: PlayerRequest) -> bool {
        if self.player(player.color()) != player {
            debug!("Ignoring request from a player that is not part of this game");
            return false;
        }

        match request {
            PlayerRequest::Move { notation, apply } => {
                if !self.started {
                    debug!("Ignoring move {notation}, the game is not started");
                    return false;
                }
                self.do_move(player.color(), &notation, apply)
            }
            PlayerRequest::Undo => {
                let before = self.history.len();
                self.undo(player.color());
                self.history.len() != before
            }
            PlayerRequest::Resign => self.resign(player.color()),
            PlayerRequest::ClaimDraw => self.claim_draw(),
        }
    }

    fn do_move(&mut self, color: Color, notation: &str, apply: bool) -> bool {
        if color != self.side_to_move() {
            debug!("Ignoring move {notation}, {color} is not the side to move");
            return false;
        }

        let mut position = self.current_position().clone();
        if !position.play(notation, apply) {
            return false;
        }
        if !apply {
            return true;
        }

        let Some(ply) = position.last_ply().cloned() else {
            return false;
        };
        self.history.push(position);
        self.announce_move(&ply);
        self.complete_move();

        true
    }

    fn announce_move(&self, ply: &Ply) {
        if let Some(capture) = ply.capture() {
            self.signals.piece_died.emit(&PieceEvent { unit: capture.unit, from: capture.square, to: capture.square });
        }
        self.signals.piece_moved.emit(&PieceEvent { unit: ply.mover(), from: ply.from(), to: ply.to() });
        if let Some(rook) = ply.castling_rook() {
            self.signals.piece_moved.emit(&PieceEvent { unit: rook.unit, from: rook.from, to: rook.to });
        }
        if let Some(unit) = ply.promotion() {
            self.signals.piece_promoted.emit(&PieceEvent { unit, from: ply.to(), to: ply.to() });
        }
        self.signals.moved.emit(ply);
    }

    /// Evaluates the outcome of the current position, then hands the turn over.
    fn complete_move(&mut self) {
        self.pending_evaluation = true;
        self.evaluate_pending();
    }

    fn evaluate_pending(&mut self) {
        if !self.pending_evaluation || self.hold_count > 0 || !self.started {
            return;
        }
        self.pending_evaluation = false;

        if let Some((result, rule)) = self.current_position().result() {
            self.stop(result, rule);
            return;
        }

        if self.is_five_fold_repeat() {
            self.stop(GameResult::Draw, Rule::FiveFoldRepetition);
            return;
        }

        // Checkmate on the 150th reversible ply takes precedence, hence after the position result.
        if self.is_seventy_five_move_rule_fulfilled() {
            self.stop(GameResult::Draw, Rule::SeventyFiveMoves);
            return;
        }

        let side = self.side_to_move();
        if let Some(clock) = &mut self.clock {
            clock.set_active_color(side);
        }
        self.signals.turn_started.emit(&side);
    }

    /// Takes back the last move of `color`. When `color` is to move, the opponent's reply is taken
    /// back first so that `color` is to move again afterwards. The starting position is never
    /// removed. A finished game goes back in progress.
    pub fn undo(&mut self, color: Color) {
        if color == self.side_to_move() {
            self.undo(!color);
        }

        if self.history.len() == 1 {
            return;
        }
        self.history.pop();
        info!("Move undone, {} to move", self.side_to_move());

        if !self.result.is_in_progress() {
            self.result = GameResult::InProgress;
            self.rule = None;
            self.start();
        } else if self.started {
            let side = self.side_to_move();
            if let Some(clock) = &mut self.clock {
                clock.bind_active_color(side);
            }
        }

        self.signals.undo.emit(&());
    }

    /// `color` gives up. Returns false if the game is not started.
    pub fn resign(&mut self, color: Color) -> bool {
        if !self.started {
            return false;
        }
        self.stop(GameResult::win_for(!color), Rule::Resign);
        true
    }

    /// Ends the game in a draw if the fifty-move rule or a three-fold repetition allows it.
    pub fn claim_draw(&mut self) -> bool {
        if !self.started {
            return false;
        }

        if self.is_fifty_move_rule_fulfilled() {
            self.stop(GameResult::Draw, Rule::FiftyMoves);
        } else if self.is_three_fold_repeat() {
            self.stop(GameResult::Draw, Rule::ThreeFoldRepetition);
        } else {
            debug!("Ignoring draw claim, no draw condition holds");
            return false;
        }
        true
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::clock::ClockDiscipline;

    fn play(game: &mut Game, moves: &[&str]) {
        for mv in moves {
            let player = game.current_player();
            assert!(player.make_move(game, mv, true), "{mv} should be accepted");
        }
    }

    fn record<T: Clone + 'static>(signal: &Signal<T>) -> Rc<RefCell<Vec<T>>> {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        signal.connect(move |value: &T| sink.borrow_mut().push(value.clone()));
        received
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_load_moves() {
            let game = Game::load(STANDARD_SETUP, ["e4", "e5", "Nf3"]).expect("all moves are legal");
            assert_eq!(game.n_moves(), 3);
            assert_eq!(game.side_to_move(), Color::Black);
            assert!(!game.is_started());
            let sans: Vec<String> = game.moves().map(Ply::san).collect();
            assert_eq!(sans, vec!["e4", "e5", "Nf3"]);
        }

        #[test]
        fn test_load_error_names_the_move() {
            let error = Game::load(STANDARD_SETUP, ["e4", "e5", "Ke3"]).expect_err("Ke3 is illegal");
            assert_eq!(error, GameError::Load { index: 2, notation: "Ke3".to_string() });
            assert_eq!(error.to_string(), "Failed to load game: move 2 \"Ke3\" is invalid");
        }

        #[test]
        fn test_player_colors_checked() {
            let error = Game::new(Position::new(), Player::new(Color::Black, true), Player::new(Color::Black, true))
                .expect_err("white is missing");
            assert_eq!(error, GameError::PlayerColor { expected: Color::White, found: Color::Black });
        }

        #[test]
        fn test_positions_most_recent_first() {
            let game = Game::load(STANDARD_SETUP, ["e4"]).expect("e4 is legal");
            let fens: Vec<String> = game.positions().map(Position::to_fen).collect();
            assert_eq!(fens[0], "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
            assert_eq!(fens[1], STANDARD_SETUP);
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn test_moves_rejected_before_start() {
            let mut game = Game::standard();
            let white = game.player(Color::White);
            assert!(!white.make_move(&mut game, "e4", true));
            game.start();
            assert!(white.make_move(&mut game, "e4", true));
        }

        #[test]
        fn test_turn_started_notifications() {
            let mut game = Game::standard();
            let turns = record(&game.signals.turn_started);
            game.start();
            play(&mut game, &["e4", "e5"]);
            assert_eq!(*turns.borrow(), vec![Color::White, Color::Black, Color::White]);
        }

        #[test]
        fn test_piece_notifications_in_order() {
            let mut game = Game::load("4k3/8/8/8/8/8/4r3/4K2R w K - 0 1", std::iter::empty())
                .expect("no moves to load");
            let events = Rc::new(RefCell::new(Vec::new()));
            for (name, signal) in [
                ("died", &game.signals.piece_died),
                ("moved", &game.signals.piece_moved),
                ("promoted", &game.signals.piece_promoted),
            ] {
                let sink = Rc::clone(&events);
                signal.connect(move |event: &PieceEvent| sink.borrow_mut().push(format!("{name} {}", event.to)));
            }
            let sink = Rc::clone(&events);
            game.signals.moved.connect(move |ply: &Ply| sink.borrow_mut().push(format!("ply {}", ply.san())));
            game.start();

            play(&mut game, &["Kxe2"]);
            assert_eq!(*events.borrow(), vec!["died e2", "moved e2", "ply Kxe2"]);
        }

        #[test]
        fn test_checkmate_ends_game() {
            let mut game = Game::standard();
            let ended = record(&game.signals.ended);
            game.start();
            play(&mut game, &["f3", "e5", "g4", "Qh4#"]);
            assert_eq!(game.result(), GameResult::BlackWon);
            assert_eq!(game.rule(), Some(Rule::Checkmate));
            assert!(!game.is_started());
            assert_eq!(*ended.borrow(), vec![(GameResult::BlackWon, Rule::Checkmate)]);
        }

        #[test]
        fn test_loaded_final_position_ends_on_start() {
            let mut game = Game::load("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", std::iter::empty()).expect("no moves to load");
            game.start();
            assert_eq!(game.result(), GameResult::Draw);
            assert_eq!(game.rule(), Some(Rule::Stalemate));
        }

        #[test]
        fn test_stop_is_idempotent() {
            let mut game = Game::standard();
            game.stop(GameResult::Draw, Rule::FiftyMoves);
            assert_eq!(game.result(), GameResult::InProgress);

            game.start();
            let ended = record(&game.signals.ended);
            game.stop(GameResult::WhiteWon, Rule::Resign);
            game.stop(GameResult::Draw, Rule::FiftyMoves);
            assert_eq!(game.result(), GameResult::WhiteWon);
            assert_eq!(ended.borrow().len(), 1);
        }

        #[test]
        fn test_resign() {
            let mut game = Game::standard();
            let black = game.player(Color::Black);
            assert!(!black.resign(&mut game));
            game.start();
            assert!(black.resign(&mut game));
            assert_eq!(game.result(), GameResult::WhiteWon);
            assert_eq!(game.rule(), Some(Rule::Resign));
        }

        #[test]
        fn test_hold_defers_evaluation() {
            let mut game = Game::standard();
            game.start();
            play(&mut game, &["f3", "e5", "g4"]);
            game.add_hold();
            game.add_hold();
            play(&mut game, &["Qh4#"]);
            assert!(game.result().is_in_progress());
            game.remove_hold();
            assert!(game.result().is_in_progress());
            game.remove_hold();
            assert_eq!(game.result(), GameResult::BlackWon);

            game.remove_hold();
            assert_eq!(game.hold_count(), 0);
        }

        #[test]
        fn test_hold_without_move_evaluates_nothing() {
            let mut game = Game::standard();
            let turns = record(&game.signals.turn_started);
            game.start();
            game.add_hold();
            game.remove_hold();
            assert_eq!(*turns.borrow(), vec![Color::White]);

            game.add_hold();
            play(&mut game, &["e4"]);
            assert_eq!(turns.borrow().len(), 1);
            game.remove_hold();
            assert_eq!(*turns.borrow(), vec![Color::White, Color::Black]);
        }

        #[test]
        fn test_pause_and_unpause() {
            let mut game = Game::standard();
            let paused = record(&game.signals.paused);
            game.pause(true);
            assert!(!game.is_paused());

            game.start();
            game.pause(true);
            game.pause(false);
            assert!(game.is_paused());
            assert!(game.should_show_paused_overlay());
            assert_eq!(paused.borrow().len(), 1);

            game.unpause();
            assert!(!game.is_paused());
            assert!(!game.should_show_paused_overlay());
        }
    }

    mod undo_tests {
        use super::*;

        #[test]
        fn test_undo_by_side_not_to_move() {
            let mut game = Game::standard();
            game.start();
            play(&mut game, &["e4"]);
            let undos = record(&game.signals.undo);
            let white = game.player(Color::White);
            assert!(white.undo(&mut game));
            assert_eq!(game.current_position().to_fen(), STANDARD_SETUP);
            assert_eq!(undos.borrow().len(), 1);
        }

        #[test]
        fn test_undo_by_side_to_move_takes_back_both() {
            let mut game = Game::standard();
            game.start();
            play(&mut game, &["e4", "e5", "Nf3"]);
            let black = game.player(Color::Black);
            black.undo(&mut game);
            assert_eq!(game.n_moves(), 1);
            assert_eq!(game.side_to_move(), Color::Black);
        }

        #[test]
        fn test_undo_never_removes_start() {
            let mut game = Game::standard();
            game.start();
            let white = game.player(Color::White);
            assert!(!white.undo(&mut game));
            assert_eq!(game.n_moves(), 0);
        }

        #[test]
        fn test_undo_after_end_resumes() {
            let mut game = Game::standard();
            game.start();
            play(&mut game, &["f3", "e5", "g4", "Qh4#"]);
            let white = game.player(Color::White);
            white.undo(&mut game);
            assert!(game.result().is_in_progress());
            assert_eq!(game.rule(), None);
            assert!(game.is_started());
            assert_eq!(game.n_moves(), 2);
            assert_eq!(game.side_to_move(), Color::White);
        }
    }

    mod draw_tests {
        use super::*;

        const SHUFFLE: [&str; 4] = ["Nf3", "Nf6", "Ng1", "Ng8"];

        #[test]
        fn test_three_fold_is_claimable_not_automatic() {
            let mut game = Game::standard();
            game.start();
            let black = game.player(Color::Black);
            assert!(!black.claim_draw(&mut game));

            play(&mut game, &SHUFFLE);
            play(&mut game, &SHUFFLE);
            assert_eq!(game.repetition_count(), 3);
            assert!(game.is_three_fold_repeat());
            assert!(game.result().is_in_progress());

            assert!(black.claim_draw(&mut game));
            assert_eq!(game.rule(), Some(Rule::ThreeFoldRepetition));
        }

        #[test]
        fn test_five_fold_is_automatic() {
            let mut game = Game::standard();
            game.start();
            for _ in 0..3 {
                play(&mut game, &SHUFFLE);
            }
            assert!(game.result().is_in_progress());
            assert_eq!(game.repetition_count(), 4);
            assert!(game.can_claim_draw());
            play(&mut game, &SHUFFLE);
            assert_eq!(game.result(), GameResult::Draw);
            assert_eq!(game.rule(), Some(Rule::FiveFoldRepetition));
        }

        #[test]
        fn test_move_counter_thresholds() {
            let mut game = Game::load("4k3/8/8/8/8/8/8/R3K3 w - - 98 60", std::iter::empty()).expect("no moves");
            game.start();
            assert!(!game.claim_draw());
            play(&mut game, &["Ra2", "Kd8"]);
            assert!(game.is_fifty_move_rule_fulfilled());
            assert!(game.claim_draw());
            assert_eq!(game.rule(), Some(Rule::FiftyMoves));

            let mut game = Game::load("4k3/8/8/8/8/8/8/R3K3 w - - 149 90", std::iter::empty()).expect("no moves");
            game.start();
            assert!(game.is_fifty_move_rule_fulfilled());
            play(&mut game, &["Ra2"]);
            assert_eq!(game.rule(), Some(Rule::SeventyFiveMoves));
        }
    }

    mod clock_tests {
        use super::*;

        #[test]
        fn test_clock_follows_turns() {
            let mut game = Game::standard();
            game.set_clock(Clock::new(60, 60, ClockDiscipline::Fischer, 2));
            game.start();
            let subscription = game.clock().and_then(Clock::subscription).expect("the clock is ticking");
            game.tick(subscription);
            play(&mut game, &["e4"]);

            assert_eq!(game.clock().map(Clock::active_color), Some(Color::Black));
            assert_eq!(game.remaining_seconds(Color::White), Some(61));
            assert_eq!(game.tick(subscription), Tick::Stale);
        }

        #[test]
        fn test_timeout_loses() {
            let mut game = Game::standard();
            game.set_clock(Clock::new(2, 60, ClockDiscipline::Simple, 0));
            game.start();
            for _ in 0..2 {
                let subscription = game.clock().and_then(Clock::subscription).expect("the clock is ticking");
                game.tick(subscription);
            }
            assert_eq!(game.result(), GameResult::BlackWon);
            assert_eq!(game.rule(), Some(Rule::Timeout));
        }

        #[test]
        fn test_pause_stops_ticks() {
            let mut game = Game::standard();
            game.set_clock(Clock::new(60, 60, ClockDiscipline::Simple, 0));
            game.start();
            let subscription = game.clock().and_then(Clock::subscription).expect("the clock is ticking");
            game.pause(false);
            assert_eq!(game.tick(subscription), Tick::Stale);
            game.unpause();
            assert!(game.clock().and_then(Clock::subscription).is_some_and(|current| current != subscription));
            assert_eq!(game.remaining_seconds(Color::White), Some(60));
        }

        #[test]
        fn test_move_while_paused_keeps_clock_paused() {
            let mut game = Game::standard();
            game.set_clock(Clock::new(60, 60, ClockDiscipline::Simple, 0));
            game.start();
            game.pause(false);
            play(&mut game, &["e4"]);

            assert!(game.is_paused());
            assert!(game.clock().is_some_and(Clock::is_paused));
            assert_eq!(game.clock().and_then(Clock::subscription), None);

            game.unpause();
            let subscription = game.clock().and_then(Clock::subscription).expect("the clock is ticking");
            assert_eq!(game.tick(subscription), Tick::Counted(Color::Black));
        }

        #[test]
        fn test_start_with_black_to_move_credits_nobody() {
            let mut game = Game::load("4k3/8/8/8/8/8/8/4K3 b - - 0 1", std::iter::empty()).expect("no moves to load");
            game.set_clock(Clock::new(60, 60, ClockDiscipline::Fischer, 5));
            game.start();
            assert_eq!(game.clock().map(Clock::active_color), Some(Color::Black));
            assert_eq!(game.remaining_seconds(Color::White), Some(60));
            assert_eq!(game.remaining_seconds(Color::Black), Some(60));
        }

        #[test]
        fn test_undo_credits_nobody() {
            let mut game = Game::standard();
            game.set_clock(Clock::new(60, 60, ClockDiscipline::Fischer, 5));
            game.start();
            play(&mut game, &["e4", "e5"]);
            assert_eq!(game.remaining_seconds(Color::White), Some(65));
            assert_eq!(game.remaining_seconds(Color::Black), Some(65));

            let black = game.player(Color::Black);
            assert!(black.undo(&mut game));
            assert_eq!(game.clock().map(Clock::active_color), Some(Color::Black));
            assert_eq!(game.remaining_seconds(Color::White), Some(65));
            assert_eq!(game.remaining_seconds(Color::Black), Some(65));
        }

        #[test]
        fn test_clock_locked_after_start() {
            let mut game = Game::standard();
            game.start();
            game.set_clock(Clock::new(60, 60, ClockDiscipline::Simple, 0));
            assert!(game.clock().is_none());
        }
    }
}
