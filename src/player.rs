use std::{
    collections::VecDeque,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    chess::{Color, PieceType, Square},
    game::Game,
    position::Position,
};

/// Something a player asks the game to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerRequest {
    /// Play (or only validate, when `apply` is false) a move string.
    Move { notation: String, apply: bool },
    Undo,
    Resign,
    ClaimDraw,
}

impl PlayerRequest {
    /// A move request that is applied when legal.
    pub fn play(notation: &str) -> Self {
        PlayerRequest::Move { notation: notation.to_string(), apply: true }
    }
}

static NEXT_PLAYER_ID: AtomicU64 = AtomicU64::new(0);

/// One of the two sides of a game.
///
/// A player does not decide anything by itself: it turns decisions into [`PlayerRequest`]s and
/// hands them to the game, which accepts or ignores them. Each player created by [`Player::new`]
/// is distinct from every other, whatever its color; copies share the identity of the original.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: u64,
    color: Color,
    local_human: bool,
}

impl Player {
    pub fn new(color: Color, local_human: bool) -> Self {
        Self { id: NEXT_PLAYER_ID.fetch_add(1, Ordering::Relaxed), color, local_human }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether moves are entered by a person at this machine rather than by an engine or a remote
    /// opponent.
    pub fn is_local_human(&self) -> bool {
        self.local_human
    }

    pub fn set_local_human(&mut self, local_human: bool) {
        self.local_human = local_human;
    }

    /// Asks `game` to play `notation`. Returns whether the move was accepted.
    pub fn make_move(&self, game: &mut Game, notation: &str, apply: bool) -> bool {
        game.request(*self, PlayerRequest::Move { notation: notation.to_string(), apply })
    }

    /// Asks `game` to play a move given by its squares. A pawn reaching the last rank promotes to
    /// `promotion`, or to a queen when none is given.
    pub fn move_with_coords(
        &self,
        game: &mut Game,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
        apply: bool,
    ) -> bool {
        let mut notation = format!("{from}{to}");
        if let Some(promotion) = promotion.filter(|promotion| *promotion != PieceType::Queen) {
            notation.push('=');
            notation.push(char::from(promotion));
        }
        self.make_move(game, &notation, apply)
    }

    pub fn undo(&self, game: &mut Game) -> bool {
        game.request(*self, PlayerRequest::Undo)
    }

    pub fn resign(&self, game: &mut Game) -> bool {
        game.request(*self, PlayerRequest::Resign)
    }

    pub fn claim_draw(&self, game: &mut Game) -> bool {
        game.request(*self, PlayerRequest::ClaimDraw)
    }

    /// Asks `source` for this player's next decision and forwards it to `game`. Returns false when
    /// the source has nothing to say or the game refused the request.
    pub fn take_turn(&self, game: &mut Game, source: &mut dyn MoveSource) -> bool {
        match source.next_request(game.current_position()) {
            Some(request) => game.request(*self, request),
            None => false,
        }
    }
}

/// A decision maker behind a player: a person, an engine, a network peer or a script.
pub trait MoveSource {
    /// The next request for the side to move in `position`, if there is one yet.
    fn next_request(&mut self, position: &Position) -> Option<PlayerRequest>;
}

/// A source replaying a fixed list of requests in order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    requests: VecDeque<PlayerRequest>,
}

impl ScriptedSource {
    pub fn new(requests: impl IntoIterator<Item = PlayerRequest>) -> Self {
        Self { requests: requests.into_iter().collect() }
    }

    /// A source playing each move string in turn.
    pub fn from_moves<'a>(moves: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(moves.into_iter().map(PlayerRequest::play))
    }

    pub fn remaining(&self) -> usize {
        self.requests.len()
    }
}

impl MoveSource for ScriptedSource {
    fn next_request(&mut self, _position: &Position) -> Option<PlayerRequest> {
        self.requests.pop_front()
    }
}
