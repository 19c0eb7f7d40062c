use std::{fmt::Display, ops::Index};

use log::debug;

use crate::{
    chess::{
        patterns::{crossed_squares, move_pattern},
        Bitboard, CastlingRight, CastlingSide, Color, File, Piece, PieceId, PieceType, Rank, Square,
    },
    notation::parse_move,
    outcome::{GameResult, Rule},
    ply::{Capture, CheckState, Ply, RookMove, Unit},
};

/// Board-state encoding of the standard starting position.
pub const STANDARD_SETUP: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const PROMOTION_TYPES: [PieceType; 4] = [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

//======================================================================================================================
// Move candidate (result of the geometric validation of a move)
//======================================================================================================================

/// A move that passed every check that does not need to play it on the board.
struct Candidate {
    piece: Piece,
    crossed: Bitboard,
    victim: Option<(Piece, Square)>,
    en_passant: bool,
    promotes: bool,
    castling: Option<(Square, Square)>,
}

/// The fields a speculative move can modify, captured before the move is played.
struct Snapshot {
    cells: [(Square, Option<Piece>, Option<PieceId>); 5],
    bb_color: [Bitboard; Color::COUNT],
    castling_rights: CastlingRight,
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    next_piece_id: u16,
}

//======================================================================================================================
// Position implementation
//======================================================================================================================

/// A chess position.
///
/// A position owns the board, the side to move and the rights and counters the rules depend on.
/// It validates and plays moves, detects check, checkmate, stalemate and insufficient material,
/// and reads and writes the 6-field board-state encoding.
///
/// Positions compare equal when they belong to the same repetition class: same pieces on the same
/// squares, same side to move, same castling rights and same en-passant target. Counters, piece
/// identities and the last ply are ignored.
#[derive(Clone, Debug)]
pub struct Position {
    board: [Option<Piece>; Square::COUNT],
    ids: [Option<PieceId>; Square::COUNT],
    bb_color: [Bitboard; Color::COUNT],
    side_to_move: Color,
    castling_rights: CastlingRight,
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    ply_number: u32,
    next_piece_id: u16,
    check_state: CheckState,
    last_ply: Option<Ply>,
}

impl Position {
    /// Creates a position with the standard initial board setup.
    pub fn new() -> Self {
        Self::from_fen(STANDARD_SETUP)
    }

    fn empty() -> Self {
        Self {
            board: [None; Square::COUNT],
            ids: [None; Square::COUNT],
            bb_color: [Bitboard::EMPTY; Color::COUNT],
            side_to_move: Color::White,
            castling_rights: CastlingRight::empty(),
            en_passant_square: None,
            halfmove_clock: 0,
            ply_number: 0,
            next_piece_id: 0,
            check_state: CheckState::None,
            last_ply: None,
        }
    }

    fn read_piece_placement(&mut self, piece_placement: &str) {
        for (row, rank_string) in piece_placement.split('/').take(Rank::COUNT).enumerate() {
            let rank = Rank::from((Rank::COUNT - 1 - row) as u8);
            let mut file = 0usize;
            for c in rank_string.chars() {
                if file >= File::COUNT {
                    break;
                }
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else if let Ok(piece) = Piece::try_from(c) {
                    self.set_cell(Square::new(File::from(file as u8), rank), Some(piece), None);
                    file += 1;
                } else {
                    debug!("Ignoring unexpected character '{c}' in piece placement \"{piece_placement}\"");
                }
            }
        }
    }

    fn read_castling(&mut self, castling_availability: &str) {
        for c in castling_availability.chars() {
            match c {
                'K' => self.castling_rights |= CastlingRight::WHITE_KINGSIDE,
                'Q' => self.castling_rights |= CastlingRight::WHITE_QUEENSIDE,
                'k' => self.castling_rights |= CastlingRight::BLACK_KINGSIDE,
                'q' => self.castling_rights |= CastlingRight::BLACK_QUEENSIDE,
                '-' => {}
                _ => debug!("Ignoring unexpected castling availability character '{c}'"),
            }
        }
    }

    /// Creates a position from its board-state encoding.
    ///
    /// The encoding holds 6 fields separated by spaces: piece placement (rank 8 first, digits for
    /// empty squares), side to move ("w" or "b"), castling availability ("KQkq" subset or "-"),
    /// en-passant target ("e3" or "-"), reversible-move counter and full-move number.
    ///
    /// Decoding is best effort and never fails: an unreadable field keeps its default value and
    /// missing trailing fields default to "w - - 0 1". No semantic validation is made, so a
    /// position without kings is accepted.
    pub fn from_fen(fen: &str) -> Self {
        let mut position = Position::empty();
        let mut fields = fen.split_whitespace();

        position.read_piece_placement(fields.next().unwrap_or_default());
        position.assign_piece_ids();

        position.side_to_move = match fields.next() {
            Some("b") => Color::Black,
            Some("w") | None => Color::White,
            Some(other) => {
                debug!("Unexpected active color \"{other}\", white to move");
                Color::White
            }
        };

        position.read_castling(fields.next().unwrap_or("-"));

        position.en_passant_square = match fields.next() {
            None | Some("-") => None,
            Some(square) => Square::try_from(square)
                .inspect_err(|e| debug!("Ignoring en passant square: {e}"))
                .ok(),
        };

        position.halfmove_clock = fields.next().and_then(|value| value.parse().ok()).unwrap_or(0);

        let fullmove_number: u32 = fields.next().and_then(|value| value.parse().ok()).unwrap_or(1).max(1);
        position.ply_number = (fullmove_number - 1) * 2 + u32::from(position.side_to_move == Color::Black);

        position.check_state = position.compute_check_state(position.side_to_move);
        position
    }

    fn write_piece_placement(&self) -> String {
        let mut result = String::with_capacity(72);
        for rank in Rank::ALL.iter().rev() {
            let mut empty_count = 0;
            for file in File::ALL {
                if let Some(piece) = self[Square::new(file, *rank)] {
                    if empty_count > 0 {
                        result.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    result.push(piece.into());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if *rank != Rank::R1 {
                result.push('/');
            }
        }
        result
    }

    fn write_castling(&self) -> String {
        if self.castling_rights.is_empty() {
            return String::from("-");
        }

        [
            (CastlingRight::WHITE_KINGSIDE, 'K'),
            (CastlingRight::WHITE_QUEENSIDE, 'Q'),
            (CastlingRight::BLACK_KINGSIDE, 'k'),
            (CastlingRight::BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        .filter(|(right, _)| self.castling_rights.contains(*right))
        .map(|(_, c)| *c)
        .collect()
    }

    /// Returns the board-state encoding of the position. The en-passant target is written
    /// whenever it is set, even when no pawn can take.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.write_piece_placement(),
            char::from(self.side_to_move),
            self.write_castling(),
            self.en_passant_square.map_or(String::from("-"), |square| square.to_string()),
            self.halfmove_clock,
            self.fullmove_number()
        )
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRight {
        self.castling_rights
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    /// Number of consecutive plies without a pawn move or a capture.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.ply_number / 2 + 1
    }

    /// Number of plies played since the start of the game, derived from the full-move number
    /// when the position was decoded.
    pub fn ply_number(&self) -> u32 {
        self.ply_number
    }

    /// The move that produced this position, if it was produced by a move.
    pub fn last_ply(&self) -> Option<&Ply> {
        self.last_ply.as_ref()
    }

    /// Check status of the side to move.
    pub fn check_state(&self) -> CheckState {
        self.check_state
    }

    /// Squares occupied by pieces of `color`.
    pub fn occupied(&self, color: Color) -> Bitboard {
        self.bb_color[usize::from(color)]
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self[square]
    }

    pub fn piece_id_at(&self, square: Square) -> Option<PieceId> {
        self.ids[usize::from(square)]
    }

    fn all_occupied(&self) -> Bitboard {
        self.bb_color[usize::from(Color::White)] | self.bb_color[usize::from(Color::Black)]
    }

    fn allocate_piece_id(&mut self) -> PieceId {
        let id = PieceId(self.next_piece_id);
        self.next_piece_id += 1;
        id
    }

    fn assign_piece_ids(&mut self) {
        for square in Square::ALL {
            if self.board[usize::from(square)].is_some() {
                self.ids[usize::from(square)] = Some(self.allocate_piece_id());
            }
        }
    }

    /// Writes a board cell and keeps the color masks in sync with it.
    fn set_cell(&mut self, square: Square, piece: Option<Piece>, id: Option<PieceId>) {
        for color in Color::ALL {
            self.bb_color[usize::from(color)] &= !Bitboard::from(square);
        }
        if let Some(piece) = piece {
            self.bb_color[usize::from(piece.color())] |= square;
        }
        self.board[usize::from(square)] = piece;
        self.ids[usize::from(square)] = id;
    }

    fn unit_at(&self, square: Square) -> Option<Unit> {
        match (self.board[usize::from(square)], self.ids[usize::from(square)]) {
            (Some(piece), Some(id)) => Some(Unit { id, piece }),
            _ => None,
        }
    }

    //==================================================================================================================
    // Move validation
    //==================================================================================================================

    /// Validates everything about a move that does not require playing it: ownership, geometry,
    /// crossed squares, own captures and the pawn and castling special cases. Whether the crossed
    /// square of a castling king is attacked is left to the caller.
    fn candidate(&self, color: Color, from: Square, to: Square) -> Option<Candidate> {
        let piece = self[from].filter(|piece| piece.color() == color)?;

        if !move_pattern(color, piece.piece_type(), from).get(to) {
            return None;
        }

        let crossed = crossed_squares(from, to);
        if !(crossed & self.all_occupied()).is_empty() {
            return None;
        }

        let mut victim = self[to].map(|victim| (victim, to));
        if victim.is_some_and(|(victim, _)| victim.color() == color) {
            return None;
        }

        let mut candidate = Candidate { piece, crossed, victim, en_passant: false, promotes: false, castling: None };
        match piece.piece_type() {
            PieceType::Pawn => {
                if victim.is_none() && self.en_passant_square == Some(to) {
                    let victim_square = Square::new(to.file(), if to.rank() == Rank::R3 { Rank::R4 } else { Rank::R5 });
                    victim = self[victim_square]
                        .filter(|victim| victim.color() != color && victim.piece_type() == PieceType::Pawn)
                        .map(|victim| (victim, victim_square));
                    candidate.en_passant = victim.is_some();
                    candidate.victim = victim;
                }

                if from.file() != to.file() {
                    victim?;
                } else if victim.is_some() {
                    return None;
                }

                candidate.promotes = to.rank() == Rank::R1 || to.rank() == Rank::R8;
            }
            PieceType::King if u8::from(from.file()).abs_diff(u8::from(to.file())) > 1 => {
                if victim.is_some() {
                    return None;
                }

                let side = if to.file() > from.file() { CastlingSide::Kingside } else { CastlingSide::Queenside };
                if !self.castling_rights.contains(CastlingRight::new(color, side)) {
                    return None;
                }

                let rook_from = Square::new(side.rook_file(), from.rank());
                let rook_to = Square::new(side.rook_destination_file(), from.rank());
                if self[rook_from] != Some(Piece::new(color, PieceType::Rook)) {
                    return None;
                }
                if !(crossed_squares(rook_from, rook_to) & self.all_occupied()).is_empty() {
                    return None;
                }

                candidate.castling = Some((rook_from, rook_to));
            }
            _ => {}
        }

        Some(candidate)
    }

    /// Validates a move of a `color` piece from `from` to `to` and, when `apply` is set and the
    /// move is legal, plays it.
    ///
    /// # Parameters
    /// * `color` - The side making the move. It does not have to be the side to move; check
    ///   detection asks whether the opponent could reach the king.
    /// * `promotion` - Piece a pawn reaching the last rank turns into. Defaults to a queen.
    /// * `apply` - Commit the move. Otherwise the position is left exactly as it was.
    /// * `test_check` - Reject moves that leave the mover's own king attacked.
    ///
    /// # Returns
    /// Whether the move is legal under the requested checks. Committing a move flips the side to
    /// move, increments the ply number, recomputes the check state and records the [`Ply`].
    pub fn move_with_coords(
        &mut self,
        color: Color,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
        apply: bool,
        test_check: bool,
    ) -> bool {
        let Some(candidate) = self.candidate(color, from, to) else {
            return false;
        };

        if let Some((_, rook_to)) = candidate.castling {
            if self.is_in_check(color) {
                return false;
            }
            if !self.move_with_coords(color, from, rook_to, None, false, true) {
                return false;
            }
        }

        let promotion_type = promotion.unwrap_or(PieceType::Queen);
        if candidate.promotes && !PROMOTION_TYPES.contains(&promotion_type) {
            return false;
        }

        if !apply && !test_check {
            return true;
        }

        let (ambiguous_file, ambiguous_rank) = if apply {
            self.disambiguation(&candidate, from, to)
        } else {
            (false, false)
        };

        let mover = self.unit_at(from);
        let capture = candidate.victim.and_then(|(_, square)| self.unit_at(square).map(|unit| Capture { unit, square }));
        let snapshot = self.snapshot(&candidate, from, to);

        self.apply_candidate(&candidate, color, from, to, promotion_type);

        let legal = !test_check || !self.is_in_check(color);
        if !apply || !legal {
            self.restore(snapshot);
            return legal;
        }

        self.side_to_move = !color;
        self.ply_number += 1;
        self.check_state = self.compute_check_state(self.side_to_move);

        let (Some(mover), Some(moved)) = (mover, self.unit_at(to)) else {
            debug!("Committed a move from {from} without a unit to record");
            return true;
        };
        self.last_ply = Some(Ply {
            number: self.ply_number,
            mover,
            from,
            to,
            capture,
            promotion: candidate.promotes.then_some(moved),
            castling_rook: candidate.castling.and_then(|(rook_from, rook_to)| {
                self.unit_at(rook_to).map(|unit| RookMove { unit, from: rook_from, to: rook_to })
            }),
            ambiguous_file,
            ambiguous_rank,
            en_passant: candidate.en_passant,
            check_state: self.check_state,
        });

        true
    }

    /// Decides which parts of the origin square short algebraic notation needs, by looking for
    /// other units of the same kind that could legally reach the same destination. A capturing
    /// pawn always shows its file.
    fn disambiguation(&mut self, candidate: &Candidate, from: Square, to: Square) -> (bool, bool) {
        let mut rivals = Vec::new();
        for square in self.occupied(candidate.piece.color()) {
            if square != from
                && self[square] == Some(candidate.piece)
                && self.move_with_coords(candidate.piece.color(), square, to, None, false, true)
            {
                rivals.push(square);
            }
        }

        let pawn_capture = candidate.piece.piece_type() == PieceType::Pawn && candidate.victim.is_some();
        if rivals.is_empty() {
            return (pawn_capture, false);
        }

        if pawn_capture || rivals.iter().all(|rival| rival.file() != from.file()) {
            (true, false)
        } else if rivals.iter().all(|rival| rival.rank() != from.rank()) {
            (false, true)
        } else {
            (true, true)
        }
    }

    fn snapshot(&self, candidate: &Candidate, from: Square, to: Square) -> Snapshot {
        let victim_square = candidate.victim.map_or(from, |(_, square)| square);
        let (rook_from, rook_to) = candidate.castling.unwrap_or((from, from));
        let cell = |square: Square| (square, self.board[usize::from(square)], self.ids[usize::from(square)]);

        Snapshot {
            cells: [cell(from), cell(to), cell(victim_square), cell(rook_from), cell(rook_to)],
            bb_color: self.bb_color,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            next_piece_id: self.next_piece_id,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        for (square, piece, id) in snapshot.cells {
            self.board[usize::from(square)] = piece;
            self.ids[usize::from(square)] = id;
        }
        self.bb_color = snapshot.bb_color;
        self.castling_rights = snapshot.castling_rights;
        self.en_passant_square = snapshot.en_passant_square;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.next_piece_id = snapshot.next_piece_id;
    }

    /// Mutates the board, the masks, the rights and the counters for a validated move.
    fn apply_candidate(&mut self, candidate: &Candidate, color: Color, from: Square, to: Square, promotion_type: PieceType) {
        let mover_id = self.ids[usize::from(from)];

        self.set_cell(from, None, None);
        if let Some((_, victim_square)) = candidate.victim {
            self.set_cell(victim_square, None, None);
        }

        if candidate.promotes {
            let id = self.allocate_piece_id();
            self.set_cell(to, Some(Piece::new(color, promotion_type)), Some(id));
        } else {
            self.set_cell(to, Some(candidate.piece), mover_id);
        }

        if let Some((rook_from, rook_to)) = candidate.castling {
            let rook = self.board[usize::from(rook_from)];
            let rook_id = self.ids[usize::from(rook_from)];
            self.set_cell(rook_from, None, None);
            self.set_cell(rook_to, rook, rook_id);
        }

        if candidate.piece.piece_type() == PieceType::King {
            self.castling_rights.remove(CastlingRight::both(color));
        }
        self.castling_rights.remove(CastlingRight::for_rook_corner(from) | CastlingRight::for_rook_corner(to));

        self.en_passant_square =
            if candidate.piece.piece_type() == PieceType::Pawn { candidate.crossed.lsb() } else { None };

        if candidate.piece.piece_type() == PieceType::Pawn || candidate.victim.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
    }

    //==================================================================================================================
    // Check, checkmate, stalemate and material
    //==================================================================================================================

    /// Returns whether any king of `color` could be taken by an opponent piece. A side without a
    /// king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        let king = Piece::new(color, PieceType::King);
        let attackers = self.occupied(!color);
        self.occupied(color)
            .into_iter()
            .filter(|square| self[*square] == Some(king))
            .any(|king_square| attackers.into_iter().any(|from| self.candidate(!color, from, king_square).is_some()))
    }

    fn has_legal_move(&mut self, color: Color) -> bool {
        for from in self.occupied(color) {
            let Some(piece) = self[from] else {
                continue;
            };
            for to in move_pattern(color, piece.piece_type(), from) {
                if self.move_with_coords(color, from, to, None, false, true) {
                    return true;
                }
            }
        }
        false
    }

    fn compute_check_state(&mut self, color: Color) -> CheckState {
        if !self.is_in_check(color) {
            CheckState::None
        } else if self.has_legal_move(color) {
            CheckState::Check
        } else {
            CheckState::Checkmate
        }
    }

    /// Returns whether `color` is in check and has no legal move.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.clone().has_legal_move(color)
    }

    /// Returns whether `color` has a legal move. A side with no pieces at all counts as able to
    /// move, so an empty side is never stalemated.
    pub fn can_move(&self, color: Color) -> bool {
        self.occupied(color).is_empty() || self.clone().has_legal_move(color)
    }

    /// Returns whether checkmate is still possible with the material on the board.
    ///
    /// Insufficient configurations are king versus king, a single knight or bishops all on one
    /// square color against a bare king, and bishops against bishops when every bishop stands on
    /// the same square color. Pawns, rooks, queens, two knights of one side, bishop and knight of
    /// one side, bishops of one side on both colors and any minor piece against a knight are all
    /// sufficient.
    pub fn has_sufficient_material(&self) -> bool {
        #[derive(Default)]
        struct Minors {
            knights: u32,
            bishops: u32,
            bishop_on_light: bool,
            bishop_on_dark: bool,
        }

        let mut minors = [Minors::default(), Minors::default()];
        for square in Square::ALL {
            let Some(piece) = self[square] else {
                continue;
            };
            let side = &mut minors[usize::from(piece.color())];
            match piece.piece_type() {
                PieceType::Pawn | PieceType::Rook | PieceType::Queen => return true,
                PieceType::Knight => side.knights += 1,
                PieceType::Bishop => {
                    side.bishops += 1;
                    if square.is_light() {
                        side.bishop_on_light = true;
                    } else {
                        side.bishop_on_dark = true;
                    }
                }
                PieceType::King => {}
            }
        }

        let [white, black] = &minors;
        for (side, other) in [(white, black), (black, white)] {
            if side.knights > 1 || (side.bishops > 0 && side.knights > 0) {
                return true;
            }
            if side.bishop_on_light && side.bishop_on_dark {
                return true;
            }
            if (side.bishops > 0 || side.knights > 0) && other.knights > 0 {
                return true;
            }
        }

        white.bishops > 0
            && black.bishops > 0
            && ((white.bishop_on_light && black.bishop_on_dark) || (white.bishop_on_dark && black.bishop_on_light))
    }

    /// Returns the outcome the position forces, if any: checkmate, then stalemate, then
    /// insufficient material (only considered right after a capture).
    pub fn result(&self) -> Option<(GameResult, Rule)> {
        if self.check_state == CheckState::Checkmate {
            return Some((GameResult::win_for(!self.side_to_move), Rule::Checkmate));
        }

        if !self.can_move(self.side_to_move) {
            return Some((GameResult::Draw, Rule::Stalemate));
        }

        if self.last_ply.as_ref().is_some_and(|ply| ply.capture().is_some()) && !self.has_sufficient_material() {
            return Some((GameResult::Draw, Rule::InsufficientMaterial));
        }

        None
    }

    //==================================================================================================================
    // Move strings
    //==================================================================================================================

    /// Decodes `notation` for the side to move and plays it when `apply` is set.
    ///
    /// Returns whether the move is legal. Undecodable, ambiguous and illegal moves all leave the
    /// position untouched.
    pub fn play(&mut self, notation: &str, apply: bool) -> bool {
        let color = self.side_to_move;
        match parse_move(self, color, notation) {
            Ok(request) => self.move_with_coords(color, request.from, request.to, request.promotion, apply, true),
            Err(error) => {
                debug!("{error}");
                false
            }
        }
    }

    /// Returns every legal move of the side to move, as the plies they would produce. A promoting
    /// pawn yields one ply per promotion piece.
    pub fn legal_moves(&self) -> Vec<Ply> {
        let color = self.side_to_move;
        let mut plies = Vec::new();
        for from in self.occupied(color) {
            let Some(piece) = self[from] else {
                continue;
            };
            for to in move_pattern(color, piece.piece_type(), from) {
                let promotes = piece.piece_type() == PieceType::Pawn && (to.rank() == Rank::R1 || to.rank() == Rank::R8);
                let promotions: &[PieceType] = if promotes { &PROMOTION_TYPES } else { &[PieceType::Queen] };
                for promotion in promotions {
                    let mut next = self.clone();
                    if next.move_with_coords(color, from, to, Some(*promotion), true, true) {
                        plies.extend(next.last_ply);
                    }
                }
            }
        }
        plies
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Square> for Position {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.board[usize::from(index)]
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.bb_color == other.bb_color
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
            && self.board.iter().zip(other.board.iter()).all(|(a, b)| a.map(Piece::piece_type) == b.map(Piece::piece_type))
    }
}

impl Eq for Position {}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
