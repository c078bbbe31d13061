//! Selecting a piece: the candidate destination sets for one occupied
//! square, the check-safety filter over them and the application of a single
//! move.
//!
//! A [`Selection`] is a transient view bound to one board and one source
//! square. It is created per query and must be recomputed after any board
//! transform; it never tracks a moving position.

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{File, MoveError, Piece, PieceKind, Square};

/// Destinations reachable by the piece on one selected square.
///
/// `moves` holds every destination the piece can travel to, `threats` the
/// subset occupied by capturable opposing pieces (a capture square is a
/// member of both sets), and `castles` up to two king castling destinations.
/// `checking` records that the selected piece currently attacks the opposing
/// king; the king's square is deliberately absent from both destination
/// sets.
#[derive(Debug)]
pub struct Selection<'a> {
    board: &'a Board,
    selected: Square,
    piece: Piece,
    moves: Vec<Square>,
    threats: Vec<Square>,
    castles: ArrayVec<Square, 2>,
    checking: bool,
}

impl<'a> Selection<'a> {
    pub(super) fn new(board: &'a Board, selected: Square, piece: Piece) -> Self {
        Self {
            board,
            selected,
            piece,
            moves: Vec::new(),
            threats: Vec::new(),
            castles: ArrayVec::new(),
            checking: false,
        }
    }

    /// The board this selection was computed for.
    #[must_use]
    pub const fn board(&self) -> &Board {
        self.board
    }

    /// The source square the selection is bound to.
    #[must_use]
    pub const fn selected(&self) -> Square {
        self.selected
    }

    /// The piece standing on the selected square.
    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// Every destination the piece can travel to, captures included.
    #[must_use]
    pub fn moves(&self) -> &[Square] {
        &self.moves
    }

    /// The destinations holding capturable opposing pieces.
    #[must_use]
    pub fn threats(&self) -> &[Square] {
        &self.threats
    }

    /// King castling destinations, empty for every other piece.
    #[must_use]
    pub fn castles(&self) -> &[Square] {
        &self.castles
    }

    /// True when the selected piece currently attacks the opposing king.
    #[must_use]
    pub const fn is_checking(&self) -> bool {
        self.checking
    }

    /// Records a quiet destination.
    pub(super) fn advance(&mut self, square: Square) {
        self.moves.push(square);
    }

    /// Records a destination occupied by an opposing piece. A non-king
    /// occupant is capturable and joins both destination sets; a king is
    /// never a capture target and only raises the checking flag.
    pub(super) fn threaten(&mut self, square: Square, occupant: Piece) {
        if occupant.kind == PieceKind::King {
            self.checking = true;
        } else {
            self.threats.push(square);
            self.moves.push(square);
        }
    }

    /// Records a castling destination for the king.
    pub(super) fn castle(&mut self, square: Square) {
        self.castles.push(square);
    }

    /// The check-safety filter: hypothetically applies every candidate and
    /// discards those that leave the selecting player's own king attacked.
    /// Runs exactly once per query; the simulation relies on raw (unfiltered)
    /// check detection, so re-filtering would recurse forever.
    pub(super) fn retain_safe(&mut self) {
        let board = self.board;
        let from = self.selected;
        let owner = self.piece.owner;
        let exposes_king = |to: &Square| {
            board
                .reposition(from, *to)
                .expect("a generated candidate is always applicable")
                .is_in_check(owner)
        };
        self.moves.retain(|to| !exposes_king(to));
        self.threats.retain(|to| !exposes_king(to));
        self.castles
            .retain(|to| !castled(board, from, *to).is_in_check(owner));
    }

    /// Commits one destination, returning the successor board. The
    /// destination must be a member of this selection's move, threat or
    /// castle set; promotion is applied when the moved piece is a pawn
    /// reaching its farthest rank.
    ///
    /// # Errors
    ///
    /// [`MoveError::IllegalMove`] when `to` is not a member of any
    /// destination set.
    pub fn apply(&self, to: Square) -> Result<Board, MoveError> {
        let next = if self.castles.contains(&to) {
            castled(self.board, self.selected, to)
        } else if self.moves.contains(&to) {
            // Threats are always mirrored into `moves`, so one membership
            // check covers both sets.
            self.board.reposition(self.selected, to)?
        } else {
            return Err(MoveError::IllegalMove(self.selected, to));
        };
        Ok(if next.promotion_due(to) {
            next.promote(to)
        } else {
            next
        })
    }
}

/// Applies both legs of a castle: the king to its destination and the rook
/// from its corner to the square the king crossed.
///
/// # Panics
///
/// Panics when the corner of the castled wing does not hold a rook: a castle
/// destination can only be generated while the rook is in place, so its
/// absence means the eligibility check is broken.
fn castled(board: &Board, king: Square, to: Square) -> Board {
    let towards_rook = (to.file() as i8 - king.file() as i8).signum();
    let corner_file = if towards_rook > 0 { File::H } else { File::A };
    let corner = Square::new(corner_file, king.rank());
    match board.at(corner) {
        Some(piece) if piece.kind == PieceKind::Rook => {}
        _ => panic!("castling towards {corner} without a rook there"),
    }
    let crossed = king
        .towards(0, towards_rook)
        .expect("the square the king crosses is on the board");
    board
        .reposition(king, to)
        .and_then(|next| next.reposition(corner, crossed))
        .expect("castling legs reposition occupied, distinct squares")
}
