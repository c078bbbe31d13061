//! Raw candidate generation: pure geometry and occupancy for each piece
//! kind, before any check-safety is applied.
//!
//! Shared occupancy policy for every generator: an off-board candidate is
//! silently discarded; an own piece blocks a ray without being added; an
//! opposing non-king piece joins both the quiet and the threat set and
//! terminates the ray; an opposing king joins neither set and instead raises
//! the selection's checking flag (a king is marked, never captured).

use crate::chess::board::Board;
use crate::chess::core::{CastleSide, Direction, Piece, PieceKind, Rank, Square};
use crate::chess::selection::Selection;

/// Builds the raw [`Selection`] for `piece` standing on `square`. The match
/// is exhaustive over [`PieceKind`]: a new piece kind will not compile until
/// it gets a generator.
pub(super) fn raw(board: &Board, square: Square, piece: Piece) -> Selection<'_> {
    let mut selection = Selection::new(board, square, piece);
    match piece.kind {
        PieceKind::Pawn => pawn(&mut selection),
        PieceKind::Knight => knight(&mut selection),
        PieceKind::Bishop => slide(&mut selection, &Direction::BISHOP),
        PieceKind::Rook => slide(&mut selection, &Direction::ROOK),
        PieceKind::Queen => slide(&mut selection, &Direction::QUEEN),
        PieceKind::King => king(&mut selection),
    }
    selection
}

/// Walks each direction one square at a time; the first occupied square
/// terminates the ray after the occupancy policy is applied to it.
fn slide(selection: &mut Selection, directions: &[Direction]) {
    for direction in directions {
        let mut square = selection.selected();
        while let Some(next) = square.shift(*direction) {
            match selection.board().at(next) {
                None => selection.advance(next),
                Some(occupant) => {
                    if occupant.owner != selection.piece().owner {
                        selection.threaten(next, occupant);
                    }
                    break;
                }
            }
            square = next;
        }
    }
}

/// Applies the occupancy policy to a single candidate square, used by the
/// fixed-offset pieces (knight and king).
fn step(selection: &mut Selection, ranks: i8, files: i8) {
    if let Some(next) = selection.selected().towards(ranks, files) {
        match selection.board().at(next) {
            None => selection.advance(next),
            Some(occupant) if occupant.owner != selection.piece().owner => {
                selection.threaten(next, occupant);
            }
            Some(_) => {}
        }
    }
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

fn knight(selection: &mut Selection) {
    for (ranks, files) in KNIGHT_OFFSETS {
        step(selection, ranks, files);
    }
}

/// One square in all eight directions, plus up to two castling destinations
/// (two squares towards the corresponding rook) when eligible.
fn king(selection: &mut Selection) {
    for direction in Direction::QUEEN {
        let (ranks, files) = direction.vector();
        step(selection, ranks, files);
    }
    let from = selection.selected();
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !selection.board().can_castle(from, side) {
            continue;
        }
        let towards_rook = (side.rook_file() as i8 - from.file() as i8).signum();
        if let Some(target) = from.towards(0, 2 * towards_rook) {
            if selection.board().at(target).is_none() {
                selection.castle(target);
            }
        }
    }
}

/// Pawns are the only piece whose movement and capture geometry differ: one
/// quiet step forward (two from the starting rank when both squares are
/// empty), and the forward diagonals only when an opposing piece stands
/// there.
fn pawn(selection: &mut Selection) {
    let owner = selection.piece().owner;
    let push = owner.push();
    let from = selection.selected();
    if let Some(ahead) = from.towards(push, 0) {
        if selection.board().at(ahead).is_none() {
            selection.advance(ahead);
            if from.rank() == Rank::pawns_starting(owner) {
                if let Some(jump) = ahead.towards(push, 0) {
                    if selection.board().at(jump).is_none() {
                        selection.advance(jump);
                    }
                }
            }
        }
    }
    for files in [-1, 1] {
        if let Some(diagonal) = from.towards(push, files) {
            if let Some(occupant) = selection.board().at(diagonal) {
                if occupant.owner != owner {
                    selection.threaten(diagonal, occupant);
                }
            }
        }
    }
}
