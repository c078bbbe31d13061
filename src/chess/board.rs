//! Mailbox (square-centric) implementation of the chess board: every square
//! holds either a piece or nothing, which makes "what stands here" queries
//! trivial at the cost of scanning squares during generation. A parallel
//! [`Bitboard`] records which squares have ever had a piece depart from them;
//! that state exists solely to gate castling.
//!
//! The board is a value: every transform ([`Board::reposition`],
//! [`Board::promote`], the castling legs) returns a fresh snapshot and never
//! touches its parent. Concurrent readers of distinct snapshots need no
//! locking.

use std::fmt::{self, Write};

use anyhow::bail;
use strum::IntoEnumIterator;

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{
    CastleSide,
    File,
    MoveError,
    Piece,
    PieceKind,
    Player,
    Rank,
    Square,
    BOARD_SIZE,
    BOARD_WIDTH,
};
use crate::chess::movegen;
use crate::chess::selection::Selection;

/// An 8x8 mapping from [`Square`] to an optional [`Piece`], plus the
/// per-square moved flags. Copy-on-write: mutating operations outside of the
/// initial setup return a new `Board`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
    moved: Bitboard,
}

impl Board {
    /// Creates a board with no pieces on it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
            moved: Bitboard::empty(),
        }
    }

    /// Creates the starting position of the standard chess variant: mirrored
    /// back ranks in the canonical order and full pawn ranks.
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for (file, kind) in File::iter().zip(BACKRANK) {
            board.set(
                Square::new(file, Rank::One),
                Piece::new(Player::White, kind),
            );
            board.set(
                Square::new(file, Rank::Two),
                Piece::new(Player::White, PieceKind::Pawn),
            );
            board.set(
                Square::new(file, Rank::Seven),
                Piece::new(Player::Black, PieceKind::Pawn),
            );
            board.set(
                Square::new(file, Rank::Eight),
                Piece::new(Player::Black, kind),
            );
        }
        board
    }

    /// Parses the piece placement field of a [FEN] string (ranks 8 to 1
    /// separated by `/`, digits for runs of empty squares). Only the board
    /// field is accepted: side to move, castling rights and the move counters
    /// are not part of this model.
    ///
    /// ```
    /// use tabiya::chess::board::Board;
    ///
    /// let board = Board::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
    /// assert_eq!(board, Board::starting());
    /// ```
    ///
    /// # Errors
    ///
    /// Fails when the input does not describe exactly 8 ranks of 8 files or
    /// contains a symbol that is not a piece or a gap digit.
    ///
    /// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_placement(placement: &str) -> anyhow::Result<Self> {
        let mut board = Self::empty();
        let ranks: Vec<&str> = placement.trim().split('/').collect();
        if ranks.len() != BOARD_WIDTH as usize {
            bail!("expected {BOARD_WIDTH} ranks, got {}", ranks.len());
        }
        for (row, chunk) in ranks.iter().enumerate() {
            let rank = Rank::try_from(BOARD_WIDTH - 1 - row as u8)?;
            let mut file: u8 = 0;
            for symbol in chunk.chars() {
                if let Some(gap) = symbol.to_digit(10) {
                    // The check keeps `file` at most BOARD_WIDTH, so adding
                    // one more digit can not overflow.
                    file += gap as u8;
                    if file > BOARD_WIDTH {
                        bail!("rank {rank} spills over the board edge");
                    }
                    continue;
                }
                if file >= BOARD_WIDTH {
                    bail!("rank {rank} spills over the board edge");
                }
                board.set(
                    Square::new(File::try_from(file)?, rank),
                    Piece::try_from(symbol)?,
                );
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!("rank {rank} covers {file} files, expected {BOARD_WIDTH}");
            }
        }
        Ok(board)
    }

    /// Returns the piece standing on `square`, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    /// Places a piece during construction or ad hoc setup. Not part of the
    /// move-application path: it does not touch the moved flags.
    pub fn set(&mut self, square: Square, piece: Piece) {
        self.squares[square as usize] = Some(piece);
    }

    /// Returns true once any piece has departed from `square`. Flags are
    /// never cleared; they only gate castling eligibility.
    #[must_use]
    pub fn has_moved(&self, square: Square) -> bool {
        self.moved.contains(square)
    }

    /// Moves the piece on `from` to `to`, returning the successor board. The
    /// single primitive all movement is built from, including the castling
    /// rook leg. The departed square's moved flag is raised on the successor.
    ///
    /// # Errors
    ///
    /// [`MoveError::EmptySource`] when `from` holds no piece and
    /// [`MoveError::NoOpMove`] when `from == to`.
    pub fn reposition(&self, from: Square, to: Square) -> Result<Self, MoveError> {
        let piece = self.at(from).ok_or(MoveError::EmptySource(from))?;
        if from == to {
            return Err(MoveError::NoOpMove(from));
        }
        let mut next = *self;
        next.squares[from as usize] = None;
        next.squares[to as usize] = Some(piece);
        next.moved.insert(from);
        Ok(next)
    }

    /// Computes the *raw* reachable squares for the piece on `square`: pure
    /// geometry and occupancy, no check-safety applied. Internal consumers
    /// (check detection) need this entry point; external callers almost
    /// always want [`Board::select_legal`].
    ///
    /// # Errors
    ///
    /// [`MoveError::EmptySelection`] when `square` holds no piece.
    pub fn select(&self, square: Square) -> Result<Selection<'_>, MoveError> {
        match self.at(square) {
            Some(piece) => Ok(movegen::raw(self, square, piece)),
            None => Err(MoveError::EmptySelection(square)),
        }
    }

    /// Computes the legal destination sets for the piece on `square`:
    /// [`Board::select`] followed by the check-safety filter, which discards
    /// every candidate that would leave the selecting player's own king
    /// attacked.
    ///
    /// # Errors
    ///
    /// [`MoveError::EmptySelection`] when `square` holds no piece.
    pub fn select_legal(&self, square: Square) -> Result<Selection<'_>, MoveError> {
        let mut selection = self.select(square)?;
        selection.retain_safe();
        Ok(selection)
    }

    /// Returns true when any opposing piece currently attacks `player`'s
    /// king. Scans the raw (unfiltered) selections of the opponent's pieces;
    /// it must stay on the raw entry point, otherwise filtering would recurse
    /// into itself.
    #[must_use]
    pub fn is_in_check(&self, player: Player) -> bool {
        let opponent = player.opponent();
        Square::iter().any(|square| match self.at(square) {
            Some(piece) if piece.owner == opponent => {
                movegen::raw(self, square, piece).is_checking()
            }
            _ => false,
        })
    }

    /// Castling eligibility for the king on `king`: a king stands there, its
    /// square never departed, a same-owner rook sits on the corner of that
    /// wing with its flag clear, and every square strictly between them is
    /// empty. Always false when `king` holds anything but a king.
    ///
    /// Deliberately does *not* test whether the king passes through an
    /// attacked square. The landing square is still vetted by the
    /// check-safety filter, but castling through an attacked square is
    /// permitted.
    #[must_use]
    pub fn can_castle(&self, king: Square, side: CastleSide) -> bool {
        if self.moved.contains(king) {
            return false;
        }
        let owner = match self.at(king) {
            Some(piece) if piece.kind == PieceKind::King => piece.owner,
            _ => return false,
        };
        let corner = Square::new(side.rook_file(), king.rank());
        match self.at(corner) {
            Some(piece)
                if piece.kind == PieceKind::Rook
                    && piece.owner == owner
                    && !self.moved.contains(corner) => {}
            _ => return false,
        }
        // A rook stands on the corner, so the king does not: the file step
        // below is non-zero and the walk terminates at the corner.
        let step = (corner.file() as i8 - king.file() as i8).signum();
        let mut square = king;
        loop {
            square = match square.towards(0, step) {
                Some(next) => next,
                None => return false,
            };
            if square == corner {
                return true;
            }
            if self.at(square).is_some() {
                return false;
            }
        }
    }

    /// True iff the occupant of `square` is a pawn standing on the farthest
    /// rank for its owner.
    #[must_use]
    pub fn promotion_due(&self, square: Square) -> bool {
        match self.at(square) {
            Some(piece) => {
                piece.kind == PieceKind::Pawn && square.rank() == Rank::promotion(piece.owner)
            }
            None => false,
        }
    }

    /// Replaces the pawn on `square` with a queen of the same owner,
    /// returning the successor board. No underpromotion choice is exposed.
    ///
    /// # Panics
    ///
    /// Panics when [`Board::promotion_due`] does not hold for `square`: a
    /// promotion outside of the pawn's farthest rank means the move
    /// application above it is broken.
    #[must_use]
    pub fn promote(&self, square: Square) -> Self {
        assert!(
            self.promotion_due(square),
            "promotion applied to {square} without a promotable pawn"
        );
        let pawn = self
            .at(square)
            .expect("promotion_due guarantees an occupant");
        let mut next = *self;
        next.squares[square as usize] = Some(Piece::new(pawn.owner, PieceKind::Queen));
        next
    }
}

impl fmt::Display for Board {
    /// Serializes the board as the FEN piece placement field; round-trips
    /// through [`Board::from_placement`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut gap = 0;
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => {
                        if gap > 0 {
                            write!(f, "{gap}")?;
                            gap = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                write!(f, "{gap}")?;
            }
            if rank != Rank::One {
                f.write_char('/')?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
