//! Implementation of the chess rules: board representation, per-piece move
//! generation and the check-safety legality filter.

pub mod bitboard;
pub mod board;
pub mod core;
pub mod selection;

mod movegen;
