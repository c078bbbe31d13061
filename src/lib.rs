//! Chess position model and legal move computation.
//!
//! The crate answers one question: given a position and an occupied square,
//! what can the piece standing there legally do? The answer is a
//! [`chess::selection::Selection`]: candidate destinations split into quiet
//! moves, captures and castling, pruned so that no destination leaves the
//! mover's own king attacked. Applying a destination produces a fresh
//! [`chess::board::Board`] snapshot; boards are never mutated in place.
//!
//! ```
//! use tabiya::chess::board::Board;
//! use tabiya::chess::core::Square;
//!
//! let board = Board::starting();
//! let knight = board.select_legal(Square::G1).unwrap();
//! assert_eq!(knight.moves(), &[Square::F3, Square::H3]);
//! ```

// Rustc lints.
#![warn(
    missing_docs,
    variant_size_differences,
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic
)]

pub mod chess;
