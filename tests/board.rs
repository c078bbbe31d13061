use pretty_assertions::assert_eq;
use tabiya::chess::board::Board;
use tabiya::chess::core::{CastleSide, MoveError, Piece, PieceKind, Player, Square, BOARD_SIZE};

fn setup(placement: &str) -> Board {
    Board::from_placement(placement).expect("test positions are well-formed")
}

#[test]
fn every_square_round_trips_through_set_and_at() {
    let piece = Piece::new(Player::Black, PieceKind::Knight);
    for index in 0..BOARD_SIZE {
        let square = Square::try_from(index).unwrap();
        let mut board = Board::empty();
        assert_eq!(board.at(square), None);
        board.set(square, piece);
        assert_eq!(board.at(square), Some(piece));
    }
}

#[test]
fn starting_position_placement() {
    assert_eq!(
        Board::starting().to_string(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    );
    assert_eq!(
        Board::starting(),
        setup("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    );
}

#[test]
fn reposition_there_and_back_flags_both_squares() {
    let board = setup("8/8/8/8/8/8/8/3Q4");
    let there = board.reposition(Square::D1, Square::D7).unwrap();
    let back = there.reposition(Square::D7, Square::D1).unwrap();
    assert_eq!(back.to_string(), board.to_string());
    assert!(back.has_moved(Square::D1));
    assert!(back.has_moved(Square::D7));
    assert!(!board.has_moved(Square::D1));
}

#[test]
fn reposition_errors() {
    let board = Board::starting();
    assert_eq!(
        board.reposition(Square::D4, Square::D5),
        Err(MoveError::EmptySource(Square::D4))
    );
    assert_eq!(
        board.reposition(Square::D2, Square::D2),
        Err(MoveError::NoOpMove(Square::D2))
    );
}

#[test]
fn castling_requires_clear_path() {
    // The starting position has every back-rank square occupied.
    let board = Board::starting();
    assert!(!board.can_castle(Square::E1, CastleSide::Kingside));
    assert!(!board.can_castle(Square::E1, CastleSide::Queenside));

    let clear = setup("4k3/8/8/8/8/8/8/R3K2R");
    assert!(clear.can_castle(Square::E1, CastleSide::Kingside));
    assert!(clear.can_castle(Square::E1, CastleSide::Queenside));

    // A single blocker on either wing disables that wing only.
    let blocked = setup("4k3/8/8/8/8/8/8/RN2K2R");
    assert!(blocked.can_castle(Square::E1, CastleSide::Kingside));
    assert!(!blocked.can_castle(Square::E1, CastleSide::Queenside));
}

#[test]
fn castling_requires_unmoved_king_and_rook() {
    let board = setup("4k3/8/8/8/8/8/8/R3K2R");

    // The king stepping out and back burns both wings.
    let king_shuffled = board
        .reposition(Square::E1, Square::E2)
        .unwrap()
        .reposition(Square::E2, Square::E1)
        .unwrap();
    assert!(!king_shuffled.can_castle(Square::E1, CastleSide::Kingside));
    assert!(!king_shuffled.can_castle(Square::E1, CastleSide::Queenside));

    // A rook shuffle burns only its own wing.
    let rook_shuffled = board
        .reposition(Square::H1, Square::H5)
        .unwrap()
        .reposition(Square::H5, Square::H1)
        .unwrap();
    assert!(!rook_shuffled.can_castle(Square::E1, CastleSide::Kingside));
    assert!(rook_shuffled.can_castle(Square::E1, CastleSide::Queenside));
}

#[test]
fn castling_requires_an_own_rook_on_the_corner() {
    // Opposing rook on the corner square.
    let board = setup("4k3/8/8/8/8/8/8/4K2r");
    assert!(!board.can_castle(Square::E1, CastleSide::Kingside));
    // A non-rook piece on the corner square.
    let board = setup("4k3/8/8/8/8/8/8/4K2N");
    assert!(!board.can_castle(Square::E1, CastleSide::Kingside));
    // No piece at all.
    let board = setup("4k3/8/8/8/8/8/8/4K3");
    assert!(!board.can_castle(Square::E1, CastleSide::Kingside));
    assert!(!board.can_castle(Square::E1, CastleSide::Queenside));
}

#[test]
fn castling_is_answered_for_kings_only() {
    let board = setup("4k3/8/8/8/8/8/8/R3Q2R");
    // A queen on the king's home square is not castling-eligible.
    assert!(!board.can_castle(Square::E1, CastleSide::Kingside));
    assert!(!board.can_castle(Square::E1, CastleSide::Queenside));
    // Neither is the corner rook queried about its own square.
    assert!(!board.can_castle(Square::H1, CastleSide::Kingside));
    assert!(!board.can_castle(Square::A1, CastleSide::Queenside));
}

#[test]
fn promotion_through_the_public_move_path() {
    // A black pawn one step from its farthest rank.
    let board = setup("8/8/8/8/8/8/1p6/8");
    let pawn = board.select_legal(Square::B2).unwrap();
    let next = pawn.apply(Square::B1).unwrap();
    assert_eq!(
        next.at(Square::B1),
        Some(Piece::new(Player::Black, PieceKind::Queen))
    );
    assert_eq!(next.at(Square::B2), None);
    assert!(!next.promotion_due(Square::B1));
}

#[test]
fn check_detection_scans_the_whole_board() {
    // Knight check: geometry that no sliding scan would find.
    let board = setup("8/8/8/3n4/8/4K3/8/8");
    assert!(board.is_in_check(Player::White));
    assert!(!board.is_in_check(Player::Black));

    // Pawn check: only the forward diagonals attack.
    let board = setup("8/8/8/8/3p4/4K3/8/8");
    assert!(board.is_in_check(Player::White));
    let board = setup("8/8/8/8/4p3/4K3/8/8");
    assert!(!board.is_in_check(Player::White));
}
