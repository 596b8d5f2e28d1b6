use super::*;

#[test]
fn test_mark_opponent() {
    assert_eq!(Mark::X.opponent(), Mark::O);
    assert_eq!(Mark::O.opponent(), Mark::X);
    assert_eq!(Mark::Empty.opponent(), Mark::Empty);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(1, 1); // Center
    assert_eq!(pos.to_index(), 4);
    assert_eq!(Pos::CENTER, pos);

    let pos2 = Pos::from_index(7);
    assert_eq!(pos2.row, 2);
    assert_eq!(pos2.col, 1);
}

#[test]
fn test_pos_try_from_index() {
    assert_eq!(Pos::try_from_index(8), Some(Pos::new(2, 2)));
    assert_eq!(Pos::try_from_index(9), None);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(2, 2));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, 3));
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 3);
    assert_eq!(TOTAL_CELLS, 9);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 2);
    let pos2 = Pos::new(1, 0);
    assert!(pos1 < pos2);
    assert_eq!(Pos::all().count(), 9);
    assert!(Pos::all().zip(Pos::all().skip(1)).all(|(a, b)| a < b));
}

#[test]
fn test_place_and_remove() {
    let mut board = Board::new();
    let pos = Pos::from_index(3);

    board.place(pos, Mark::X);
    assert_eq!(board.get(pos), Mark::X);
    assert!(!board.is_empty(pos));

    // Overwriting replaces rather than stacking
    board.place(pos, Mark::O);
    assert_eq!(board.get(pos), Mark::O);
    assert!(!board.x.get(pos));

    board.remove(pos);
    assert!(board.is_empty(pos));
    assert!(board.is_board_empty());
}

#[test]
fn test_empty_cells_ascending() {
    let board: Board = "X.O|.X.|O..".parse().unwrap();
    let empties: Vec<usize> = board.empty_cells().map(Pos::to_index).collect();
    assert_eq!(empties, vec![1, 3, 5, 7, 8]);
    assert_eq!(board.empty_count(), 5);
    assert_eq!(board.mark_count(), 4);
}

#[test]
fn test_parse_fixture_forms() {
    let a: Board = "XX__O____".parse().unwrap();
    let b: Board = "xx.\n.o.\n...".parse().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.get(Pos::from_index(0)), Mark::X);
    assert_eq!(a.get(Pos::from_index(4)), Mark::O);
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        "XXO".parse::<Board>(),
        Err(crate::error::ParseBoardError::Length(3))
    );
    assert_eq!(
        "XX..Z....".parse::<Board>(),
        Err(crate::error::ParseBoardError::InvalidChar('Z'))
    );
}

#[test]
fn test_display_grid() {
    let board: Board = "XO.......".parse().unwrap();
    assert_eq!(board.to_string(), "XO.\n...\n...");
}

#[test]
fn test_cells_round_trip() {
    let board: Board = "XOX.O..X.".parse().unwrap();
    assert_eq!(Board::from_cells(board.cells()), board);
}
