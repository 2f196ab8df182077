pub mod mock_board;
