use poise::serenity_prelude::UserId;

/// The eight lines that win a game: rows, columns, diagonals
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mark::X => "❌",
            Mark::O => "⭕",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Move accepted, game continues with the given mark to play
    Continue { next: Mark },
    Won(Mark),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfRange(usize),
    Occupied(usize),
}

/// A 3x3 board. Marks are not bound to players: whoever clicks plays
/// the mark whose turn it is.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: [Option<Mark>; 9],
    turn: Mark,
    players: Vec<UserId>,
}

impl TicTacToe {
    pub fn new(starter: UserId) -> Self {
        Self {
            board: [None; 9],
            turn: Mark::X,
            players: vec![starter],
        }
    }

    pub fn board(&self) -> &[Option<Mark>; 9] {
        &self.board
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn players(&self) -> &[UserId] {
        &self.players
    }

    /// Place the current mark on `cell`. Rejected moves leave the board
    /// and the turn untouched.
    pub fn play(&mut self, cell: usize, by: UserId) -> Result<MoveOutcome, MoveError> {
        let slot = self.board.get_mut(cell).ok_or(MoveError::OutOfRange(cell))?;
        if slot.is_some() {
            return Err(MoveError::Occupied(cell));
        }
        *slot = Some(self.turn);

        if self.players.len() < 2 && !self.players.contains(&by) {
            self.players.push(by);
        }

        if let Some(winner) = self.winner() {
            return Ok(MoveOutcome::Won(winner));
        }
        if self.board.iter().all(Option::is_some) {
            return Ok(MoveOutcome::Draw);
        }

        self.turn = self.turn.other();
        Ok(MoveOutcome::Continue { next: self.turn })
    }

    fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| match self.board[a] {
            Some(mark) if self.board[b] == Some(mark) && self.board[c] == Some(mark) => Some(mark),
            _ => None,
        })
    }

    /// Board as three rows of emoji
    pub fn render(&self) -> String {
        self.board
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(Mark::emoji).unwrap_or("⬜"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> UserId {
        UserId::new(id)
    }

    fn play_all(game: &mut TicTacToe, cells: &[usize]) -> MoveOutcome {
        let mut last = None;
        for &cell in cells {
            last = Some(game.play(cell, user(1)).unwrap());
        }
        last.unwrap()
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = TicTacToe::new(user(1));
        assert_eq!(game.turn(), Mark::X);
        assert_eq!(game.play(4, user(1)), Ok(MoveOutcome::Continue { next: Mark::O }));
        assert_eq!(game.play(0, user(2)), Ok(MoveOutcome::Continue { next: Mark::X }));
        assert_eq!(game.board()[4], Some(Mark::X));
        assert_eq!(game.board()[0], Some(Mark::O));
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_state_change() {
        let mut game = TicTacToe::new(user(1));
        game.play(4, user(1)).unwrap();

        assert_eq!(game.play(4, user(2)), Err(MoveError::Occupied(4)));
        assert_eq!(game.turn(), Mark::O);
        assert_eq!(game.board()[4], Some(Mark::X));
        assert_eq!(game.board().iter().filter(|c| c.is_some()).count(), 1);

        assert_eq!(game.play(9, user(2)), Err(MoveError::OutOfRange(9)));
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            let mut game = TicTacToe::new(user(1));
            // X takes the line, O fills cells outside it
            let mut others = (0..9).filter(|c| !line.contains(c));
            let mut outcome = None;
            for (i, &cell) in line.iter().enumerate() {
                outcome = Some(game.play(cell, user(1)).unwrap());
                if i < 2 {
                    game.play(others.next().unwrap(), user(2)).unwrap();
                }
            }
            assert_eq!(outcome, Some(MoveOutcome::Won(Mark::X)), "line {:?}", line);
        }
    }

    #[test]
    fn test_o_can_win() {
        let mut game = TicTacToe::new(user(1));
        let outcome = play_all(&mut game, &[0, 3, 1, 4, 8, 5]);
        assert_eq!(outcome, MoveOutcome::Won(Mark::O));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut game = TicTacToe::new(user(1));
        // X O X / X O O / O X X
        let outcome = play_all(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(outcome, MoveOutcome::Draw);
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        let mut game = TicTacToe::new(user(1));
        // X O X / O X O / O X X -> X wins with the diagonal on the ninth move
        let outcome = play_all(&mut game, &[0, 1, 2, 3, 4, 5, 7, 6, 8]);
        assert_eq!(outcome, MoveOutcome::Won(Mark::X));
    }

    #[test]
    fn test_marks_are_not_bound_to_players() {
        // The same user may play both sides; this mirrors the live bot.
        let mut game = TicTacToe::new(user(1));
        assert!(game.play(0, user(1)).is_ok());
        assert!(game.play(1, user(1)).is_ok());
        assert_eq!(game.players(), &[user(1)]);

        game.play(2, user(7)).unwrap();
        game.play(3, user(8)).unwrap();
        assert_eq!(game.players(), &[user(1), user(7)]);
    }

    #[test]
    fn test_render() {
        let mut game = TicTacToe::new(user(1));
        game.play(0, user(1)).unwrap();
        game.play(4, user(1)).unwrap();
        assert_eq!(game.render(), "❌ ⬜ ⬜\n⬜ ⭕ ⬜\n⬜ ⬜ ⬜");
    }
}
