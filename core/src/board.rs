use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

/// Minefield together with the player's reveal and flag state.
///
/// The three grids share shape `(height, width)` and are addressed by a row-major
/// [`CellIndex`]. Query methods index the grids directly and panic on an index outside
/// the board; every mutating method validates the index and returns
/// [`GameError::InvalidCoords`] instead.
#[derive(Clone, Debug)]
pub struct MinesBoard {
    config: GameConfig,
    field: Array2<FieldCell>,
    revealed: Array2<bool>,
    flagged: Array2<FlagState>,
    flag_count: CellCount,
    random_mode: bool,
    state: BoardState,
    triggered_mine: Option<CellIndex>,
    picker: RandomNumberGenerator,
}

impl MinesBoard {
    /// Creates a board and places `config.mines` mines with a generator seeded by `seed`.
    pub fn new(config: GameConfig, random_mode: bool, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        let mut board = Self::empty(config, random_mode, seed)?;
        board.generate(config.mines)?;
        Ok(board)
    }

    /// Builds a board from raw cell values (`-1` for a mine) without recounting them.
    ///
    /// The mine total is taken from the values themselves.
    pub fn from_raw_field(
        (width, height): Coord2,
        values: &[i8],
        random_mode: bool,
        seed: u64,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if values.len() != usize::from(mult(width, height)) {
            return Err(GameError::InvalidBoardShape);
        }

        let mines = values.iter().filter(|&&value| value < 0).count();
        let config = GameConfig::new((width, height), mines as CellCount)?;
        let mut board = Self::empty(config, random_mode, seed)?;
        board.field = Array2::from_shape_vec(
            board.field.dim(),
            values.iter().copied().map(FieldCell::from_raw).collect(),
        )
        .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(board)
    }

    fn empty(config: GameConfig, random_mode: bool, seed: u64) -> Result<Self> {
        let shape = (usize::from(config.height()), usize::from(config.width()));
        let last_cell = u32::from(config.total_cells()).saturating_sub(1);
        Ok(Self {
            config,
            field: Array2::default(shape),
            revealed: Array2::default(shape),
            flagged: Array2::default(shape),
            flag_count: 0,
            random_mode,
            state: Default::default(),
            triggered_mine: None,
            picker: RandomNumberGenerator::new(seed, 0..=last_cell)?,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn total_cells(&self) -> usize {
        self.field.len()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    /// Number of cells currently carrying a flag (question marks excluded).
    pub fn flags(&self) -> CellCount {
        self.flag_count
    }

    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flag_count as isize)
    }

    pub fn random_mode(&self) -> bool {
        self.random_mode
    }

    pub fn set_random_mode(&mut self, random_mode: bool) {
        log::debug!("Random mode {}", if random_mode { "on" } else { "off" });
        self.random_mode = random_mode;
    }

    pub fn toggle_random_mode(&mut self) -> bool {
        self.set_random_mode(!self.random_mode);
        self.random_mode
    }

    pub fn is_mine(&self, index: CellIndex) -> bool {
        self.field[self.nd(index)].is_mine()
    }

    pub fn is_revealed(&self, index: CellIndex) -> bool {
        self.revealed[self.nd(index)]
    }

    pub fn flag_at(&self, index: CellIndex) -> FlagState {
        self.flagged[self.nd(index)]
    }

    pub fn field_at(&self, index: CellIndex) -> FieldCell {
        self.field[self.nd(index)]
    }

    /// Raw cell value, `-1` for a mine and the neighbor mine count otherwise.
    pub fn value_at(&self, index: CellIndex) -> i8 {
        self.field_at(index).to_raw()
    }

    pub fn cell_at(&self, index: CellIndex) -> CellView {
        let nd = self.nd(index);
        match (self.revealed[nd], self.field[nd], self.flagged[nd]) {
            (true, FieldCell::Mine, _) => CellView::Detonated,
            (true, FieldCell::Count(count), _) => CellView::Revealed(count),
            (false, _, FlagState::Flag) => CellView::Flagged,
            (false, _, FlagState::Question) => CellView::Questioned,
            (false, _, FlagState::Clear) => CellView::Hidden,
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|&&revealed| revealed).count()
    }

    /// Number of mines actually present in the field.
    pub fn mine_count(&self) -> usize {
        self.field.iter().filter(|cell| cell.is_mine()).count()
    }

    pub fn mine_indices(&self) -> Vec<CellIndex> {
        (0..self.total_cells()).filter(|&index| self.is_mine(index)).collect()
    }

    pub fn neighbors(&self, index: CellIndex) -> Result<NeighborIter> {
        let index = self.validate_index(index)?;
        Ok(self.field.iter_neighbors(index))
    }

    /// Clears the board and places `mines` mines at distinct random cells.
    ///
    /// Placement is rejection sampling: a random cell is drawn until it is not already
    /// a mine. Every safe cell then stores its neighbor mine count.
    pub fn generate(&mut self, mines: CellCount) -> Result<()> {
        if usize::from(mines) >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }

        self.field.fill(FieldCell::default());
        self.revealed.fill(false);
        self.flagged.fill(FlagState::Clear);
        self.flag_count = 0;
        self.state = BoardState::Ready;
        self.triggered_mine = None;

        let placed = self.place_mines(mines);
        self.config.mines = placed;
        self.recount();

        log::debug!(
            "Generated {}x{} field with {} mines",
            self.width(),
            self.height(),
            placed
        );
        Ok(())
    }

    /// Reveals a cell, flood-filling its zero region. Returns whether it was a mine.
    ///
    /// Revealing an already revealed cell changes nothing and returns `false`; a flagged
    /// or questioned cell is rejected with [`GameError::InvalidMove`].
    pub fn reveal(&mut self, index: CellIndex) -> Result<bool> {
        let index = self.validate_index(index)?;
        let nd = self.nd(index);

        if self.flagged[nd].is_marked() {
            return Err(GameError::InvalidMove);
        }
        if self.revealed[nd] {
            return Ok(false);
        }

        let cell = self.field[nd];
        self.revealed[nd] = true;
        log::debug!("Reveal cell {}, value: {:?}", index, cell);

        if cell.is_zero() {
            self.flood_fill(index);
        }

        Ok(cell.is_mine())
    }

    /// Cycles `Clear -> Flag -> Question -> Clear` and returns the new marker.
    ///
    /// Revealed cells cannot be marked; their (clear) marker is returned unchanged.
    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<FlagState> {
        let index = self.validate_index(index)?;
        let nd = self.nd(index);

        if self.revealed[nd] {
            log::trace!("Cell {} already revealed, marker unchanged", index);
            return Ok(self.flagged[nd]);
        }

        let previous = self.flagged[nd];
        let next = previous.cycle();
        self.flagged[nd] = next;

        match (previous, next) {
            (_, FlagState::Flag) => self.flag_count = self.flag_count.saturating_add(1),
            (FlagState::Flag, _) => self.flag_count = self.flag_count.saturating_sub(1),
            _ => {}
        }

        log::debug!("Cell {} marker {:?} -> {:?}", index, previous, next);
        Ok(next)
    }

    /// Whether every safe cell has been revealed. Flags play no part.
    pub fn has_won(&self) -> bool {
        self.field
            .iter()
            .zip(self.revealed.iter())
            .all(|(cell, &revealed)| cell.is_mine() || revealed)
    }

    /// Moves every mine that is not correctly flagged to a random hidden cell.
    ///
    /// Does nothing unless random mode is on. Counts are recomputed for the whole
    /// field and every revealed zero cell is expanded again. Returns how many mines
    /// were relocated.
    pub fn randomize_remaining(&mut self) -> CellCount {
        if !self.random_mode {
            log::trace!("Random mode off, field kept");
            return 0;
        }

        let mut kept: CellCount = 0;
        let mut freed: CellCount = 0;
        for (cell, flag) in self.field.iter_mut().zip(self.flagged.iter()) {
            match (*cell, *flag) {
                (FieldCell::Mine, FlagState::Flag) => {
                    kept += 1;
                    continue;
                }
                (FieldCell::Mine, _) => freed += 1,
                _ => {}
            }
            *cell = FieldCell::default();
        }

        let placed = self.place_mines(freed);
        if placed != freed {
            log::warn!(
                "Only {} of {} mines could be relocated, not enough hidden cells",
                placed,
                freed
            );
        }
        self.config.mines = kept + placed;
        self.recount();

        let zero_cells: Vec<CellIndex> = (0..self.total_cells())
            .filter(|&index| {
                let nd = self.nd(index);
                self.revealed[nd] && self.field[nd].is_zero()
            })
            .collect();
        let opened: usize = zero_cells
            .into_iter()
            .map(|index| self.flood_fill(index))
            .sum();

        log::debug!(
            "Relocated {} mines, kept {} flagged, {} cells opened by new zero regions",
            placed,
            kept,
            opened
        );
        placed
    }

    /// Plays a full move: reveal, win check and, in random mode, a reshuffle.
    pub fn play(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let index = self.validate_index(index)?;
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        if self.revealed[self.nd(index)] {
            return Ok(RevealOutcome::NoChange);
        }

        if self.reveal(index)? {
            self.triggered_mine = Some(index);
            self.end_game(false);
            return Ok(RevealOutcome::HitMine);
        }

        if !self.has_won() {
            self.mark_started();
            self.randomize_remaining();
        }

        if self.has_won() {
            self.end_game(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Reveals hidden, unmarked neighbors of `start` and keeps expanding from zero cells.
    fn flood_fill(&mut self, start: CellIndex) -> usize {
        let mut opened = 0;
        let mut visited = BTreeSet::from([start]);
        let mut to_visit: VecDeque<_> = self
            .field
            .iter_neighbors(start)
            .filter(|&pos| self.is_openable(pos))
            .collect();
        log::trace!(
            "Starting flood-fill from {}, initial neighbors: {:?}",
            start,
            to_visit
        );

        while let Some(visit) = to_visit.pop_front() {
            if !visited.insert(visit) {
                continue;
            }

            if !self.is_openable(visit) {
                log::trace!("Skipping cell {}", visit);
                continue;
            }

            let nd = self.nd(visit);
            self.revealed[nd] = true;
            opened += 1;
            log::trace!("Flood opened cell {}, value: {:?}", visit, self.field[nd]);

            if self.field[nd].is_zero() {
                to_visit.extend(
                    self.field
                        .iter_neighbors(visit)
                        .filter(|&pos| self.is_openable(pos))
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        opened
    }

    /// Rejection sampling over cells that are hidden and not already mines.
    fn place_mines(&mut self, count: CellCount) -> CellCount {
        let eligible = self
            .field
            .iter()
            .zip(self.revealed.iter())
            .filter(|&(cell, &revealed)| !cell.is_mine() && !revealed)
            .count();
        let target = usize::from(count).min(eligible);

        let mut placed = 0;
        while placed < target {
            let index = self.picker.generate() as CellIndex;
            if index >= self.total_cells() {
                continue;
            }

            let nd = self.nd(index);
            if self.field[nd].is_mine() || self.revealed[nd] {
                continue;
            }

            self.field[nd] = FieldCell::Mine;
            placed += 1;
        }

        placed as CellCount
    }

    /// Stores the neighbor mine count in every safe cell.
    fn recount(&mut self) {
        for index in 0..self.total_cells() {
            let nd = self.nd(index);
            if self.field[nd].is_mine() {
                continue;
            }

            let count = self
                .field
                .iter_neighbors(index)
                .filter(|&pos| self.field[self.nd(pos)].is_mine())
                .count();
            self.field[nd] = FieldCell::Count(count as u8);
        }
    }

    fn is_openable(&self, index: CellIndex) -> bool {
        let nd = self.nd(index);
        !self.revealed[nd] && !self.flagged[nd].is_marked()
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = BoardState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            BoardState::Won
        } else {
            BoardState::Lost
        };
        log::debug!("Game ended, state: {:?}", self.state);
    }

    fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.total_cells() {
            Ok(index)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn nd(&self, index: CellIndex) -> [usize; 2] {
        to_nd_index(index, self.config.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: i8 = MINE;

    fn board(size: Coord2, values: &[i8]) -> MinesBoard {
        MinesBoard::from_raw_field(size, values, false, 0).unwrap()
    }

    fn random_board(size: Coord2, values: &[i8], seed: u64) -> MinesBoard {
        MinesBoard::from_raw_field(size, values, true, seed).unwrap()
    }

    fn revealed(board: &MinesBoard) -> Vec<CellIndex> {
        (0..board.total_cells())
            .filter(|&index| board.is_revealed(index))
            .collect()
    }

    fn assert_counts_consistent(board: &MinesBoard) {
        for index in 0..board.total_cells() {
            if board.is_mine(index) {
                continue;
            }
            let expected = board
                .neighbors(index)
                .unwrap()
                .filter(|&pos| board.is_mine(pos))
                .count();
            assert_eq!(
                board.field_at(index),
                FieldCell::Count(expected as u8),
                "count mismatch at {index}"
            );
        }
    }

    #[test]
    fn generated_field_has_requested_mines() {
        let board = MinesBoard::new(Difficulty::Hard.config(), false, 7).unwrap();

        assert_eq!(board.total_cells(), 36 * 16);
        assert_eq!(board.mine_count(), 99);
        assert_eq!(board.total_mines(), 99);
        assert_counts_consistent(&board);
    }

    #[test]
    fn same_seed_same_field() {
        let config = Difficulty::Medium.config();
        let a = MinesBoard::new(config, false, 1234).unwrap();
        let b = MinesBoard::new(config, false, 1234).unwrap();

        assert_eq!(a.mine_indices(), b.mine_indices());
    }

    #[test]
    fn construction_rejects_bad_configs() {
        let err = MinesBoard::new(GameConfig::new_unchecked((0, 3), 0), false, 0).unwrap_err();
        assert_eq!(err, GameError::InvalidDimensions);

        let err = MinesBoard::new(GameConfig::new_unchecked((2, 2), 4), false, 0).unwrap_err();
        assert_eq!(err, GameError::TooManyMines);

        let err = MinesBoard::from_raw_field((2, 2), &[0, 0, 0], false, 0).unwrap_err();
        assert_eq!(err, GameError::InvalidBoardShape);
    }

    #[test]
    fn regenerate_resets_player_state() {
        let mut board = MinesBoard::new(GameConfig::new((5, 5), 3).unwrap(), false, 3).unwrap();
        let safe = (0..25).find(|&index| !board.is_mine(index)).unwrap();
        board.toggle_flag(safe).unwrap();

        board.generate(5).unwrap();

        assert_eq!(board.flags(), 0);
        assert_eq!(board.revealed_count(), 0);
        assert_eq!(board.mine_count(), 5);
        assert_eq!(board.generate(25), Err(GameError::TooManyMines));
    }

    #[test]
    fn reveal_zero_region_stops_at_border() {
        let mut board = board(
            (4, 4),
            &[
                0, 0, 1, M, //
                0, 0, 1, 1, //
                0, 0, 0, 0, //
                M, 1, 0, 0,
            ],
        );

        assert_eq!(board.reveal(0), Ok(false));

        for index in [0, 1, 4, 5, 6, 9, 10, 14] {
            assert!(board.is_revealed(index), "cell {index} should be revealed");
        }
        assert!(!board.is_revealed(3));
    }

    #[test]
    fn reveal_opens_exact_closure_on_consistent_field() {
        let mut board = board(
            (5, 4),
            &[
                0, 0, 1, M, 1, //
                0, 0, 1, 1, 1, //
                1, 1, 0, 0, 0, //
                M, 1, 0, 0, 0,
            ],
        );

        board.reveal(0).unwrap();

        // 6 and 12 touch diagonally, joining both zero regions
        assert_eq!(
            revealed(&board),
            [0, 1, 2, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 16, 17, 18, 19]
        );
        assert!(!board.is_revealed(3));
        assert!(!board.is_revealed(4));
        assert!(!board.is_revealed(15));
    }

    #[test]
    fn reveal_positive_cell_does_not_expand() {
        let mut board = board((3, 1), &[1, M, 1]);

        assert_eq!(board.reveal(0), Ok(false));
        assert_eq!(revealed(&board), [0]);
    }

    #[test]
    fn reveal_mine_returns_true() {
        let mut board = board((3, 3), &[0, M, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(board.reveal(1), Ok(true));
        assert_eq!(board.cell_at(1), CellView::Detonated);
    }

    #[test]
    fn reveal_twice_is_harmless() {
        let mut board = board((2, 1), &[1, M]);

        assert_eq!(board.reveal(0), Ok(false));
        assert_eq!(board.reveal(0), Ok(false));
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn reveal_flagged_or_questioned_cell_is_invalid() {
        let mut board = board((2, 2), &[0, 0, 0, 0]);

        board.toggle_flag(0).unwrap();
        assert_eq!(board.reveal(0), Err(GameError::InvalidMove));
        assert_eq!(board.revealed_count(), 0);

        board.toggle_flag(0).unwrap();
        assert_eq!(board.reveal(0), Err(GameError::InvalidMove));
        assert_eq!(board.revealed_count(), 0);

        board.toggle_flag(0).unwrap();
        assert_eq!(board.reveal(0), Ok(false));
        assert_eq!(board.revealed_count(), 4);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut board = board((2, 2), &[0, 0, 0, 0]);

        assert_eq!(board.reveal(4), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag(9), Err(GameError::InvalidCoords));
        assert_eq!(board.play(4), Err(GameError::InvalidCoords));
        assert!(board.neighbors(4).is_err());
    }

    #[test]
    fn flood_fill_skips_marked_cells() {
        let mut board = board((3, 1), &[0, 0, 0]);

        board.toggle_flag(2).unwrap();
        board.reveal(0).unwrap();

        assert_eq!(revealed(&board), [0, 1]);
        assert_eq!(board.cell_at(2), CellView::Flagged);
    }

    #[test]
    fn toggle_flag_cycles_and_counts() {
        let mut board = board((3, 3), &[M, 1, 0, 1, 1, 0, 0, 0, 0]);

        assert_eq!(board.toggle_flag(0), Ok(FlagState::Flag));
        assert_eq!(board.flags(), 1);
        assert_eq!(board.mines_left(), 0);

        assert_eq!(board.toggle_flag(0), Ok(FlagState::Question));
        assert_eq!(board.flags(), 0);
        assert_eq!(board.cell_at(0), CellView::Questioned);

        assert_eq!(board.toggle_flag(0), Ok(FlagState::Clear));
        assert_eq!(board.flags(), 0);
        assert_eq!(board.cell_at(0), CellView::Hidden);
    }

    #[test]
    fn flag_counter_ignores_correctness() {
        let mut board = board((3, 1), &[0, 0, 0]);

        board.toggle_flag(0).unwrap();
        board.toggle_flag(1).unwrap();

        assert_eq!(board.flags(), 2);
        assert_eq!(board.mines_left(), -2);
    }

    #[test]
    fn toggle_flag_on_revealed_cell_changes_nothing() {
        let mut board = board((2, 1), &[1, M]);

        board.reveal(0).unwrap();
        assert_eq!(board.toggle_flag(0), Ok(FlagState::Clear));
        assert_eq!(board.flags(), 0);
    }

    #[test]
    fn has_won_requires_every_safe_cell() {
        let mut board = board((3, 3), &[M, 1, 0, 1, 1, 0, 0, 0, 0]);

        board.reveal(1).unwrap();
        assert!(!board.has_won());

        for index in 0..9 {
            if !board.is_mine(index) {
                board.reveal(index).unwrap();
            }
        }

        assert!(board.has_won());
        assert_eq!(
            board.revealed_count(),
            board.total_cells() - usize::from(board.total_mines())
        );
    }

    #[test]
    fn has_won_on_generated_board() {
        let mut board = MinesBoard::new(GameConfig::new((3, 3), 1).unwrap(), false, 99).unwrap();

        for index in 0..9 {
            if !board.is_mine(index) {
                board.reveal(index).unwrap();
            }
        }

        assert!(board.has_won());
    }

    #[test]
    fn randomize_is_noop_without_random_mode() {
        let mut board = board((4, 1), &[M, 1, 0, 0]);

        assert_eq!(board.randomize_remaining(), 0);
        assert_eq!(board.mine_indices(), [0]);
    }

    #[test]
    fn randomize_keeps_correctly_flagged_mines() {
        for seed in 0..32 {
            let mut board = random_board(
                (4, 4),
                &[
                    M, 1, 0, 0, //
                    1, 2, 1, 1, //
                    0, 1, M, 1, //
                    0, 1, 1, 1,
                ],
                seed,
            );
            board.toggle_flag(0).unwrap();

            assert_eq!(board.randomize_remaining(), 1);

            assert!(board.is_mine(0));
            assert_eq!(board.mine_count(), 2);
            assert_eq!(board.total_mines(), 2);
            assert_counts_consistent(&board);
        }
    }

    #[test]
    fn randomize_frees_wrongly_flagged_and_questioned_mines() {
        let mut board = random_board((8, 1), &[M, M, 1, 0, 0, 0, 0, 0], 5);
        board.toggle_flag(0).unwrap();
        board.toggle_flag(0).unwrap();
        board.toggle_flag(4).unwrap();

        assert_eq!(board.randomize_remaining(), 2);
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.flags(), 1);
    }

    #[test]
    fn randomize_never_mines_revealed_cells() {
        for seed in 0..32 {
            let mut board = random_board((3, 3), &[M, 1, 0, 1, 1, 0, 0, 0, 0], seed);
            board.reveal(4).unwrap();
            board.reveal(1).unwrap();

            board.randomize_remaining();

            assert_eq!(board.mine_count(), 1);
            for index in revealed(&board) {
                assert!(!board.is_mine(index), "revealed cell {index} became a mine");
            }
            assert_counts_consistent(&board);
        }
    }

    #[test]
    fn randomize_expands_new_zero_regions() {
        for seed in 0..16 {
            let mut board = random_board((5, 5), &[0; 25], seed);
            board.generate(1).unwrap();
            let safe = (0..25).find(|&index| !board.is_mine(index)).unwrap();
            board.reveal(safe).unwrap();

            board.randomize_remaining();

            for index in revealed(&board) {
                if board.field_at(index).is_zero() {
                    for pos in board.neighbors(index).unwrap() {
                        assert!(board.is_revealed(pos), "neighbor {pos} of zero {index}");
                    }
                }
            }
        }
    }

    #[test]
    fn play_hitting_mine_loses() {
        let mut board = board((2, 2), &[M, 1, 1, 1]);

        assert_eq!(board.play(0), Ok(RevealOutcome::HitMine));
        assert_eq!(board.state(), BoardState::Lost);
        assert_eq!(board.triggered_mine(), Some(0));
        assert_eq!(board.play(1), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn play_until_won() {
        let mut board = board((3, 1), &[1, M, 1]);

        assert_eq!(board.play(0), Ok(RevealOutcome::Revealed));
        assert_eq!(board.state(), BoardState::Active);
        assert_eq!(board.play(0), Ok(RevealOutcome::NoChange));
        assert_eq!(board.play(2), Ok(RevealOutcome::Won));
        assert!(board.is_finished());
    }

    #[test]
    fn play_on_flagged_cell_is_invalid_and_keeps_state() {
        let mut board = board((3, 1), &[1, M, 1]);

        board.toggle_flag(0).unwrap();
        assert_eq!(board.play(0), Err(GameError::InvalidMove));
        assert!(board.state().is_ready());
    }

    #[test]
    fn play_in_random_mode_reshuffles_after_safe_move() {
        let mut board = random_board((6, 6), &[0; 36], 11);
        board.generate(6).unwrap();
        let safe = (0..36).find(|&index| !board.is_mine(index)).unwrap();

        let outcome = board.play(safe).unwrap();

        assert!(matches!(outcome, RevealOutcome::Revealed | RevealOutcome::Won));
        assert_eq!(board.mine_count(), 6);
        for index in revealed(&board) {
            assert!(!board.is_mine(index));
        }
        assert_counts_consistent(&board);
    }

    #[test]
    fn random_mode_toggles() {
        let mut board = board((2, 1), &[0, 0]);

        assert!(!board.random_mode());
        assert!(board.toggle_random_mode());
        board.set_random_mode(false);
        assert!(!board.random_mode());
    }
}
