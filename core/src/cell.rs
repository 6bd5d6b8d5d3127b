use serde::{Deserialize, Serialize};

/// Raw integer used for mine cells when a field is exchanged as plain numbers.
pub const MINE: i8 = -1;

/// Content of a single field cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldCell {
    Mine,
    Count(u8),
}

impl FieldCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }

    pub const fn from_raw(value: i8) -> Self {
        if value < 0 {
            Self::Mine
        } else {
            Self::Count(value as u8)
        }
    }

    pub const fn to_raw(self) -> i8 {
        match self {
            Self::Mine => MINE,
            Self::Count(count) => count as i8,
        }
    }
}

impl Default for FieldCell {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Player marker on a hidden cell, cycled by right clicks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagState {
    Clear,
    Flag,
    Question,
}

impl FlagState {
    /// Next state in the `Clear -> Flag -> Question -> Clear` cycle.
    pub const fn cycle(self) -> Self {
        match self {
            Self::Clear => Self::Flag,
            Self::Flag => Self::Question,
            Self::Question => Self::Clear,
        }
    }

    pub const fn is_marked(self) -> bool {
        !matches!(self, Self::Clear)
    }
}

impl Default for FlagState {
    fn default() -> Self {
        Self::Clear
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Questioned,
    Revealed(u8),
    Detonated,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
