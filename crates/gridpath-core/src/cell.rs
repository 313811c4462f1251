//! The [`CellValue`] tag stored per board coordinate, and the paint
//! [`Tool`]s a user applies to it.

/// Classification of a single board cell.
///
/// `Wall`, `Start`, `End` and `Weighted` are painted by the user. `Frontier`,
/// `Visited` and `Path` are search markings written by a running solver.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    /// Discovered and queued, not yet expanded.
    Frontier,
    /// Expanded.
    Visited,
    /// On the reconstructed shortest path.
    Path,
    /// Traversable with an elevated cost.
    Weighted,
}

impl CellValue {
    /// Whether this is the start or end marker.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Whether this value was written by a search rather than painted.
    #[inline]
    pub const fn is_search_marking(self) -> bool {
        matches!(self, Self::Frontier | Self::Visited | Self::Path)
    }

    /// Whether a start or end marker may be dropped onto a cell holding this
    /// value.
    #[inline]
    pub const fn accepts_endpoint(self) -> bool {
        matches!(self, Self::Empty | Self::Frontier | Self::Visited)
    }

    /// Single-character form used by text layouts.
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Frontier => 'o',
            Self::Visited => '-',
            Self::Path => '*',
            Self::Weighted => 'w',
        }
    }

    /// Inverse of [`to_char`](Self::to_char).
    pub const fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '.' => Self::Empty,
            '#' => Self::Wall,
            'S' => Self::Start,
            'E' => Self::End,
            'o' => Self::Frontier,
            '-' => Self::Visited,
            '*' => Self::Path,
            'w' => Self::Weighted,
            _ => return None,
        })
    }
}

/// A paint request from the user interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tool {
    Wall,
    Start,
    End,
    Weighted,
    /// Reset the cell to `Empty`, whatever it holds.
    Erase,
}

impl Tool {
    /// The cell value this tool paints.
    pub const fn value(self) -> CellValue {
        match self {
            Self::Wall => CellValue::Wall,
            Self::Start => CellValue::Start,
            Self::End => CellValue::End,
            Self::Weighted => CellValue::Weighted,
            Self::Erase => CellValue::Empty,
        }
    }
}
