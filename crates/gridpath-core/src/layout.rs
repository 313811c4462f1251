//! Text layouts for boards.
//!
//! A layout is an ASCII picture of a [`Maze`], one character per cell and one
//! line per row:
//!
//! ```text
//! S..#.
//! .#.#.
//! .#w.E
//! ```
//!
//! `.` empty, `#` wall, `S` start, `E` end, `w` weighted. Search markings
//! render as `o` (frontier), `-` (visited) and `*` (path) and are accepted
//! back on input. Leading and trailing whitespace of the whole string is
//! trimmed, individual lines are not.

use std::fmt;

use crate::cell::CellValue;
use crate::geom::Point;
use crate::maze::Maze;

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A row's width differs from the first row's.
    InconsistentSize { row: i32, expected: i32, found: i32 },
    /// A character outside the layout alphabet.
    InvalidChar { ch: char, pos: Point },
    /// A second `S` or `E`.
    DuplicateEndpoint { value: CellValue, pos: Point },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize {
                row,
                expected,
                found,
            } => write!(
                f,
                "layout: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateEndpoint { value, pos } => {
                write!(f, "layout: second {value:?} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

impl Maze {
    /// Build a board from a text layout.
    pub fn from_layout(s: &str) -> Result<Maze, LayoutError> {
        let s = s.trim();
        let rows: Vec<&str> = if s.is_empty() {
            Vec::new()
        } else {
            s.lines().collect()
        };
        let width = rows.first().map_or(0, |r| r.chars().count() as i32);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count() as i32;
            if found != width {
                return Err(LayoutError::InconsistentSize {
                    row: y as i32,
                    expected: width,
                    found,
                });
            }
        }

        let mut maze = Maze::new(width, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let Some(value) = CellValue::from_char(ch) else {
                    return Err(LayoutError::InvalidChar { ch, pos });
                };
                let taken = match value {
                    CellValue::Start => maze.start().is_some(),
                    CellValue::End => maze.end().is_some(),
                    _ => false,
                };
                if taken {
                    return Err(LayoutError::DuplicateEndpoint { value, pos });
                }
                match value {
                    CellValue::Empty => {}
                    CellValue::Frontier | CellValue::Visited | CellValue::Path => {
                        maze.mark(pos, value);
                    }
                    _ => {
                        maze.set_cell(pos, value);
                    }
                }
            }
        }
        Ok(maze)
    }

    /// Render the board as a text layout (rows joined by `'\n'`).
    pub fn to_layout(&self) -> String {
        let w = self.width().max(0) as usize;
        let mut out = String::with_capacity(self.cells().len() + self.height().max(0) as usize);
        for (i, c) in self.cells().iter().enumerate() {
            if i > 0 && i % w == 0 {
                out.push('\n');
            }
            out.push(c.to_char());
        }
        out
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_layout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: &str = "
S..#.
.#.#.
.#w.E
";

    #[test]
    fn parse_board() {
        let m = Maze::from_layout(BOARD).unwrap();
        assert_eq!(m.width(), 5);
        assert_eq!(m.height(), 3);
        assert_eq!(m.start(), Some(Point::new(0, 0)));
        assert_eq!(m.end(), Some(Point::new(4, 2)));
        assert_eq!(m.count(CellValue::Wall), 4);
        assert_eq!(m.at(Point::new(2, 2)), Some(CellValue::Weighted));
    }

    #[test]
    fn layout_survives_rendering() {
        let m = Maze::from_layout(BOARD).unwrap();
        assert_eq!(m.to_layout(), BOARD.trim());
        assert_eq!(m.to_string(), BOARD.trim());
    }

    #[test]
    fn search_markings_are_accepted() {
        let m = Maze::from_layout("So-*E").unwrap();
        assert_eq!(m.at(Point::new(1, 0)), Some(CellValue::Frontier));
        assert_eq!(m.at(Point::new(3, 0)), Some(CellValue::Path));
    }

    #[test]
    fn inconsistent_rows_are_rejected() {
        let err = Maze::from_layout("...\n..\n...").unwrap_err();
        assert_eq!(
            err,
            LayoutError::InconsistentSize {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn invalid_char_is_rejected() {
        let err = Maze::from_layout("..\n.x").unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidChar {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn duplicate_start_is_rejected() {
        let err = Maze::from_layout("S.S").unwrap_err();
        assert_eq!(
            err,
            LayoutError::DuplicateEndpoint {
                value: CellValue::Start,
                pos: Point::new(2, 0)
            }
        );
    }

    #[test]
    fn empty_layout_is_an_empty_board() {
        let m = Maze::from_layout("  \n ").unwrap();
        assert_eq!(m.cells().len(), 0);
        assert_eq!(m.to_layout(), "");
    }
}
