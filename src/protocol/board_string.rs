//! Ring-ordered board string.
//!
//! A galaxy flattens to one space-separated line of tile ids, walked ring by
//! ring outward from the center (the center itself is omitted). Ring `r`
//! holds `6r` cells. Each ring is walked as two half-rings of `3r` cells:
//!
//! 1. start at `(R, R - r)`, step `x+1` r times, `y+1` r times, then
//!    `(x-1, y+1)` r-1 times;
//! 2. start at `(R, R + r)`, step `x-1` r times, `y-1` r times, then
//!    `(x+1, y-1)` r-1 times.
//!
//! `R` is the galaxy radius. Home systems and any other non-catalog cell
//! are written as `0`.

use crate::board::Galaxy;

/// Errors that can occur while parsing a board string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardStringError {
    #[error("expected {expected} tiles for radius {radius}, got {got}")]
    WrongTileCount {
        radius: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid tile id '{0}'")]
    InvalidToken(String),
}

/// Grid coordinates in board-string order for a galaxy of `radius`.
pub fn ring_positions(radius: usize) -> Vec<(usize, usize)> {
    let center = radius;
    let mut out = Vec::with_capacity(3 * radius * (radius + 1));
    for r in 1..=radius {
        // First half-ring.
        let (mut x, mut y) = (center, center - r);
        out.push((x, y));
        for _ in 0..r {
            x += 1;
            out.push((x, y));
        }
        for _ in 0..r {
            y += 1;
            out.push((x, y));
        }
        for _ in 1..r {
            x -= 1;
            y += 1;
            out.push((x, y));
        }

        // Second half-ring.
        let (mut x, mut y) = (center, center + r);
        out.push((x, y));
        for _ in 0..r {
            x -= 1;
            out.push((x, y));
        }
        for _ in 0..r {
            y -= 1;
            out.push((x, y));
        }
        for _ in 1..r {
            x += 1;
            y -= 1;
            out.push((x, y));
        }
    }
    out
}

/// Flattens `galaxy` into its board string.
pub fn encode_board_string(galaxy: &Galaxy) -> String {
    ring_positions(galaxy.radius())
        .into_iter()
        .map(|(x, y)| match galaxy.tile(x, y) {
            Some(t) if t.id > 0 => t.id.to_string(),
            _ => "0".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A parsed board string: tile ids keyed back to grid coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardString {
    radius: usize,
    ids: Vec<i32>,
}

impl BoardString {
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Tile ids in board-string order.
    pub fn ids(&self) -> &[i32] {
        &self.ids
    }

    /// Tile id at a grid coordinate, or `None` for the center and cells
    /// outside the walk.
    pub fn tile_at(&self, x: usize, y: usize) -> Option<i32> {
        ring_positions(self.radius)
            .iter()
            .position(|&p| p == (x, y))
            .map(|i| self.ids[i])
    }
}

/// Parses a board string for a galaxy of `radius`.
pub fn parse_board_string(s: &str, radius: usize) -> Result<BoardString, BoardStringError> {
    let ids = s
        .split_whitespace()
        .map(|tok| {
            tok.parse::<i32>()
                .ok()
                .filter(|&id| id >= 0)
                .ok_or_else(|| BoardStringError::InvalidToken(tok.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let expected = 3 * radius * (radius + 1);
    if ids.len() != expected {
        return Err(BoardStringError::WrongTileCount {
            radius,
            expected,
            got: ids.len(),
        });
    }
    Ok(BoardString { radius, ids })
}
