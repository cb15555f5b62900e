//! The four safe-corner indicators used by the boustrophedon generator and
//! the linker.

use serde::{Deserialize, Serialize};

/// Which inset corner of a cell a traversal starts (or ends) at.
///
/// Order matters: [`Corner::corner_points`](crate::cell::CellNode::corner_points)
/// returns points in this exact order (`TopLeft`, `BottomLeft`,
/// `BottomRight`, `TopRight` — counter-clockwise), so that a corner's
/// `usize` index doubles as the `corner_indicator` threaded through
/// [`crate::linker::find_next_entrance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    BottomLeft,
    BottomRight,
    TopRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopRight,
    ];

    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::BottomLeft => 1,
            Corner::BottomRight => 2,
            Corner::TopRight => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }
}
