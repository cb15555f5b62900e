//! Error types for the bcd_planner library.

use thiserror::Error;

use crate::geometry::Point;

/// Errors that can occur while planning a boustrophedon coverage trajectory.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// A polygon lacks a unique leftmost or rightmost vertex, has fewer than
    /// three vertices, or is not counter-clockwise.
    #[error("malformed polygon {index}: {reason}")]
    MalformedPolygon { index: usize, reason: String },

    /// The start point lies on or inside an obstacle, or outside the workspace.
    #[error("start point {point:?} is not in free space")]
    StartOutsideFree { point: Point },

    /// The caller-supplied start cell does not contain the start point.
    #[error("start cell {start_cell} does not contain start point {point:?}")]
    StartCellMismatch { start_cell: usize, point: Point },

    /// A cell is too narrow for the requested robot radius.
    ///
    /// This is a soft diagnostic (see [`crate::planner::PlanOutput::degenerate_cells`]),
    /// never returned as an `Err` from [`crate::planner::plan`] itself.
    #[error("cell {cell_index} is too narrow for robot radius {robot_radius} ({len} columns, need at least {min_len})")]
    DegenerateCell {
        cell_index: usize,
        robot_radius: i32,
        len: usize,
        min_len: usize,
    },

    /// An internal invariant was violated. Fatal: the planner aborts.
    #[error("internal invariant violation: {0}")]
    Internal(String),
}

/// Result type alias for bcd_planner operations.
pub type Result<T> = std::result::Result<T, PlannerError>;
