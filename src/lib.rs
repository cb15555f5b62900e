//! # bcd_planner
//!
//! A boustrophedon cellular decomposition (BCD) coverage planner for a
//! disk-shaped mobile robot operating in a bounded rectangular workspace
//! populated by convex polygonal obstacles.
//!
//! Given the workspace dimensions, a list of convex obstacle polygons, a
//! start position, and a robot radius, [`planner::plan`] produces an
//! ordered sequence of grid points visiting every reachable free cell, by
//! sweep-line decomposing the free space into vertically-monotone cells
//! (see [`cell`]), scheduling a DFS visit over the resulting adjacency
//! graph (see [`visitor`]), sweeping each cell with a zigzag path (see
//! [`boustrophedon`]), and stitching consecutive cells together with a
//! wall-following linker (see [`linker`]).
//!
//! ## Example
//!
//! ```rust
//! use bcd_planner::scenario::Scenario;
//! use bcd_planner::planner;
//!
//! let scenario = Scenario::demo();
//! let output = planner::plan(&scenario).unwrap();
//! assert_eq!(output.trajectory[0], scenario.start);
//! ```
//!
//! ## Non-goals
//!
//! This planner does not attempt obstacle avoidance for non-convex
//! polygons, coverage-path optimality, dynamic replanning, multi-robot
//! coordination, or trajectory smoothing. See each module's docs for the
//! specific edge cases it does and does not handle.

pub mod boustrophedon;
pub mod cell;
pub mod corner;
pub mod error;
pub mod event;
pub mod geometry;
pub mod linker;
pub mod planner;
pub mod scenario;
pub mod slice;
pub mod visitor;

pub mod prelude {
    pub use crate::boustrophedon::boustrophedon_path;
    pub use crate::cell::{decompose, CellGraph, CellNode};
    pub use crate::corner::Corner;
    pub use crate::error::{PlannerError, Result};
    pub use crate::geometry::{Point, Polygon};
    pub use crate::planner::{plan, PlanOutput};
    pub use crate::scenario::Scenario;
}
