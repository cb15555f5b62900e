//! Scenario configuration: the workspace, obstacles, and starting pose
//! [`crate::planner::plan`] is run against, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Polygon};

/// A complete planning problem: a rectangular workspace, its obstacle
/// polygons, and where the robot starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    pub polygons: Vec<Polygon>,
    pub start: Point,
    /// Index into the decomposed cell graph the caller asserts `start`
    /// falls within. Validated against the decomposition in
    /// [`crate::planner::plan`] rather than trusted blindly.
    pub start_cell_index: usize,
    pub robot_radius: i32,
}

impl Scenario {
    /// A worked two-diamond 400x400 scene, used as the built-in demo
    /// scenario.
    pub fn demo() -> Self {
        Self {
            width: 400,
            height: 400,
            polygons: vec![
                vec![
                    Point::new(200, 300),
                    Point::new(300, 200),
                    Point::new(200, 100),
                    Point::new(100, 200),
                ],
                vec![
                    Point::new(300, 350),
                    Point::new(350, 300),
                    Point::new(300, 250),
                    Point::new(250, 300),
                ],
            ],
            start: Point::new(150, 100),
            start_cell_index: 1,
            robot_radius: 5,
        }
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
