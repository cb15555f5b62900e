//! Top-level orchestration: decomposition, cell visitation, and trajectory
//! assembly.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::boustrophedon::boustrophedon_path;
use crate::cell::{decompose, CellGraph};
use crate::corner::Corner;
use crate::error::{PlannerError, Result};
use crate::geometry::Point;
use crate::linker::{find_linking_path, find_next_entrance, path_initialization};
use crate::scenario::Scenario;

/// The full output of a planning run: the trajectory the robot should
/// follow, the decomposed cell graph it was computed against (useful for
/// inspection and visualization), and any non-fatal degenerate-cell
/// warnings encountered along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutput {
    pub trajectory: Vec<Point>,
    pub cell_graph: CellGraph,
    /// Cells too narrow for `robot_radius` to sweep, collected rather
    /// than aborting the plan. Each such
    /// cell still contributes a pass-through waypoint if its corners are
    /// computable at all.
    pub degenerate_cells: Vec<PlannerError>,
}

/// Runs the full pipeline — decomposition, DFS cell visitation, per-cell
/// boustrophedon sweeps, and inter-cell linking — against `scenario`.
#[instrument(skip(scenario), fields(width = scenario.width, height = scenario.height, num_polygons = scenario.polygons.len()))]
pub fn plan(scenario: &Scenario) -> Result<PlanOutput> {
    let mut graph = decompose(scenario.width, scenario.height, &scenario.polygons)?;
    info!(num_cells = graph.len(), "decomposition complete");

    validate_start(&graph, scenario)?;

    let visit_order = crate::visitor::visit(&mut graph, scenario.start_cell_index);
    // `visit` returns cells most-recently-visited first (push-front
    // semantics); the cleaning schedule runs in the opposite order, start
    // cell first.
    let cleaning_schedule: Vec<usize> = visit_order.into_iter().rev().collect();
    info!(schedule_len = cleaning_schedule.len(), "visit order resolved");

    let mut trajectory = path_initialization(
        scenario.start,
        graph.get(scenario.start_cell_index),
        scenario.robot_radius,
    );

    let mut corner = Corner::TopLeft;
    let mut degenerate_cells = Vec::new();

    for (pos, &cell_index) in cleaning_schedule.iter().enumerate() {
        let cell = graph.get(cell_index).clone();

        if !cell.is_cleaned && !cell.fits_robot(scenario.robot_radius) {
            let diagnostic = PlannerError::DegenerateCell {
                cell_index,
                robot_radius: scenario.robot_radius,
                len: cell.width(),
                min_len: crate::cell::CellNode::min_width(scenario.robot_radius),
            };
            warn!(%diagnostic, "cell too narrow for robot radius, skipping interior sweep");
            degenerate_cells.push(diagnostic);
        }

        let sub_path = boustrophedon_path(&cell, corner, scenario.robot_radius);
        trajectory.extend_from_slice(&sub_path);
        graph.mark_cleaned(cell_index);

        if let Some(&next_index) = cleaning_schedule.get(pos + 1) {
            let curr_exit = *sub_path.last().or_else(|| trajectory.last()).ok_or_else(|| {
                PlannerError::Internal("trajectory is empty at a linking point".to_string())
            })?;
            let next_cell = graph.get(next_index).clone();

            let (next_entrance, next_corner) =
                find_next_entrance(curr_exit, &next_cell, scenario.robot_radius)?;
            let link = find_linking_path(
                curr_exit,
                next_entrance,
                &cell,
                &next_cell,
                scenario.robot_radius,
            )?;
            trajectory.extend(link);
            corner = next_corner;
        }
    }

    info!(
        trajectory_len = trajectory.len(),
        num_degenerate = degenerate_cells.len(),
        "plan complete"
    );

    Ok(PlanOutput {
        trajectory,
        cell_graph: graph,
        degenerate_cells,
    })
}

fn validate_start(graph: &CellGraph, scenario: &Scenario) -> Result<()> {
    if scenario.start_cell_index >= graph.len() {
        return Err(PlannerError::StartCellMismatch {
            start_cell: scenario.start_cell_index,
            point: scenario.start,
        });
    }

    match graph.cell_containing(scenario.start) {
        None => Err(PlannerError::StartOutsideFree {
            point: scenario.start,
        }),
        Some(actual) if actual != scenario.start_cell_index => Err(PlannerError::StartCellMismatch {
            start_cell: scenario.start_cell_index,
            point: scenario.start,
        }),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scenario_plans_successfully() {
        let scenario = Scenario::demo();
        let output = plan(&scenario).unwrap();
        assert_eq!(output.trajectory[0], scenario.start);
        assert!(!output.trajectory.is_empty());
        assert_eq!(output.cell_graph.len(), 6);
    }

    #[test]
    fn start_outside_free_space_is_rejected() {
        let mut scenario = Scenario::demo();
        scenario.start = Point::new(200, 200); // inside the first diamond
        assert!(matches!(
            plan(&scenario),
            Err(PlannerError::StartOutsideFree { .. })
        ));
    }

    #[test]
    fn start_cell_mismatch_is_rejected() {
        let mut scenario = Scenario::demo();
        scenario.start_cell_index = 0;
        assert!(matches!(
            plan(&scenario),
            Err(PlannerError::StartCellMismatch { .. })
        ));
    }

    #[test]
    fn every_cell_is_cleaned_after_planning() {
        let scenario = Scenario::demo();
        let output = plan(&scenario).unwrap();
        assert!(output.cell_graph.cells().iter().all(|c| c.is_cleaned));
    }
}
