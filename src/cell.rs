//! Cells, the cell graph, and the sweep-line decomposition algorithm
//! decomposition algorithm.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::error::{PlannerError, Result};
use crate::event::{event_list_generator, Event, EventKind};
use crate::geometry::{Point, Polygon};
use crate::slice::group_into_slices;

/// A vertically-monotone free-space cell, bounded above by `ceiling` and
/// below by `floor`.
///
/// `ceiling.len() == floor.len()` always holds, the two chains share an
/// x-sequence that is strictly increasing, and `ceiling[i].y <= floor[i].y`
/// for every column `i`. `index` is assigned once, at insertion into a
/// [`CellGraph`], and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellNode {
    pub index: usize,
    pub ceiling: Vec<Point>,
    pub floor: Vec<Point>,
    /// Adjacent cell indices. Order is load-bearing: the DFS visitor
    /// The DFS visitor always tries `neighbor_indices[0]` first, so the
    /// front/back push order established during decomposition directly
    /// determines visit order.
    pub neighbor_indices: VecDeque<usize>,
    pub parent_index: Option<usize>,
    pub is_visited: bool,
    pub is_cleaned: bool,
}

impl CellNode {
    /// Number of columns spanned by this cell.
    pub fn width(&self) -> usize {
        self.ceiling.len()
    }

    /// Whether this cell has at least `2*(robot_radius+1)+1` columns, the
    /// minimum needed for the boustrophedon generator's interior sweep to
    /// emit any points (the `DegenerateCell` edge policy). A cell can
    /// fail this and still have valid corner points — see
    /// [`CellNode::corner_points`].
    pub fn fits_robot(&self, robot_radius: i32) -> bool {
        self.width() >= Self::min_width(robot_radius)
    }

    pub fn min_width(robot_radius: i32) -> usize {
        2 * (robot_radius as usize + 1) + 1
    }

    /// The narrower bound corner points actually need: enough columns for
    /// the inset index `robot_radius + 1` to exist on both ends.
    fn min_width_for_corners(robot_radius: i32) -> usize {
        robot_radius as usize + 2
    }

    /// The four safe corner points, inset by `robot_radius + 1` on each
    /// axis, in `[TopLeft, BottomLeft, BottomRight, TopRight]` order.
    ///
    /// This needs a weaker bound than [`CellNode::fits_robot`]: a cell can
    /// be too narrow for the interior sweep to produce any points while
    /// still having well-defined corners, which is exactly the scenario
    /// the linker needs to still connect entrance and exit for a
    /// degenerate cell. Returns `None` only when even
    /// the inset index would be out of bounds.
    pub fn corner_points(&self, robot_radius: i32) -> Option<[Point; 4]> {
        if self.width() < Self::min_width_for_corners(robot_radius) {
            return None;
        }
        let inset = (robot_radius + 1) as usize;
        let n = self.width();
        let r1 = robot_radius + 1;

        Some([
            Point::new(self.ceiling[inset].x, self.ceiling[inset].y + r1),
            Point::new(self.floor[inset].x, self.floor[inset].y - r1),
            Point::new(
                self.floor[n - 1 - inset].x,
                self.floor[n - 1 - inset].y - r1,
            ),
            Point::new(
                self.ceiling[n - 1 - inset].x,
                self.ceiling[n - 1 - inset].y + r1,
            ),
        ])
    }
}

/// The arena of [`CellNode`]s produced by a decomposition run, with
/// adjacency tracked purely by index (no owning back-references, so the
/// genuinely cyclic cell graph never needs `Rc`/`RefCell`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellGraph {
    cells: Vec<CellNode>,
}

impl CellGraph {
    fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> &CellNode {
        &self.cells[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut CellNode {
        &mut self.cells[index]
    }

    /// Marks a cell visited, for use by the DFS visitor.
    pub fn mark_visited(&mut self, index: usize) {
        self.cells[index].is_visited = true;
    }

    /// Records a cell's parent in the DFS tree.
    pub fn set_parent(&mut self, index: usize, parent: usize) {
        self.cells[index].parent_index = Some(parent);
    }

    /// Marks a cell as swept, so later boustrophedon passes over it become
    /// pass-through waypoints.
    pub fn mark_cleaned(&mut self, index: usize) {
        self.cells[index].is_cleaned = true;
    }

    pub fn cells(&self) -> &[CellNode] {
        &self.cells
    }

    /// Returns the index of the cell whose span contains `point.x`, and
    /// whose ceiling/floor at that column straddle `point.y`. Used to
    /// validate a caller-supplied start cell (`StartCellMismatch`).
    pub fn cell_containing(&self, point: Point) -> Option<usize> {
        self.cells.iter().find_map(|cell| {
            let col = cell
                .ceiling
                .iter()
                .position(|p| p.x == point.x)?;
            if cell.ceiling[col].y <= point.y && point.y <= cell.floor[col].y {
                Some(cell.index)
            } else {
                None
            }
        })
    }

    fn push_cell(&mut self, ceiling: Vec<Point>, floor: Vec<Point>) -> usize {
        let index = self.cells.len();
        self.cells.push(CellNode {
            index,
            ceiling,
            floor,
            neighbor_indices: VecDeque::new(),
            parent_index: None,
            is_visited: false,
            is_cleaned: false,
        });
        index
    }

    fn append_ceiling(&mut self, index: usize, point: Point) {
        self.cells[index].ceiling.push(point);
    }

    fn append_floor(&mut self, index: usize, point: Point) {
        self.cells[index].floor.push(point);
    }

    /// `Open`: an `In` event splits the active cell `curr` into a `top` and
    /// `bottom` child. Neighbor push order is load-bearing: both children
    /// reference `curr`, `curr` gets `bottom` pushed to the front *after*
    /// `top`, so `bottom` ends up first.
    fn open(&mut self, curr: usize, in_point: Point, c: Point, f: Point) -> (usize, usize) {
        let top = self.push_cell(vec![c], vec![in_point]);
        let bottom = self.push_cell(vec![in_point], vec![f]);

        self.cells[top].neighbor_indices.push_back(curr);
        self.cells[bottom].neighbor_indices.push_front(curr);

        self.cells[curr].neighbor_indices.push_front(top);
        self.cells[curr].neighbor_indices.push_front(bottom);

        (top, bottom)
    }

    /// `Close`: an `Out` event merges adjacent active cells `top`/`bottom`
    /// into one new cell. Neighbor push order is load-bearing, mirroring
    /// `open`'s front/back convention.
    fn close(&mut self, top: usize, bottom: usize, c: Point, f: Point) -> usize {
        let merged = self.push_cell(vec![c], vec![f]);

        self.cells[merged].neighbor_indices.push_back(top);
        self.cells[merged].neighbor_indices.push_back(bottom);

        self.cells[top].neighbor_indices.push_front(merged);
        self.cells[bottom].neighbor_indices.push_back(merged);

        merged
    }
}

/// Runs the full sweep-line cellular decomposition over `polygons` within a
/// `width x height` workspace.
///
/// With no obstacles, emits a single cell spanning the whole workspace.
#[instrument(skip(polygons), fields(num_polygons = polygons.len()))]
pub fn decompose(width: i32, height: i32, polygons: &[Polygon]) -> Result<CellGraph> {
    if polygons.is_empty() {
        let mut graph = CellGraph::new();
        let ceiling = (0..width).map(|x| Point::new(x, 0)).collect();
        let floor = (0..width).map(|x| Point::new(x, height - 1)).collect();
        graph.push_cell(ceiling, floor);
        return Ok(graph);
    }

    let events = event_list_generator(polygons)?;
    let slices = group_into_slices(events);

    let mut graph = CellGraph::new();
    let x_first = slices[0][0].point.x;
    let prefix_ceiling = (0..x_first).map(|x| Point::new(x, 0)).collect();
    let prefix_floor = (0..x_first).map(|x| Point::new(x, height - 1)).collect();
    let cell0 = graph.push_cell(prefix_ceiling, prefix_floor);

    let mut active: Vec<usize> = vec![cell0];
    let mut x_last = x_first;

    for slice in &slices {
        x_last = slice[0].point.x;
        process_slice(&mut graph, &mut active, slice, height)?;
    }

    let last_cell = graph.len() - 1;
    for x in (x_last + 1)..width {
        graph.append_ceiling(last_cell, Point::new(x, 0));
        graph.append_floor(last_cell, Point::new(x, height - 1));
    }

    Ok(graph)
}

/// One slice's worth of work: augment with synthetic boundary events, sort
/// into processing order, then dispatch each event.
fn process_slice(
    graph: &mut CellGraph,
    active: &mut Vec<usize>,
    slice: &[Event],
    height: i32,
) -> Result<()> {
    let slice_x = slice[0].point.x;

    let mut augmented = Vec::with_capacity(slice.len() + 2);
    augmented.push(synthetic_event(slice_x, 0, EventKind::Ceiling));
    augmented.extend_from_slice(slice);
    augmented.push(synthetic_event(slice_x, height - 1, EventKind::Floor));
    for (i, event) in augmented.iter_mut().enumerate() {
        event.original_index_in_slice = i;
    }

    let processing_order = sort_for_processing(&augmented);

    for idx in processing_order {
        match augmented[idx].kind {
            EventKind::In => handle_in(graph, active, &mut augmented, idx)?,
            EventKind::Out => handle_out(graph, active, &mut augmented, idx)?,
            EventKind::Ceiling => handle_ceiling_or_floor(graph, active, &mut augmented, idx)?,
            EventKind::Floor => handle_ceiling_or_floor(graph, active, &mut augmented, idx)?,
        }
    }

    Ok(())
}

fn synthetic_event(x: i32, y: i32, kind: EventKind) -> Event {
    Event {
        obstacle_id: None,
        point: Point::new(x, y),
        kind,
        original_index_in_slice: 0,
        is_used: false,
    }
}

/// In/Out events first (sorted top to bottom), then the
/// remaining Ceiling/Floor events in their original top-to-bottom order.
fn sort_for_processing(augmented: &[Event]) -> Vec<usize> {
    let mut in_out: Vec<usize> = augmented
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e.kind, EventKind::In | EventKind::Out))
        .map(|(i, _)| i)
        .collect();
    in_out.sort_by_key(|&i| augmented[i].point);

    let others = augmented
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e.kind, EventKind::Ceiling | EventKind::Floor))
        .map(|(i, _)| i);

    in_out.into_iter().chain(others).collect()
}

fn handle_in(
    graph: &mut CellGraph,
    active: &mut Vec<usize>,
    augmented: &mut [Event],
    idx: usize,
) -> Result<()> {
    let in_point = augmented[idx].point;
    let c = augmented[idx - 1].point;
    let f = augmented[idx + 1].point;

    let pos = if augmented.len() == 3 {
        active.len() - 1
    } else {
        find_straddling_active(graph, active, in_point.y).ok_or_else(|| {
            PlannerError::Internal(format!(
                "IN event at {in_point:?} does not fall inside any active cell"
            ))
        })?
    };
    let curr = active[pos];

    let (top, bottom) = graph.open(curr, in_point, c, f);
    active.splice(pos..=pos, [top, bottom]);
    trace!(curr, top, bottom, ?in_point, "open");

    augmented[idx].is_used = true;
    augmented[idx - 1].is_used = true;
    augmented[idx + 1].is_used = true;
    Ok(())
}

fn find_straddling_active(graph: &CellGraph, active: &[usize], y: i32) -> Option<usize> {
    active.iter().position(|&cell_idx| {
        let cell = graph.get(cell_idx);
        let ceiling_y = cell.ceiling.last().map(|p| p.y);
        let floor_y = cell.floor.last().map(|p| p.y);
        matches!((ceiling_y, floor_y), (Some(cy), Some(fy)) if cy < y && y < fy)
    })
}

fn handle_out(
    graph: &mut CellGraph,
    active: &mut Vec<usize>,
    augmented: &mut [Event],
    idx: usize,
) -> Result<()> {
    let out_point = augmented[idx].point;
    let c = augmented[idx - 1].point;
    let f = augmented[idx + 1].point;

    let mut found = None;
    for k in 1..active.len() {
        let top_ceiling_y = graph.get(active[k - 1]).ceiling.last().map(|p| p.y);
        let bottom_floor_y = graph.get(active[k]).floor.last().map(|p| p.y);
        if matches!((top_ceiling_y, bottom_floor_y), (Some(cy), Some(fy)) if cy < out_point.y && out_point.y < fy)
        {
            found = Some(k);
            break;
        }
    }
    let k = found.ok_or_else(|| {
        PlannerError::Internal(format!(
            "OUT event at {out_point:?} does not fall between two adjacent active cells"
        ))
    })?;

    let top = active[k - 1];
    let bottom = active[k];
    let merged = graph.close(top, bottom, c, f);
    active.splice((k - 1)..=k, [merged]);
    trace!(top, bottom, merged, ?out_point, "close");

    augmented[idx].is_used = true;
    augmented[idx - 1].is_used = true;
    augmented[idx + 1].is_used = true;
    Ok(())
}

fn handle_ceiling_or_floor(
    graph: &mut CellGraph,
    active: &[usize],
    augmented: &mut [Event],
    idx: usize,
) -> Result<()> {
    if augmented[idx].is_used {
        return Ok(());
    }

    let count = augmented[..idx]
        .iter()
        .filter(|e| matches!(e.kind, EventKind::In | EventKind::Floor))
        .count();
    let target = *active.get(count).ok_or_else(|| {
        PlannerError::Internal(format!(
            "no active cell at position {count} for slice event {idx}"
        ))
    })?;

    let point = augmented[idx].point;
    match augmented[idx].kind {
        EventKind::Ceiling => graph.append_ceiling(target, point),
        EventKind::Floor => graph.append_floor(target, point),
        _ => unreachable!("handle_ceiling_or_floor only called for Ceiling/Floor events"),
    }
    augmented[idx].is_used = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Polygon {
        vec![
            Point::new(200, 300),
            Point::new(300, 200),
            Point::new(200, 100),
            Point::new(100, 200),
        ]
    }

    fn small_diamond() -> Polygon {
        vec![
            Point::new(300, 350),
            Point::new(350, 300),
            Point::new(300, 250),
            Point::new(250, 300),
        ]
    }

    #[test]
    fn empty_workspace_is_a_single_cell() {
        let graph = decompose(400, 400, &[]).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get(0).ceiling.len(), 400);
        assert_eq!(graph.get(0).floor.len(), 400);
        assert!(graph.get(0).neighbor_indices.is_empty());
    }

    #[test]
    fn single_diamond_makes_four_cells() {
        let graph = decompose(400, 400, &[diamond()]).unwrap();
        assert_eq!(graph.len(), 4);
        for cell in graph.cells() {
            assert_eq!(cell.ceiling.len(), cell.floor.len());
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let graph = decompose(400, 400, &[diamond(), small_diamond()]).unwrap();
        for cell in graph.cells() {
            for &neighbor in &cell.neighbor_indices {
                assert!(
                    graph.get(neighbor).neighbor_indices.contains(&cell.index),
                    "cell {} lists {} as a neighbor but not vice versa",
                    cell.index,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn two_diamonds_yield_six_cells() {
        let graph = decompose(400, 400, &[diamond(), small_diamond()]).unwrap();
        assert_eq!(graph.len(), 6);
        for cell in graph.cells() {
            assert_eq!(cell.ceiling.len(), cell.floor.len());
        }
    }

    #[test]
    fn ceiling_and_floor_x_sequences_match_and_increase() {
        let graph = decompose(400, 400, &[diamond()]).unwrap();
        for cell in graph.cells() {
            for w in cell.ceiling.windows(2) {
                assert!(w[0].x < w[1].x);
            }
            for (c, f) in cell.ceiling.iter().zip(&cell.floor) {
                assert_eq!(c.x, f.x);
                assert!(c.y <= f.y);
            }
        }
    }

    #[test]
    fn cell_partition_covers_every_column() {
        let graph = decompose(400, 400, &[diamond()]).unwrap();
        for x in 0..400 {
            let covering: Vec<_> = graph
                .cells()
                .iter()
                .filter(|c| c.ceiling.iter().any(|p| p.x == x))
                .collect();
            assert!(!covering.is_empty(), "column {x} not covered by any cell");
        }
    }
}
