//! Depth-first cell-visit scheduler.

use tracing::trace;

use crate::cell::CellGraph;

/// Runs the greedy left-child DFS starting at
/// `start_index`, and returns the visit order to be consumed in reverse as
/// the cleaning schedule.
///
/// The recursion this traversal models is strict tail recursion — nothing
/// happens after the recursive call returns — so this is an exact rewrite
/// as a loop over a single "current cell" variable, not merely an
/// equivalent restructuring. A cell is pushed to the front of the returned
/// order on *every* visit to it, including revisits during backtracking;
/// see `DESIGN.md` for why that duplication is intentional.
///
/// Marks `is_visited` and `parent_index` on `graph`'s cells as a side
/// effect.
pub fn visit(graph: &mut CellGraph, start_index: usize) -> Vec<usize> {
    let mut unvisited = graph.len();
    let mut visit_order = std::collections::VecDeque::new();
    let mut current = start_index;

    loop {
        if !graph.get(current).is_visited {
            graph.mark_visited(current);
            unvisited -= 1;
        }
        visit_order.push_front(current);
        trace!(current, unvisited, "visit");

        // The first neighbor in the list is the only candidate for
        // advancing; an empty list or an already-visited first neighbor
        // both fall through to backtracking (Open Question (a) is
        // preserved verbatim for the "visited first neighbor" case; the
        // empty-list case is this crate's own resolution, see DESIGN.md).
        let candidate = graph
            .get(current)
            .neighbor_indices
            .front()
            .copied()
            .filter(|&n| !graph.get(n).is_visited);

        match candidate {
            Some(next) => {
                graph.set_parent(next, current);
                current = next;
            }
            None => match graph.get(current).parent_index {
                None => break,
                Some(parent) => {
                    if unvisited == 0 {
                        break;
                    }
                    current = parent;
                }
            },
        }
    }

    visit_order.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::decompose;
    use crate::geometry::Point;

    fn diamond() -> crate::geometry::Polygon {
        vec![
            Point::new(200, 300),
            Point::new(300, 200),
            Point::new(200, 100),
            Point::new(100, 200),
        ]
    }

    #[test]
    fn single_cell_workspace_visits_just_itself() {
        let mut graph = decompose(400, 400, &[]).unwrap();
        let order = visit(&mut graph, 0);
        assert_eq!(order, vec![0]);
    }

    #[test]
    fn visit_covers_every_cell_in_connected_graph() {
        let mut graph = decompose(400, 400, &[diamond()]).unwrap();
        let order = visit(&mut graph, 1);
        let visited: std::collections::HashSet<_> = order.iter().copied().collect();
        assert_eq!(visited.len(), graph.len());
        assert!(graph.cells().iter().all(|c| c.is_visited));
    }
}
