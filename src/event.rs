//! Sweep-line event model and generation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{validate_polygon, Point, Polygon};

/// The role a vertex plays with respect to the sweep line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Leftmost vertex of an obstacle: the sweep line enters the obstacle.
    In,
    /// Rightmost vertex of an obstacle: the sweep line leaves the obstacle.
    Out,
    /// Intermediate vertex on the upper chain between In and Out.
    Ceiling,
    /// Intermediate vertex on the lower chain between In and Out.
    Floor,
}

/// A single sweep-line event.
///
/// `obstacle_id` is `None` for the synthetic boundary events a [`crate::cell`]
/// decomposition pass adds to each slice (top/bottom of the workspace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub obstacle_id: Option<usize>,
    pub point: Point,
    pub kind: EventKind,
    /// Position of this event within its (post-augmentation) slice, before
    /// the IN/OUT-first resort. Load-bearing: the ceiling/floor target-cell
    /// rule reads this field, not the resorted position.
    pub original_index_in_slice: usize,
    pub is_used: bool,
}

impl Event {
    fn new(obstacle_id: Option<usize>, point: Point, kind: EventKind) -> Self {
        Self {
            obstacle_id,
            point,
            kind,
            original_index_in_slice: usize::MAX,
            is_used: false,
        }
    }
}

/// Builds the globally sweep-sorted event list for a set of obstacle
/// polygons.
///
/// Each polygon contributes exactly one `In` event (its leftmost vertex),
/// one `Out` event (its rightmost vertex), and a `Ceiling`/`Floor` event for
/// every other vertex, classified by which side of the In→Out traversal it
/// falls on. Rejects polygons without a unique leftmost/rightmost vertex
/// (`PlannerError::MalformedPolygon`).
pub fn event_list_generator(polygons: &[Polygon]) -> Result<Vec<Event>> {
    let mut events = Vec::new();

    for (i, polygon) in polygons.iter().enumerate() {
        let (leftmost_idx, rightmost_idx) = validate_polygon(polygon, i)?;

        events.push(Event::new(Some(i), polygon[leftmost_idx], EventKind::In));
        events.push(Event::new(Some(i), polygon[rightmost_idx], EventKind::Out));

        if leftmost_idx < rightmost_idx {
            for (m, &vertex) in polygon.iter().enumerate() {
                if leftmost_idx < m && m < rightmost_idx {
                    events.push(Event::new(Some(i), vertex, EventKind::Ceiling));
                } else if m < leftmost_idx || m > rightmost_idx {
                    events.push(Event::new(Some(i), vertex, EventKind::Floor));
                }
            }
        } else {
            for (n, &vertex) in polygon.iter().enumerate() {
                if rightmost_idx < n && n < leftmost_idx {
                    events.push(Event::new(Some(i), vertex, EventKind::Floor));
                } else if n < rightmost_idx || n > leftmost_idx {
                    events.push(Event::new(Some(i), vertex, EventKind::Ceiling));
                }
            }
        }
    }

    events.sort_by_key(|e| e.point);
    Ok(events)
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

    #[test]
    fn one_in_one_out_per_polygon() {
        let events = event_list_generator(&[diamond()]).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events.iter().filter(|e| e.kind == EventKind::In).count(),
            1
        );
        assert_eq!(
            events.iter().filter(|e| e.kind == EventKind::Out).count(),
            1
        );
    }

    #[test]
    fn event_completeness_across_polygons() {
        let polys = vec![diamond(), diamond()];
        let events = event_list_generator(&polys).unwrap();
        let total_vertices: usize = polys.iter().map(|p| p.len()).sum();
        assert_eq!(events.len(), total_vertices);
    }

    #[test]
    fn events_are_sweep_sorted() {
        let events = event_list_generator(&[diamond()]).unwrap();
        let mut sorted = events.clone();
        sorted.sort_by_key(|e| e.point);
        assert_eq!(events, sorted);
    }

    #[test]
    fn malformed_polygon_rejected() {
        let bad = vec![Point::new(0, 0), Point::new(1, 0)];
        assert!(event_list_generator(&[bad]).is_err());
    }
}
