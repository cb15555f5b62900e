//! Groups a sweep-sorted event list into per-x slices.

use crate::event::Event;

/// Splits a sweep-sorted event list into slices that each share one x value.
///
/// Slices are emitted in x-ascending order and are never empty. Panics if
/// `events` is empty; callers are expected to special-case the
/// no-obstacles scenario before reaching this (see
/// [`crate::cell::decompose`]).
pub fn group_into_slices(events: Vec<Event>) -> Vec<Vec<Event>> {
    assert!(
        !events.is_empty(),
        "group_into_slices requires at least one event"
    );

    let mut slices = Vec::new();
    let mut current = Vec::new();
    let mut x = events[0].point.x;

    for event in events {
        if event.point.x != x {
            slices.push(std::mem::take(&mut current));
            x = event.point.x;
        }
        current.push(event);
    }
    slices.push(current);

    slices
}
