//! Candidate placements of menu surfaces.
//!
//! A root menu opens at the pointer and prefers to hang below it. A submenu
//! opens beside the row that spawned it and prefers the trailing side. Right
//! to left tables are the horizontal mirror of the left to right ones.
use crate::core::{Alignment, LayoutDirection};
use crate::overlay::ConnectedPosition;

use Alignment::{Center, End, Start};

const AT_POINT: [ConnectedPosition; 6] = [
    ConnectedPosition::new(Start, End, Start, Start),
    ConnectedPosition::new(Start, Start, Start, End),
    ConnectedPosition::new(End, Start, Start, Start),
    ConnectedPosition::new(Start, Start, End, Start),
    ConnectedPosition::new(End, Center, Start, Center),
    ConnectedPosition::new(Start, Center, End, Center),
];

const NEXT_TO_ELEMENT: [ConnectedPosition; 4] = [
    ConnectedPosition::new(End, Start, Start, Start),
    ConnectedPosition::new(Start, Start, End, Start),
    ConnectedPosition::new(End, End, Start, End),
    ConnectedPosition::new(Start, End, End, End),
];

/// Returns the candidates of a surface opened at a point.
pub fn at_point(direction: LayoutDirection) -> Vec<ConnectedPosition> {
    oriented(&AT_POINT, direction)
}

/// Returns the candidates of a surface opened next to an element.
pub fn next_to_element(direction: LayoutDirection) -> Vec<ConnectedPosition> {
    oriented(&NEXT_TO_ELEMENT, direction)
}

fn oriented(table: &[ConnectedPosition], direction: LayoutDirection) -> Vec<ConnectedPosition> {
    match direction {
        LayoutDirection::Ltr => table.to_vec(),
        LayoutDirection::Rtl => table.iter().copied().map(ConnectedPosition::mirrored).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_prefers_below_pointer() {
        let positions = at_point(LayoutDirection::Ltr);

        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], ConnectedPosition::new(Start, End, Start, Start));
        assert_eq!(positions[5], ConnectedPosition::new(Start, Center, End, Center));
    }

    #[test]
    fn test_point_rtl_table() {
        assert_eq!(
            at_point(LayoutDirection::Rtl),
            vec![
                ConnectedPosition::new(End, End, End, Start),
                ConnectedPosition::new(End, Start, End, End),
                ConnectedPosition::new(Start, Start, End, Start),
                ConnectedPosition::new(End, Start, Start, Start),
                ConnectedPosition::new(Start, Center, End, Center),
                ConnectedPosition::new(End, Center, Start, Center),
            ]
        );
    }

    #[test]
    fn test_element_rtl_table() {
        assert_eq!(
            next_to_element(LayoutDirection::Rtl),
            vec![
                ConnectedPosition::new(Start, Start, End, Start),
                ConnectedPosition::new(End, Start, Start, Start),
                ConnectedPosition::new(Start, End, End, End),
                ConnectedPosition::new(End, End, Start, End),
            ]
        );
    }
}
