//! Geometry of the wheel: where each name sits and which names the pointers catch.
//!
//! Angles are in degrees, clockwise from 12 o'clock.

use serde::Serialize;

pub const RADIUS: f64 = 120.0;

/// Half-width of the arc each pointer captures.
pub const POINTER_TOLERANCE: f64 = 45.0;

/// Above this many names the labels are drawn smaller.
pub const COMPACT_ABOVE: usize = 8;

pub const PALETTE: [&str; 6] = [
    "#e2e8f0", "#cbd5e0", "#a0aec0", "#e2e8f0", "#cbd5e0", "#a0aec0",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pointer {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub name: String,
    pub angle: f64,
    pub radius: f64,
    pub color_index: usize,
    pub color: &'static str,
    /// Offset of the label anchor from the wheel center.
    pub x: f64,
    pub y: f64,
    pub compact: bool,
}

impl Slot {
    pub fn pointer(&self) -> Option<Pointer> {
        pointer_at(self.angle)
    }
}

/// Lays the names out evenly around the wheel, in the order given.
pub fn layout<S: AsRef<str>>(names: &[S]) -> Vec<Slot> {
    let count = names.len();
    let step = if count == 0 { 0.0 } else { 360.0 / count as f64 };
    let compact = count > COMPACT_ABOVE;

    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let angle = step * index as f64;
            let color_index = (angle / 60.0).floor() as usize % PALETTE.len();
            let radians = (angle - 90.0).to_radians();
            Slot {
                name: name.as_ref().to_string(),
                angle,
                radius: RADIUS,
                color_index,
                color: PALETTE[color_index],
                x: radians.cos() * RADIUS,
                y: radians.sin() * RADIUS,
                compact,
            }
        })
        .collect()
}

/// Returns the pointer whose arc contains `angle`, if any. Arc bounds are inclusive.
pub fn pointer_at(angle: f64) -> Option<Pointer> {
    let angle = angle.rem_euclid(360.0);
    if angle <= POINTER_TOLERANCE || angle >= 360.0 - POINTER_TOLERANCE {
        Some(Pointer::Top)
    } else if (180.0 - POINTER_TOLERANCE..=180.0 + POINTER_TOLERANCE).contains(&angle) {
        Some(Pointer::Bottom)
    } else {
        None
    }
}

/// Names caught by either pointer, in layout order.
pub fn captured(slots: &[Slot]) -> Vec<&str> {
    slots
        .iter()
        .filter(|slot| slot.pointer().is_some())
        .map(|slot| slot.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("p{i}")).collect()
    }

    #[test]
    fn angles_are_evenly_spaced() {
        for count in 1..=13 {
            let slots = layout(&names(count));
            let step = 360.0 / count as f64;
            for pair in slots.windows(2) {
                let gap = (pair[1].angle - pair[0].angle).rem_euclid(360.0);
                assert!((gap - step).abs() < 1e-9, "count {count}: gap {gap}");
            }
            let wrap = (slots[0].angle - slots[count - 1].angle).rem_euclid(360.0);
            assert!((wrap - step).abs() < 1e-9 || count == 1);
        }
    }

    #[test]
    fn first_slot_sits_at_top() {
        let slots = layout(&["Ana", "Bob", "Cid"]);
        assert_eq!(slots[0].angle, 0.0);
        assert!(slots[0].x.abs() < 1e-9);
        assert!((slots[0].y + RADIUS).abs() < 1e-9);
        assert_eq!(slots[0].pointer(), Some(Pointer::Top));
    }

    #[test]
    fn quarter_slot_sits_to_the_right() {
        let slots = layout(&names(4));
        assert_eq!(slots[1].angle, 90.0);
        assert!((slots[1].x - RADIUS).abs() < 1e-9);
        assert!(slots[1].y.abs() < 1e-9);
    }

    #[test]
    fn color_index_follows_sixty_degree_bands() {
        let slots = layout(&names(6));
        let indices: Vec<usize> = slots.iter().map(|s| s.color_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(slots[2].color, "#a0aec0");

        let slots = layout(&names(12));
        assert_eq!(slots[1].color_index, 0);
        assert_eq!(slots[11].color_index, 5);
    }

    #[test]
    fn compact_labels_above_eight_names() {
        assert!(!layout(&names(8))[0].compact);
        assert!(layout(&names(9))[0].compact);
    }

    #[test]
    fn pointer_arcs_are_inclusive_and_wrap() {
        assert_eq!(pointer_at(0.0), Some(Pointer::Top));
        assert_eq!(pointer_at(45.0), Some(Pointer::Top));
        assert_eq!(pointer_at(315.0), Some(Pointer::Top));
        assert_eq!(pointer_at(-10.0), Some(Pointer::Top));
        assert_eq!(pointer_at(370.0), Some(Pointer::Top));
        assert_eq!(pointer_at(135.0), Some(Pointer::Bottom));
        assert_eq!(pointer_at(225.0), Some(Pointer::Bottom));
        assert_eq!(pointer_at(45.5), None);
        assert_eq!(pointer_at(90.0), None);
        assert_eq!(pointer_at(270.0), None);
    }

    #[test]
    fn captured_keeps_layout_order() {
        let slots = layout(&["a", "b", "c", "d"]);
        assert_eq!(captured(&slots), vec!["a", "c"]);

        let slots = layout(&["a", "b", "c"]);
        assert_eq!(captured(&slots), vec!["a"]);

        let slots = layout(&names(8));
        assert_eq!(captured(&slots), vec!["p0", "p1", "p3", "p4", "p5", "p7"]);
    }

    #[test]
    fn empty_layout() {
        let slots = layout::<String>(&[]);
        assert!(slots.is_empty());
        assert!(captured(&slots).is_empty());
    }
}
