//! Toolkit-neutral pointer input consumed by the scene

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer event in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { pos: Point, button: PointerButton },
    Move { pos: Point },
    Up { pos: Point, button: PointerButton },
    /// Wheel motion; positive is away from the user
    Scroll { delta: i32 },
}

impl PointerEvent {
    pub fn down(x: i32, y: i32, button: PointerButton) -> Self {
        Self::Down {
            pos: Point::new(x, y),
            button,
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self::Move {
            pos: Point::new(x, y),
        }
    }

    pub fn up(x: i32, y: i32, button: PointerButton) -> Self {
        Self::Up {
            pos: Point::new(x, y),
            button,
        }
    }
}
