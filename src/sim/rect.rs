//! Axis-aligned integer rectangles
//!
//! Screen y grows downward, so `bottom()` is the larger y value.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with top-left `min` and `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            min: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.min.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.min.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.min.y + self.size.y
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Strict overlap test - rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x() < other.right()
            && other.x() < self.right()
            && self.y() < other.bottom()
            && other.y() < self.bottom()
    }

    /// Whether the horizontal extent overlaps `[start, end)`
    pub fn overlaps_span(&self, start: i32, end: i32) -> bool {
        self.x() < end && start < self.right()
    }

    /// Same rectangle shifted horizontally (world -> screen uses `-camera_offset`)
    pub fn offset_x(&self, dx: i32) -> Rect {
        Rect {
            min: self.min + IVec2::new(dx, 0),
            size: self.size,
        }
    }

    /// The horizontally centred third of the rectangle, full height
    pub fn center_third(&self) -> Rect {
        let third = self.width() / 3;
        Rect::new(self.x() + third, self.y(), third, self.height())
    }
}
