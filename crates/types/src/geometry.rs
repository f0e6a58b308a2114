//! Geometry primitives shared by the style model and the layout engine.
//!
//! All values are in points, with the origin at the top-left and `y` growing downwards.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing accumulated floating point measurements.
pub const EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Grows this size to also cover `other` in both dimensions.
    pub fn union(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrinks the rectangle by the given thickness on every side.
    ///
    /// The resulting width and height never go below zero.
    pub fn deflate(&self, by: &Thickness) -> Rect {
        Rect {
            x: self.x + by.left,
            y: self.y + by.top,
            width: (self.width - by.horizontal()).max(0.0),
            height: (self.height - by.vertical()).max(0.0),
        }
    }

    pub fn inflate(&self, by: &Thickness) -> Rect {
        Rect {
            x: self.x - by.left,
            y: self.y - by.top,
            width: self.width + by.horizontal(),
            height: self.height + by.vertical(),
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns true when the two rectangles share any interior area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Edge thickness, used for margins, padding and border widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Thickness {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Thickness {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn is_empty(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

impl std::ops::Add for Thickness {
    type Output = Thickness;

    fn add(self, rhs: Thickness) -> Thickness {
        Thickness {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deflate_never_goes_negative() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = rect.deflate(&Thickness::uniform(8.0));
        assert_eq!(inner.x, 8.0);
        assert_eq!(inner.width, 0.0);
        assert_eq!(inner.height, 0.0);
    }

    #[test]
    fn inflate_reverses_deflate() {
        let rect = Rect::new(5.0, 5.0, 100.0, 40.0);
        let edge = Thickness::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect.deflate(&edge).inflate(&edge), rect);
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9.0, 9.0, 5.0, 5.0)));
    }
}
