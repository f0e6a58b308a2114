//! Bookkeeping for floated content inside a region.

use folio_style::FloatMode;

/// One registered float, linked to the floats registered before it in the same region.
///
/// A float removes `inset` points of horizontal space from every line whose vertical span
/// overlaps `y_offset..y_offset + height`.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatAddition {
    pub mode: FloatMode,
    pub inset: f32,
    pub y_offset: f32,
    pub height: f32,
    pub prev: Option<Box<FloatAddition>>,
}

impl FloatAddition {
    pub fn new(mode: FloatMode, inset: f32, y_offset: f32, height: f32) -> Self {
        Self {
            mode,
            inset,
            y_offset,
            height,
            prev: None,
        }
    }

    /// Whether this float is active anywhere in `y..y + height`.
    ///
    /// A zero height query asks about a single position, which counts when it lies inside the
    /// float's half-open span.
    pub fn overlaps(&self, y: f32, height: f32) -> bool {
        let end = self.y_offset + self.height;
        if height <= 0.0 {
            y >= self.y_offset && y < end
        } else {
            y < end && self.y_offset < y + height
        }
    }

    /// Iterates this float and every float registered before it, newest first.
    pub fn iter(&self) -> FloatIter<'_> {
        FloatIter {
            current: Some(self),
        }
    }

    /// Total horizontal space taken by floats active in the given span.
    pub fn width_reduction(&self, y: f32, height: f32) -> f32 {
        self.iter()
            .filter(|f| f.overlaps(y, height))
            .map(|f| f.inset)
            .sum()
    }

    /// Space taken on the left edge only: content starts after these.
    pub fn left_inset(&self, y: f32, height: f32) -> f32 {
        self.iter()
            .filter(|f| f.mode == FloatMode::Left && f.overlaps(y, height))
            .map(|f| f.inset)
            .sum()
    }

    pub fn right_inset(&self, y: f32, height: f32) -> f32 {
        self.iter()
            .filter(|f| f.mode == FloatMode::Right && f.overlaps(y, height))
            .map(|f| f.inset)
            .sum()
    }
}

pub struct FloatIter<'a> {
    current: Option<&'a FloatAddition>,
}

impl<'a> Iterator for FloatIter<'a> {
    type Item = &'a FloatAddition;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current?;
        self.current = item.prev.as_deref();
        Some(item)
    }
}
