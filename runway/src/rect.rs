/// A vertical extent in list coordinates.
///
/// `height` is never negative; it may be an estimate until the item is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    pub top: f64,
    pub height: f64,
}

impl Rectangle {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `top <= point < bottom`.
    pub fn contains(&self, point: f64) -> bool {
        self.top <= point && point < self.bottom()
    }

    /// Returns `true` when the two rectangles overlap.
    ///
    /// Rectangles that merely touch (one's bottom equals the other's top) do not intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.contains(other.top) || other.contains(self.top)
    }

    pub fn surrounds(&self, other: &Rectangle) -> bool {
        self.top <= other.top && self.bottom() >= other.bottom()
    }

    #[must_use]
    pub fn translated_by(&self, offset: f64) -> Rectangle {
        Rectangle {
            top: self.top + offset,
            height: self.height,
        }
    }

    /// Grows the rectangle by `amount` at both ends.
    #[must_use]
    pub fn expanded_by(&self, amount: f64) -> Rectangle {
        if amount <= 0.0 {
            return *self;
        }
        Rectangle {
            top: self.top - amount,
            height: self.height + amount * 2.0,
        }
    }
}
