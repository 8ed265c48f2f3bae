use crate::error::{ScrollineError, ScrollineResult};

/// Normalized position within the observed scroll region, in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Progress(pub f64);

impl Progress {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    /// Checked constructor for host-supplied values. Non-finite input is a
    /// caller bug and rejected; finite input is clamped into [0, 1].
    pub fn new(value: f64) -> ScrollineResult<Self> {
        if !value.is_finite() {
            return Err(ScrollineError::validation("progress must be finite"));
        }
        Ok(Self(value.clamp(0.0, 1.0)))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub start: Progress,
    pub end: Progress, // exclusive
}

impl Span {
    pub fn new(start: Progress, end: Progress) -> ScrollineResult<Self> {
        if start.0 > end.0 {
            return Err(ScrollineError::validation("Span start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len(self) -> f64 {
        self.end.0 - self.start.0
    }

    pub fn is_empty(self) -> bool {
        self.start.0 >= self.end.0
    }

    pub fn contains(self, p: Progress) -> bool {
        self.start.0 <= p.0 && p.0 < self.end.0
    }

    /// Linear remap of `p` onto this span, clamped to [0, 1]. A degenerate
    /// span reads as already finished and remaps everything to 1.
    pub fn local(self, p: Progress) -> f64 {
        let len = self.len();
        if len <= 0.0 {
            return 1.0;
        }
        ((p.0 - self.start.0) / len).clamp(0.0, 1.0)
    }
}

/// Raw per-frame measurements of the scroll region against the viewport.
/// All values are CSS pixels; `region_top` is the region's top edge relative
/// to the viewport top and goes negative once the region scrolls past it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSnapshot {
    pub region_top: f64,
    pub region_height: f64,
    pub viewport_height: f64,
}

impl ViewportSnapshot {
    /// Pixels of scrolling that traverse the region end to end. Floored at 1
    /// so short regions never divide by zero.
    pub fn scroll_distance(self) -> f64 {
        (self.region_height - self.viewport_height).max(1.0)
    }

    /// Pixels already scrolled past the region top.
    pub fn scrolled(self) -> f64 {
        -self.region_top
    }
}
