use glam::DVec2;

/// Point in surface coordinates (x grows right, y grows down)
pub type Point2D = DVec2;

/// One drawable line, start to end
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Both endpoints rounded to the nearest pixel
    pub fn rounded(&self) -> Segment {
        Segment::new(self.start.round(), self.end.round())
    }
}
