use nalgebra::Vector2;

/// Axis-aligned box in world space. `min` is the top-left corner (y grows
/// downward), `max` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Aabb {
    pub fn new(min: Vector2<f64>, max: Vector2<f64>) -> Self {
        Self { min, max }
    }

    /// Box standing on `feet`: centred horizontally, extending up by `height`.
    pub fn from_feet(feet: Vector2<f64>, width: f64, height: f64) -> Self {
        Self {
            min: Vector2::new(feet.x - width * 0.5, feet.y - height),
            max: Vector2::new(feet.x + width * 0.5, feet.y),
        }
    }

    /// Box hanging from its top-left corner.
    pub fn from_top_left(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            min: Vector2::new(left, top),
            max: Vector2::new(left + width, top + height),
        }
    }

    pub fn left(&self) -> f64 { self.min.x }
    pub fn right(&self) -> f64 { self.max.x }
    pub fn top(&self) -> f64 { self.min.y }
    pub fn bottom(&self) -> f64 { self.max.y }
    pub fn height(&self) -> f64 { self.max.y - self.min.y }
    pub fn center_x(&self) -> f64 { (self.min.x + self.max.x) * 0.5 }

    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    /// Inclusive horizontal span test.
    pub fn spans_x(&self, x: f64) -> bool {
        self.min.x <= x && x <= self.max.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::from_top_left(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_top_left(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = Aabb::from_top_left(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn feet_box_extends_upward() {
        let b = Aabb::from_feet(Vector2::new(100.0, 500.0), 40.0, 50.0);
        assert_eq!(b.left(), 80.0);
        assert_eq!(b.right(), 120.0);
        assert_eq!(b.top(), 450.0);
        assert_eq!(b.bottom(), 500.0);
        assert_eq!(b.center_x(), 100.0);
    }

    #[test]
    fn span_is_inclusive() {
        let b = Aabb::from_top_left(0.0, 0.0, 10.0, 1.0);
        assert!(b.spans_x(0.0) && b.spans_x(10.0));
        assert!(!b.spans_x(10.0001));
    }
}
