//! Planar outlines for extrusion

use cogwork_core::Vec2;

const EPSILON: f32 = 1e-6;

/// A single closed outline built from straight segments
#[derive(Clone, Debug, Default)]
pub struct Shape {
    points: Vec<Vec2>,
    closed: bool,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the outline, discarding anything drawn so far
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.points.clear();
        self.closed = false;
        self.points.push(Vec2::new(x, y));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.points.push(Vec2::new(x, y));
        self
    }

    /// Close the outline back to its first point
    pub fn close_path(&mut self) -> &mut Self {
        self.closed = true;
        self
    }

    /// Points as drawn
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Whether the outline ends where it started
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 2 => {
                self.closed || first.distance(*last) < EPSILON
            }
            _ => false,
        }
    }

    /// Signed area, positive for counter-clockwise outlines
    pub fn signed_area(&self) -> f32 {
        signed_area(&self.contour())
    }

    /// Distinct outline points in counter-clockwise order
    ///
    /// Repeated consecutive points and a trailing copy of the first point are
    /// removed.
    pub fn contour(&self) -> Vec<Vec2> {
        let mut contour: Vec<Vec2> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if contour.last().map_or(true, |last| last.distance(p) >= EPSILON) {
                contour.push(p);
            }
        }
        while contour.len() > 1 && contour[0].distance(contour[contour.len() - 1]) < EPSILON {
            contour.pop();
        }
        if signed_area(&contour) < 0.0 {
            contour.reverse();
        }
        contour
    }
}

pub(crate) fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}
