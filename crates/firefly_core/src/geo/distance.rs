use crate::point::Point;

/// Pairwise and closed-tour costs over a fixed point set.
#[derive(Clone, Debug)]
pub struct DistanceModel {
    points: Vec<Point>,
}

impl DistanceModel {
    pub fn new(points: &[Point]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn n(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn distance(a: Point, b: Point) -> f64 {
        a.dist(&b)
    }

    /// Length of the closed cycle, wrap-around edge included.
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        let n = tour.len();
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.points[tour[i]];
            let b = self.points[tour[(i + 1) % n]];
            sum += Self::distance(a, b);
        }
        sum
    }
}
