use crate::algo::tour::Tour;

/// Shortest tour observed so far. Distance never increases.
#[derive(Clone, Debug, PartialEq)]
pub struct BestSolution {
    pub tour: Tour,
    pub distance: f64,
}

impl BestSolution {
    pub fn new(tour: Tour, distance: f64) -> Self {
        Self { tour, distance }
    }

    /// Replaces the held solution only when `distance` is strictly lower.
    pub fn offer(&mut self, tour: &Tour, distance: f64) -> bool {
        if distance < self.distance {
            self.tour = tour.clone();
            self.distance = distance;
            true
        } else {
            false
        }
    }
}
