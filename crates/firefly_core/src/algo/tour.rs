use std::ops::Deref;

use rand::{Rng, seq::SliceRandom};

use crate::geo::distance::DistanceModel;

/// Closed visiting order: a permutation of point indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    /// Uniformly random permutation of `0..n`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self { order }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    pub(crate) fn order_mut(&mut self) -> &mut [usize] {
        &mut self.order
    }

    /// True when the tour holds every index in `0..len` exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.order.len()];
        for &idx in &self.order {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    pub fn metrics(&self, model: &DistanceModel) -> TourMetrics {
        let n = self.order.len();

        if n < 2 {
            log::info!("metrics: n < 2 so there's nothing to report");
            return TourMetrics::default();
        }

        let points = model.points();
        let distances: Vec<f64> = (0..n)
            .map(|i| points[self.order[i]].dist(&points[self.order[(i + 1) % n]]))
            .collect();
        let total = distances.iter().sum();
        let average = total / (n as f64);
        let longest = distances.iter().copied().fold(0.0_f64, f64::max);

        log::info!("metrics: n={n} total={total:.3} longest={longest:.3} avg={average:.3}");

        TourMetrics {
            total,
            longest,
            average,
        }
    }
}

impl Deref for Tour {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.order
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self::new(order)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}
