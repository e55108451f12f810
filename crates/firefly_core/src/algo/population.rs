use std::collections::HashSet;

use rand::Rng;

use crate::{Error, Result, algo::tour::Tour, geo::distance::DistanceModel};

/// Fixed-size set of fireflies with a cost cached per slot.
///
/// The cache is refreshed whenever a slot is replaced, so `cost(i)` always
/// equals `model.tour_cost(tour(i))`.
#[derive(Clone, Debug)]
pub struct Population {
    tours: Vec<Tour>,
    costs: Vec<f64>,
}

impl Population {
    pub fn random<R: Rng + ?Sized>(size: usize, model: &DistanceModel, rng: &mut R) -> Self {
        let tours: Vec<Tour> = (0..size).map(|_| Tour::random(model.n(), rng)).collect();
        Self::scored(tours, model)
    }

    /// Builds a population from caller-supplied tours. Every tour must be a
    /// permutation of `0..model.n()`.
    pub fn from_tours(tours: Vec<Tour>, model: &DistanceModel) -> Result<Self> {
        if let Some(slot) = tours
            .iter()
            .position(|t| t.len() != model.n() || !t.is_permutation())
        {
            return Err(Error::invalid_input(format!(
                "tour in slot {slot} is not a permutation of 0..{}",
                model.n()
            )));
        }
        Ok(Self::scored(tours, model))
    }

    fn scored(tours: Vec<Tour>, model: &DistanceModel) -> Self {
        let costs = tours.iter().map(|t| model.tour_cost(t)).collect();
        Self { tours, costs }
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    pub fn tour(&self, slot: usize) -> &Tour {
        &self.tours[slot]
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn cost(&self, slot: usize) -> f64 {
        self.costs[slot]
    }

    pub(crate) fn replace(&mut self, slot: usize, tour: Tour, model: &DistanceModel) {
        self.costs[slot] = model.tour_cost(&tour);
        self.tours[slot] = tour;
    }

    /// Slot and cost of the shortest tour; the lowest slot wins ties.
    pub fn best(&self) -> Option<(usize, f64)> {
        self.costs
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (slot, cost)| match best {
                Some((_, best_cost)) if best_cost <= cost => best,
                _ => Some((slot, cost)),
            })
    }

    /// Number of distinct tour sequences.
    pub fn distinct_count(&self) -> usize {
        self.tours.iter().collect::<HashSet<_>>().len()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::Population;
    use crate::{Error, algo::tour::Tour, geo::distance::DistanceModel, point::Point};

    fn model() -> DistanceModel {
        DistanceModel::new(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn random_population_has_requested_size_and_valid_tours() {
        let model = model();
        let mut rng = StdRng::seed_from_u64(11);
        let population = Population::random(12, &model, &mut rng);

        assert_eq!(population.len(), 12);
        for (slot, tour) in population.tours().iter().enumerate() {
            assert_eq!(tour.len(), model.n());
            assert!(tour.is_permutation());
            assert_eq!(population.cost(slot), model.tour_cost(tour));
        }
    }

    #[test]
    fn replace_refreshes_cached_cost() {
        let model = model();
        let mut population = Population::from_tours(vec![Tour::new(vec![0, 1, 2, 3])], &model)
            .expect("valid tours");
        assert!((population.cost(0) - 4.0).abs() < 1e-12);

        population.replace(0, Tour::new(vec![0, 2, 1, 3]), &model);
        assert_eq!(population.tour(0).order(), &[0, 2, 1, 3]);
        assert!(population.cost(0) > 4.0);
    }

    #[test]
    fn best_prefers_lowest_slot_on_ties() {
        let model = model();
        let population = Population::from_tours(
            vec![
                Tour::new(vec![0, 2, 1, 3]),
                Tour::new(vec![0, 1, 2, 3]),
                Tour::new(vec![3, 2, 1, 0]),
            ],
            &model,
        )
        .expect("valid tours");

        let (slot, cost) = population.best().expect("non-empty population");
        assert_eq!(slot, 1);
        assert!((cost - 4.0).abs() < 1e-12);
        assert_eq!(population.distinct_count(), 3);
    }

    #[test]
    fn from_tours_rejects_out_of_range_and_short_tours() {
        let model = DistanceModel::new(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);

        let err = Population::from_tours(vec![Tour::new(vec![0, 5])], &model)
            .expect_err("index 5 is out of range");
        assert!(err.to_string().contains("slot 0 is not a permutation of 0..2"));

        let err = Population::from_tours(vec![Tour::new(vec![0, 1]), Tour::new(vec![1])], &model)
            .expect_err("short tour");
        assert!(err.to_string().contains("slot 1"));

        let err = Population::from_tours(vec![Tour::new(vec![1, 1])], &model)
            .expect_err("duplicate index");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn empty_point_set_yields_empty_zero_cost_tours() {
        let model = DistanceModel::new(&[]);
        let mut rng = StdRng::seed_from_u64(3);
        let population = Population::random(4, &model, &mut rng);

        assert_eq!(population.len(), 4);
        assert!(population.tours().iter().all(|t| t.is_empty()));
        assert_eq!(population.best(), Some((0, 0.0)));
        assert_eq!(population.distinct_count(), 1);
    }
}
