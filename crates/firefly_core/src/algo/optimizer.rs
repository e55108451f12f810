use rand::Rng;

use crate::{
    Error, Result,
    algo::{attraction::AttractionMove, best::BestSolution, population::Population, tour::Tour},
    constants::{
        DEFAULT_ATTRACTION_PROBABILITY, DEFAULT_GENERATIONS, DEFAULT_POPULATION_SIZE,
        MIN_POPULATION_SIZE,
    },
    geo::distance::DistanceModel,
    point::Point,
};

/// Tunables of a single firefly run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireflyConfig {
    pub population_size: usize,
    pub generations: usize,
    pub attraction_probability: f64,
}

impl Default for FireflyConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            attraction_probability: DEFAULT_ATTRACTION_PROBABILITY,
        }
    }
}

impl FireflyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size < MIN_POPULATION_SIZE {
            return Err(Error::InvalidPopulationSize(self.population_size));
        }
        AttractionMove::new(self.attraction_probability)?;
        Ok(())
    }
}

/// Receives the best distance after every generation.
pub trait ProgressSink {
    fn on_generation(&mut self, generation: usize, best_distance: f64);
}

/// Logs progress at info level, tagged with the run index.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress {
    pub run: usize,
}

impl ProgressSink for LogProgress {
    fn on_generation(&mut self, generation: usize, best_distance: f64) {
        log::info!(
            "optimizer: run={} generation={generation} best={best_distance:.4}",
            self.run
        );
    }
}

impl<F: FnMut(usize, f64)> ProgressSink for F {
    fn on_generation(&mut self, generation: usize, best_distance: f64) {
        self(generation, best_distance)
    }
}

#[derive(Clone, Debug)]
pub struct FireflyOutcome {
    pub tour: Tour,
    pub distance: f64,
    /// Best distance after each generation.
    pub history: Vec<f64>,
    /// Distinct tours left in the population at the end of the run.
    pub diversity: usize,
}

/// Generation loop over an owned population.
#[derive(Clone, Debug)]
pub struct Optimizer {
    model: DistanceModel,
    population: Population,
    attraction: AttractionMove,
    best: BestSolution,
    generation: usize,
    generations: usize,
}

impl Optimizer {
    pub fn new<R: Rng + ?Sized>(points: &[Point], config: &FireflyConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        if let Some(idx) = points.iter().position(|p| !p.is_valid()) {
            return Err(Error::invalid_input(format!(
                "point {idx} has non-finite coordinates"
            )));
        }

        let model = DistanceModel::new(points);
        let population = Population::random(config.population_size, &model, rng);
        Self::with_population(model, population, config)
    }

    /// Starts from a caller-supplied population instead of random tours.
    pub fn with_population(
        model: DistanceModel,
        population: Population,
        config: &FireflyConfig,
    ) -> Result<Self> {
        config.validate()?;
        if population.len() != config.population_size {
            return Err(Error::invalid_input(format!(
                "population has {} tours but population_size is {}",
                population.len(),
                config.population_size
            )));
        }
        if let Some(slot) = population
            .tours()
            .iter()
            .position(|t| t.len() != model.n() || !t.is_permutation())
        {
            return Err(Error::invalid_input(format!(
                "tour in slot {slot} is not a permutation of 0..{}",
                model.n()
            )));
        }

        let attraction = AttractionMove::new(config.attraction_probability)?;
        let (slot, distance) = population
            .best()
            .ok_or(Error::InvalidPopulationSize(population.len()))?;
        let best = BestSolution::new(population.tour(slot).clone(), distance);

        log::debug!(
            "optimizer: init n={} population={} initial_best={distance:.4}",
            model.n(),
            population.len()
        );

        Ok(Self {
            model,
            population,
            attraction,
            best,
            generation: 0,
            generations: config.generations,
        })
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn best(&self) -> &BestSolution {
        &self.best
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn model(&self) -> &DistanceModel {
        &self.model
    }

    /// Runs one generation and returns the best distance afterwards.
    ///
    /// Slots are updated in place while the pairwise scan is still running,
    /// so later comparisons see tours already moved in this generation.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let size = self.population.len();
        let mut moves = 0usize;

        for i in 0..size {
            for j in 0..size {
                if i == j || self.population.cost(j) >= self.population.cost(i) {
                    continue;
                }
                let moved =
                    self.attraction
                        .apply(self.population.tour(i), self.population.tour(j), rng);
                self.population.replace(i, moved, &self.model);
                moves += 1;
            }
        }

        if let Some((slot, distance)) = self.population.best()
            && self.best.offer(self.population.tour(slot), distance)
        {
            log::debug!(
                "optimizer: improved generation={} best={distance:.4}",
                self.generation + 1
            );
        }

        self.generation += 1;
        log::trace!(
            "optimizer: generation={} moves={moves} diversity={}",
            self.generation,
            self.population.distinct_count()
        );
        self.best.distance
    }

    pub fn run<R: Rng + ?Sized>(
        mut self,
        rng: &mut R,
        sink: &mut dyn ProgressSink,
    ) -> FireflyOutcome {
        let mut history = Vec::with_capacity(self.generations);

        while self.generation < self.generations {
            let best = self.step(rng);
            history.push(best);
            sink.on_generation(self.generation, best);
        }

        FireflyOutcome {
            diversity: self.population.distinct_count(),
            tour: self.best.tour,
            distance: self.best.distance,
            history,
        }
    }
}
