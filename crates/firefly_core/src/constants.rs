pub(crate) const DEFAULT_POPULATION_SIZE: usize = 30;
pub(crate) const DEFAULT_GENERATIONS: usize = 200;
pub(crate) const DEFAULT_ATTRACTION_PROBABILITY: f64 = 0.3;
pub(crate) const DEFAULT_POINT_RANGE: u32 = 100;

pub(crate) const MIN_POPULATION_SIZE: usize = 1;

/// Offset mixed into the base seed for random point generation so the point
/// set and the optimizer runs draw from unrelated streams.
pub(crate) const POINTS_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;
