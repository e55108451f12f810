//! Firefly-algorithm approximation of the Euclidean TSP.
//! Candidate tours are attracted toward shorter ones over a fixed number of
//! generations; independent seeded runs can be executed sequentially or in
//! parallel.

mod algo;
mod constants;
mod error;
mod geo;
mod io;
pub mod logging;
mod point;
mod utils;

pub(crate) use io::options;

pub use algo::attraction::AttractionMove;
pub use algo::best::BestSolution;
pub use algo::optimizer::{FireflyConfig, FireflyOutcome, LogProgress, Optimizer, ProgressSink};
pub use algo::population::Population;
pub use algo::runner::solve_tsp_with_firefly;
pub use algo::tour::{Tour, TourMetrics};
pub use error::{Error, Result};
pub use geo::distance::DistanceModel;
pub use io::input::{SolverInput, random_points};
pub use io::options::{LogFormat, LogLevel, SolverMode, SolverOptions};
pub use io::output::write_route;
pub use point::Point;
