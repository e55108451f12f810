pub(crate) mod attraction;
pub(crate) mod best;
pub(crate) mod optimizer;
pub(crate) mod population;
pub(crate) mod runner;
pub(crate) mod tour;
