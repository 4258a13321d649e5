pub mod aggregator;
pub mod extractors;
pub mod readme;
pub mod renderer;
