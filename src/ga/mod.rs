//! Genetic operator library.
//!
//! Stateless primitives over fixed-length binary chromosomes (one gene per
//! installable sensor), meant to be composed by an external GA driver that
//! owns the population, the fitness function and the random generator.
//! Nothing here touches the instance graph.
//!
//! # Key Types
//!
//! - [`Chromosome`]: one `0`/`1` gene per sensor
//! - [`ReportConfig`]: cadence of the per-generation record
//! - [`BestOf`] / [`GenerationRecord`]: best-of-population extraction and its
//!   observability line
//!
//! # Submodules
//!
//! - [`operators`]: creation, inspection, one-point crossover, flip mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod report;
mod selection;
mod types;

pub use config::ReportConfig;
pub use operators::{
    create, crossover_one_point, crossover_one_point_at, inspect_individual, inspect_population,
    mutate_flip,
};
pub use report::{best_of, BestOf, GenerationRecord};
pub use selection::{roulette_select, select_excluding};
pub use types::{active_genes, bitstring, from_active, parse_bitstring, Chromosome, Gene};
