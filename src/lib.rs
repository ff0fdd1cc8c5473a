//! K-coverage / M-connectivity sensor placement heuristics.
//!
//! A wireless sensor network instance has points of interest (POIs) to
//! observe, candidate sensor spots, and sinks collecting data. A set of
//! active sensors is feasible when every POI is covered by at least `K`
//! active sensors and has at least `M` node-disjoint active paths to a sink.
//!
//! - **Instance model** ([`instance`]): seeded random generation and the
//!   canonical `KCMC;…;END` text form.
//! - **Validator** ([`flow`]): coverage counts, Dinic-style level graph and
//!   disjoint-path search, raising and boolean validation.
//! - **Flood** ([`flood`]): widens path certificates with every
//!   interchangeable relay sensor.
//! - **Local optimum** ([`reduce`]): single-removal minimal feasible sets.
//! - **Genetic operators** ([`ga`]): creation, selection, crossover,
//!   mutation and reporting primitives over binary chromosomes.
//! - **Evaluator** ([`evaluator`]): the tab-separated comparison output.
//!
//! # Example
//!
//! ```
//! use kcmc_heur::instance::Instance;
//! use std::collections::BTreeSet;
//!
//! let inst: Instance = "KCMC;2 3 1;10 5 5;42;PI;0 0;0 1;1 2;II;0 1;IS;1 0;END"
//!     .parse()
//!     .unwrap();
//! assert_eq!(inst.coverage(&BTreeSet::new()).counts, vec![2, 1]);
//! assert!(!inst.fast_k_coverage(1, &BTreeSet::from([2])).is_satisfied());
//! ```

pub mod error;
pub mod evaluator;
pub mod flood;
pub mod flow;
pub mod ga;
pub mod instance;
pub mod reduce;

pub use error::{KcmcError, Result};
