//! Coverage and connectivity validation.
//!
//! Everything here is a pure function of an [`Instance`] and a set of
//! inactive sensors:
//!
//! - [`Instance::coverage`] / [`Instance::degree`]: per-node counts
//! - [`Instance::fast_k_coverage`]: K-coverage with a minimal witness
//! - [`Instance::level_graph`]: BFS layering from the sinks
//! - [`Instance::find_path`]: one augmenting path avoiding used sensors
//! - [`Instance::fast_m_connectivity`]: M node-disjoint paths per POI
//! - [`Instance::validate`] / [`Instance::is_valid`]: both checks, raising
//!   or boolean
//!
//! With the `parallel` feature the per-POI path searches run on rayon; the
//! reported outcome is the same as the sequential one.

mod level;
mod path;
mod types;

pub use level::LevelGraph;
pub use path::{AugmentingPath, Hop};
pub use types::{Certificate, KCoverage, MConnectivity, NodeCounts};

use crate::error::{InvalidInstanceError, Result};
use crate::instance::Instance;
use std::collections::BTreeSet;

impl Instance {
    /// Active coverage of every POI, and how many POIs have any.
    pub fn coverage(&self, inactive: &BTreeSet<usize>) -> NodeCounts {
        let counts: Vec<usize> = (0..self.num_pois())
            .map(|poi| self.covering_sensors(poi).difference(inactive).count())
            .collect();
        let nonzero = counts.iter().filter(|&&c| c > 0).count();
        NodeCounts { counts, nonzero }
    }

    /// Active sensor–sensor degree of every sensor, and how many active
    /// sensors have at least one active neighbour.
    ///
    /// Degrees are reported for inactive sensors too; they are not counted
    /// in `nonzero`.
    ///
    /// This `nonzero` differs from the historical KCMC tools, whose
    /// connected-sensor counter included every sensor regardless of its
    /// degree. Isolated sensors are not counted here.
    pub fn degree(&self, inactive: &BTreeSet<usize>) -> NodeCounts {
        let counts: Vec<usize> = (0..self.num_sensors())
            .map(|s| self.neighbours(s).difference(inactive).count())
            .collect();
        let nonzero = counts
            .iter()
            .enumerate()
            .filter(|&(s, &c)| c > 0 && !inactive.contains(&s))
            .count();
        NodeCounts { counts, nonzero }
    }

    /// Checks that every POI has at least `k` active covering sensors.
    ///
    /// On success the outcome lists, per POI, the first `k` active covering
    /// sensors in index order.
    pub fn fast_k_coverage(&self, k: usize, inactive: &BTreeSet<usize>) -> KCoverage {
        let mut witnesses = Vec::with_capacity(self.num_pois());
        for poi in 0..self.num_pois() {
            let active: Vec<usize> = self
                .covering_sensors(poi)
                .difference(inactive)
                .copied()
                .collect();
            if active.len() < k {
                tracing::debug!(poi, coverage = active.len(), k, "insufficient coverage");
                return KCoverage::Deficient {
                    poi,
                    coverage: active.len(),
                };
            }
            witnesses.push(active[..k].to_vec());
        }
        KCoverage::Satisfied { witnesses }
    }

    /// Checks that every POI has `m` node-disjoint active paths to a sink.
    ///
    /// For each POI the used-sensor set restarts from `inactive` and grows
    /// with every path found, so the paths of one POI never share a sensor.
    ///
    /// # Errors
    /// [`KcmcError::BrokenPredecessorChain`] if a path cannot be unwound.
    ///
    /// [`KcmcError::BrokenPredecessorChain`]: crate::error::KcmcError::BrokenPredecessorChain
    pub fn fast_m_connectivity(
        &self,
        m: usize,
        inactive: &BTreeSet<usize>,
    ) -> Result<MConnectivity> {
        let blocked = self.mask(inactive);
        let level = self.level_graph_masked(&blocked);

        #[cfg(not(feature = "parallel"))]
        let per_poi =
            (0..self.num_pois()).map(|poi| self.disjoint_paths(poi, m, &blocked, &level));

        #[cfg(feature = "parallel")]
        let per_poi = {
            use rayon::prelude::*;
            (0..self.num_pois())
                .into_par_iter()
                .map(|poi| self.disjoint_paths(poi, m, &blocked, &level))
                .collect::<Vec<_>>()
                .into_iter()
        };

        let mut used_sensors = BTreeSet::new();
        for (poi, paths) in per_poi.enumerate() {
            let paths = paths?;
            if paths.len() < m {
                tracing::debug!(poi, paths = paths.len(), m, "insufficient connectivity");
                return Ok(MConnectivity::Deficient {
                    poi,
                    paths: paths.len(),
                });
            }
            used_sensors.extend(paths.into_iter().flatten());
        }
        Ok(MConnectivity::Satisfied { used_sensors })
    }

    /// Up to `m` disjoint paths for one POI, each as its sensor sequence.
    fn disjoint_paths(
        &self,
        poi: usize,
        m: usize,
        inactive: &[bool],
        level: &LevelGraph,
    ) -> Result<Vec<Vec<usize>>> {
        let mut used = inactive.to_vec();
        let mut paths = Vec::with_capacity(m);
        while paths.len() < m {
            let Some(path) = self.find_path_masked(poi, &used, level) else {
                break;
            };
            let sensors = path.sensors()?;
            for &s in &sensors {
                used[s] = true;
            }
            paths.push(sensors);
        }
        Ok(paths)
    }

    /// Validates K-coverage then M-connectivity, raising on infeasibility.
    ///
    /// # Errors
    /// - [`InvalidInstanceError::InsufficientCoverage`] naming the first POI
    ///   short of `k` sensors.
    /// - [`InvalidInstanceError::InsufficientConnectivity`] naming the first
    ///   POI short of `m` paths.
    /// - [`KcmcError::BrokenPredecessorChain`] on an internal defect.
    ///
    /// [`KcmcError::BrokenPredecessorChain`]: crate::error::KcmcError::BrokenPredecessorChain
    pub fn validate(&self, k: usize, m: usize, inactive: &BTreeSet<usize>) -> Result<Certificate> {
        let coverage_sensors = match self.fast_k_coverage(k, inactive) {
            satisfied @ KCoverage::Satisfied { .. } => satisfied.used_sensors(),
            KCoverage::Deficient { poi, coverage } => {
                let err = InvalidInstanceError::InsufficientCoverage { poi, coverage, k };
                return Err(err.into());
            }
        };

        match self.fast_m_connectivity(m, inactive)? {
            MConnectivity::Satisfied { used_sensors } => Ok(Certificate {
                coverage_sensors,
                connectivity_sensors: used_sensors,
            }),
            MConnectivity::Deficient { poi, paths } => {
                let err = InvalidInstanceError::InsufficientConnectivity { poi, paths, m };
                Err(err.into())
            }
        }
    }

    /// Boolean form of [`validate`](Self::validate).
    ///
    /// Infeasibility yields `Ok(false)`.
    ///
    /// # Errors
    /// Only [`KcmcError::BrokenPredecessorChain`] is propagated.
    ///
    /// [`KcmcError::BrokenPredecessorChain`]: crate::error::KcmcError::BrokenPredecessorChain
    pub fn is_valid(&self, k: usize, m: usize, inactive: &BTreeSet<usize>) -> Result<bool> {
        match self.validate(k, m, inactive) {
            Ok(_) => Ok(true),
            Err(err) if err.is_infeasible() => Ok(false),
            Err(err) => Err(err),
        }
    }
}
