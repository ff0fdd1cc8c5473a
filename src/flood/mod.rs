//! Flood heuristic.
//!
//! Widens a connectivity certificate with every relay that could replace
//! the one the path search happened to pick. For a path
//! `(P) i0, i1, …, ik (S)` and each consecutive triple `(prev, cur, next)`
//! (with `prev = P` at the start and `next = S` at the end), every active
//! sensor adjacent to both `prev` and `next` is added to the result, not
//! only `cur`.
//!
//! Flood assumes a feasible starting point: insufficient coverage or
//! connectivity is raised as an error, never reported as an outcome.

mod types;

pub use types::{FloodOutcome, FloodPolicy};

use crate::error::{InvalidInstanceError, Result};
use crate::flow::{Hop, KCoverage, LevelGraph};
use crate::instance::Instance;
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace};

impl Instance {
    /// Floods `m` disjoint paths per POI over the sensors not in `inactive`.
    ///
    /// The result always contains every active sensor covering a POI, so it
    /// keeps the K-coverage that was checked up front.
    ///
    /// # Errors
    /// - [`InvalidInstanceError::InsufficientCoverage`] if K-coverage fails.
    /// - [`InvalidInstanceError::InsufficientConnectivity`] if some POI has
    ///   fewer than `m` disjoint paths.
    /// - [`KcmcError::BrokenPredecessorChain`] on an internal defect.
    ///
    /// [`KcmcError::BrokenPredecessorChain`]: crate::error::KcmcError::BrokenPredecessorChain
    #[instrument(level = "debug", skip(self, inactive), fields(inactive = inactive.len()))]
    pub fn flood(
        &self,
        k: usize,
        m: usize,
        policy: FloodPolicy,
        inactive: &BTreeSet<usize>,
    ) -> Result<FloodOutcome> {
        if let KCoverage::Deficient { poi, coverage } = self.fast_k_coverage(k, inactive) {
            let err = InvalidInstanceError::InsufficientCoverage { poi, coverage, k };
            return Err(err.into());
        }

        let blocked = self.mask(inactive);
        let mut sensors: BTreeSet<usize> = (0..self.num_pois())
            .flat_map(|poi| self.covering_sensors(poi).iter().copied())
            .filter(|&s| !blocked[s])
            .collect();

        let mut total_paths = 0;
        if m > 0 {
            let level = self.level_graph_masked(&blocked);
            for poi in 0..self.num_pois() {
                total_paths +=
                    self.flood_poi(poi, m, policy, &blocked, &level, &mut sensors)?;
            }
        }

        debug!(
            paths = total_paths,
            sensors = sensors.len(),
            "flood finished"
        );
        Ok(FloodOutcome {
            sensors,
            paths: total_paths,
            policy,
        })
    }

    /// Runs the path search of one POI under `policy`, flooding every path
    /// found. Returns the number of paths found.
    fn flood_poi(
        &self,
        poi: usize,
        m: usize,
        policy: FloodPolicy,
        inactive: &[bool],
        level: &LevelGraph,
        out: &mut BTreeSet<usize>,
    ) -> Result<usize> {
        let mut used = inactive.to_vec();
        let mut found = 0;
        let mut longest = 0;

        loop {
            let Some(path) = self.find_path_masked(poi, &used, level) else {
                if found < m {
                    return Err(InvalidInstanceError::InsufficientConnectivity {
                        poi,
                        paths: found,
                        m,
                    }
                    .into());
                }
                break;
            };

            let path = path.sensors()?;
            found += 1;
            for &s in &path {
                used[s] = true;
            }
            self.flood_path(poi, &path, inactive, out);
            trace!(poi, found, length = path.len(), "path flooded");

            match policy {
                FloodPolicy::Min => {
                    if found == m {
                        break;
                    }
                }
                FloodPolicy::Full => {
                    if found <= m {
                        longest = longest.max(path.len());
                    }
                    if path.len() > longest {
                        break;
                    }
                }
            }
        }

        Ok(found)
    }

    /// Adds the interchangeable relays of every triple of `path` to `out`.
    fn flood_path(
        &self,
        poi: usize,
        path: &[usize],
        inactive: &[bool],
        out: &mut BTreeSet<usize>,
    ) {
        for (i, &current) in path.iter().enumerate() {
            out.insert(current);

            let prev = match i {
                0 => Hop::Poi,
                _ => Hop::Sensor(path[i - 1]),
            };
            let candidates = match prev {
                Hop::Poi => self.covering_sensors(poi),
                Hop::Sensor(p) => self.neighbours(p),
            };
            let next = path.get(i + 1).copied();

            for &x in candidates {
                if inactive[x] {
                    continue;
                }
                let joins_next = match next {
                    Some(n) => self.neighbours(x).contains(&n),
                    None => self.reaches_sink(x),
                };
                if joins_next {
                    out.insert(x);
                }
            }
        }
    }
}
