//! Local-optimum reducer.
//!
//! Starting from a feasible active set, tries to deactivate each sensor in
//! ascending index order and keeps the deactivation whenever K-coverage
//! and M-connectivity still hold. The result is minimal under
//! single-sensor removal, not a global minimum.

use crate::error::Result;
use crate::flood::FloodPolicy;
use crate::instance::Instance;
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace};

impl Instance {
    /// Reduces the flood (min policy) of the sensors not in `inactive` to a
    /// local optimum.
    ///
    /// Every sensor of the result is also in
    /// `self.flood(k, m, FloodPolicy::Min, inactive)`.
    ///
    /// # Errors
    /// Same as [`Instance::flood`]: infeasibility of the starting point is
    /// raised.
    #[instrument(level = "debug", skip(self, inactive), fields(inactive = inactive.len()))]
    pub fn local_optimum(
        &self,
        k: usize,
        m: usize,
        inactive: &BTreeSet<usize>,
    ) -> Result<BTreeSet<usize>> {
        let start = self.flood(k, m, FloodPolicy::Min, inactive)?;
        self.reduce(k, m, &start.sensors)
    }

    /// Removes sensors from `active` one at a time while the set stays
    /// feasible.
    ///
    /// # Errors
    /// - [`InvalidInstanceError`](crate::error::InvalidInstanceError) if
    ///   `active` itself is not feasible for `k` and `m`.
    /// - [`KcmcError::BrokenPredecessorChain`](crate::error::KcmcError::BrokenPredecessorChain)
    ///   on an internal defect.
    pub fn reduce(&self, k: usize, m: usize, active: &BTreeSet<usize>) -> Result<BTreeSet<usize>> {
        let mut inactive = self.invert_set(active);
        self.validate(k, m, &inactive)?;

        let mut removed = 0;
        for &sensor in active.range(..self.num_sensors()) {
            inactive.insert(sensor);
            if self.is_valid(k, m, &inactive)? {
                removed += 1;
                trace!(sensor, "sensor removed");
            } else {
                inactive.remove(&sensor);
            }
        }

        let kept = self.invert_set(&inactive);
        debug!(removed, kept = kept.len(), "reduction finished");
        Ok(kept)
    }
}
