//! Instance header configuration.
//!
//! [`InstanceConfig`] holds everything needed to (re)generate a random
//! instance: node counts, geometry and the seed. It is also the header of
//! every deserialized instance and the source of its key.

use super::NodeKind;
use crate::error::{InvalidInstanceError, Result};

/// Counts, geometry and seed of an instance.
///
/// # Defaults
///
/// ```
/// use kcmc_heur::instance::InstanceConfig;
///
/// let config = InstanceConfig::default();
/// assert_eq!(config.num_pois, 10);
/// assert_eq!(config.num_sensors, 100);
/// assert_eq!(config.num_sinks, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use kcmc_heur::instance::InstanceConfig;
///
/// let config = InstanceConfig::default()
///     .with_pois(5)
///     .with_sensors(40)
///     .with_area_side(500)
///     .with_coverage_radius(150)
///     .with_communication_radius(200)
///     .with_seed(7);
/// assert_eq!(config.key(), "5 40 1;500 150 200;7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceConfig {
    /// Number of points of interest.
    pub num_pois: usize,

    /// Number of sensor installation spots.
    pub num_sensors: usize,

    /// Number of sinks.
    ///
    /// A single sink sits at the centre of the area; several sinks are
    /// placed uniformly at random.
    pub num_sinks: usize,

    /// Side of the square deployment area.
    pub area_side: u32,

    /// Maximum POI–sensor distance for a coverage edge.
    pub coverage_radius: u32,

    /// Maximum sensor–sensor and sensor–sink distance for a communication edge.
    pub communication_radius: u32,

    /// Seed of the placement stream.
    pub seed: u64,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            num_pois: 10,
            num_sensors: 100,
            num_sinks: 1,
            area_side: 10_000,
            coverage_radius: 1_000,
            communication_radius: 1_000,
            seed: 0,
        }
    }
}

impl InstanceConfig {
    /// Sets the number of POIs.
    pub fn with_pois(mut self, n: usize) -> Self {
        self.num_pois = n;
        self
    }

    /// Sets the number of sensor spots.
    pub fn with_sensors(mut self, n: usize) -> Self {
        self.num_sensors = n;
        self
    }

    /// Sets the number of sinks.
    pub fn with_sinks(mut self, n: usize) -> Self {
        self.num_sinks = n;
        self
    }

    /// Sets the area side.
    pub fn with_area_side(mut self, side: u32) -> Self {
        self.area_side = side;
        self
    }

    /// Sets the coverage radius.
    pub fn with_coverage_radius(mut self, radius: u32) -> Self {
        self.coverage_radius = radius;
        self
    }

    /// Sets the communication radius.
    pub fn with_communication_radius(mut self, radius: u32) -> Self {
        self.communication_radius = radius;
        self
    }

    /// Sets the placement seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Small dense instance, suited to unit tests and quick experiments.
    ///
    /// - 5 POIs, 60 sensors, 1 sink
    /// - Area 1000, coverage 250, communication 300
    pub fn small() -> Self {
        Self {
            num_pois: 5,
            num_sensors: 60,
            num_sinks: 1,
            area_side: 1_000,
            coverage_radius: 250,
            communication_radius: 300,
            seed: 0,
        }
    }

    /// Medium instance.
    ///
    /// - 20 POIs, 300 sensors, 1 sink
    /// - Area 5000, coverage 800, communication 800
    pub fn medium() -> Self {
        Self {
            num_pois: 20,
            num_sensors: 300,
            num_sinks: 1,
            area_side: 5_000,
            coverage_radius: 800,
            communication_radius: 800,
            seed: 0,
        }
    }

    /// Large multi-sink instance.
    ///
    /// - 50 POIs, 1000 sensors, 2 sinks
    /// - Area 10000, coverage 1000, communication 1000
    pub fn large() -> Self {
        Self {
            num_pois: 50,
            num_sensors: 1_000,
            num_sinks: 2,
            area_side: 10_000,
            coverage_radius: 1_000,
            communication_radius: 1_000,
            seed: 0,
        }
    }

    /// The instance key: `<pois> <sensors> <sinks>;<area> <cov> <comm>;<seed>`.
    pub fn key(&self) -> String {
        format!(
            "{} {} {};{} {} {};{}",
            self.num_pois,
            self.num_sensors,
            self.num_sinks,
            self.area_side,
            self.coverage_radius,
            self.communication_radius,
            self.seed
        )
    }

    /// Rejects headers with an empty node family.
    ///
    /// # Errors
    /// Returns [`InvalidInstanceError::EmptyNodeSet`] naming the first empty
    /// family (POIs, then sensors, then sinks).
    pub fn validate(&self) -> Result<()> {
        for (kind, count) in [
            (NodeKind::Poi, self.num_pois),
            (NodeKind::Sensor, self.num_sensors),
            (NodeKind::Sink, self.num_sinks),
        ] {
            if count == 0 {
                return Err(InvalidInstanceError::EmptyNodeSet { kind }.into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KcmcError;

    #[test]
    fn test_default_config() {
        let config = InstanceConfig::default();
        assert_eq!(config.area_side, 10_000);
        assert_eq!(config.coverage_radius, 1_000);
        assert_eq!(config.communication_radius, 1_000);
        assert_eq!(config.seed, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = InstanceConfig::default()
            .with_pois(3)
            .with_sensors(12)
            .with_sinks(2)
            .with_area_side(100)
            .with_coverage_radius(30)
            .with_communication_radius(40)
            .with_seed(99);

        assert_eq!(config.num_pois, 3);
        assert_eq!(config.num_sensors, 12);
        assert_eq!(config.num_sinks, 2);
        assert_eq!(config.key(), "3 12 2;100 30 40;99");
    }

    #[test]
    fn test_presets_are_valid() {
        for config in [
            InstanceConfig::small(),
            InstanceConfig::medium(),
            InstanceConfig::large(),
        ] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
        assert!(InstanceConfig::large().num_sinks > 1);
    }

    #[test]
    fn test_zero_counts_rejected() {
        let base = InstanceConfig::default();
        let cases = [
            (base.clone().with_pois(0), NodeKind::Poi),
            (base.clone().with_sensors(0), NodeKind::Sensor),
            (base.clone().with_sinks(0), NodeKind::Sink),
            // POIs are reported before sinks
            (base.with_pois(0).with_sinks(0), NodeKind::Poi),
        ];
        for (config, kind) in cases {
            assert_eq!(
                config.validate().unwrap_err(),
                KcmcError::InvalidInstance(InvalidInstanceError::EmptyNodeSet { kind })
            );
        }
    }
}
