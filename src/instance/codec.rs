//! Canonical text form of an instance.
//!
//! ```text
//! KCMC;<P> <S> <K>;<area> <cov> <comm>;<seed>;PI;{p s;}*;II;{s1 s2;}*;IS;{s k;}*;END
//! ```
//!
//! Deserialization walks the `;`-separated tokens through a small state
//! machine: prefix, counts, geometry, seed, then section tags and their
//! edges until `END`. The legacy tags `PS`/`SS`/`SK` are read as
//! `PI`/`II`/`IS`. A string without any section tag (`KCMC;<key>;END`) is
//! seed-only and is regenerated from its header.
//!
//! Serialization emits edges in ascending (source, target) order, and each
//! sensor–sensor edge once with `s1 < s2`, so canonical strings round-trip
//! exactly.

use super::{Instance, InstanceConfig, NodeKind};
use crate::error::{FormatError, KcmcError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    PoiSensor,
    SensorSensor,
    SensorSink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Prefix,
    Counts,
    Geometry,
    Seed,
    Tag,
    Edges(Section),
    End,
}

impl Stage {
    fn expected(self) -> &'static str {
        match self {
            Stage::Prefix => "prefix",
            Stage::Counts => "counts",
            Stage::Geometry => "geometry",
            Stage::Seed => "seed",
            Stage::Tag | Stage::Edges(_) | Stage::End => "END",
        }
    }
}

enum Tag {
    Open(Section),
    End,
}

fn tag(token: &str) -> Option<Tag> {
    match token {
        "PI" | "PS" => Some(Tag::Open(Section::PoiSensor)),
        "II" | "SS" => Some(Tag::Open(Section::SensorSensor)),
        "IS" | "SK" => Some(Tag::Open(Section::SensorSink)),
        "END" => Some(Tag::End),
        _ => None,
    }
}

fn fields<T: FromStr, const N: usize>(field: &'static str, token: &str) -> Result<[T; N]> {
    let malformed = || FormatError::MalformedField {
        field,
        token: token.to_string(),
    };
    let parsed: Vec<T> = token
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| malformed())?;
    parsed.try_into().map_err(|_| malformed().into())
}

fn edge(token: &str) -> Result<(usize, usize)> {
    let mut parts = token.split_whitespace().map(str::parse::<usize>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(a)), Some(Ok(b)), None) => Ok((a, b)),
        _ => Err(FormatError::MalformedEdge {
            token: token.to_string(),
        }
        .into()),
    }
}

fn bounded(kind: NodeKind, index: usize, count: usize) -> Result<usize> {
    if index < count {
        Ok(index)
    } else {
        Err(FormatError::IndexOutOfRange { kind, index, count }.into())
    }
}

impl Instance {
    /// Parses the canonical text form.
    ///
    /// # Errors
    /// - [`FormatError`] for a bad prefix, unknown tag, malformed or
    ///   out-of-range field, self edge, or missing `END`.
    /// - [`InvalidInstanceError::EmptyNodeSet`](crate::error::InvalidInstanceError::EmptyNodeSet)
    ///   if a count is zero.
    pub fn deserialize(serialized: &str) -> Result<Self> {
        let normalized = serialized.trim().to_ascii_uppercase();

        let mut stage = Stage::Prefix;
        let mut config = InstanceConfig::default();
        let mut instance: Option<Instance> = None;
        let mut explicit = false;

        for raw in normalized.split(';') {
            let token = raw.trim();
            stage = match stage {
                Stage::Prefix => {
                    if token != "KCMC" {
                        return Err(FormatError::BadPrefix {
                            found: token.to_string(),
                        }
                        .into());
                    }
                    Stage::Counts
                }
                Stage::Counts => {
                    [config.num_pois, config.num_sensors, config.num_sinks] =
                        fields::<usize, 3>("counts", token)?;
                    Stage::Geometry
                }
                Stage::Geometry => {
                    [
                        config.area_side,
                        config.coverage_radius,
                        config.communication_radius,
                    ] = fields::<u32, 3>("geometry", token)?;
                    Stage::Seed
                }
                Stage::Seed => {
                    [config.seed] = fields::<u64, 1>("seed", token)?;
                    instance = Some(Instance::with_header(config.clone())?);
                    Stage::Tag
                }
                Stage::End => Stage::End,
                _ if token.is_empty() => stage,
                Stage::Tag | Stage::Edges(_) => match tag(token) {
                    Some(Tag::Open(section)) => {
                        explicit = true;
                        Stage::Edges(section)
                    }
                    Some(Tag::End) => Stage::End,
                    None => {
                        let Stage::Edges(section) = stage else {
                            return Err(FormatError::UnknownTag {
                                tag: token.to_string(),
                            }
                            .into());
                        };
                        if let Some(inst) = instance.as_mut() {
                            inst.parse_edge(section, token)?;
                        }
                        stage
                    }
                },
            };
        }

        if stage != Stage::End {
            return Err(FormatError::Truncated {
                expected: stage.expected(),
            }
            .into());
        }

        match instance {
            Some(inst) if explicit => Ok(inst),
            _ => {
                tracing::debug!(key = %config.key(), "seed-only instance, regenerating");
                Instance::generate(&config)
            }
        }
    }

    fn parse_edge(&mut self, section: Section, token: &str) -> Result<()> {
        let (a, b) = edge(token)?;
        let (pois, sensors, sinks) = (self.num_pois(), self.num_sensors(), self.num_sinks());
        match section {
            Section::PoiSensor => {
                let poi = bounded(NodeKind::Poi, a, pois)?;
                let sensor = bounded(NodeKind::Sensor, b, sensors)?;
                self.add_coverage(poi, sensor);
            }
            Section::SensorSensor => {
                let a = bounded(NodeKind::Sensor, a, sensors)?;
                let b = bounded(NodeKind::Sensor, b, sensors)?;
                if a == b {
                    return Err(FormatError::SelfLoop { sensor: a }.into());
                }
                self.add_link(a, b);
            }
            Section::SensorSink => {
                let sensor = bounded(NodeKind::Sensor, a, sensors)?;
                let sink = bounded(NodeKind::Sink, b, sinks)?;
                self.add_uplink(sensor, sink);
            }
        }
        Ok(())
    }

    /// Serializes the instance in canonical form.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// The seed-only form `KCMC;<key>;END`, regenerable by [`Instance::deserialize`].
    pub fn seed_string(&self) -> String {
        format!("KCMC;{};END", self.key())
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KCMC;{};", self.key())?;

        f.write_str("PI;")?;
        for (poi, sensors) in self.poi_sensor.iter().enumerate() {
            for s in sensors {
                write!(f, "{poi} {s};")?;
            }
        }

        f.write_str("II;")?;
        for (a, neighbours) in self.sensor_sensor.iter().enumerate() {
            for b in neighbours.range(a + 1..) {
                write!(f, "{a} {b};")?;
            }
        }

        f.write_str("IS;")?;
        for (s, sinks) in self.sensor_sink.iter().enumerate() {
            for k in sinks {
                write!(f, "{s} {k};")?;
            }
        }

        f.write_str("END")
    }
}

impl FromStr for Instance {
    type Err = KcmcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::deserialize(s)
    }
}
