use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A/L study stream. Determines which courses a student may apply for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stream {
    PhysicalScience,
    BiologicalScience,
    Commerce,
    Arts,
    EngineeringTechnology,
    BiosystemsTechnology,
}

impl Stream {
    pub const fn all() -> [Self; 6] {
        [
            Self::PhysicalScience,
            Self::BiologicalScience,
            Self::Commerce,
            Self::Arts,
            Self::EngineeringTechnology,
            Self::BiosystemsTechnology,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PhysicalScience => "Physical Science",
            Self::BiologicalScience => "Biological Science",
            Self::Commerce => "Commerce",
            Self::Arts => "Arts",
            Self::EngineeringTechnology => "Engineering Technology",
            Self::BiosystemsTechnology => "Biosystems Technology",
        }
    }

    /// Parse a stream name as typed by a person or stored by older forms.
    ///
    /// Matching ignores case, surrounding whitespace, repeated spaces, and
    /// treats `-` and `_` as spaces. Known spellings such as "Bio Science"
    /// map onto the canonical stream.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match normalized.as_str() {
            "physical science" | "physical" | "maths" | "mathematics" => {
                Some(Self::PhysicalScience)
            }
            "biological science" | "bio science" | "biology" | "bio" => {
                Some(Self::BiologicalScience)
            }
            "commerce" => Some(Self::Commerce),
            "arts" | "art" => Some(Self::Arts),
            "engineering technology" | "engineering tech" | "technology" | "etech" => {
                Some(Self::EngineeringTechnology)
            }
            "biosystems technology" | "bio systems technology" | "bio technology"
            | "biosystems" | "btech" => Some(Self::BiosystemsTechnology),
            _ => None,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Stream {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Stream {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Stream::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown stream '{}'", raw)))
    }
}
