use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::CandidateShape;
use crate::context::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    Ios,
    Macos,
    Tvos,
    Watchos,
    Visionos,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Ios,
        Platform::Macos,
        Platform::Tvos,
        Platform::Watchos,
        Platform::Visionos,
    ];
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Ios => write!(f, "iOS"),
            Platform::Macos => write!(f, "macOS"),
            Platform::Tvos => write!(f, "tvOS"),
            Platform::Watchos => write!(f, "watchOS"),
            Platform::Visionos => write!(f, "visionOS"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "macos" => Ok(Platform::Macos),
            "tvos" => Ok(Platform::Tvos),
            "watchos" => Ok(Platform::Watchos),
            "visionos" => Ok(Platform::Visionos),
            _ => Err(format!("unknown platform `{}`", s)),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.to_string()
    }
}

/// An OS version such as `17.0` or `16.1.2`. Missing components are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return Err(format!("invalid version `{}`", s));
        }
        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| format!("invalid version `{}`", s))?;
        }
        Ok(Version::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

/// Where a shape exists at all (static) and from which OS version (runtime).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Availability {
    /// `None` means every platform.
    platforms: Option<Vec<Platform>>,
    introduced: Vec<(Platform, Version)>,
}

impl Availability {
    pub fn everywhere() -> Self {
        Self::default()
    }

    pub fn only(platforms: impl IntoIterator<Item = Platform>) -> Self {
        Self {
            platforms: Some(platforms.into_iter().collect()),
            introduced: Vec::new(),
        }
    }

    pub fn introduced(mut self, platform: Platform, version: Version) -> Self {
        self.introduced.retain(|(p, _)| *p != platform);
        self.introduced.push((platform, version));
        self
    }

    pub fn is_available_on(&self, platform: Platform) -> bool {
        self.platforms
            .as_ref()
            .map_or(true, |platforms| platforms.contains(&platform))
    }

    pub fn runtime_gate(&self) -> Option<RuntimeGate> {
        if self.introduced.is_empty() {
            None
        } else {
            Some(RuntimeGate {
                introduced: self.introduced.clone(),
            })
        }
    }
}

/// Minimum runtime versions, evaluated on every resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeGate {
    introduced: Vec<(Platform, Version)>,
}

impl RuntimeGate {
    pub fn required(&self, platform: Platform) -> Option<Version> {
        self.introduced
            .iter()
            .find(|(p, _)| *p == platform)
            .map(|(_, v)| *v)
    }

    /// Platforms without an entry are always available.
    pub fn check(&self, environment: &Environment) -> Result<(), Version> {
        match self.required(environment.platform) {
            Some(required) if environment.runtime_version < required => Err(required),
            _ => Ok(()),
        }
    }
}

/// Drop the shapes that do not exist on `platform`. Applied once when a catalog is loaded.
pub fn filter_for_platform(candidates: Vec<CandidateShape>, platform: Platform) -> Vec<CandidateShape> {
    let before = candidates.len();
    let kept: Vec<CandidateShape> = candidates
        .into_iter()
        .filter(|shape| shape.availability.is_available_on(platform))
        .collect();
    if kept.len() != before {
        log::debug!(
            "Filtered {} shape(s) unavailable on {}",
            before - kept.len(),
            platform
        );
    }
    kept
}
