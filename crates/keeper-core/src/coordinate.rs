use std::fmt;
use std::str::FromStr;

use keeper_util::errors::KeeperError;

/// Version marker that makes a coordinate mutable.
pub const SNAPSHOT_MARKER: &str = "SNAPSHOT";

/// Whether a published coordinate can change without a version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionKind {
    Release,
    Snapshot,
}

/// Maven coordinates of one published library version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactCoordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ArtifactCoordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Parse `"group:artifact:version"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Some(Self::new(*group, *artifact, *version))
            }
            _ => None,
        }
    }

    /// `group:artifact:version`
    pub fn identifier(&self) -> String {
        self.to_string()
    }

    pub fn version_kind(&self) -> VersionKind {
        let version = self.version.to_ascii_uppercase();
        if version.ends_with(SNAPSHOT_MARKER) {
            VersionKind::Snapshot
        } else {
            VersionKind::Release
        }
    }

    pub fn is_snapshot(&self) -> bool {
        self.version_kind() == VersionKind::Snapshot
    }

    /// Version with the trailing snapshot marker removed.
    ///
    /// `1.2.0-SNAPSHOT` and `1.2.0-snapshot` both give `1.2.0`; release
    /// versions are returned unchanged.
    pub fn base_version(&self) -> &str {
        if !self.is_snapshot() {
            return &self.version;
        }
        let cut = self.version.len() - SNAPSHOT_MARKER.len();
        self.version[..cut].trim_end_matches(['-', '.'])
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| KeeperError::Config {
            message: format!("'{s}' is not a group:artifact:version coordinate"),
        })
    }
}

/// The library family a resolution searches for.
///
/// Written as `group:artifact` or `group:artifact:version`; matching always
/// ignores the version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl Target {
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact] if !group.is_empty() && !artifact.is_empty() => Some(Self {
                group: group.to_string(),
                artifact: artifact.to_string(),
                version: None,
            }),
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Some(Self {
                    group: group.to_string(),
                    artifact: artifact.to_string(),
                    version: Some(version.to_string()),
                })
            }
            _ => None,
        }
    }

    /// The target as written; used as the memo scope and as the last hop of a path.
    pub fn identifier(&self) -> String {
        self.to_string()
    }

    /// Whether `coordinate` belongs to this target's family.
    pub fn matches(&self, coordinate: &ArtifactCoordinate) -> bool {
        self.group == coordinate.group && self.artifact == coordinate.artifact
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}

impl FromStr for Target {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| KeeperError::Config {
            message: format!("'{s}' is not a group:artifact[:version] target"),
        })
    }
}

/// Repository file kinds the resolver and its collaborators address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pom,
    Jar,
    Aar,
    Module,
}

impl FileKind {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pom => "pom",
            Self::Jar => "jar",
            Self::Aar => "aar",
            Self::Module => "module",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileKind {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pom" => Ok(Self::Pom),
            "jar" => Ok(Self::Jar),
            "aar" => Ok(Self::Aar),
            "module" => Ok(Self::Module),
            other => Err(KeeperError::Config {
                message: format!("unknown file kind '{other}'"),
            }),
        }
    }
}
