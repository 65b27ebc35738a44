//! maven-metadata.xml parsing for version discovery and snapshot build resolution.

use quick_xml::events::Event;
use quick_xml::Reader;

use keeper_util::errors::{KeeperError, KeeperResult};

/// Artifact-level Maven metadata listing available versions.
#[derive(Debug, Clone, Default)]
pub struct MavenMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub latest: Option<String>,
    pub release: Option<String>,
    pub versions: Vec<String>,
    pub last_updated: Option<String>,
}

/// Version-level metadata of a `-SNAPSHOT` directory.
#[derive(Debug, Clone, Default)]
pub struct SnapshotMetadata {
    pub version: Option<String>,
    pub timestamp: Option<String>,
    pub build_number: Option<u32>,
    pub snapshot_versions: Vec<SnapshotVersion>,
}

/// One `<snapshotVersion>` entry: the timestamped build of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotVersion {
    pub classifier: Option<String>,
    pub extension: Option<String>,
    pub value: String,
}

impl SnapshotMetadata {
    /// The build version files are published under, from the first
    /// `snapshotVersion` entry.
    pub fn build_version(&self) -> Option<&str> {
        self.snapshot_versions
            .first()
            .map(|v| v.value.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// Element boundaries reported by [`walk`], keyed by the `a>b>c` element path.
enum Node<'a> {
    Open(&'a str),
    Close(&'a str, &'a str),
}

/// Walk an XML document, reporting every opened and closed element.
fn walk(xml: &str, what: &str, mut visit: impl FnMut(Node<'_>)) -> KeeperResult<()> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text_buf.clear();
                visit(Node::Open(&path.join(">")));
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                visit(Node::Close(&path.join(">"), &text_buf));
                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(KeeperError::Parse {
                    message: format!("Failed to parse {what}: {e}"),
                });
            }
            _ => {}
        }
    }

    if path.is_empty() {
        Ok(())
    } else {
        Err(KeeperError::Parse {
            message: format!("{what} ended inside <{}>", path.join(">")),
        })
    }
}

/// Parse an artifact-level `maven-metadata.xml`.
pub fn parse_metadata(xml: &str) -> KeeperResult<MavenMetadata> {
    let mut meta = MavenMetadata::default();
    walk(xml, "maven-metadata.xml", |node| {
        let Node::Close(ctx, text) = node else {
            return;
        };
        match ctx {
            "metadata>groupId" => meta.group_id = Some(text.to_string()),
            "metadata>artifactId" => meta.artifact_id = Some(text.to_string()),
            "metadata>versioning>latest" => meta.latest = Some(text.to_string()),
            "metadata>versioning>release" => meta.release = Some(text.to_string()),
            "metadata>versioning>versions>version" => meta.versions.push(text.to_string()),
            "metadata>versioning>lastUpdated" => meta.last_updated = Some(text.to_string()),
            _ => {}
        }
    })?;
    Ok(meta)
}

/// Parse a version-level `maven-metadata.xml` of a snapshot.
pub fn parse_snapshot_metadata(xml: &str) -> KeeperResult<SnapshotMetadata> {
    const ENTRY: &str = "metadata>versioning>snapshotVersions>snapshotVersion";

    let mut versions: Vec<SnapshotVersion> = Vec::new();
    let mut version: Option<String> = None;
    let mut timestamp: Option<String> = None;
    let mut build_number: Option<u32> = None;
    walk(xml, "snapshot metadata", |node| match node {
        Node::Open(ctx) => {
            if ctx == ENTRY {
                versions.push(SnapshotVersion::default());
            }
        }
        Node::Close(ctx, text) => {
            if let Some(field) = ctx.strip_prefix(ENTRY).and_then(|f| f.strip_prefix('>')) {
                if let Some(entry) = versions.last_mut() {
                    match field {
                        "classifier" => entry.classifier = Some(text.to_string()),
                        "extension" => entry.extension = Some(text.to_string()),
                        "value" => entry.value = text.to_string(),
                        _ => {}
                    }
                }
                return;
            }
            match ctx {
                "metadata>version" => version = Some(text.to_string()),
                "metadata>versioning>snapshot>timestamp" => timestamp = Some(text.to_string()),
                "metadata>versioning>snapshot>buildNumber" => build_number = text.parse().ok(),
                _ => {}
            }
        }
    })?;

    Ok(SnapshotMetadata {
        version,
        timestamp,
        build_number,
        snapshot_versions: versions,
    })
}
