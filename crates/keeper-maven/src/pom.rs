//! POM parsing: coordinates, dependency declarations, parent fallback,
//! property interpolation.

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use keeper_core::coordinate::ArtifactCoordinate;
use keeper_util::errors::{KeeperError, KeeperResult};

/// A parsed POM (Project Object Model) file, before coordinates are resolved.
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,

    pub parent: Option<ParentRef>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<PomDependency>,
    pub dependency_management: Vec<PomDependency>,
}

/// Reference to a parent POM.
#[derive(Debug, Clone, Default)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// A dependency declared in a POM file.
#[derive(Debug, Clone, Default)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

/// What the resolver needs from a manifest: its own coordinate and its
/// direct dependencies in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomDocument {
    pub coordinate: ArtifactCoordinate,
    pub dependencies: Vec<ArtifactCoordinate>,
}

impl Pom {
    /// Effective group ID (falls back to parent).
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.group_id.as_str()))
    }

    /// Effective version (falls back to parent).
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.version.as_str()))
    }

    /// Resolve `${property}` references in a string using POM properties
    /// and built-in project variables. Unknown references are left in place.
    pub fn interpolate(&self, input: &str) -> String {
        let mut result = input.to_string();
        let mut iterations = 0;
        while result.contains("${") && iterations < 20 {
            iterations += 1;
            let mut new = result.clone();
            while let Some(start) = new.find("${") {
                let Some(end) = new[start..].find('}') else {
                    break;
                };
                let key = &new[start + 2..start + end];
                let Some(val) = self.resolve_property(key) else {
                    break;
                };
                new = format!("{}{}{}", &new[..start], val, &new[start + end + 1..]);
            }
            if new == result {
                break;
            }
            result = new;
        }
        result
    }

    fn resolve_property(&self, key: &str) -> Option<String> {
        match key {
            "project.groupId" | "pom.groupId" => self.effective_group_id().map(str::to_string),
            "project.artifactId" | "pom.artifactId" => self.artifact_id.clone(),
            "project.version" | "pom.version" => self.effective_version().map(str::to_string),
            "project.packaging" | "pom.packaging" => self.packaging.clone(),
            "project.parent.groupId" => self.parent.as_ref().map(|p| p.group_id.clone()),
            "project.parent.version" => self.parent.as_ref().map(|p| p.version.clone()),
            _ => self.properties.get(key).cloned(),
        }
    }

    /// Interpolate all property references in dependencies and dependency management.
    pub fn resolve_properties(&mut self) {
        let pom_snapshot = self.clone();
        for dep in self
            .dependencies
            .iter_mut()
            .chain(self.dependency_management.iter_mut())
        {
            dep.group_id = pom_snapshot.interpolate(&dep.group_id);
            dep.artifact_id = pom_snapshot.interpolate(&dep.artifact_id);
            if let Some(ref v) = dep.version {
                dep.version = Some(pom_snapshot.interpolate(v));
            }
        }
    }

    /// Look up a version from dependency management for a given group:artifact.
    pub fn managed_version(&self, group_id: &str, artifact_id: &str) -> Option<&str> {
        self.dependency_management
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
            .and_then(|d| d.version.as_deref())
    }

    /// Resolve this POM's own coordinate and its addressable dependencies.
    ///
    /// Call after [`Pom::resolve_properties`]. Own-coordinate fields absent
    /// from the POM and its parent are taken from `requested` when given.
    /// Dependencies that end up without a concrete version are dropped.
    pub fn into_document(self, requested: Option<&ArtifactCoordinate>) -> KeeperResult<PomDocument> {
        let missing = |field: &str| KeeperError::Parse {
            message: format!("POM has no {field}"),
        };
        let group = self
            .effective_group_id()
            .map(|g| self.interpolate(g))
            .or_else(|| requested.map(|c| c.group.clone()))
            .ok_or_else(|| missing("groupId"))?;
        let artifact = self
            .artifact_id
            .as_deref()
            .map(|a| self.interpolate(a))
            .or_else(|| requested.map(|c| c.artifact.clone()))
            .ok_or_else(|| missing("artifactId"))?;
        let version = self
            .effective_version()
            .map(|v| self.interpolate(v))
            .or_else(|| requested.map(|c| c.version.clone()))
            .ok_or_else(|| missing("version"))?;
        let coordinate = ArtifactCoordinate::new(group, artifact, version);

        let mut dependencies = Vec::with_capacity(self.dependencies.len());
        for dep in &self.dependencies {
            let version = dep
                .version
                .as_deref()
                .or_else(|| self.managed_version(&dep.group_id, &dep.artifact_id));
            let Some(version) = version else {
                tracing::debug!(
                    "{coordinate}: dropping unversioned dependency {}:{}",
                    dep.group_id,
                    dep.artifact_id
                );
                continue;
            };
            let dependency = ArtifactCoordinate::new(&dep.group_id, &dep.artifact_id, version);
            if dependency.identifier().contains("${") {
                tracing::warn!("{coordinate}: dropping unresolved dependency {dependency}");
                continue;
            }
            dependencies.push(dependency);
        }

        Ok(PomDocument {
            coordinate,
            dependencies,
        })
    }
}

/// Parse a POM XML string into a `Pom` struct.
pub fn parse_pom(xml: &str) -> KeeperResult<Pom> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = Pom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    let mut current_dep: Option<PomDependency> = None;
    let mut current_parent: Option<ParentRef> = None;
    let mut in_dep_mgmt = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text_buf.clear();

                match path_context(&path).as_str() {
                    "project>dependencyManagement>dependencies>dependency" => {
                        in_dep_mgmt = true;
                        current_dep = Some(PomDependency::default());
                    }
                    "project>dependencies>dependency" => {
                        current_dep = Some(PomDependency::default());
                    }
                    "project>parent" => current_parent = Some(ParentRef::default()),
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path_context(&path);
                let depth = path.len();
                let leaf = path.last().map(String::as_str);

                // <project><properties><key>value</key></properties>
                if depth == 3 && path.get(1).map(String::as_str) == Some("properties") {
                    if let Some(name) = leaf {
                        pom.properties.insert(name.to_string(), text_buf.clone());
                    }
                }

                if let Some(ref mut dep) = current_dep {
                    // Exclusions also carry groupId/artifactId; only direct
                    // children of <dependency> count.
                    if ctx.ends_with(">dependency>groupId") {
                        dep.group_id = text_buf.clone();
                    } else if ctx.ends_with(">dependency>artifactId") {
                        dep.artifact_id = text_buf.clone();
                    } else if ctx.ends_with(">dependency>version") {
                        dep.version = Some(text_buf.clone());
                    }

                    if ctx == "project>dependencies>dependency"
                        || ctx == "project>dependencyManagement>dependencies>dependency"
                    {
                        if let Some(dep) = current_dep.take() {
                            if in_dep_mgmt {
                                pom.dependency_management.push(dep);
                            } else {
                                pom.dependencies.push(dep);
                            }
                        }
                        in_dep_mgmt = false;
                    }
                }

                if let Some(ref mut parent) = current_parent {
                    match ctx.as_str() {
                        "project>parent>groupId" => parent.group_id = text_buf.clone(),
                        "project>parent>artifactId" => parent.artifact_id = text_buf.clone(),
                        "project>parent>version" => parent.version = text_buf.clone(),
                        "project>parent" => pom.parent = current_parent.take(),
                        _ => {}
                    }
                }

                if depth == 2 && path.first().map(String::as_str) == Some("project") {
                    match leaf {
                        Some("groupId") => pom.group_id = Some(text_buf.clone()),
                        Some("artifactId") => pom.artifact_id = Some(text_buf.clone()),
                        Some("version") => pom.version = Some(text_buf.clone()),
                        Some("packaging") => pom.packaging = Some(text_buf.clone()),
                        _ => {}
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(KeeperError::Parse {
                    message: format!("Failed to parse POM XML: {e}"),
                });
            }
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(KeeperError::Parse {
            message: format!("POM ended inside <{}>", path.join(">")),
        });
    }

    Ok(pom)
}

/// Parse manifest bytes into a [`PomDocument`].
pub fn parse_document(bytes: &[u8]) -> KeeperResult<PomDocument> {
    read_document(bytes, None)
}

/// Parse the manifest fetched for `requested`.
///
/// A POM that omits its own groupId, artifactId or version (with no parent
/// to inherit from) is read as `requested`'s instead of failing.
pub fn parse_document_for(bytes: &[u8], requested: &ArtifactCoordinate) -> KeeperResult<PomDocument> {
    read_document(bytes, Some(requested))
}

fn read_document(bytes: &[u8], requested: Option<&ArtifactCoordinate>) -> KeeperResult<PomDocument> {
    let xml = std::str::from_utf8(bytes).map_err(|e| KeeperError::Parse {
        message: format!("POM is not valid UTF-8: {e}"),
    })?;
    let mut pom = parse_pom(xml)?;
    pom.resolve_properties();
    pom.into_document(requested)
}

fn path_context(path: &[String]) -> String {
    path.join(">")
}
