use keeper_core::coordinate::{ArtifactCoordinate, FileKind, Target, VersionKind};

#[test]
fn identifier_joins_all_three_fields() {
    let c = ArtifactCoordinate::new("com.acme", "core", "2.0");
    assert_eq!(c.identifier(), "com.acme:core:2.0");
}

#[test]
fn parse_round_trips_identifier() {
    let c = ArtifactCoordinate::parse("other:util:1.0").unwrap();
    assert_eq!(c.group, "other");
    assert_eq!(c.artifact, "util");
    assert_eq!(c.version, "1.0");
}

#[test]
fn parse_rejects_wrong_arity_and_blanks() {
    assert!(ArtifactCoordinate::parse("acme:core").is_none());
    assert!(ArtifactCoordinate::parse("acme:core:1.0:jar").is_none());
    assert!(ArtifactCoordinate::parse("acme::1.0").is_none());
    assert!("acme:core".parse::<ArtifactCoordinate>().is_err());
}

#[test]
fn equality_needs_all_fields() {
    let a = ArtifactCoordinate::new("acme", "core", "1.0");
    let b = ArtifactCoordinate::new("acme", "core", "1.1");
    assert_ne!(a, b);
    assert!(Target::parse("acme:core").unwrap().matches(&b));
}

#[test]
fn snapshot_detection_is_case_insensitive() {
    assert_eq!(
        ArtifactCoordinate::new("acme", "core", "1.0-SNAPSHOT").version_kind(),
        VersionKind::Snapshot
    );
    assert!(ArtifactCoordinate::new("acme", "core", "1.0-snapshot").is_snapshot());
    assert_eq!(
        ArtifactCoordinate::new("acme", "core", "1.0").version_kind(),
        VersionKind::Release
    );
}

#[test]
fn base_version_strips_snapshot_marker() {
    assert_eq!(
        ArtifactCoordinate::new("acme", "core", "1.2.0-SNAPSHOT").base_version(),
        "1.2.0"
    );
    assert_eq!(
        ArtifactCoordinate::new("acme", "core", "1.2.0-snapshot").base_version(),
        "1.2.0"
    );
    assert_eq!(
        ArtifactCoordinate::new("acme", "core", "1.2.0-beta").base_version(),
        "1.2.0-beta"
    );
}

#[test]
fn target_prefix_matches_any_version() {
    let target = Target::parse("acme:core").unwrap();
    assert_eq!(target.identifier(), "acme:core");
    assert!(target.matches(&ArtifactCoordinate::new("acme", "core", "2.0")));
    assert!(target.matches(&ArtifactCoordinate::new("acme", "core", "3.0-SNAPSHOT")));
    assert!(!target.matches(&ArtifactCoordinate::new("acme", "core-ktx", "2.0")));
}

#[test]
fn versioned_target_still_matches_family() {
    let target: Target = "acme:core:1.0".parse().unwrap();
    assert_eq!(target.identifier(), "acme:core:1.0");
    assert!(target.matches(&ArtifactCoordinate::new("acme", "core", "2.0")));
}

#[test]
fn target_rejects_malformed() {
    assert!(Target::parse("acme").is_none());
    assert!(Target::parse("acme:").is_none());
    assert!("a:b:c:d".parse::<Target>().is_err());
}

#[test]
fn file_kind_extensions() {
    assert_eq!(FileKind::Pom.extension(), "pom");
    assert_eq!(FileKind::Aar.to_string(), "aar");
    assert_eq!("jar".parse::<FileKind>().unwrap(), FileKind::Jar);
    assert!("zip".parse::<FileKind>().is_err());
}
