//! Operation: find the published modules affected by a change to target libraries.

use serde::Serialize;

use keeper_core::config::KeeperConfig;
use keeper_core::coordinate::{ArtifactCoordinate, Target};
use keeper_core::substitution::{self, Substitution, SubstitutionKind};
use keeper_resolver::accumulator::PathMap;
use keeper_resolver::context::ResolveContext;
use keeper_resolver::resolver;
use keeper_util::errors::KeeperResult;
use keeper_util::progress;

/// Options for `keeper affected`.
#[derive(Default)]
pub struct AffectedOptions {
    /// Root modules as `group:artifact:version`.
    pub modules: Vec<String>,
    /// Target families as `group:artifact[:version]`.
    pub targets: Vec<String>,
    /// Print next-hop chains and publish order instead of a flat set.
    pub chain: bool,
    /// Plan substitutions of this kind for the affected modules.
    pub substitute: Option<SubstitutionKind>,
    /// Machine-readable output.
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SubstitutionEntry {
    from: String,
    to: String,
}

impl From<Substitution> for SubstitutionEntry {
    fn from(s: Substitution) -> Self {
        Self {
            from: s.from,
            to: s.to,
        }
    }
}

#[derive(Debug, Serialize)]
struct AffectedReport {
    affected: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    substitutions: Vec<SubstitutionEntry>,
}

#[derive(Debug, Serialize)]
struct ChainReport {
    target: String,
    chains: Vec<Vec<String>>,
    publish_order: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    substitutions: Vec<SubstitutionEntry>,
}

/// Resolve and print the affected modules.
pub async fn affected(config: &KeeperConfig, opts: &AffectedOptions) -> miette::Result<()> {
    let roots = opts
        .modules
        .iter()
        .map(|m| m.parse::<ArtifactCoordinate>())
        .collect::<KeeperResult<Vec<_>>>()?;
    let targets = opts
        .targets
        .iter()
        .map(|t| t.parse::<Target>())
        .collect::<KeeperResult<Vec<_>>>()?;

    if config.resolve.tracked.is_empty() {
        progress::status_warn(
            "Warning",
            "no [resolve].tracked patterns configured; nothing will be resolved",
        );
    }

    let mut ctx = ResolveContext::from_config(config)?;
    let modules = config.module_map();

    let sp = progress::spinner("Resolving affected modules...");
    if opts.chain {
        let mut reports = Vec::with_capacity(targets.len());
        for target in &targets {
            sp.set_message(format!("Resolving chains to {target}..."));
            let paths = resolver::substitution_chain(&mut ctx, &roots, target).await;
            let paths = match paths {
                Ok(paths) => paths,
                Err(e) => {
                    sp.finish_and_clear();
                    return Err(e.into());
                }
            };
            let publish_order: Vec<String> =
                paths.publish_order().into_iter().map(str::to_string).collect();
            let substitutions = match opts.substitute {
                Some(kind) => plan_entries(kind, publish_order.iter().map(String::as_str), &modules)?,
                None => Vec::new(),
            };
            reports.push(ChainReport {
                target: target.identifier(),
                chains: chains(&paths, &roots),
                publish_order,
                substitutions,
            });
        }
        sp.finish_and_clear();

        if opts.json {
            print_json(&reports)?;
        } else {
            for report in &reports {
                print_chain_report(report);
            }
        }
        return Ok(());
    }

    let set = resolver::affected_modules(&mut ctx, &roots, &targets).await;
    sp.finish_and_clear();
    let set = set?;

    let affected: Vec<String> = set.iter().map(str::to_string).collect();
    let substitutions = match opts.substitute {
        Some(kind) => plan_entries(kind, affected.iter().map(String::as_str), &modules)?,
        None => Vec::new(),
    };
    let report = AffectedReport {
        affected,
        substitutions,
    };

    if opts.json {
        print_json(&report)?;
    } else {
        progress::status_info("Affected", &format!("{} module(s)", report.affected.len()));
        for id in &report.affected {
            println!("{id}");
        }
        print_substitutions(&report.substitutions);
    }
    Ok(())
}

fn plan_entries<'a>(
    kind: SubstitutionKind,
    identifiers: impl IntoIterator<Item = &'a str>,
    modules: &substitution::ModuleMap,
) -> KeeperResult<Vec<SubstitutionEntry>> {
    Ok(substitution::plan(kind, identifiers, modules)?
        .into_iter()
        .map(SubstitutionEntry::from)
        .collect())
}

/// One chain per root that reaches the target.
fn chains(paths: &PathMap, roots: &[ArtifactCoordinate]) -> Vec<Vec<String>> {
    roots
        .iter()
        .map(|root| paths.chain(&root.identifier()))
        .filter(|chain| !chain.is_empty())
        .map(|chain| chain.into_iter().map(str::to_string).collect())
        .collect()
}

fn print_chain_report(report: &ChainReport) {
    progress::status_info("Target", &report.target);
    if report.chains.is_empty() {
        println!("  (no module reaches {})", report.target);
        return;
    }
    for chain in &report.chains {
        println!("  {}", chain.join(" -> "));
    }
    println!();
    println!("Publish order:");
    for (i, id) in report.publish_order.iter().enumerate() {
        println!("  {}. {id}", i + 1);
    }
    print_substitutions(&report.substitutions);
}

fn print_substitutions(substitutions: &[SubstitutionEntry]) {
    if substitutions.is_empty() {
        return;
    }
    println!();
    println!("Substitutions:");
    for s in substitutions {
        println!("  {} => {}", s.from, s.to);
    }
}

fn print_json(value: &impl Serialize) -> miette::Result<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| {
        keeper_util::errors::KeeperError::Generic {
            message: format!("Failed to serialize report: {e}"),
        }
    })?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keeper_resolver::accumulator::{Accumulator, NextHop};

    #[test]
    fn chains_only_for_reaching_roots() {
        let target = Target::parse("acme:core").unwrap();
        let mut paths = PathMap::new();
        paths.record_reachable(
            "other:util:1.0",
            NextHop::Target {
                dependency: "acme:core:2.0",
                target: &target,
            },
        );
        paths.record_reachable("acme:app:1.0", NextHop::Dependency("other:util:1.0"));

        let roots = [
            ArtifactCoordinate::new("acme", "app", "1.0"),
            ArtifactCoordinate::new("acme", "lonely", "1.0"),
        ];
        assert_eq!(
            chains(&paths, &roots),
            vec![vec![
                "acme:app:1.0".to_string(),
                "other:util:1.0".to_string(),
                "acme:core".to_string()
            ]]
        );
    }

    #[test]
    fn report_json_shape() {
        let report = AffectedReport {
            affected: vec!["acme:app:1.0".into()],
            substitutions: plan_entries(
                SubstitutionKind::Snapshot,
                ["acme:app:1.0"],
                &Default::default(),
            )
            .unwrap(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["affected"][0], "acme:app:1.0");
        assert_eq!(json["substitutions"][0]["to"], "acme:app:1.0-SNAPSHOT");
    }
}
