//! Depth-first reachability from published modules to a target library family.
//!
//! The search runs on an explicit stack, one frame per module being expanded,
//! so depth is bounded by memory rather than the call stack. Every fetch is
//! awaited in sequence.

use std::collections::HashMap;
use std::vec;

use keeper_core::config::ParseFailurePolicy;
use keeper_core::coordinate::{ArtifactCoordinate, FileKind, Target};
use keeper_maven::download::Transport;
use keeper_maven::pom;
use keeper_maven::repository::Layout;
use keeper_maven::snapshot::resolve_snapshot_version;
use keeper_util::errors::KeeperResult;
use keeper_util::hash::sha1_bytes;

use crate::accumulator::{Accumulator, MembershipSet, NextHop, PathMap};
use crate::context::ResolveContext;
use crate::memo::{Reachability, ResolutionMemo};

/// A module whose direct dependencies are being walked.
struct Frame {
    identifier: String,
    dependencies: vec::IntoIter<ArtifactCoordinate>,
    /// Dependency whose own frame is above this one on the stack.
    pending: Option<ArtifactCoordinate>,
    found: bool,
    /// Shallowest stack depth of an ancestor whose edge was skipped as a cycle
    /// below this frame. A miss under such a cut is not final.
    cut: Option<usize>,
}

enum Visit {
    /// Answered without expanding the module.
    Done(bool),
    /// The module's manifest was read; walk its dependencies.
    Expand(Frame),
}

/// Whether `module` transitively depends on the `target` family.
///
/// Reachable modules are recorded in `acc`; reachability verdicts are cached
/// in `memo` under the target's identifier. On error both are restored to
/// their state at entry. Fingerprints and stored manifests written before
/// the error are kept.
pub async fn resolve<T, A>(
    ctx: &mut ResolveContext<T>,
    module: &ArtifactCoordinate,
    target: &Target,
    acc: &mut A,
    memo: &mut ResolutionMemo,
) -> KeeperResult<bool>
where
    T: Transport,
    A: Accumulator + Clone,
{
    let saved_acc = acc.clone();
    let saved_memo = memo.clone();
    match search(ctx, module, target, acc, memo).await {
        Ok(found) => Ok(found),
        Err(e) => {
            *acc = saved_acc;
            *memo = saved_memo;
            Err(e)
        }
    }
}

async fn search<T: Transport, A: Accumulator>(
    ctx: &mut ResolveContext<T>,
    module: &ArtifactCoordinate,
    target: &Target,
    acc: &mut A,
    memo: &mut ResolutionMemo,
) -> KeeperResult<bool> {
    let scope = target.identifier();
    // Identifier -> stack depth of every module being expanded.
    let mut on_path: HashMap<String, usize> = HashMap::new();
    let mut stack: Vec<Frame> = Vec::new();

    match enter(ctx, module, target, &scope, acc, memo).await? {
        Visit::Done(found) => return Ok(found),
        Visit::Expand(frame) => {
            on_path.insert(frame.identifier.clone(), 0);
            stack.push(frame);
        }
    }

    // Verdict of the frame just popped, and the cut it carried.
    let mut returned: Option<(bool, Option<usize>)> = None;
    while let Some(frame) = stack.last_mut() {
        if let Some((reached, cut)) = returned.take() {
            if let Some(dependency) = frame.pending.take() {
                match cut {
                    Some(cut) if !reached => {
                        frame.cut = Some(frame.cut.map_or(cut, |own| own.min(cut)));
                    }
                    _ => settle(frame, &dependency, reached, &scope, acc, memo),
                }
            }
        }

        let Some(dependency) = frame.dependencies.next() else {
            let depth = stack.len() - 1;
            let Some(frame) = stack.pop() else { break };
            on_path.remove(&frame.identifier);
            let cut = frame.cut.filter(|&ancestor| ancestor < depth);
            if frame.found || cut.is_none() {
                memo.mark(&scope, &frame.identifier, frame.found.into());
            } else {
                tracing::debug!("{}: no verdict while a cycle is open", frame.identifier);
            }
            returned = Some((frame.found, if frame.found { None } else { cut }));
            continue;
        };
        let dep_id = dependency.identifier();

        if acc.contains(&dep_id) {
            acc.record_reachable(&frame.identifier, NextHop::Dependency(&dep_id));
            frame.found = true;
            continue;
        }

        if ctx.matches_target(target, &dependency) {
            tracing::info!("affected: {} -> {scope}", frame.identifier);
            acc.record_reachable(
                &frame.identifier,
                NextHop::Target {
                    dependency: &dep_id,
                    target,
                },
            );
            memo.mark(&scope, &dep_id, Reachability::Reachable);
            memo.mark(&scope, &frame.identifier, Reachability::Reachable);
            frame.found = true;
            continue;
        }

        if let Some(&ancestor) = on_path.get(&dep_id) {
            tracing::debug!("{}: skipping cyclic edge to {dep_id}", frame.identifier);
            frame.cut = Some(frame.cut.map_or(ancestor, |cut| cut.min(ancestor)));
            continue;
        }

        match enter(ctx, &dependency, target, &scope, acc, memo).await? {
            Visit::Done(reached) => settle(frame, &dependency, reached, &scope, acc, memo),
            Visit::Expand(child) => {
                frame.pending = Some(dependency);
                let depth = stack.len();
                on_path.insert(child.identifier.clone(), depth);
                stack.push(child);
            }
        }
    }

    Ok(returned.is_some_and(|(found, _)| found))
}

/// Record the verdict for `dependency`, a direct dependency of `frame`.
fn settle<A: Accumulator>(
    frame: &mut Frame,
    dependency: &ArtifactCoordinate,
    reached: bool,
    scope: &str,
    acc: &mut A,
    memo: &mut ResolutionMemo,
) {
    let dep_id = dependency.identifier();
    if reached {
        tracing::info!("affected: {} -> {scope}", frame.identifier);
        acc.record_reachable(&frame.identifier, NextHop::Dependency(&dep_id));
        memo.mark(scope, &dep_id, Reachability::Reachable);
        memo.mark(scope, &frame.identifier, Reachability::Reachable);
        frame.found = true;
    } else {
        memo.mark(scope, &dep_id, Reachability::Unreachable);
    }
}

/// Short-circuit checks, then fetch and parse the module's manifest.
async fn enter<T: Transport, A: Accumulator>(
    ctx: &mut ResolveContext<T>,
    module: &ArtifactCoordinate,
    target: &Target,
    scope: &str,
    acc: &mut A,
    memo: &mut ResolutionMemo,
) -> KeeperResult<Visit> {
    let identifier = module.identifier();

    if acc.self_match() && ctx.matches_target(target, module) {
        memo.mark(scope, &identifier, Reachability::Reachable);
        return Ok(Visit::Done(true));
    }
    if !ctx.is_tracked(&identifier) {
        tracing::debug!("{identifier} is not tracked");
        return Ok(Visit::Done(false));
    }
    if acc.contains(&identifier) {
        return Ok(Visit::Done(true));
    }
    if memo.is_unreachable(scope, &identifier) {
        tracing::debug!("{identifier} already known not to reach {scope}");
        return Ok(Visit::Done(false));
    }
    if ctx.matches_target(target, module) && acc.record_match(&identifier) {
        tracing::info!("affected: {identifier} is in {scope}");
        memo.mark(scope, &identifier, Reachability::Reachable);
        return Ok(Visit::Done(true));
    }

    tracing::info!("check: {identifier}");
    let dependencies = read_dependencies(ctx, module, &identifier).await?;
    Ok(Visit::Expand(Frame {
        identifier,
        dependencies: dependencies.into_iter(),
        pending: None,
        found: false,
        cut: None,
    }))
}

/// Direct dependencies of `module`, from the store or the repository.
async fn read_dependencies<T: Transport>(
    ctx: &mut ResolveContext<T>,
    module: &ArtifactCoordinate,
    identifier: &str,
) -> KeeperResult<Vec<ArtifactCoordinate>> {
    ctx.store().ensure_module_dir(module)?;

    let snapshot = module.is_snapshot();
    let build = if snapshot {
        Some(resolve_snapshot_version(ctx.client(), module).await?)
    } else {
        None
    };
    let layout = match build.as_deref() {
        Some(build) => Layout::Snapshot { build },
        None => Layout::Release,
    };

    let cached = if snapshot {
        None
    } else {
        ctx.cache_mut().get_checksum(module, FileKind::Pom)?
    };
    let checksum = match cached {
        Some(checksum) => {
            tracing::debug!("{identifier}: cached pom checksum {checksum}");
            checksum
        }
        None => {
            let checksum = ctx.client().fetch_pom_checksum(module, layout).await?;
            ctx.cache_mut()
                .set_checksum(module, FileKind::Pom, &checksum)?;
            checksum
        }
    };

    let path = ctx.store().manifest_path(module, &checksum);
    let bytes = if !snapshot && path.is_file() {
        tracing::debug!("{identifier}: reusing {}", path.display());
        ctx.store().read(&path)?
    } else {
        tracing::info!("download pom: {identifier}");
        let bytes = ctx.client().fetch_pom(module, layout).await?;
        let actual = sha1_bytes(&bytes);
        if !actual.eq_ignore_ascii_case(&checksum) {
            tracing::warn!("{identifier}: pom sha1 {actual} does not match published {checksum}");
        }
        ctx.store().write(&path, &bytes)?;
        bytes
    };

    match pom::parse_document_for(&bytes, module) {
        Ok(document) => Ok(document.dependencies),
        Err(e) => match ctx.parse_policy() {
            ParseFailurePolicy::TreatAsEmpty => {
                tracing::warn!("{identifier}: unreadable pom treated as empty: {e}");
                Ok(Vec::new())
            }
            ParseFailurePolicy::Propagate => Err(e),
        },
    }
}

/// Every module among `roots` that reaches any of `targets`, plus the
/// modules on the way. One memo is shared by the whole run.
pub async fn affected_modules<T: Transport>(
    ctx: &mut ResolveContext<T>,
    roots: &[ArtifactCoordinate],
    targets: &[Target],
) -> KeeperResult<MembershipSet> {
    let mut affected = MembershipSet::new();
    let mut memo = ResolutionMemo::new();
    for target in targets {
        for root in roots {
            if resolve(ctx, root, target, &mut affected, &mut memo).await? {
                tracing::debug!("{root} reaches {target}");
            }
        }
    }
    Ok(affected)
}

/// Next-hop map from `roots` toward `target`, in discovery order.
pub async fn substitution_chain<T: Transport>(
    ctx: &mut ResolveContext<T>,
    roots: &[ArtifactCoordinate],
    target: &Target,
) -> KeeperResult<PathMap> {
    let mut paths = PathMap::new();
    let mut memo = ResolutionMemo::new();
    for root in roots {
        resolve(ctx, root, target, &mut paths, &mut memo).await?;
    }
    Ok(paths)
}
