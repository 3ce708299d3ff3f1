//! Dependency classification, filtering and deduplication.

use super::files::FileManifest;
use super::primary::PathClassifier;
use super::registry::{SourceRelation, PRE_FLAGS, RELATIONS};
use crate::header::HeaderStore;
use crate::model::{Comparison, Dependencies, Dependency, DependencyKind, StringPool};
use crate::version::{compare_dependency, DependencyOrder, Evr};
use std::collections::HashSet;

/// Requirements on the package manager itself; never written out.
const RPMLIB_PREFIX: &[u8] = b"rpmlib(";

/// `name + flags + version`, identifying a provide or requirement.
type RelationKey<'h> = (&'h [u8], Option<Comparison>, &'h [u8]);

/// Per-extraction inputs the normalizer needs besides the header.
pub struct DependencyContext<'a, C: ?Sized> {
    pub manifest: &'a FileManifest,
    pub classifier: &'a C,
    /// Requirements starting with this prefix collapse to the single highest
    /// one. Empty disables the collapse.
    pub interpreter_prefix: &'a [u8],
    /// Package NEVRA, for diagnostics.
    pub nevra: &'a str,
}

/// Requirements sharing the interpreter prefix; only the best survives.
struct InterpreterBest<'h> {
    name: &'h [u8],
    dependency: Dependency,
}

/// Read all relations and build the eight dependency lists.
///
/// Requirements are filtered, first match wins:
/// 1. `rpmlib(...)` requirements
/// 2. requirements on a primary path the package ships itself
/// 3. requirements the package provides itself (same name, flags, version)
/// 4. exact duplicates (same name, flags, version and pre bit)
///
/// Entries whose version carries a non-numeric epoch are dropped with a
/// warning, in every relation.
pub fn normalize_dependencies<H, C>(
    header: &H,
    ctx: &DependencyContext<'_, C>,
    pool: &mut StringPool,
) -> Dependencies
where
    H: HeaderStore + ?Sized,
    C: PathClassifier + ?Sized,
{
    let mut out = Dependencies::new();
    let mut provided: HashSet<RelationKey<'_>> = HashSet::new();
    let mut required: HashSet<(RelationKey<'_>, bool)> = HashSet::new();
    let mut interpreter: Option<InterpreterBest<'_>> = None;

    for spec in &RELATIONS {
        let (Some(names), Some(flags), Some(versions)) = (
            header.string_array(spec.name),
            header.number_array(spec.flags),
            header.string_array(spec.version),
        ) else {
            continue;
        };

        let is_requires = spec.relation == SourceRelation::Requires;

        for ((name, raw_flags), version) in names.into_iter().zip(flags).zip(versions) {
            let comparison = Comparison::from_flags(raw_flags);
            let key: RelationKey<'_> = (name, comparison, version);
            let pre = is_requires && raw_flags & PRE_FLAGS != 0;

            if is_requires {
                if name.starts_with(RPMLIB_PREFIX) {
                    continue;
                }
                if ctx.manifest.contains(name) && ctx.classifier.is_primary(name) {
                    continue;
                }
                if provided.contains(&key) || required.contains(&(key, pre)) {
                    continue;
                }
            }

            let evr = Evr::parse(version);
            if !evr.is_valid() {
                tracing::warn!(
                    "Bad epoch in version string \"{}\" for dependency \"{}\" in package \"{}\"",
                    String::from_utf8_lossy(version),
                    String::from_utf8_lossy(name),
                    ctx.nevra
                );
                continue;
            }

            let dependency = Dependency {
                name: pool.insert(name),
                flags: comparison,
                epoch: pool.insert_opt(evr.epoch_or_default()),
                version: pool.insert_opt(evr.version.filter(|v| !v.is_empty())),
                release: pool.insert_opt(evr.release),
                pre,
            };

            match spec.relation {
                SourceRelation::Provides => {
                    provided.insert(key);
                    out.push(DependencyKind::Provides, dependency);
                }
                SourceRelation::Requires
                    if !ctx.interpreter_prefix.is_empty()
                        && name.starts_with(ctx.interpreter_prefix) =>
                {
                    let replace = match &interpreter {
                        None => true,
                        Some(best) => {
                            compare_dependency(best.name, name) == DependencyOrder::SecondWins
                        }
                    };
                    if replace {
                        interpreter = Some(InterpreterBest { name, dependency });
                    }
                }
                SourceRelation::Requires => {
                    required.insert((key, pre));
                    out.push(DependencyKind::Requires, dependency);
                }
                relation => out.push(relation.target(raw_flags), dependency),
            }
        }

        if is_requires {
            if let Some(best) = interpreter.take() {
                out.push(DependencyKind::Requires, best.dependency);
            }
        }
    }

    out
}
