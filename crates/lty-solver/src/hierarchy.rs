//! Hierarchy traversal.
//!
//! The class graph comes from user-written annotations and is not validated
//! before it reaches us: `---@class A : B` and `---@class B : A` is a perfectly
//! indexable program. Every walk here is therefore bounded by a visited-name
//! set, and a cycle simply ends the walk.

use crate::class_type::{ClassRef, ClassType};
use crate::context::SearchContext;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use tracing::debug;

/// Insertion-ordered set of visited class names.
type NameSet = IndexSet<String, FxBuildHasher>;

/// The direct superclass, resolved through the index.
///
/// Self-inheritance (`---@class A : A`) has no superclass.
pub fn super_class(cls: &ClassType, ctx: &SearchContext<'_>) -> Option<ClassRef> {
    cls.lazy_init(ctx);
    let name = cls.super_class_name()?;
    if name == cls.class_name() {
        return None;
    }
    ctx.resolve_class(&name)
}

/// Directly implemented interfaces that the index knows about.
pub fn interfaces(cls: &ClassType, ctx: &SearchContext<'_>) -> Vec<ClassRef> {
    cls.lazy_init(ctx);
    cls.interface_names()
        .iter()
        .filter(|name| name.as_str() != cls.class_name())
        .filter_map(|name| ctx.resolve_class(name))
        .collect()
}

/// Visit every ancestor of `start`: the superclass chain, then the interface
/// forest of `start` itself.
///
/// - A cycle in the superclass chain ends the whole walk quietly and returns
///   `true`; nothing after the repeated name is visited.
/// - An interface in the superclass chain ends the climb.
/// - When `visit` returns `false` the climb stops and the result is `false`.
///
/// The interface forest is walked whenever the climb ends without a cycle.
pub fn process_super_class<F>(start: &ClassType, ctx: &SearchContext<'_>, mut visit: F) -> bool
where
    F: FnMut(&ClassRef) -> bool,
{
    let mut visited = NameSet::default();
    visited.insert(start.class_name().to_string());

    let mut climbed = true;
    let mut current = super_class(start, ctx);
    while let Some(candidate) = current {
        if !visited.insert(candidate.class_name().to_string()) {
            // Cyclic inheritance is reported elsewhere; here it only ends the walk.
            debug!(
                start = start.class_name(),
                repeated = candidate.class_name(),
                "superclass cycle, stopping walk"
            );
            return true;
        }
        if !visit(&candidate) {
            climbed = false;
            break;
        }
        if candidate.is_interface() {
            break;
        }
        current = super_class(&candidate, ctx);
    }

    let interfaces_done = process_interface(start, ctx, &mut visit);
    climbed && interfaces_done
}

/// Depth-first walk over the interface forest of `cls`.
///
/// Each interface is visited at most once even when reachable along several
/// paths. An interface's own interfaces are walked before its next sibling.
/// Returning `false` from `visit` aborts the walk.
pub fn process_interface<F>(cls: &ClassType, ctx: &SearchContext<'_>, mut visit: F) -> bool
where
    F: FnMut(&ClassRef) -> bool,
{
    let mut visited = NameSet::default();
    visited.insert(cls.class_name().to_string());
    walk_interfaces(cls, ctx, &mut visited, &mut visit)
}

fn walk_interfaces<F>(
    cls: &ClassType,
    ctx: &SearchContext<'_>,
    visited: &mut NameSet,
    visit: &mut F,
) -> bool
where
    F: FnMut(&ClassRef) -> bool,
{
    for iface in interfaces(cls, ctx) {
        if !visited.insert(iface.class_name().to_string()) {
            continue;
        }
        if !visit(&iface) {
            return false;
        }
        if !walk_interfaces(&iface, ctx, visited, visit) {
            return false;
        }
    }
    true
}

/// All ancestors in visit order.
pub fn ancestors(cls: &ClassType, ctx: &SearchContext<'_>) -> Vec<ClassRef> {
    let mut out = Vec::new();
    process_super_class(cls, ctx, |ancestor| {
        out.push(ancestor.clone());
        true
    });
    out
}

/// Whether `base_name` appears among the ancestors of `cls`.
pub fn is_inherited_from(cls: &ClassType, base_name: &str, ctx: &SearchContext<'_>) -> bool {
    let mut found = false;
    process_super_class(cls, ctx, |ancestor| {
        if ancestor.class_name() == base_name {
            found = true;
        }
        !found
    });
    found
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod tests;
