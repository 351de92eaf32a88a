//! Alias resolution.
//!
//! `---@class Foo` may carry an alternate name under which members are also
//! declared. Members written against the alternate name fold into the class.

use crate::class_type::{ClassKind, ClassRef, ClassType};
use crate::context::SearchContext;
use crate::types::Ty;
use lty_common::global_type_name;
use smallvec::SmallVec;
use std::rc::Rc;
use tracing::trace;

/// Alternate names of `ty`.
///
/// Empty when there is no alias or the alias is the class name itself.
/// Otherwise the alias, followed by the global type name of the class when the
/// class is neither anonymous nor global and global names are recognized as
/// types.
pub fn alias_names(ty: &ClassType, ctx: &SearchContext<'_>) -> SmallVec<[String; 2]> {
    ty.lazy_init(ctx);
    let mut names = SmallVec::new();
    let Some(alias) = ty.alias_name() else {
        return names;
    };
    if alias == ty.class_name() {
        return names;
    }
    names.push(alias);
    if !ty.is_anonymous() && !ty.is_global() && ctx.options().recognize_global_name_as_type {
        names.push(global_type_name(ty.class_name()));
    }
    names
}

/// Visit each alternate name; stops early when `visit` returns `false`.
pub fn process_alias<F>(ty: &ClassType, ctx: &SearchContext<'_>, mut visit: F) -> bool
where
    F: FnMut(&str) -> bool,
{
    alias_names(ty, ctx).iter().all(|name| visit(name))
}

/// Rewrites a type produced by alias recovery.
pub trait TypeSubstitutor {
    fn substitute(&self, ty: Ty) -> Ty;
}

/// Leaves types untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSubstitution;

impl TypeSubstitutor for NoSubstitution {
    fn substitute(&self, ty: Ty) -> Ty {
        ty
    }
}

/// Resolve `ty` through a `---@alias` of the same name.
///
/// Anonymous and global types, and doc-table references, are never aliases
/// and come back unchanged; so does any type without an alias declaration.
pub fn recover_alias(
    ty: &ClassRef,
    ctx: &SearchContext<'_>,
    substitutor: &dyn TypeSubstitutor,
) -> Ty {
    if ty.is_anonymous() || ty.is_global() || matches!(ty.kind(), ClassKind::DocTableRef) {
        return Ty::Class(Rc::clone(ty));
    }
    match ctx.find_alias(ty.class_name()) {
        Some(alias) => {
            trace!(class = ty.class_name(), "recover_alias: alias found");
            substitutor.substitute(Ty::from_expr(&alias.ty))
        }
        None => Ty::Class(Rc::clone(ty)),
    }
}

#[cfg(test)]
#[path = "../tests/alias_tests.rs"]
mod tests;
