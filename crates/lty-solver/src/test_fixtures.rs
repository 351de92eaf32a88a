//! Shared helpers for solver unit tests.

use crate::{ClassDecl, ClassRef, MemberInfo, MemoryIndex, SearchContext, TypeExpr, Visibility};
use lty_common::ResolverOptions;

pub(crate) fn field(name: &str, ty: &str) -> MemberInfo {
    MemberInfo::public(name, TypeExpr::named(ty))
}

pub(crate) fn field_with(name: &str, ty: &str, visibility: Visibility) -> MemberInfo {
    MemberInfo::new(name, visibility, TypeExpr::named(ty))
}

/// Register `decl` and the members declared under its name.
pub(crate) fn declare(index: &MemoryIndex, decl: ClassDecl, members: &[MemberInfo]) {
    let name = decl.name.clone();
    index.register_class(decl);
    for member in members {
        index.add_member(&name, member.clone());
    }
}

pub(crate) fn context(index: &MemoryIndex) -> SearchContext<'_> {
    SearchContext::for_index(index, ResolverOptions::default())
}

pub(crate) fn context_with(index: &MemoryIndex, options: ResolverOptions) -> SearchContext<'_> {
    SearchContext::for_index(index, options)
}

/// The declared class `name`; panics when the fixture forgot to declare it.
pub(crate) fn class(ctx: &SearchContext<'_>, name: &str) -> ClassRef {
    ctx.resolve_class(name)
        .unwrap_or_else(|| panic!("class {name} is not declared"))
}

pub(crate) fn names(classes: &[ClassRef]) -> Vec<&str> {
    classes.iter().map(|cls| cls.class_name()).collect()
}
