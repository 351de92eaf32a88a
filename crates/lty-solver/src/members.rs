//! Member resolution.
//!
//! A class's members are the ones declared under its own name, plus the ones
//! declared under any of its alias names, plus (for deep queries) one
//! generation of own members per ancestor.

use crate::alias::process_alias;
use crate::class_type::{ClassRef, ClassType};
use crate::context::SearchContext;
use crate::hierarchy::process_super_class;
use crate::types::{IndexKey, MemberInfo, Ty, Visibility};
use lty_common::{NUMBER_INDEX_MEMBER, STRING_INDEX_MEMBER, number_key_member};
use rustc_hash::FxHashSet;
use std::rc::Rc;

/// Members declared directly on `ty`, alias members appended.
pub fn own_members(ty: &ClassType, ctx: &SearchContext<'_>) -> Vec<MemberInfo> {
    ty.lazy_init(ctx);
    let mut members = match ty.kind().fixed_fields() {
        Some(fields) => fields.to_vec(),
        None => ctx.class_members(ty.class_name()),
    };
    process_alias(ty, ctx, |alias| {
        members.extend(ctx.class_members(alias));
        true
    });
    members
}

/// Visit the members of `ty`, each paired with the class it was found on.
///
/// With `deep`, every ancestor contributes its own members exactly once; the
/// ancestors themselves are not climbed again.
pub fn process_members<F>(ty: &ClassRef, ctx: &SearchContext<'_>, deep: bool, mut visit: F)
where
    F: FnMut(&ClassRef, &MemberInfo),
{
    process_members_inner(ty, ctx, deep, &mut visit);
}

fn process_members_inner<F>(ty: &ClassRef, ctx: &SearchContext<'_>, deep: bool, visit: &mut F)
where
    F: FnMut(&ClassRef, &MemberInfo),
{
    for member in own_members(ty, ctx) {
        visit(ty, &member);
    }
    if deep {
        process_super_class(ty, ctx, |ancestor| {
            process_members_inner(ancestor, ctx, false, visit);
            true
        });
    }
}

/// Visit the members of `ty` that code inside `context_ty` may access.
///
/// A name that is inaccessible on any path is suppressed everywhere, even
/// where another declaration of it would be accessible: a private override
/// hides the public base member.
pub fn process_visible_members<F>(
    ty: &ClassRef,
    context_ty: &ClassType,
    ctx: &SearchContext<'_>,
    mut visit: F,
) where
    F: FnMut(&ClassRef, &MemberInfo),
{
    let mut visible: Vec<(ClassRef, MemberInfo)> = Vec::new();
    let mut hidden: FxHashSet<String> = FxHashSet::default();

    process_members(ty, ctx, true, |owner, member| {
        if is_visible(member, owner, context_ty, ctx) {
            visible.push((Rc::clone(owner), member.clone()));
        } else if let Some(name) = &member.name {
            hidden.insert(name.clone());
        }
    });

    for (owner, member) in &visible {
        if member
            .name
            .as_ref()
            .is_some_and(|name| hidden.contains(name))
        {
            continue;
        }
        visit(owner, member);
    }
}

fn is_visible(
    member: &MemberInfo,
    declaring: &ClassType,
    context_ty: &ClassType,
    ctx: &SearchContext<'_>,
) -> bool {
    match member.visibility {
        Visibility::Public => true,
        Visibility::Protected => {
            declaring == context_ty
                || ctx.is_inherited_from(context_ty.class_name(), declaring.class_name())
        }
        Visibility::Private => false,
    }
}

/// A member declared on `ty` itself or under one of its alias names.
pub fn find_own_member(ty: &ClassType, name: &str, ctx: &SearchContext<'_>) -> Option<MemberInfo> {
    ty.lazy_init(ctx);
    let own = match ty.kind().fixed_fields() {
        Some(fields) => fields.iter().find(|field| field.is_named(name)).cloned(),
        None => ctx.find_index_member(ty.class_name(), name),
    };
    if own.is_some() {
        return own;
    }
    let mut found = None;
    process_alias(ty, ctx, |alias| {
        found = ctx.find_index_member(alias, name);
        found.is_none()
    });
    found
}

/// A member of `ty`, own members first, then ancestors.
pub fn find_member(ty: &ClassType, name: &str, ctx: &SearchContext<'_>) -> Option<MemberInfo> {
    find_own_member(ty, name, ctx).or_else(|| find_super_member(ty, name, ctx))
}

/// The first ancestor member named `name`. `ty`'s own members are not searched.
pub fn find_super_member(
    ty: &ClassType,
    name: &str,
    ctx: &SearchContext<'_>,
) -> Option<MemberInfo> {
    let mut found = None;
    process_super_class(ty, ctx, |ancestor| {
        if found.is_none() {
            found = find_own_member(ancestor, name, ctx);
        }
        found.is_none()
    });
    found
}

/// Type of `ty[key]` for a literal key.
///
/// Exact members win (`[5]`, `name`); otherwise the wildcard `[number]` or
/// `[string]` member applies. Other key kinds have no static answer.
pub fn get_index_result_type(
    ty: &ClassType,
    key: &IndexKey,
    ctx: &SearchContext<'_>,
) -> Option<Ty> {
    let (exact, wildcard) = match key {
        IndexKey::Number(text) => (number_key_member(text), NUMBER_INDEX_MEMBER),
        IndexKey::String(text) => (text.clone(), STRING_INDEX_MEMBER),
        IndexKey::Other => return None,
    };
    let member = find_member(ty, &exact, ctx).or_else(|| find_member(ty, wildcard, ctx))?;
    Some(ctx.infer(&member))
}

#[cfg(test)]
#[path = "../tests/members_tests.rs"]
mod tests;
