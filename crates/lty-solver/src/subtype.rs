//! Subtype checking.
//!
//! Classes relate nominally through their declared ancestry and structurally
//! to interfaces: a class conforms to an interface when it has every member the
//! interface declares, at a compatible type, whether or not it names the
//! interface as an ancestor.
//!
//! Structural checks recurse through member types. A pair already under
//! comparison is assumed to hold (coinductive semantics), which is what makes
//! `---@class Node` / `---@field next Node` checkable at all.

use crate::class_type::{ClassRef, ClassType};
use crate::context::SearchContext;
use crate::hierarchy::process_super_class;
use crate::members::{find_member, process_members};
use crate::recursion::RecursionResult;
use crate::types::{ClassFlags, PrimitiveKind, Ty};
use tracing::{debug, trace};

impl Ty {
    /// Whether `self` can be used where `other` is expected.
    ///
    /// `strict` disables the lenient treatment of `nil`, `any` and `unknown`
    /// as sources.
    pub fn sub_type_of(&self, other: &Ty, ctx: &SearchContext<'_>, strict: bool) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (_, Ty::Any | Ty::Unknown) => true,
            (Ty::Any | Ty::Unknown | Ty::Nil, _) => !strict,
            (Ty::Union(members), _) => members
                .iter()
                .all(|member| member.sub_type_of(other, ctx, strict)),
            (_, Ty::Union(members)) => members
                .iter()
                .any(|member| self.sub_type_of(member, ctx, strict)),
            (Ty::Class(cls), _) => class_sub_type_of(cls, other, ctx, strict),
            (Ty::Array(_), Ty::Primitive(PrimitiveKind::Table)) => true,
            (Ty::Array(element), Ty::Array(target)) => element.sub_type_of(target, ctx, strict),
            (
                Ty::Generic { base, params },
                Ty::Generic {
                    base: target_base,
                    params: target_params,
                },
            ) => {
                base == target_base
                    && params.len() == target_params.len()
                    && params
                        .iter()
                        .zip(target_params)
                        .all(|(param, target)| param.sub_type_of(target, ctx, strict))
            }
            (Ty::Generic { base, .. }, _) => base.sub_type_of(other, ctx, strict),
            (Ty::Primitive(kind), Ty::Primitive(target)) => kind == target,
            _ => false,
        }
    }
}

impl ClassType {
    /// Convenience for [`class_sub_type_of`].
    pub fn sub_type_of(
        self: &ClassRef,
        other: &Ty,
        ctx: &SearchContext<'_>,
        strict: bool,
    ) -> bool {
        class_sub_type_of(self, other, ctx, strict)
    }
}

/// Whether the class `cls` is a subtype of `other`.
pub fn class_sub_type_of(
    cls: &ClassRef,
    other: &Ty,
    ctx: &SearchContext<'_>,
    strict: bool,
) -> bool {
    // Every class is a table.
    if other.is_universal_table() {
        return true;
    }
    if base_sub_type_of(cls, other, ctx, strict) {
        return true;
    }

    cls.lazy_init(ctx);

    let target = match other {
        Ty::Class(target) => target,
        Ty::Array(_) => return is_empty_table_literal(cls),
        _ => return false,
    };

    let mut nominal = false;
    process_super_class(cls, ctx, |ancestor| {
        if **ancestor == **target {
            nominal = true;
        }
        !nominal
    });
    if nominal {
        return true;
    }

    // A placeholder only knows whether it names an interface after init.
    target.lazy_init(ctx);
    if target.is_interface() {
        return conforms_to_interface(cls, target, ctx, strict);
    }
    false
}

/// Identity, top types and unions: the relations that need no hierarchy.
fn base_sub_type_of(cls: &ClassRef, other: &Ty, ctx: &SearchContext<'_>, strict: bool) -> bool {
    match other {
        Ty::Any | Ty::Unknown => true,
        Ty::Class(target) => **target == **cls,
        Ty::Union(members) => members
            .iter()
            .any(|member| class_sub_type_of(cls, member, ctx, strict)),
        _ => false,
    }
}

fn is_empty_table_literal(cls: &ClassType) -> bool {
    cls.flags().contains(ClassFlags::ANONYMOUS_TABLE)
        && cls
            .kind()
            .fixed_fields()
            .is_some_and(|fields| fields.is_empty())
}

/// Structural conformance of `cls` to the interface `iface`.
///
/// Every direct member of the interface is checked, even after a failure, so
/// traces show every mismatch. An unnamed interface member can never be
/// satisfied.
fn conforms_to_interface(
    cls: &ClassRef,
    iface: &ClassRef,
    ctx: &SearchContext<'_>,
    strict: bool,
) -> bool {
    let key = (cls.class_name().to_string(), iface.class_name().to_string());
    let entered = ctx.subtype_guard().borrow_mut().enter(key.clone());
    match entered {
        RecursionResult::Entered => {}
        RecursionResult::Cycle => return true,
        RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
            debug!(
                class = cls.class_name(),
                interface = iface.class_name(),
                result = ?entered,
                "structural check abandoned"
            );
            return false;
        }
    }

    let mut conforms = true;
    process_members(iface, ctx, false, |_, required| {
        let Some(name) = required.name.as_deref() else {
            trace!(interface = iface.class_name(), "unnamed interface member");
            conforms = false;
            return;
        };
        let Some(provided) = find_member(cls, name, ctx) else {
            trace!(class = cls.class_name(), member = name, "missing interface member");
            conforms = false;
            return;
        };
        let provided_ty = ctx.infer(&provided);
        let required_ty = ctx.infer(required);
        if !provided_ty.sub_type_of(&required_ty, ctx, strict) {
            trace!(
                class = cls.class_name(),
                member = name,
                provided = %provided_ty,
                required = %required_ty,
                "incompatible interface member"
            );
            conforms = false;
        }
    });

    ctx.subtype_guard().borrow_mut().leave(&key);
    conforms
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
