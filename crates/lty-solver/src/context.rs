//! Per-query search context.
//!
//! A `SearchContext` bundles the collaborators a query needs and is the only
//! path by which the engine reaches the index. Index failures are degraded
//! here into "not found" so the rest of the engine only deals with absence.

use crate::class_type::{ClassRef, ClassType};
use crate::index::{
    ClassIndex, DeclaredTypeInferrer, IndexResult, InheritanceSearch, SearchScope, TypeInferrer,
};
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::types::{AliasDecl, ClassDecl, MemberInfo, Ty};
use lty_common::ResolverOptions;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

static DECLARED_TYPES: DeclaredTypeInferrer = DeclaredTypeInferrer;

/// `(source class, target class)` pair under structural comparison.
pub(crate) type SubtypeKey = (String, String);

pub struct SearchContext<'a> {
    index: &'a dyn ClassIndex,
    inheritance: &'a dyn InheritanceSearch,
    inferrer: &'a dyn TypeInferrer,
    options: ResolverOptions,
    scope: SearchScope,
    subtype_guard: RefCell<RecursionGuard<SubtypeKey>>,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        index: &'a dyn ClassIndex,
        inheritance: &'a dyn InheritanceSearch,
        inferrer: &'a dyn TypeInferrer,
        options: ResolverOptions,
    ) -> Self {
        Self {
            index,
            inheritance,
            inferrer,
            options,
            scope: SearchScope::Project,
            subtype_guard: RefCell::new(RecursionGuard::with_profile(
                RecursionProfile::SubtypeCheck,
            )),
        }
    }

    /// Context over an index that also answers inheritance queries, with
    /// declared-type inference.
    pub fn for_index<I>(index: &'a I, options: ResolverOptions) -> Self
    where
        I: ClassIndex + InheritanceSearch,
    {
        Self::new(index, index, &DECLARED_TYPES, options)
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_recursion_profile(self, profile: RecursionProfile) -> Self {
        *self.subtype_guard.borrow_mut() = RecursionGuard::with_profile(profile);
        self
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    pub fn scope(&self) -> &SearchScope {
        &self.scope
    }

    pub(crate) fn subtype_guard(&self) -> &RefCell<RecursionGuard<SubtypeKey>> {
        &self.subtype_guard
    }

    // -------------------------------------------------------------------------
    // Degrading index access
    // -------------------------------------------------------------------------

    pub fn find_class(&self, name: &str) -> Option<ClassDecl> {
        degrade(self.index.find_class(name), "find_class", name)
    }

    pub fn class_members(&self, name: &str) -> Vec<MemberInfo> {
        degrade(self.index.get_class_members(name), "get_class_members", name).unwrap_or_default()
    }

    pub fn find_index_member(&self, class_name: &str, member: &str) -> Option<MemberInfo> {
        degrade(self.index.find_member(class_name, member), "find_member", class_name)
    }

    pub fn find_alias(&self, name: &str) -> Option<AliasDecl> {
        degrade(self.index.find_alias(name), "find_alias", name)
    }

    /// Resolve a class name to its declared type.
    pub fn resolve_class(&self, name: &str) -> Option<ClassRef> {
        self.find_class(name)
            .map(|decl| Rc::new(ClassType::declared(&decl)))
    }

    pub fn is_inherited_from(&self, candidate: &str, base: &str) -> bool {
        self.inheritance
            .is_inherited_from(&self.scope, candidate, base)
    }

    pub fn infer(&self, member: &MemberInfo) -> Ty {
        self.inferrer.infer(member)
    }
}

/// Flatten `IndexResult<Option<T>>` / `IndexResult<T>` into `Option<T>`,
/// logging failures.
fn degrade<T, R>(result: IndexResult<R>, op: &'static str, name: &str) -> Option<T>
where
    R: Into<Option<T>>,
{
    match result {
        Ok(value) => value.into(),
        Err(err) => {
            warn!(op, name, error = %err, "index lookup failed, treating as absent");
            None
        }
    }
}
