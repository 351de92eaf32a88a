//! External collaborators.
//!
//! The engine never builds or walks source files itself. Everything it knows
//! about declarations comes through these traits, which an embedding (IDE,
//! batch checker, test) implements over its own symbol index.

use crate::types::{AliasDecl, ClassDecl, MemberInfo, Ty};
use thiserror::Error;

/// Failure reported by an index implementation.
///
/// The engine never propagates these. `SearchContext` logs them and carries
/// on as if the entry did not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("index is unavailable while looking up '{name}'")]
    Unavailable { name: String },

    #[error("index entry for '{name}' is corrupt: {reason}")]
    Corrupt { name: String, reason: String },
}

pub type IndexResult<T> = Result<T, IndexError>;

/// Project-wide class and member index.
pub trait ClassIndex {
    fn find_class(&self, name: &str) -> IndexResult<Option<ClassDecl>>;

    /// Members declared directly under `name`, in declaration order.
    fn get_class_members(&self, name: &str) -> IndexResult<Vec<MemberInfo>>;

    /// A member declared directly under `class_name`.
    fn find_member(&self, class_name: &str, member: &str) -> IndexResult<Option<MemberInfo>>;

    fn find_alias(&self, name: &str) -> IndexResult<Option<AliasDecl>>;
}

/// Where an inheritance search looks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    Project,
    File(String),
}

/// Answers "does `candidate` inherit from `base`" for protected-member checks.
pub trait InheritanceSearch {
    fn is_inherited_from(&self, scope: &SearchScope, candidate: &str, base: &str) -> bool;
}

/// Turns a member into its declared type.
pub trait TypeInferrer {
    fn infer(&self, member: &MemberInfo) -> Ty;
}

/// Lowers the member's declared type expression; no flow analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredTypeInferrer;

impl TypeInferrer for DeclaredTypeInferrer {
    fn infer(&self, member: &MemberInfo) -> Ty {
        Ty::from_expr(&member.type_expr)
    }
}
