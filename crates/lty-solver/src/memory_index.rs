//! In-memory class index.
//!
//! `MemoryIndex` implements the collaborator traits over plain tables so the
//! engine can run without an IDE: the CLI loads one from a JSON project
//! description, and tests build one declaratively.
//!
//! ## Usage
//!
//! ```
//! use lty_solver::{ClassDecl, MemberInfo, MemoryIndex, TypeExpr};
//!
//! let index = MemoryIndex::new();
//! index.register_class(ClassDecl::new("Animal"));
//! index.add_member("Animal", MemberInfo::public("name", TypeExpr::named("string")));
//! assert_eq!(index.len(), 1);
//! ```

use crate::index::{ClassIndex, IndexError, IndexResult, InheritanceSearch, SearchScope};
use crate::types::{AliasDecl, ClassDecl, MemberInfo};
use dashmap::{DashMap, DashSet};
use lty_common::ResolverOptions;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

// =============================================================================
// ProjectIndex - JSON project description
// =============================================================================

/// A class declaration together with the members declared under its name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    #[serde(flatten)]
    pub decl: ClassDecl,
    #[serde(default)]
    pub members: Vec<MemberInfo>,
    /// File the declaration lives in, consulted by file-scoped inheritance
    /// searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Serialized form of a whole project index.
///
/// ```json
/// {
///   "options": { "recognizeGlobalNameAsType": true },
///   "classes": [
///     { "name": "Animal", "members": [{ "name": "name", "type": "string" }] },
///     { "name": "Dog", "superClassName": "Animal", "file": "dog.lua" }
///   ],
///   "members": { "Bar": [{ "name": "extra", "type": "number" }] },
///   "aliases": [{ "name": "Id", "type": "number" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectIndex {
    pub options: ResolverOptions,
    pub classes: Vec<ClassEntry>,
    /// Members declared under names that have no class declaration
    /// (aliases, globals, doc-table identities).
    pub members: indexmap::IndexMap<String, Vec<MemberInfo>>,
    pub aliases: Vec<AliasDecl>,
}

// =============================================================================
// MemoryIndex
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryIndex {
    classes: DashMap<String, ClassDecl>,
    /// Owner name -> members in declaration order.
    members: DashMap<String, Vec<MemberInfo>>,
    aliases: DashMap<String, AliasDecl>,
    /// Class name -> declaring file.
    files: DashMap<String, String>,
    /// Names whose lookups fail, for exercising degraded paths.
    unavailable: DashSet<String>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_project(project: &ProjectIndex) -> Self {
        let index = Self::new();
        for entry in &project.classes {
            match &entry.file {
                Some(file) => index.register_class_in(entry.decl.clone(), file),
                None => index.register_class(entry.decl.clone()),
            }
            for member in &entry.members {
                index.add_member(&entry.decl.name, member.clone());
            }
        }
        for (owner, members) in &project.members {
            for member in members {
                index.add_member(owner, member.clone());
            }
        }
        for alias in &project.aliases {
            index.register_alias(alias.clone());
        }
        trace!(
            classes = index.classes.len(),
            aliases = index.aliases.len(),
            "MemoryIndex::from_project"
        );
        index
    }

    pub fn from_json(text: &str) -> serde_json::Result<(Self, ResolverOptions)> {
        let project: ProjectIndex = serde_json::from_str(text)?;
        Ok((Self::from_project(&project), project.options))
    }

    pub fn register_class(&self, decl: ClassDecl) {
        trace!(class = %decl.name, "MemoryIndex::register_class");
        self.classes.insert(decl.name.clone(), decl);
    }

    /// Register a class declared in `file`.
    pub fn register_class_in(&self, decl: ClassDecl, file: &str) {
        self.files.insert(decl.name.clone(), file.to_string());
        self.register_class(decl);
    }

    /// Record a member declared under `owner`. The member's owner is stamped.
    pub fn add_member(&self, owner: &str, member: MemberInfo) {
        self.members
            .entry(owner.to_string())
            .or_default()
            .push(member.with_owner(owner));
    }

    pub fn register_alias(&self, alias: AliasDecl) {
        self.aliases.insert(alias.name.clone(), alias);
    }

    /// Make every lookup of `name` fail with [`IndexError::Unavailable`].
    pub fn mark_unavailable(&self, name: &str) {
        self.unavailable.insert(name.to_string());
    }

    /// Number of class declarations.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All declared class names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    fn check_available(&self, name: &str) -> IndexResult<()> {
        if self.unavailable.contains(name) {
            return Err(IndexError::Unavailable {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn in_scope(&self, scope: &SearchScope, name: &str) -> bool {
        match scope {
            SearchScope::Project => true,
            SearchScope::File(file) => self.files.get(name).is_some_and(|r| r.value() == file),
        }
    }
}

impl ClassIndex for MemoryIndex {
    fn find_class(&self, name: &str) -> IndexResult<Option<ClassDecl>> {
        self.check_available(name)?;
        Ok(self.classes.get(name).map(|r| r.clone()))
    }

    fn get_class_members(&self, name: &str) -> IndexResult<Vec<MemberInfo>> {
        self.check_available(name)?;
        Ok(self
            .members
            .get(name)
            .map(|r| r.clone())
            .unwrap_or_default())
    }

    fn find_member(&self, class_name: &str, member: &str) -> IndexResult<Option<MemberInfo>> {
        self.check_available(class_name)?;
        Ok(self.members.get(class_name).and_then(|r| {
            r.iter()
                .find(|candidate| candidate.is_named(member))
                .cloned()
        }))
    }

    fn find_alias(&self, name: &str) -> IndexResult<Option<AliasDecl>> {
        self.check_available(name)?;
        Ok(self.aliases.get(name).map(|r| r.clone()))
    }
}

impl InheritanceSearch for MemoryIndex {
    /// Walks declared superclasses and interfaces of `candidate`.
    ///
    /// Under [`SearchScope::File`] only declarations made in that file are
    /// followed; classes with no recorded file are outside every file scope.
    fn is_inherited_from(&self, scope: &SearchScope, candidate: &str, base: &str) -> bool {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut queue = vec![candidate.to_string()];
        while let Some(name) = queue.pop() {
            if !seen.insert(name.clone()) || !self.in_scope(scope, &name) {
                continue;
            }
            let Some(decl) = self.classes.get(&name).map(|r| r.clone()) else {
                continue;
            };
            let parents = decl
                .super_class_name
                .iter()
                .chain(decl.interface_names.iter());
            for parent in parents {
                if parent == base {
                    return true;
                }
                queue.push(parent.clone());
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "../tests/memory_index_tests.rs"]
mod tests;
