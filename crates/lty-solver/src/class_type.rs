//! Class type identity.
//!
//! A `ClassType` is the analyzer's handle on one class-like type. Its identity
//! is the pair `(class_name, flags)`; everything else (ancestry, alias,
//! interface/enum flags) is payload that may be filled in lazily from the
//! index the first time a structural query needs it.
//!
//! ## Variants
//!
//! | Kind | Built from | Lazy init | Members |
//! |------|------------|-----------|---------|
//! | `Declared` | `---@class` declaration | none | index |
//! | `Serialized` | stub / anonymous local / global | from index | index |
//! | `Lazy` | bare type name | from index | index |
//! | `TableLiteral` | `{ ... }` in source | none | literal fields |
//! | `DocTable` | `---@type { x: number }` | none | declared fields |
//! | `DocTableRef` | decoded doc-table stub | none | index, under its identity |

use crate::context::SearchContext;
use crate::types::{ClassDecl, ClassFlags, MemberInfo};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use tracing::trace;

/// Shared handle to a class type. Identities are cheap to clone and compare.
pub type ClassRef = Rc<ClassType>;

/// One-shot lazy initialization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyState {
    Uninitialized,
    /// Population is running. Re-entrant queries see the pre-init fields.
    Initializing,
    Ready,
}

/// Variant-specific payload.
#[derive(Debug, Clone)]
pub enum ClassKind {
    Declared,
    Serialized,
    Lazy,
    TableLiteral { fields: Vec<MemberInfo> },
    DocTable { fields: Vec<MemberInfo> },
    DocTableRef,
}

impl ClassKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Declared => "declared",
            Self::Serialized => "serialized",
            Self::Lazy => "lazy",
            Self::TableLiteral { .. } => "table-literal",
            Self::DocTable { .. } => "doc-table",
            Self::DocTableRef => "doc-table-ref",
        }
    }

    /// Members fixed at construction, if this variant carries them.
    pub fn fixed_fields(&self) -> Option<&[MemberInfo]> {
        match self {
            Self::TableLiteral { fields } | Self::DocTable { fields } => Some(fields),
            _ => None,
        }
    }
}

/// Fields that lazy initialization may overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassHeader {
    pub super_class_name: Option<String>,
    pub interface_names: Vec<String>,
    pub alias_name: Option<String>,
    pub is_interface: bool,
    pub is_enum: bool,
}

impl From<&ClassDecl> for ClassHeader {
    fn from(decl: &ClassDecl) -> Self {
        Self {
            super_class_name: decl.super_class_name.clone(),
            interface_names: decl.interface_names.clone(),
            alias_name: decl.alias_name.clone(),
            is_interface: decl.is_interface,
            is_enum: decl.is_enum,
        }
    }
}

pub struct ClassType {
    class_name: String,
    var_name: String,
    flags: ClassFlags,
    kind: ClassKind,
    header: RefCell<ClassHeader>,
    state: Cell<LazyState>,
}

impl ClassType {
    fn build(
        class_name: String,
        var_name: String,
        flags: ClassFlags,
        kind: ClassKind,
        header: ClassHeader,
        state: LazyState,
    ) -> Self {
        Self {
            class_name,
            var_name,
            flags,
            kind,
            header: RefCell::new(header),
            state: Cell::new(state),
        }
    }

    /// A class whose declaration is already in hand.
    pub fn declared(decl: &ClassDecl) -> Self {
        Self::build(
            decl.name.clone(),
            decl.name.clone(),
            ClassFlags::empty(),
            ClassKind::Declared,
            ClassHeader::from(decl),
            LazyState::Ready,
        )
    }

    /// A named reference resolved entirely through the index on first use.
    pub fn lazy(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::build(
            name.clone(),
            name,
            ClassFlags::empty(),
            ClassKind::Lazy,
            ClassHeader::default(),
            LazyState::Uninitialized,
        )
    }

    /// A lightweight reference carrying the persisted fields.
    pub fn serialized(
        class_name: impl Into<String>,
        var_name: impl Into<String>,
        super_class_name: Option<String>,
        alias_name: Option<String>,
        flags: ClassFlags,
    ) -> Self {
        let header = ClassHeader {
            super_class_name,
            alias_name,
            ..ClassHeader::default()
        };
        Self::build(
            class_name.into(),
            var_name.into(),
            flags,
            ClassKind::Serialized,
            header,
            LazyState::Uninitialized,
        )
    }

    pub(crate) fn with_fixed_fields(
        class_name: String,
        flags: ClassFlags,
        kind: ClassKind,
    ) -> Self {
        let var_name = class_name.clone();
        Self::build(
            class_name,
            var_name,
            flags,
            kind,
            ClassHeader::default(),
            LazyState::Ready,
        )
    }

    /// The doc-table variant rebuilt from a stub.
    pub(crate) fn doc_table_ref(
        class_name: impl Into<String>,
        var_name: impl Into<String>,
        flags: ClassFlags,
    ) -> Self {
        Self::build(
            class_name.into(),
            var_name.into(),
            flags,
            ClassKind::DocTableRef,
            ClassHeader::default(),
            LazyState::Ready,
        )
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    pub fn flags(&self) -> ClassFlags {
        self.flags
    }

    pub fn kind(&self) -> &ClassKind {
        &self.kind
    }

    pub fn state(&self) -> LazyState {
        self.state.get()
    }

    pub fn is_anonymous(&self) -> bool {
        self.flags.contains(ClassFlags::ANONYMOUS)
    }

    pub fn is_global(&self) -> bool {
        self.flags.contains(ClassFlags::GLOBAL)
    }

    pub fn is_table_literal(&self) -> bool {
        matches!(self.kind, ClassKind::TableLiteral { .. })
    }

    /// Name shown to users.
    pub fn display_name(&self) -> &str {
        if self.flags.contains(ClassFlags::ANONYMOUS_TABLE) {
            "table"
        } else {
            &self.var_name
        }
    }

    // -------------------------------------------------------------------------
    // Lazily populated fields
    //
    // These read whatever is present right now. Call `lazy_init` first when the
    // authoritative values matter.
    // -------------------------------------------------------------------------

    pub fn super_class_name(&self) -> Option<String> {
        self.header.borrow().super_class_name.clone()
    }

    pub fn interface_names(&self) -> Vec<String> {
        self.header.borrow().interface_names.clone()
    }

    pub fn alias_name(&self) -> Option<String> {
        self.header.borrow().alias_name.clone()
    }

    pub fn is_interface(&self) -> bool {
        self.header.borrow().is_interface
    }

    pub fn is_enum(&self) -> bool {
        self.header.borrow().is_enum
    }

    /// Populate the lazy fields from the index, at most once.
    pub fn lazy_init(&self, ctx: &SearchContext<'_>) {
        if self.state.get() != LazyState::Uninitialized {
            return;
        }
        self.state.set(LazyState::Initializing);
        match self.kind {
            ClassKind::Serialized | ClassKind::Lazy => self.populate_from_index(ctx),
            _ => {}
        }
        self.state.set(LazyState::Ready);
    }

    fn populate_from_index(&self, ctx: &SearchContext<'_>) {
        let Some(decl) = ctx.find_class(&self.class_name) else {
            trace!(class = %self.class_name, kind = self.kind.name(), "lazy_init: no declaration");
            return;
        };
        trace!(
            class = %self.class_name,
            kind = self.kind.name(),
            super_class = ?decl.super_class_name,
            "lazy_init: populated from index"
        );
        *self.header.borrow_mut() = ClassHeader::from(&decl);
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name && self.flags == other.flags
    }
}

impl Eq for ClassType {}

impl Hash for ClassType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_name.hash(state);
        self.flags.hash(state);
    }
}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassType")
            .field("class_name", &self.class_name)
            .field("flags", &self.flags)
            .field("kind", &self.kind.name())
            .field("state", &self.state.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/class_type_tests.rs"]
mod tests;
