//! Class-Type Resolution Engine
//!
//! This crate answers three questions about the classes of an annotated Lua
//! program:
//!
//! - **Identity**: what type is this (`ClassType`, keyed by name and flags)
//! - **Hierarchy**: what are its ancestors (`process_super_class`,
//!   `process_interface`), walked lazily and safely over cyclic input
//! - **Conformance**: is it a subtype of another type, nominally through
//!   ancestry or structurally through interface members
//!
//! Declarations come from an external index (`ClassIndex`); every query runs
//! under a `SearchContext` that owns the collaborators and options.
mod alias;
mod class_type;
pub mod codec;
mod context;
mod format;
pub mod hierarchy;
mod index;
mod memory_index;
pub mod members;
pub mod recursion;
mod subtype;
mod synthetic;
mod types;

pub use alias::{NoSubstitution, TypeSubstitutor, alias_names, process_alias, recover_alias};
pub use class_type::{ClassHeader, ClassKind, ClassRef, ClassType, LazyState};
pub use codec::{ClassStub, CodecError, StubReader, StubWriter, decode_class, encode_class};
pub use context::SearchContext;
pub use hierarchy::{
    ancestors, interfaces, is_inherited_from, process_interface, process_super_class, super_class,
};
pub use index::{
    ClassIndex, DeclaredTypeInferrer, IndexError, IndexResult, InheritanceSearch, SearchScope,
    TypeInferrer,
};
pub use memory_index::{ClassEntry, MemoryIndex, ProjectIndex};
pub use members::{
    find_member, find_own_member, find_super_member, get_index_result_type, own_members,
    process_members, process_visible_members,
};
pub use subtype::class_sub_type_of;
pub use synthetic::{
    DeclSite, create_anonymous_type, create_declared_class, create_doc_table, create_global_type,
    create_lazy_class, create_serialized_class, create_table_literal,
};
pub use types::{
    AliasDecl, ClassDecl, ClassFlags, IndexKey, MemberInfo, PrimitiveKind, Ty, TypeExpr,
    Visibility,
};

#[cfg(test)]
mod test_fixtures;
