//! Synthetic class constructors.
//!
//! Every class-like type the analyzer meets is built here, from either a
//! declaration or a stable key derived from the source position. The same
//! factory serves fresh construction and stub decoding, so a decoded identity
//! always lands in the right variant.

use crate::class_type::{ClassKind, ClassRef, ClassType};
use crate::types::{ClassDecl, ClassFlags, MemberInfo, Ty};
use lty_common::{
    ResolverOptions, anonymous_type_name, doc_table_name, global_type_name, parse_doc_table_name,
    table_literal_name,
};
use std::rc::Rc;
use tracing::trace;

/// Source position of a local declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclSite {
    pub file_name: String,
    pub offset: u32,
    /// Declared variable name, used for display.
    pub name: String,
}

impl DeclSite {
    pub fn new(file_name: impl Into<String>, offset: u32, name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            offset,
            name: name.into(),
        }
    }
}

pub fn create_declared_class(decl: &ClassDecl) -> ClassRef {
    Rc::new(ClassType::declared(decl))
}

pub fn create_lazy_class(name: &str) -> ClassRef {
    Rc::new(ClassType::lazy(name))
}

/// The type of an anonymous local (`local t = ...` with no declared class).
pub fn create_anonymous_type(site: &DeclSite) -> ClassRef {
    let name = anonymous_type_name(&site.file_name, site.offset);
    create_serialized_class(&name, Some(&site.name), None, None, ClassFlags::ANONYMOUS)
}

/// The type of the global variable `name`.
///
/// A write (`store == true`) always targets the global's own type. A read may
/// also mean the class of the same name when the options say so, in which case
/// both interpretations are returned as a union.
pub fn create_global_type(name: &str, store: bool, options: ResolverOptions) -> Ty {
    let global = create_serialized_class(
        &global_type_name(name),
        Some(name),
        None,
        None,
        ClassFlags::GLOBAL,
    );
    if store || !options.recognize_global_name_as_type {
        return Ty::Class(global);
    }
    let plain = create_serialized_class(name, Some(name), None, None, ClassFlags::GLOBAL);
    Ty::union([Ty::Class(global), Ty::Class(plain)])
}

/// A table literal in source. Its fields are its members.
pub fn create_table_literal(file_name: &str, offset: u32, fields: Vec<MemberInfo>) -> ClassRef {
    let name = table_literal_name(file_name, offset);
    let fields = own_fields(&name, fields);
    Rc::new(ClassType::with_fixed_fields(
        name,
        ClassFlags::ANONYMOUS | ClassFlags::ANONYMOUS_TABLE,
        ClassKind::TableLiteral { fields },
    ))
}

/// An inline doc-table (`---@type { x: number }`).
pub fn create_doc_table(file_name: &str, offset: u32, fields: Vec<MemberInfo>) -> ClassRef {
    let name = doc_table_name(file_name, offset);
    let fields = own_fields(&name, fields);
    Rc::new(ClassType::with_fixed_fields(
        name,
        ClassFlags::ANONYMOUS,
        ClassKind::DocTable { fields },
    ))
}

/// Rebuild a class from persisted fields.
///
/// Names shaped like `"10|file|offset"` are doc-table identities and come
/// back as the doc-table reference variant; everything else is a plain
/// serialized class.
pub fn create_serialized_class(
    name: &str,
    var_name: Option<&str>,
    super_class_name: Option<&str>,
    alias_name: Option<&str>,
    flags: ClassFlags,
) -> ClassRef {
    let var_name = var_name.unwrap_or(name);
    if let Some((file, offset)) = parse_doc_table_name(name) {
        trace!(name, file, offset, "create_serialized_class: doc-table identity");
        return Rc::new(ClassType::doc_table_ref(name, var_name, flags));
    }
    Rc::new(ClassType::serialized(
        name,
        var_name,
        super_class_name.map(str::to_string),
        alias_name.map(str::to_string),
        flags,
    ))
}

fn own_fields(owner: &str, fields: Vec<MemberInfo>) -> Vec<MemberInfo> {
    fields
        .into_iter()
        .map(|field| field.with_owner(owner))
        .collect()
}

#[cfg(test)]
#[path = "../tests/synthetic_tests.rs"]
mod tests;
