//! Core type model.
//!
//! `Ty` is the small slice of the analyzer's type language that class
//! resolution needs: primitives, class references, the array family, generics
//! and unions. Declarations coming out of the index carry `TypeExpr`, a
//! serializable form of the same language that is lowered on demand.

use crate::class_type::{ClassRef, ClassType};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

// =============================================================================
// ClassFlags
// =============================================================================

bitflags! {
    /// Identity-bearing flags of a class type.
    ///
    /// Two class types with the same name but different flags are different
    /// types (`Foo` the class vs. `Foo` the anonymous local).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassFlags: u32 {
        /// Keyed by source position rather than a declared name.
        const ANONYMOUS = 1 << 0;
        /// The type of a global variable (`$name`).
        const GLOBAL = 1 << 1;
        /// A table literal (`{ ... }`) in source.
        const ANONYMOUS_TABLE = 1 << 2;
    }
}

// =============================================================================
// Ty
// =============================================================================

/// Primitive kinds. `Table` is the universal table type every class conforms to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Number,
    String,
    Function,
    Table,
}

impl PrimitiveKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Function => "function",
            Self::Table => "table",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Unknown,
    Any,
    Nil,
    Primitive(PrimitiveKind),
    Class(ClassRef),
    /// `T[]`, the generic array family.
    Array(Box<Ty>),
    /// `base<params...>`, e.g. `table<string, number>`.
    Generic { base: Box<Ty>, params: Vec<Ty> },
    Union(Vec<Ty>),
}

impl Ty {
    pub const TABLE: Ty = Ty::Primitive(PrimitiveKind::Table);
    pub const NUMBER: Ty = Ty::Primitive(PrimitiveKind::Number);
    pub const STRING: Ty = Ty::Primitive(PrimitiveKind::String);
    pub const BOOLEAN: Ty = Ty::Primitive(PrimitiveKind::Boolean);
    pub const FUNCTION: Ty = Ty::Primitive(PrimitiveKind::Function);

    pub fn class(cls: ClassRef) -> Self {
        Ty::Class(cls)
    }

    pub fn array(element: Ty) -> Self {
        Ty::Array(Box::new(element))
    }

    pub fn generic(base: Ty, params: Vec<Ty>) -> Self {
        Ty::Generic {
            base: Box::new(base),
            params,
        }
    }

    /// Build a union, flattening nested unions and dropping duplicates.
    /// A single remaining member is returned as-is.
    pub fn union(types: impl IntoIterator<Item = Ty>) -> Self {
        let mut members: Vec<Ty> = Vec::new();
        for ty in types {
            let parts = match ty {
                Ty::Union(inner) => inner,
                other => vec![other],
            };
            for part in parts {
                if !members.contains(&part) {
                    members.push(part);
                }
            }
        }
        match members.len() {
            0 => Ty::Unknown,
            1 => members.remove(0),
            _ => Ty::Union(members),
        }
    }

    pub fn as_class(&self) -> Option<&ClassRef> {
        match self {
            Ty::Class(cls) => Some(cls),
            _ => None,
        }
    }

    /// The universal table type, or a generic built on it (`table<K, V>`).
    pub fn is_universal_table(&self) -> bool {
        match self {
            Ty::Primitive(PrimitiveKind::Table) => true,
            Ty::Generic { base, .. } => base.is_universal_table(),
            _ => false,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Ty::Array(_))
    }

    /// Lower a declared type expression.
    ///
    /// Names that are not primitives become lazily resolved class references,
    /// so lowering never touches the index.
    pub fn from_expr(expr: &TypeExpr) -> Self {
        match expr {
            TypeExpr::Named(name) => Self::from_name(name),
            TypeExpr::Array { array } => Ty::array(Ty::from_expr(array)),
            TypeExpr::Generic { base, params } => {
                Ty::generic(Self::from_name(base), params.iter().map(Ty::from_expr).collect())
            }
            TypeExpr::Union { union } => Ty::union(union.iter().map(Ty::from_expr)),
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "any" => Ty::Any,
            "unknown" => Ty::Unknown,
            "nil" | "void" => Ty::Nil,
            "boolean" => Ty::BOOLEAN,
            "number" | "integer" => Ty::NUMBER,
            "string" => Ty::STRING,
            "function" => Ty::FUNCTION,
            "table" => Ty::TABLE,
            _ => Ty::Class(Rc::new(ClassType::lazy(name))),
        }
    }
}

// =============================================================================
// Declarations (index payloads)
// =============================================================================

/// Declared type expression as stored in the index.
///
/// JSON shape: `"number"`, `{"array": "Foo"}`,
/// `{"base": "table", "params": ["string", "number"]}`, `{"union": ["A", "nil"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeExpr {
    Named(String),
    Array { array: Box<TypeExpr> },
    Generic { base: String, params: Vec<TypeExpr> },
    Union { union: Vec<TypeExpr> },
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn array_of(element: TypeExpr) -> Self {
        TypeExpr::Array {
            array: Box::new(element),
        }
    }
}

impl Default for TypeExpr {
    fn default() -> Self {
        TypeExpr::Named("unknown".to_string())
    }
}

/// Member access classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// A class member (field or method) as recorded by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    /// Members built from malformed source may have no name.
    #[serde(default)]
    pub name: Option<String>,
    /// Name under which the member was declared (class, alias or table identity).
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "type")]
    pub type_expr: TypeExpr,
}

impl MemberInfo {
    pub fn new(name: impl Into<String>, visibility: Visibility, type_expr: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            owner: String::new(),
            visibility,
            type_expr,
        }
    }

    pub fn public(name: impl Into<String>, type_expr: TypeExpr) -> Self {
        Self::new(name, Visibility::Public, type_expr)
    }

    pub fn unnamed(type_expr: TypeExpr) -> Self {
        Self {
            name: None,
            owner: String::new(),
            visibility: Visibility::Public,
            type_expr,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// A doc-declared class (`---@class Name : Super, Iface`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassDecl {
    pub name: String,
    pub super_class_name: Option<String>,
    pub interface_names: Vec<String>,
    pub alias_name: Option<String>,
    pub is_interface: bool,
    pub is_enum: bool,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_super(mut self, super_class_name: impl Into<String>) -> Self {
        self.super_class_name = Some(super_class_name.into());
        self
    }

    pub fn with_interfaces<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interface_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_alias(mut self, alias_name: impl Into<String>) -> Self {
        self.alias_name = Some(alias_name.into());
        self
    }

    pub const fn interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    pub const fn enumeration(mut self) -> Self {
        self.is_enum = true;
        self
    }
}

/// A doc-declared alias (`---@alias Name Type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl AliasDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Literal key of an indexed access (`t[5]`, `t["name"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexKey {
    /// Numeric literal, kept as its source text.
    Number(String),
    /// String literal, without quotes.
    String(String),
    /// Any other key expression.
    Other,
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
