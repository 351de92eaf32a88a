//! Common types and utilities for the lty class-type engine.
//!
//! This crate provides the pieces shared by every lty crate:
//! - Reserved names and name derivation (`names`)
//! - Recursion limits (`limits`)
//! - Resolver configuration (`ResolverOptions`)

// Reserved names and identity derivation
pub mod names;
pub use names::{
    DOC_TABLE_TAG, GLOBAL_ROOT_NAME, NUMBER_INDEX_MEMBER, STRING_INDEX_MEMBER,
    anonymous_type_name, doc_table_name, global_type_name, number_key_member, parse_doc_table_name,
    table_literal_name,
};

// Centralized limits
pub mod limits;

// Resolver configuration
pub mod options;
pub use options::ResolverOptions;
