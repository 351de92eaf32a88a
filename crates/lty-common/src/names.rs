//! Reserved names and identity derivation.
//!
//! Every synthetic class identity is a plain string derived from a source
//! position or a declared name. The formats here are persisted in stubs, so
//! they must stay stable across releases.

/// Name of the global environment table. It is its own global type name.
pub const GLOBAL_ROOT_NAME: &str = "_G";

/// Discriminator at the head of a doc-table identity (`"10|file|offset"`).
pub const DOC_TABLE_TAG: u32 = 10;

/// Wildcard member consulted for numeric index keys without an exact match.
pub const NUMBER_INDEX_MEMBER: &str = "[number]";

/// Wildcard member consulted for string index keys without an exact match.
pub const STRING_INDEX_MEMBER: &str = "[string]";

const GLOBAL_PREFIX: char = '$';

/// Type name used for the global variable `name`.
///
/// ```
/// assert_eq!(lty_common::global_type_name("Foo"), "$Foo");
/// assert_eq!(lty_common::global_type_name("_G"), "_G");
/// ```
pub fn global_type_name(name: &str) -> String {
    if name == GLOBAL_ROOT_NAME {
        return name.to_string();
    }
    format!("{GLOBAL_PREFIX}{name}")
}

/// Identity of an anonymous local declared at `offset` in `file_name`.
pub fn anonymous_type_name(file_name: &str, offset: u32) -> String {
    format!("{offset}@{file_name}")
}

/// Identity of a table literal starting at `offset` in `file_name`.
pub fn table_literal_name(file_name: &str, offset: u32) -> String {
    format!("{file_name}@({offset})table")
}

/// Identity of an inline doc-table starting at `offset` in `file_name`.
pub fn doc_table_name(file_name: &str, offset: u32) -> String {
    format!("{DOC_TABLE_TAG}|{file_name}|{offset}")
}

/// Splits a `"<tag>|<file>|<offset>"` identity when the tag is the doc-table tag.
///
/// Returns the file name and the offset text. Anything else, including a
/// well-formed triple with a different tag, yields `None`.
pub fn parse_doc_table_name(name: &str) -> Option<(&str, &str)> {
    let mut parts = name.splitn(3, '|');
    let tag = parts.next()?;
    let file = parts.next()?;
    let offset = parts.next()?;
    match tag.parse::<u32>() {
        Ok(DOC_TABLE_TAG) => Some((file, offset)),
        _ => None,
    }
}

/// Member name holding the type of the exact numeric key `text`.
pub fn number_key_member(text: &str) -> String {
    format!("[{text}]")
}

#[cfg(test)]
#[path = "../tests/names_tests.rs"]
mod tests;
