//! Centralized limits for the class-type engine.
//!
//! Hierarchy walks are bounded by visited-name sets, not by depth, so the only
//! numeric limits here guard structural subtype recursion, where member types
//! can refer back to the classes being compared.

/// Maximum nesting of structural conformance checks.
///
/// Each level compares one member type pair. Recursive shapes such as
///
/// ```lua
/// ---@class Node
/// ---@field next Node
/// ```
///
/// are caught earlier by cycle detection; this limit only stops long chains of
/// distinct classes.
pub const MAX_SUBTYPE_DEPTH: u32 = 100;

/// Total number of structural comparisons allowed in one top-level query.
pub const MAX_SUBTYPE_ITERATIONS: u32 = 100_000;

/// Upper bound on the number of pairs tracked as in progress at once.
pub const MAX_SUBTYPE_VISITING: u32 = 10_000;
