//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Options that change how identities and aliases are resolved.
///
/// The value is passed explicitly into every query context; nothing in the
/// engine reads configuration from global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverOptions {
    /// Treat a bare global name as a possible type name as well as a global
    /// variable (`Foo` may mean the class `Foo` or the global `$Foo`).
    pub recognize_global_name_as_type: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            recognize_global_name_as_type: true,
        }
    }
}

impl ResolverOptions {
    pub fn with_recognize_global_name_as_type(mut self, enabled: bool) -> Self {
        self.recognize_global_name_as_type = enabled;
        self
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
