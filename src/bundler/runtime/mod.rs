//! Minimized Java runtime creation.
//!
//! [`jdeps`] detects which JDK modules the staged application uses and
//! [`jlink`] links a runtime image containing exactly those modules.

pub mod jdeps;
pub mod jlink;

use std::fmt;

use crate::bundler::error::{Error, Result};

/// Runtime modules detected by jdeps.
///
/// Never empty: an empty detection result is an error, not a valid state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleSet {
    modules: Vec<String>,
}

impl ModuleSet {
    /// Parses jdeps `--print-module-deps` output.
    ///
    /// Surrounding whitespace is stripped and duplicate names are dropped;
    /// the order reported by jdeps is kept.
    pub fn parse(output: &str) -> Result<Self> {
        let mut modules: Vec<String> = Vec::new();
        for name in output.trim().split(',').map(str::trim) {
            if !name.is_empty() && !modules.iter().any(|m| m == name) {
                modules.push(name.to_string());
            }
        }
        if modules.is_empty() {
            return Err(Error::EmptyModuleSet);
        }
        Ok(Self { modules })
    }

    /// Comma-joined form accepted by jlink `--add-modules`.
    pub fn to_arg(&self) -> String {
        self.modules.join(",")
    }

    /// Whether `module` is part of the set.
    pub fn contains(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterates module names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }
}

impl fmt::Display for ModuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_arg())
    }
}
