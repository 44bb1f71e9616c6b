//! Variable substitutions produced by unification.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A mapping from variable names to constant symbols.
///
/// Keys are unique: binding a variable that is already bound to a different
/// constant is rejected rather than overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    bindings: HashMap<String, String>,
}

impl Substitution {
    /// Creates an empty substitution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a substitution from `(variable, constant)` pairs.
    ///
    /// Returns `None` if the pairs bind one variable to two constants.
    pub fn from_pairs<I, K, V>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut subst = Self::new();
        for (var, value) in pairs {
            if !subst.bind(var, value) {
                return None;
            }
        }
        Some(subst)
    }

    /// Looks up the constant bound to `var`.
    pub fn get(&self, var: &str) -> Option<&str> {
        self.bindings.get(var).map(String::as_str)
    }

    pub fn is_bound(&self, var: &str) -> bool {
        self.bindings.contains_key(var)
    }

    /// Binds `var` to `value`.
    ///
    /// Returns `true` if the binding was added or already present with the same
    /// value, `false` if `var` is bound to something else.
    pub fn bind(&mut self, var: impl Into<String>, value: impl Into<String>) -> bool {
        let var = var.into();
        let value = value.into();
        match self.bindings.get(&var) {
            Some(bound) => *bound == value,
            None => {
                self.bindings.insert(var, value);
                true
            }
        }
    }

    /// Adds every binding of `other`, failing on the first conflict.
    ///
    /// On failure `self` may already hold some of `other`'s bindings; callers
    /// extend a clone when they need to keep the original.
    pub fn extend(&mut self, other: &Substitution) -> bool {
        other
            .bindings
            .iter()
            .all(|(var, value)| self.bind(var.clone(), value.clone()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over `(variable, constant)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort();
        let body: Vec<String> = pairs.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{{{}}}", body.join(", "))
    }
}
