//! Terms: the atomic symbols a predicate is built from.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::substitution::Substitution;

static SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_]*$").expect("symbol pattern is valid"));

/// A single argument of a predicate, either a variable or a constant.
///
/// Variables are told apart from constants by their spelling: a symbol that
/// starts with an uppercase ASCII letter is a variable, everything else is a
/// constant. Substitution never mutates a term in place, it returns a new one.
///
/// Terms serialize as their bare symbol, so a stored variable is always
/// spelled like one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Term {
    /// A placeholder that can be bound to a constant.
    Variable(String),
    /// A fixed symbol.
    Constant(String),
}

impl Term {
    /// Classifies a symbol by the naming convention.
    pub fn parse(symbol: &str) -> Self {
        if symbol.starts_with(|c: char| c.is_ascii_uppercase()) {
            Term::Variable(symbol.to_string())
        } else {
            Term::Constant(symbol.to_string())
        }
    }

    /// Creates a variable term.
    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    /// Creates a constant term.
    pub fn constant(symbol: impl Into<String>) -> Self {
        Term::Constant(symbol.into())
    }

    /// The raw symbol of this term.
    pub fn symbol(&self) -> &str {
        match self {
            Term::Variable(s) | Term::Constant(s) => s,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Term::Constant(_))
    }

    /// Returns this term with its variable replaced by the bound constant, if any.
    pub fn substitute(&self, substitution: &Substitution) -> Term {
        match self {
            Term::Variable(var) => match substitution.get(var) {
                Some(value) => Term::Constant(value.to_string()),
                None => self.clone(),
            },
            Term::Constant(_) => self.clone(),
        }
    }
}

/// Classifies a trimmed symbol, or `None` if it is not a valid symbol.
pub(crate) fn parse_symbol(raw: &str) -> Option<Term> {
    let symbol = raw.trim();
    SYMBOL.is_match(symbol).then(|| Term::parse(symbol))
}

impl TryFrom<String> for Term {
    type Error = Error;

    fn try_from(symbol: String) -> Result<Self> {
        parse_symbol(&symbol).ok_or(Error::InvalidPredicate(symbol))
    }
}

impl From<Term> for String {
    fn from(term: Term) -> Self {
        term.symbol().to_string()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_convention() {
        assert_eq!(Term::parse("X"), Term::variable("X"));
        assert_eq!(Term::parse("Room"), Term::variable("Room"));
        assert_eq!(Term::parse("joost"), Term::constant("joost"));
        assert_eq!(Term::parse("42"), Term::constant("42"));
    }

    #[test]
    fn test_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&Term::variable("X")).unwrap(), r#""X""#);
        let term: Term = serde_json::from_str(r#""joost""#).unwrap();
        assert_eq!(term, Term::constant("joost"));

        assert!(serde_json::from_str::<Term>(r#""f(x)""#).is_err());
        assert!(serde_json::from_str::<Term>(r#"{"Variable":"joost"}"#).is_err());
    }

    #[test]
    fn test_substitute_binds_variable() {
        let mut subst = Substitution::new();
        subst.bind("X", "joost");

        let term = Term::variable("X");
        assert_eq!(term.substitute(&subst), Term::constant("joost"));
        // The original is untouched.
        assert!(term.is_variable());
    }

    #[test]
    fn test_substitute_leaves_unbound_and_constants() {
        let mut subst = Substitution::new();
        subst.bind("X", "joost");

        assert_eq!(Term::variable("Y").substitute(&subst), Term::variable("Y"));
        assert_eq!(Term::constant("X1").substitute(&subst), Term::constant("X1"));
    }
}
