//! Predicates and their canonical text form.
//!
//! A predicate prints and parses as `[op][!]name(t1,t2,...)`. The optional
//! operator prefix marks the predicate as an effect or an action, `!` marks
//! negation-as-failure. Equality and inequality literals print as `A=B` and
//! `A!=B` and are compared term by term instead of looked up in the fact base.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::substitution::Substitution;
use crate::term::{parse_symbol, Term};

static ATOM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_]*)\s*(?:\((.*)\))?$").expect("atom pattern is valid")
});

/// The action-operator tag carried by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `+p`: insert `p` into the state.
    Add,
    /// `-p`: remove `p` from the state.
    Delete,
    /// `_p`: an action the agent can perform.
    Action,
    /// `*p`: adopt `p` as a desire.
    Adopt,
    /// `~p`: drop `p` from the desires.
    Drop,
}

impl Operator {
    /// The prefix character used in canonical text.
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Delete => '-',
            Operator::Action => '_',
            Operator::Adopt => '*',
            Operator::Drop => '~',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Delete),
            '_' => Some(Operator::Action),
            '*' => Some(Operator::Adopt),
            '~' => Some(Operator::Drop),
            _ => None,
        }
    }
}

/// How a literal is evaluated by the conjunctive solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateKind {
    /// An ordinary literal matched against facts.
    Atom,
    /// `A=B`, true iff both ground terms are the same symbol.
    Equality,
    /// `A!=B`, true iff both ground terms differ.
    Inequality,
}

/// A named, ordered sequence of terms with its modifiers.
///
/// Predicates are immutable values: substitution and the `without_*`
/// helpers return new predicates, so a rule's template is never aliased
/// with one of its instantiations.
///
/// Serialized predicates use the canonical text and are parsed back through
/// `Predicate::parse`, so stored data cannot describe a malformed literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Predicate {
    name: String,
    terms: Vec<Term>,
    kind: PredicateKind,
    negated: bool,
    operator: Option<Operator>,
}

impl Predicate {
    /// Creates a positive atom without operator.
    pub fn new(name: impl Into<String>, terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            terms,
            kind: PredicateKind::Atom,
            negated: false,
            operator: None,
        }
    }

    /// Creates an equality literal `left=right`.
    pub fn equality(left: Term, right: Term) -> Self {
        Self {
            name: "=".to_string(),
            terms: vec![left, right],
            kind: PredicateKind::Equality,
            negated: false,
            operator: None,
        }
    }

    /// Creates an inequality literal `left!=right`.
    pub fn inequality(left: Term, right: Term) -> Self {
        Self {
            name: "!=".to_string(),
            terms: vec![left, right],
            kind: PredicateKind::Inequality,
            negated: false,
            operator: None,
        }
    }

    /// Parses a predicate from its canonical text.
    pub fn parse(text: &str) -> Result<Self> {
        let source = text.trim();
        let invalid = || Error::InvalidPredicate(source.to_string());

        let mut rest = source;
        let operator = rest.chars().next().and_then(Operator::from_symbol);
        if operator.is_some() {
            rest = &rest[1..];
        }
        let negated = rest.starts_with('!');
        if negated {
            rest = &rest[1..];
        }
        let rest = rest.trim_start();

        let comparison = rest
            .split_once("!=")
            .map(|(l, r)| (PredicateKind::Inequality, l, r))
            .or_else(|| {
                rest.split_once('=')
                    .map(|(l, r)| (PredicateKind::Equality, l, r))
            });
        if let Some((kind, left, right)) = comparison {
            // Comparisons are never effects and are negated by flipping the operator.
            if operator.is_some() || negated {
                return Err(invalid());
            }
            let left = parse_symbol(left).ok_or_else(invalid)?;
            let right = parse_symbol(right).ok_or_else(invalid)?;
            return Ok(match kind {
                PredicateKind::Inequality => Self::inequality(left, right),
                _ => Self::equality(left, right),
            });
        }

        let caps = ATOM.captures(rest).ok_or_else(invalid)?;
        let terms = match caps.get(2) {
            Some(args) if !args.as_str().trim().is_empty() => args
                .as_str()
                .split(',')
                .map(parse_symbol)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?,
            _ => Vec::new(),
        };

        Ok(Self {
            name: caps[1].to_string(),
            terms,
            kind: PredicateKind::Atom,
            negated,
            operator,
        })
    }

    /// Returns the negation of this literal.
    ///
    /// Atoms toggle their negation flag; a comparison flips between equality
    /// and inequality.
    pub fn negate(mut self) -> Self {
        match self.kind {
            PredicateKind::Atom => self.negated = !self.negated,
            PredicateKind::Equality => {
                self.kind = PredicateKind::Inequality;
                self.name = "!=".to_string();
            }
            PredicateKind::Inequality => {
                self.kind = PredicateKind::Equality;
                self.name = "=".to_string();
            }
        }
        self
    }

    /// Tags an atom with an operator. Comparisons are returned unchanged.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        if self.kind == PredicateKind::Atom {
            self.operator = Some(operator);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term(&self, index: usize) -> Option<&Term> {
        self.terms.get(index)
    }

    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    pub fn kind(&self) -> PredicateKind {
        self.kind
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn is_action(&self) -> bool {
        self.operator == Some(Operator::Action)
    }

    pub fn is_comparison(&self) -> bool {
        self.kind != PredicateKind::Atom
    }

    /// A predicate is bound (ground) iff every term is a constant.
    pub fn is_bound(&self) -> bool {
        self.terms.iter().all(Term::is_constant)
    }

    /// Distinct variable names in order of first occurrence.
    pub fn variables(&self) -> Vec<&str> {
        let mut vars: Vec<&str> = Vec::new();
        for term in &self.terms {
            if let Term::Variable(v) = term {
                if !vars.contains(&v.as_str()) {
                    vars.push(v);
                }
            }
        }
        vars
    }

    /// Returns a copy with every bound variable replaced by its constant.
    pub fn substitute(&self, substitution: &Substitution) -> Predicate {
        Predicate {
            name: self.name.clone(),
            terms: self
                .terms
                .iter()
                .map(|t| t.substitute(substitution))
                .collect(),
            kind: self.kind,
            negated: self.negated,
            operator: self.operator,
        }
    }

    /// Returns a copy with the operator tag removed.
    pub fn without_operator(&self) -> Predicate {
        Predicate {
            operator: None,
            ..self.clone()
        }
    }

    /// Returns a copy with negation removed.
    pub fn positive(&self) -> Predicate {
        Predicate {
            negated: false,
            ..self.clone()
        }
    }
}

impl FromStr for Predicate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Predicate::parse(s)
    }
}

impl TryFrom<String> for Predicate {
    type Error = Error;

    fn try_from(text: String) -> Result<Self> {
        Predicate::parse(&text)
    }
}

impl From<Predicate> for String {
    fn from(predicate: Predicate) -> Self {
        predicate.to_string()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PredicateKind::Equality => write!(f, "{}={}", self.terms[0], self.terms[1]),
            PredicateKind::Inequality => write!(f, "{}!={}", self.terms[0], self.terms[1]),
            PredicateKind::Atom => {
                if let Some(op) = self.operator {
                    write!(f, "{}", op.symbol())?;
                }
                if self.negated {
                    f.write_str("!")?;
                }
                f.write_str(&self.name)?;
                if !self.terms.is_empty() {
                    let args: Vec<&str> = self.terms.iter().map(Term::symbol).collect();
                    write!(f, "({})", args.join(","))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_atom() {
        let p = Predicate::parse("human(X, joost)").unwrap();
        assert_eq!(p.name(), "human");
        assert_eq!(p.terms(), &[Term::variable("X"), Term::constant("joost")]);
        assert_eq!(p.kind(), PredicateKind::Atom);
        assert!(!p.is_negated());
        assert_eq!(p.operator(), None);
        assert!(!p.is_bound());
        assert_eq!(p.to_string(), "human(X,joost)");
    }

    #[test]
    fn test_parse_modifiers() {
        let p = Predicate::parse("-!at(X)").unwrap();
        assert_eq!(p.operator(), Some(Operator::Delete));
        assert!(p.is_negated());
        assert_eq!(p.to_string(), "-!at(X)");

        for (text, op) in [
            ("+at(a)", Operator::Add),
            ("_move(a,b)", Operator::Action),
            ("*at(b)", Operator::Adopt),
            ("~at(b)", Operator::Drop),
        ] {
            let p: Predicate = text.parse().unwrap();
            assert_eq!(p.operator(), Some(op));
            assert_eq!(p.to_string(), text);
        }
        assert!(Predicate::parse("_move(a,b)").unwrap().is_action());
    }

    #[test]
    fn test_parse_zero_arity() {
        let bare = Predicate::parse("raining").unwrap();
        let parens = Predicate::parse("raining()").unwrap();
        assert_eq!(bare, parens);
        assert_eq!(bare.arity(), 0);
        assert!(bare.is_bound());
        assert_eq!(bare.to_string(), "raining");
    }

    #[test]
    fn test_parse_comparisons() {
        let eq = Predicate::parse("X=Y").unwrap();
        assert_eq!(eq.kind(), PredicateKind::Equality);
        assert_eq!(eq.to_string(), "X=Y");

        let ne = Predicate::parse("X != b").unwrap();
        assert_eq!(ne.kind(), PredicateKind::Inequality);
        assert_eq!(ne.terms(), &[Term::variable("X"), Term::constant("b")]);
        assert_eq!(ne.to_string(), "X!=b");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "human(", "human(X,)", "f(g(x))", "+X=Y", "!X=Y", "a=", "(x)"] {
            assert!(
                matches!(Predicate::parse(text), Err(Error::InvalidPredicate(_))),
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn test_substitute_returns_new_predicate() {
        let template = Predicate::parse("sameColor(X,Y)").unwrap();
        let subst = Substitution::from_pairs([("X", "red")]).unwrap();

        let partial = template.substitute(&subst);
        assert_eq!(partial.to_string(), "sameColor(red,Y)");
        assert_eq!(template.to_string(), "sameColor(X,Y)");
        assert!(!partial.is_bound());
        assert_eq!(partial.variables(), vec!["Y"]);
    }

    #[test]
    fn test_strip_helpers() {
        let p = Predicate::parse("*!at(end)").unwrap();
        assert_eq!(p.without_operator().to_string(), "!at(end)");
        assert_eq!(p.positive().to_string(), "*at(end)");
    }

    #[test]
    fn test_negate() {
        let atom = Predicate::parse("caged(X)").unwrap().negate();
        assert_eq!(atom.to_string(), "!caged(X)");
        assert_eq!(atom.negate().to_string(), "caged(X)");

        let eq = Predicate::parse("X=Y").unwrap().negate();
        assert_eq!(eq.kind(), PredicateKind::Inequality);
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = Predicate::parse("_move(a,B)").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: Predicate = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
