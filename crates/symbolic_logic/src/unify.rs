//! One-directional unification of a pattern against a ground fact.

use log::trace;

use crate::predicate::{Predicate, PredicateKind};
use crate::substitution::Substitution;
use crate::term::Term;

/// Matches `pattern` against the ground predicate `fact`.
///
/// Returns the bindings that turn `pattern` into `fact`, or `None` when they
/// cannot be matched. The match is not symmetric: only the pattern's variables
/// are bound, so `unifies_with(human(joost), human(X))` fails.
///
/// A negated pattern is matched through its positive form; interpreting the
/// outcome as negation-as-failure is the caller's business. The operator tag
/// is part of a predicate's identity, so `_move(X)` never matches `move(a)`.
pub fn unifies_with(pattern: &Predicate, fact: &Predicate) -> Option<Substitution> {
    if !fact.is_bound() || fact.is_negated() {
        return None;
    }
    if pattern.kind() != PredicateKind::Atom || fact.kind() != PredicateKind::Atom {
        return None;
    }
    if pattern.name() != fact.name()
        || pattern.operator() != fact.operator()
        || pattern.arity() != fact.arity()
    {
        return None;
    }

    let mut substitution = Substitution::new();
    for (p, f) in pattern.terms().iter().zip(fact.terms()) {
        match p {
            Term::Constant(c) => {
                if c != f.symbol() {
                    return None;
                }
            }
            Term::Variable(v) => {
                if !substitution.bind(v.as_str(), f.symbol()) {
                    trace!("{} binds {} twice against {}", pattern, v, fact);
                    return None;
                }
            }
        }
    }
    Some(substitution)
}
