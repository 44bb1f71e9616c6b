//! Backtracking conjunctive query solver.
//!
//! Conditions are solved strictly left to right. Negated, equality and
//! inequality literals are only meaningful once an earlier positive literal
//! has bound their variables; the solver does not reorder a rule body.

use indexmap::IndexMap;
use log::trace;

use crate::predicate::{Predicate, PredicateKind};
use crate::rule::{KnowledgeBase, Sentence};
use crate::substitution::Substitution;
use crate::unify::unifies_with;

/// Ground facts keyed by their canonical text, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FactIndex {
    facts: IndexMap<String, Predicate>,
}

impl FactIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every fact of `kb`.
    pub fn from_knowledge_base(kb: &KnowledgeBase) -> Self {
        let mut index = Self::new();
        for fact in kb.facts() {
            index.insert(fact.clone());
        }
        index
    }

    /// Inserts a fact. Returns `false` if it was already present.
    pub fn insert(&mut self, fact: Predicate) -> bool {
        let key = fact.to_string();
        if self.facts.contains_key(&key) {
            return false;
        }
        self.facts.insert(key, fact);
        true
    }

    pub fn contains(&self, fact: &Predicate) -> bool {
        self.facts.contains_key(&fact.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.facts.values()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Converts the index into a knowledge base of facts, in insertion order.
    pub fn into_knowledge_base(self) -> KnowledgeBase {
        self.facts.into_values().map(Sentence::fact).collect()
    }
}

/// Enumerates every completion of `partial` that satisfies all `conditions`.
///
/// An empty condition list yields exactly `partial`. Every returned
/// substitution extends `partial`.
pub fn solve(
    conditions: &[Predicate],
    partial: &Substitution,
    facts: &FactIndex,
) -> Vec<Substitution> {
    let mut results = Vec::new();
    solve_into(conditions, partial, facts, &mut results);
    results
}

fn solve_into(
    conditions: &[Predicate],
    partial: &Substitution,
    facts: &FactIndex,
    results: &mut Vec<Substitution>,
) {
    let Some((first, rest)) = conditions.split_first() else {
        results.push(partial.clone());
        return;
    };

    let literal = first.substitute(partial);
    match literal.kind() {
        PredicateKind::Inequality | PredicateKind::Equality => {
            // A comparison with free variables cannot be evaluated and fails the branch.
            if !literal.is_bound() {
                trace!("unbound comparison {} fails", literal);
                return;
            }
            let same = literal.terms()[0] == literal.terms()[1];
            let wanted = literal.kind() == PredicateKind::Equality;
            if same == wanted {
                solve_into(rest, partial, facts, results);
            }
        }
        PredicateKind::Atom if literal.is_negated() => {
            // Existence test only: a match never contributes bindings.
            if !facts.iter().any(|fact| unifies_with(&literal, fact).is_some()) {
                solve_into(rest, partial, facts, results);
            }
        }
        PredicateKind::Atom => {
            for fact in facts.iter() {
                let Some(unifier) = unifies_with(&literal, fact) else {
                    continue;
                };
                let mut extended = partial.clone();
                if extended.extend(&unifier) {
                    solve_into(rest, &extended, facts, results);
                }
            }
        }
    }
}
