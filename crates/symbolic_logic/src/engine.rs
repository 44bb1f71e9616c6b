//! Forward-chaining inference engine.
//!
//! The engine saturates a knowledge base: every rule is applied against the
//! facts derived so far until a full pass adds nothing new. Base facts are
//! visited before rules in every pass, so negated conditions see every
//! asserted fact from the first pass on.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::predicate::{Predicate, PredicateKind};
use crate::rule::{KnowledgeBase, Sentence};
use crate::solver::{solve, FactIndex};
use crate::substitution::Substitution;

/// Computes fixed points of rule bases.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    /// Upper bound on full passes, including the final confirming pass.
    max_passes: Option<usize>,
    /// Whether rule bases are checked for arity clashes before chaining.
    check_arity: bool,
}

impl InferenceEngine {
    /// Creates an engine with no pass limit and arity checking enabled.
    pub fn new() -> Self {
        Self {
            max_passes: None,
            check_arity: true,
        }
    }

    /// Limits the number of passes.
    ///
    /// Chaining is unbounded by default: a rule base that keeps producing new
    /// facts never terminates. A limit turns that into `FixpointNotReached`.
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes);
        self
    }

    pub fn with_arity_check(mut self, enabled: bool) -> Self {
        self.check_arity = enabled;
        self
    }

    pub fn set_max_passes(&mut self, passes: Option<usize>) {
        self.max_passes = passes;
    }

    pub fn max_passes(&self) -> Option<usize> {
        self.max_passes
    }

    /// Derives every ground fact entailed by `kb`.
    ///
    /// Rules are never modified; only the derived fact set grows. Conclusions
    /// that stay non-ground after substitution, and negated or comparison
    /// conclusions, are not asserted.
    pub fn forward_chain(&self, kb: &KnowledgeBase) -> Result<ForwardChainResult> {
        if self.check_arity {
            kb.signature()?;
        }

        let ordered: Vec<&Sentence> = kb
            .rules()
            .iter()
            .filter(|s| s.is_fact())
            .chain(kb.rules().iter().filter(|s| !s.is_fact()))
            .collect();

        let mut index = FactIndex::new();
        let mut passes = 0;
        loop {
            if let Some(max) = self.max_passes {
                if passes >= max {
                    return Err(Error::FixpointNotReached { passes });
                }
            }
            passes += 1;

            let mut changed = false;
            for sentence in &ordered {
                let substitutions = if sentence.is_fact() {
                    vec![Substitution::new()]
                } else {
                    solve(sentence.conditions(), &Substitution::new(), &index)
                };
                trace!(
                    "pass {}: {} matched {} times",
                    passes,
                    sentence,
                    substitutions.len()
                );

                for substitution in &substitutions {
                    for conclusion in sentence.conclusions() {
                        if conclusion.kind() != PredicateKind::Atom || conclusion.is_negated() {
                            continue;
                        }
                        let bound = conclusion.substitute(substitution);
                        if bound.is_bound() && index.insert(bound.clone()) {
                            debug!("Forward chain inferred: {}", bound);
                            changed = true;
                        }
                    }
                }
            }

            if !changed {
                break;
            }
        }

        let derived = index.len();
        Ok(ForwardChainResult {
            facts: index.into_knowledge_base(),
            passes,
            derived,
        })
    }
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The outcome of one forward-chaining run.
#[derive(Debug, Clone, Default)]
pub struct ForwardChainResult {
    /// Every derived ground fact, base facts included, in derivation order.
    pub facts: KnowledgeBase,
    /// Full passes run, the final pass that added nothing included.
    pub passes: usize,
    /// Number of distinct facts in `facts`.
    pub derived: usize,
}

impl ForwardChainResult {
    pub fn contains(&self, fact: &Predicate) -> bool {
        self.facts.contains_fact(fact)
    }
}

/// Computes the closure of `kb` with a default engine.
pub fn forward_chain(kb: &KnowledgeBase) -> Result<KnowledgeBase> {
    InferenceEngine::new().forward_chain(kb).map(|r| r.facts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pred(text: &str) -> Predicate {
        Predicate::parse(text).unwrap()
    }

    fn kb(lines: &[&str]) -> KnowledgeBase {
        KnowledgeBase::from_lines(lines.iter().copied()).unwrap()
    }

    #[test]
    fn test_facts_only() {
        let result = InferenceEngine::new()
            .forward_chain(&kb(&["human(joost)", "human(joost)"]))
            .unwrap();
        assert_eq!(result.derived, 1);
        assert_eq!(result.passes, 2);
    }

    #[test]
    fn test_chained_rules() {
        let result = InferenceEngine::new()
            .forward_chain(&kb(&[
                "mortal(X) > buried(X)",
                "human(X) > mortal(X)",
                "human(socrates)",
            ]))
            .unwrap();
        assert!(result.contains(&pred("mortal(socrates)")));
        assert!(result.contains(&pred("buried(socrates)")));
        assert_eq!(result.derived, 3);
    }

    #[test]
    fn test_transitive_closure() {
        let closure = forward_chain(&kb(&[
            "edge(a,b)",
            "edge(b,c)",
            "edge(c,d)",
            "edge(X,Y) > path(X,Y)",
            "path(X,Y) & edge(Y,Z) > path(X,Z)",
        ]))
        .unwrap();
        assert!(closure.contains_fact(&pred("path(a,d)")));
        assert!(!closure.contains_fact(&pred("path(d,a)")));
        assert_eq!(closure.facts().filter(|f| f.name() == "path").count(), 6);
    }

    #[test]
    fn test_non_ground_conclusion_is_skipped() {
        let closure = forward_chain(&kb(&["p(a)", "p(X) > q(X,Y)"])).unwrap();
        assert_eq!(closure.facts().count(), 1);
    }

    #[test]
    fn test_multiple_conclusions() {
        let closure = forward_chain(&kb(&["_move(a,b)", "_move(X,Y) > -at(X) & +at(Y)"])).unwrap();
        assert!(closure.contains_fact(&pred("-at(a)")));
        assert!(closure.contains_fact(&pred("+at(b)")));
    }

    #[test]
    fn test_pass_limit() {
        let rules = kb(&["p(a)", "p(X) > q(X)", "q(X) > r(X)"]);
        let engine = InferenceEngine::new().with_max_passes(1);
        assert_eq!(
            engine.forward_chain(&rules).unwrap_err(),
            Error::FixpointNotReached { passes: 1 }
        );
        assert!(InferenceEngine::new()
            .with_max_passes(10)
            .forward_chain(&rules)
            .is_ok());
    }

    #[test]
    fn test_arity_check() {
        let clash = kb(&["at(a)", "at(X,Y) > seen(X)"]);
        assert!(matches!(
            forward_chain(&clash),
            Err(Error::ArityMismatch { .. })
        ));
        assert!(InferenceEngine::new()
            .with_arity_check(false)
            .forward_chain(&clash)
            .is_ok());
    }

    #[test]
    fn test_empty_kb() {
        let result = InferenceEngine::new().forward_chain(&KnowledgeBase::new()).unwrap();
        assert!(result.facts.is_empty());
        assert_eq!(result.passes, 1);
    }
}
