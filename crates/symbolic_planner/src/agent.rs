//! The deliberation boundary consumed by the planner.
//!
//! An [`Agent`] answers two questions about a state: which actions are
//! available (`think`) and what a state looks like after an action (`act`).
//! [`RuleAgent`] answers both with forward chaining over two rule bases:
//!
//! - program rules derive `_action` intentions and `*`/`~` desire updates,
//!   e.g. `at(X) & edge(X,Y) > _move(X,Y)`;
//! - action rules derive `+`/`-` effects from a triggering action,
//!   e.g. `_move(X,Y) > -at(X) & +at(Y)`.

use log::{debug, trace};
use symbolic_logic::{InferenceEngine, KnowledgeBase, Operator, Predicate, Sentence};

use crate::error::{Error, Result};

/// Deliberation and effect application for a planning agent.
pub trait Agent {
    /// Rules that hold in every state; the planner's goal test chains them
    /// together with the state.
    fn program_rules(&self) -> &KnowledgeBase;

    /// Populates `intentions` with the ground actions applicable in `state`,
    /// updating `desires` along the way.
    fn think(
        &self,
        state: &KnowledgeBase,
        desires: &mut KnowledgeBase,
        intentions: &mut KnowledgeBase,
    ) -> Result<()>;

    /// Applies the effects of the ground `action` to `state` in place.
    ///
    /// Must depend only on `action` and `state`.
    fn act(
        &self,
        action: &Predicate,
        state: &mut KnowledgeBase,
        desires: &mut KnowledgeBase,
    ) -> Result<()>;

    /// `think`, with any inference run by `engine` instead of the agent's own.
    ///
    /// Agents that do not forward-chain can keep the default.
    fn think_with(
        &self,
        _engine: &InferenceEngine,
        state: &KnowledgeBase,
        desires: &mut KnowledgeBase,
        intentions: &mut KnowledgeBase,
    ) -> Result<()> {
        self.think(state, desires, intentions)
    }

    /// `act`, with any inference run by `engine` instead of the agent's own.
    fn act_with(
        &self,
        _engine: &InferenceEngine,
        action: &Predicate,
        state: &mut KnowledgeBase,
        desires: &mut KnowledgeBase,
    ) -> Result<()> {
        self.act(action, state, desires)
    }

    /// Deliberates over `closure`, the already computed closure of
    /// `program_rules ∪ state ∪ desires`.
    ///
    /// Returns `false` when the agent cannot work from a closure; the caller
    /// then falls back to `think_with`.
    fn think_from_closure(
        &self,
        _closure: &KnowledgeBase,
        _desires: &mut KnowledgeBase,
        _intentions: &mut KnowledgeBase,
    ) -> Result<bool> {
        Ok(false)
    }
}

/// An agent driven entirely by program and action rules.
#[derive(Debug, Clone, Default)]
pub struct RuleAgent {
    program_rules: KnowledgeBase,
    action_rules: KnowledgeBase,
    engine: InferenceEngine,
}

impl RuleAgent {
    pub fn new(program_rules: KnowledgeBase, action_rules: KnowledgeBase) -> Self {
        Self {
            program_rules,
            action_rules,
            engine: InferenceEngine::new(),
        }
    }

    /// Replaces the engine used by `think` and `act`.
    pub fn with_engine(mut self, engine: InferenceEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn action_rules(&self) -> &KnowledgeBase {
        &self.action_rules
    }
}

impl Agent for RuleAgent {
    fn program_rules(&self) -> &KnowledgeBase {
        &self.program_rules
    }

    fn think(
        &self,
        state: &KnowledgeBase,
        desires: &mut KnowledgeBase,
        intentions: &mut KnowledgeBase,
    ) -> Result<()> {
        self.think_with(&self.engine, state, desires, intentions)
    }

    fn act(
        &self,
        action: &Predicate,
        state: &mut KnowledgeBase,
        desires: &mut KnowledgeBase,
    ) -> Result<()> {
        self.act_with(&self.engine, action, state, desires)
    }

    fn think_with(
        &self,
        engine: &InferenceEngine,
        state: &KnowledgeBase,
        desires: &mut KnowledgeBase,
        intentions: &mut KnowledgeBase,
    ) -> Result<()> {
        let closure = engine.forward_chain(&self.program_rules.union(state).union(desires))?;
        deliberate(&closure.facts, desires, intentions);
        Ok(())
    }

    fn act_with(
        &self,
        engine: &InferenceEngine,
        action: &Predicate,
        state: &mut KnowledgeBase,
        desires: &mut KnowledgeBase,
    ) -> Result<()> {
        if !action.is_bound() {
            return Err(Error::Action(format!("cannot apply non-ground action {}", action)));
        }

        let mut trigger = KnowledgeBase::new();
        trigger.add(Sentence::fact(action.clone()));
        let closure = engine.forward_chain(&self.action_rules.union(state).union(&trigger))?;

        let mut additions = Vec::new();
        let mut deletions = Vec::new();
        for fact in closure.facts.facts() {
            match fact.operator() {
                Some(Operator::Add) => additions.push(fact.without_operator()),
                Some(Operator::Delete) => deletions.push(fact.without_operator()),
                Some(Operator::Adopt) => adopt(desires, fact.without_operator()),
                Some(Operator::Drop) => {
                    desires.remove_fact(&fact.without_operator());
                }
                Some(Operator::Action) | None => {}
            }
        }

        // Deletions first, so an effect that both removes and re-adds a fact keeps it.
        let mut deleted = 0;
        for fact in &deletions {
            deleted += state.remove_fact(fact);
        }
        let mut added = 0;
        for fact in additions {
            if !state.contains_fact(&fact) {
                state.add(Sentence::fact(fact));
                added += 1;
            }
        }
        debug!("applied {}: {} deleted, {} added", action, deleted, added);
        Ok(())
    }

    fn think_from_closure(
        &self,
        closure: &KnowledgeBase,
        desires: &mut KnowledgeBase,
        intentions: &mut KnowledgeBase,
    ) -> Result<bool> {
        deliberate(closure, desires, intentions);
        Ok(true)
    }
}

/// Collects action intentions and applies desire updates found in `closure`.
fn deliberate(
    closure: &KnowledgeBase,
    desires: &mut KnowledgeBase,
    intentions: &mut KnowledgeBase,
) {
    for fact in closure.facts() {
        match fact.operator() {
            Some(Operator::Action) => {
                if !intentions.contains_fact(fact) {
                    trace!("intention: {}", fact);
                    intentions.add(Sentence::fact(fact.clone()));
                }
            }
            Some(Operator::Adopt) => adopt(desires, fact.without_operator()),
            Some(Operator::Drop) => {
                desires.remove_fact(&fact.without_operator());
            }
            Some(Operator::Add) | Some(Operator::Delete) | None => {}
        }
    }
}

fn adopt(desires: &mut KnowledgeBase, desire: Predicate) {
    if !desires.contains_fact(&desire) {
        desires.add(Sentence::fact(desire));
    }
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

    fn corridor() -> RuleAgent {
        RuleAgent::new(
            kb(&["at(X) & edge(X,Y) > _move(X,Y)"]),
            kb(&["_move(X,Y) > -at(X) & +at(Y)"]),
        )
    }

    #[test]
    fn test_think_lists_applicable_actions() {
        let agent = corridor();
        let state = kb(&["at(a)", "edge(a,b)", "edge(a,c)", "edge(b,c)"]);
        let mut desires = KnowledgeBase::new();
        let mut intentions = KnowledgeBase::new();

        agent.think(&state, &mut desires, &mut intentions).unwrap();

        let actions: Vec<String> = intentions.facts().map(ToString::to_string).collect();
        assert_eq!(actions, vec!["_move(a,b)", "_move(a,c)"]);
        assert!(desires.is_empty());
    }

    #[test]
    fn test_think_updates_desires() {
        let agent = RuleAgent::new(
            kb(&["hungry(X) > *fed(X)", "fed(X) > ~fed(X)"]),
            KnowledgeBase::new(),
        );
        let mut desires = KnowledgeBase::new();
        let mut intentions = KnowledgeBase::new();

        agent
            .think(&kb(&["hungry(cat)"]), &mut desires, &mut intentions)
            .unwrap();
        assert!(desires.contains_fact(&pred("fed(cat)")));

        // Once the desire holds, the drop rule removes it.
        agent
            .think(&KnowledgeBase::new(), &mut desires, &mut intentions)
            .unwrap();
        assert!(!desires.contains_fact(&pred("fed(cat)")));
        assert!(intentions.is_empty());
    }

    #[test]
    fn test_act_applies_effects() {
        let agent = corridor();
        let mut state = kb(&["at(a)", "edge(a,b)"]);
        let mut desires = KnowledgeBase::new();

        agent
            .act(&pred("_move(a,b)"), &mut state, &mut desires)
            .unwrap();

        assert!(!state.contains_fact(&pred("at(a)")));
        assert!(state.contains_fact(&pred("at(b)")));
        assert!(state.contains_fact(&pred("edge(a,b)")));
        assert!(!state.contains_fact(&pred("_move(a,b)")));
    }

    #[test]
    fn test_act_is_pure_in_action_and_state() {
        let agent = corridor();
        let start = kb(&["at(a)", "edge(a,b)"]);

        let mut first = start.clone();
        let mut second = start.clone();
        agent
            .act(&pred("_move(a,b)"), &mut first, &mut KnowledgeBase::new())
            .unwrap();
        agent
            .act(&pred("_move(a,b)"), &mut second, &mut KnowledgeBase::new())
            .unwrap();
        assert_eq!(first, second);
        assert!(start.contains_fact(&pred("at(a)")));
    }

    #[test]
    fn test_act_delete_then_add() {
        let agent = RuleAgent::new(
            KnowledgeBase::new(),
            kb(&["_touch(X) > -seen(X) & +seen(X)"]),
        );
        let mut state = kb(&["seen(a)"]);
        agent
            .act(&pred("_touch(a)"), &mut state, &mut KnowledgeBase::new())
            .unwrap();
        assert!(state.contains_fact(&pred("seen(a)")));
    }

    #[test]
    fn test_act_rejects_non_ground_action() {
        let agent = corridor();
        let result = agent.act(
            &pred("_move(X,b)"),
            &mut KnowledgeBase::new(),
            &mut KnowledgeBase::new(),
        );
        assert!(matches!(result, Err(Error::Action(_))));
    }

    #[test]
    fn test_arity_clash_is_reported() {
        let agent = corridor();
        let result = agent.think(
            &kb(&["at(a,b)"]),
            &mut KnowledgeBase::new(),
            &mut KnowledgeBase::new(),
        );
        assert!(matches!(result, Err(Error::Logic(_))));
    }

    #[test]
    fn test_think_with_uses_given_engine() {
        let agent = corridor();
        let state = kb(&["at(a)", "edge(a,b)", "label(a)", "label(a,b)"]);
        let mut intentions = KnowledgeBase::new();

        let strict = agent.think(&state, &mut KnowledgeBase::new(), &mut intentions);
        assert!(matches!(
            strict,
            Err(Error::Logic(symbolic_logic::Error::ArityMismatch { .. }))
        ));

        let lenient = InferenceEngine::new().with_arity_check(false);
        agent
            .think_with(&lenient, &state, &mut KnowledgeBase::new(), &mut intentions)
            .unwrap();
        assert!(intentions.contains_fact(&pred("_move(a,b)")));
    }

    #[test]
    fn test_act_with_uses_given_engine() {
        let agent = corridor();
        let mut state = kb(&["at(a)", "edge(a,b)"]);
        let budget = InferenceEngine::new().with_max_passes(1);

        let result = agent.act_with(
            &budget,
            &pred("_move(a,b)"),
            &mut state,
            &mut KnowledgeBase::new(),
        );
        assert!(matches!(
            result,
            Err(Error::Logic(symbolic_logic::Error::FixpointNotReached { passes: 1 }))
        ));
        // A failed application leaves the state alone.
        assert!(state.contains_fact(&pred("at(a)")));
    }

    #[test]
    fn test_think_from_closure_matches_think() {
        let agent = corridor();
        let state = kb(&["at(a)", "edge(a,b)", "edge(a,c)"]);

        let mut expected = KnowledgeBase::new();
        agent
            .think(&state, &mut KnowledgeBase::new(), &mut expected)
            .unwrap();

        let closure = InferenceEngine::new()
            .forward_chain(&agent.program_rules().union(&state))
            .unwrap()
            .facts;
        let mut intentions = KnowledgeBase::new();
        assert!(agent
            .think_from_closure(&closure, &mut KnowledgeBase::new(), &mut intentions)
            .unwrap());
        assert_eq!(intentions, expected);
    }
}
