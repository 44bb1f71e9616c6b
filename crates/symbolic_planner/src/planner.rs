//! Iterative-deepening planner.
//!
//! For every depth bound from 1 up to the limit the planner runs a
//! depth-first search over action applications. At each node it first asks
//! whether the goal already holds in the forward-chaining closure of
//! `program rules ∪ state`, then expands the actions the agent can take,
//! cloning the state for each branch. The first plan found wins, so the
//! result depends on the order in which `think` lists the actions.
//!
//! There is no cycle detection: a state can recur along a path, and only
//! the depth bound ends it.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use symbolic_logic::{unifies_with, InferenceEngine, KnowledgeBase, Predicate};

use crate::agent::Agent;
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::plan::Plan;

/// The outcome of one depth-bounded search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// The goal holds after the contained plan.
    Found(Plan),
    /// Some branch was cut off by the depth bound; a deeper bound may succeed.
    Cutoff,
    /// Every branch ended without actions and without a cutoff.
    DeadEnd,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }

    pub fn into_plan(self) -> Option<Plan> {
        match self {
            SearchResult::Found(plan) => Some(plan),
            SearchResult::Cutoff | SearchResult::DeadEnd => None,
        }
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes visited within the depth bound.
    pub nodes: usize,
    /// Goal tests run, one per visited node.
    pub goal_tests: usize,
    /// Branches cut off by the depth bound.
    pub cutoffs: usize,
    /// Depth bounds tried.
    pub bounds_tried: usize,
}

/// Everything `Planner::search` learned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// The plan found, or `None` when the search space was exhausted.
    pub plan: Option<Plan>,
    /// The depth bound at which the plan was found.
    pub depth: Option<usize>,
    pub stats: SearchStats,
}

/// Searches for action sequences that make a goal hold.
///
/// The agent supplies the program rules used by the goal test, the
/// applicable actions (`think`) and the successor states (`act`). Every
/// inference run during a search, the agent's included, uses the engine
/// built from the planner's configuration.
pub struct Planner<'a, A: Agent + ?Sized> {
    agent: &'a A,
    engine: InferenceEngine,
    config: PlannerConfig,
}

impl<'a, A: Agent + ?Sized> Planner<'a, A> {
    /// Creates a planner with the default configuration.
    pub fn new(agent: &'a A) -> Self {
        Self::with_config(agent, PlannerConfig::default())
    }

    pub fn with_config(agent: &'a A, config: PlannerConfig) -> Self {
        Self {
            agent,
            engine: config.engine(),
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Runs `id_search` with the configured depth limit.
    pub fn plan(&self, state: &KnowledgeBase, goal: &Predicate) -> Result<Option<Plan>> {
        self.config.validate()?;
        self.id_search(self.config.max_depth, state, goal)
    }

    /// Iterative deepening from depth 1 to `max_depth`.
    ///
    /// Returns the first plan found, or `None` once every bound has failed.
    pub fn id_search(
        &self,
        max_depth: usize,
        state: &KnowledgeBase,
        goal: &Predicate,
    ) -> Result<Option<Plan>> {
        Ok(self.search(max_depth, state, goal)?.plan)
    }

    /// Like `id_search`, but also reports the bound reached and search counters.
    pub fn search(
        &self,
        max_depth: usize,
        state: &KnowledgeBase,
        goal: &Predicate,
    ) -> Result<SearchReport> {
        let mut stats = SearchStats::default();

        for depth in 1..=max_depth {
            debug!("searching {} with depth bound {}", goal, depth);
            stats.bounds_tried += 1;

            match self.depth_first(depth, 0, state.clone(), goal, Plan::new(), &mut stats)? {
                SearchResult::Found(plan) => {
                    debug!("found plan {} at depth bound {}", plan, depth);
                    return Ok(SearchReport {
                        plan: Some(plan),
                        depth: Some(depth),
                        stats,
                    });
                }
                SearchResult::DeadEnd if self.config.stop_when_exhausted => {
                    debug!("search space exhausted at depth bound {}", depth);
                    break;
                }
                SearchResult::Cutoff | SearchResult::DeadEnd => {}
            }
        }

        debug!("no plan for {} up to depth {}", goal, max_depth);
        Ok(SearchReport {
            plan: None,
            depth: None,
            stats,
        })
    }

    /// Depth-first search below one node.
    ///
    /// `state` and `partial_plan` are owned by this branch; every child gets
    /// its own copies.
    pub fn depth_first(
        &self,
        max_depth: usize,
        depth: usize,
        state: KnowledgeBase,
        goal: &Predicate,
        partial_plan: Plan,
        stats: &mut SearchStats,
    ) -> Result<SearchResult> {
        if depth > max_depth {
            stats.cutoffs += 1;
            return Ok(SearchResult::Cutoff);
        }
        stats.nodes += 1;

        stats.goal_tests += 1;
        let closure = self.closure(&state)?;
        if goal_holds(&closure, goal) {
            trace!("goal {} holds at depth {}", goal, depth);
            return Ok(SearchResult::Found(partial_plan));
        }

        // Desires start empty, so the goal-test closure is also the one `think` needs.
        let mut desires = KnowledgeBase::new();
        let mut intentions = KnowledgeBase::new();
        if !self
            .agent
            .think_from_closure(&closure, &mut desires, &mut intentions)?
        {
            self.agent
                .think_with(&self.engine, &state, &mut desires, &mut intentions)?;
        }
        if intentions.is_empty() {
            trace!("no actions available at depth {}", depth);
            return Ok(SearchResult::DeadEnd);
        }

        let mut cut_off = false;
        for action in intentions.facts() {
            trace!("depth {}: trying {}", depth, action);
            let mut next_state = state.clone();
            self.agent.act_with(
                &self.engine,
                action,
                &mut next_state,
                &mut KnowledgeBase::new(),
            )?;

            match self.depth_first(
                max_depth,
                depth + 1,
                next_state,
                goal,
                partial_plan.extended(action.clone()),
                stats,
            )? {
                SearchResult::Found(plan) => return Ok(SearchResult::Found(plan)),
                SearchResult::Cutoff => cut_off = true,
                SearchResult::DeadEnd => {}
            }
        }

        Ok(if cut_off {
            SearchResult::Cutoff
        } else {
            SearchResult::DeadEnd
        })
    }

    /// Whether `goal` holds in the closure of the program rules and `state`.
    ///
    /// The goal's operator tag is ignored and only plain facts are considered.
    /// A negated goal holds when no plain fact matches its positive form.
    pub fn goal_satisfied(&self, state: &KnowledgeBase, goal: &Predicate) -> Result<bool> {
        Ok(goal_holds(&self.closure(state)?, goal))
    }

    fn closure(&self, state: &KnowledgeBase) -> Result<KnowledgeBase> {
        let result = self
            .engine
            .forward_chain(&self.agent.program_rules().union(state))?;
        Ok(result.facts)
    }
}

fn goal_holds(closure: &KnowledgeBase, goal: &Predicate) -> bool {
    let target = goal.without_operator();
    let matched = closure
        .facts()
        .filter(|fact| fact.operator().is_none())
        .any(|fact| unifies_with(&target, fact).is_some());
    matched != target.is_negated()
}

/// Iterative-deepening search with a default-configured planner.
pub fn id_search<A: Agent + ?Sized>(
    agent: &A,
    max_depth: usize,
    state: &KnowledgeBase,
    goal: &Predicate,
) -> Result<Option<Plan>> {
    Planner::new(agent).id_search(max_depth, state, goal)
}
