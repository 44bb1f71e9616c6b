//! # Symbolic Planner - iterative-deepening STRIPS planning
//!
//! Finds sequences of ground actions that make a goal hold, using the
//! forward-chaining engine from `symbolic_logic` as the goal test.
//!
//! ## Overview
//!
//! An agent is described by two rule bases:
//! - **Program rules** derive the actions available in a state (`_move(X,Y)`),
//!   desires to adopt or drop (`*at(home)`, `~at(home)`) and any other
//!   derived knowledge the goal test needs.
//! - **Action rules** describe effects: when the chosen action is asserted,
//!   they conclude `-fact` for deletions and `+fact` for additions.
//!
//! The planner repeatedly asks the agent what it can do (`think`), applies
//! each option to a private copy of the state (`act`), and deepens the search
//! one level at a time until the goal holds or the depth limit is reached.
//!
//! ## Quick Start
//!
//! ```rust
//! use symbolic_logic::{KnowledgeBase, Predicate};
//! use symbolic_planner::{id_search, RuleAgent};
//!
//! let program = KnowledgeBase::from_lines(["at(X) & edge(X,Y) > _move(X,Y)"]).unwrap();
//! let actions = KnowledgeBase::from_lines(["_move(X,Y) > -at(X) & +at(Y)"]).unwrap();
//! let agent = RuleAgent::new(program, actions);
//!
//! let state = KnowledgeBase::from_lines(["at(start)", "edge(start,mid)", "edge(mid,end)"]).unwrap();
//! let goal = Predicate::parse("*at(end)").unwrap();
//!
//! let plan = id_search(&agent, 3, &state, &goal).unwrap().unwrap();
//! assert_eq!(plan.to_string(), "[_move(start,mid), _move(mid,end)]");
//! ```
//!
//! ## Configuration
//!
//! [`PlannerConfig`] carries the depth limit, an optional pass budget for
//! every inference run, and whether the search stops once a depth bound
//! fails without hitting the bound anywhere. It loads from JSON:
//!
//! ```rust
//! use symbolic_planner::PlannerConfig;
//!
//! let config = PlannerConfig::from_json(r#"{ "max_depth": 6 }"#).unwrap();
//! assert_eq!(config.max_depth, 6);
//! assert!(config.stop_when_exhausted);
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod plan;
pub mod planner;

// Re-exports
pub use agent::{Agent, RuleAgent};
pub use config::PlannerConfig;
pub use error::{Error, Result};
pub use plan::Plan;
pub use planner::{id_search, Planner, SearchReport, SearchResult, SearchStats};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
