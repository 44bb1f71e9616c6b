//! Plans: ordered sequences of ground actions.

use std::fmt;

use serde::{Deserialize, Serialize};
use symbolic_logic::Predicate;

/// An ordered sequence of ground action predicates.
///
/// Search branches never share a plan: `extended` returns a copy, so a failed
/// branch cannot corrupt the plan a sibling is building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    actions: Vec<Predicate>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this plan with `action` appended.
    pub fn extended(&self, action: Predicate) -> Plan {
        let mut actions = Vec::with_capacity(self.actions.len() + 1);
        actions.extend(self.actions.iter().cloned());
        actions.push(action);
        Plan { actions }
    }

    /// Appends an action in place.
    pub fn push(&mut self, action: Predicate) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Predicate] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.actions.iter()
    }
}

impl FromIterator<Predicate> for Plan {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<String> = self.actions.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", steps.join(", "))
    }
}
