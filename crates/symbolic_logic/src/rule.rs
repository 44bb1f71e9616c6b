//! Sentences and knowledge bases.
//!
//! A sentence is a conjunction of conditions implying a conjunction of
//! conclusions; a fact is a sentence without conditions. Its single-line text
//! form is `c1 & c2 > k1 & k2`, or just `k1 & k2` for a fact.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::predicate::{Predicate, PredicateKind};

/// A rule (or fact) made of condition and conclusion predicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    conditions: Vec<Predicate>,
    conclusions: Vec<Predicate>,
}

impl Sentence {
    /// Creates a fact asserting a single predicate.
    pub fn fact(predicate: Predicate) -> Self {
        Self {
            conditions: Vec::new(),
            conclusions: vec![predicate],
        }
    }

    /// Creates a rule from its parts.
    pub fn rule(conditions: Vec<Predicate>, conclusions: Vec<Predicate>) -> Self {
        Self {
            conditions,
            conclusions,
        }
    }

    /// Starts building a sentence with a fluent API.
    pub fn builder() -> SentenceBuilder {
        SentenceBuilder::default()
    }

    /// Parses the single-line text form.
    pub fn parse(text: &str) -> Result<Self> {
        let source = text.trim();
        let invalid = || Error::InvalidSentence(source.to_string());

        let (conditions, conclusions) = match source.split_once('>') {
            Some((lhs, rhs)) => {
                if rhs.contains('>') || lhs.trim().is_empty() {
                    return Err(invalid());
                }
                (parse_conjunction(lhs)?, parse_conjunction(rhs)?)
            }
            None => (Vec::new(), parse_conjunction(source)?),
        };

        if conclusions.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            conditions,
            conclusions,
        })
    }

    pub fn conditions(&self) -> &[Predicate] {
        &self.conditions
    }

    pub fn conclusions(&self) -> &[Predicate] {
        &self.conclusions
    }

    /// A fact is a sentence with an empty condition list.
    pub fn is_fact(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns every predicate of the sentence, conditions first.
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.conditions.iter().chain(self.conclusions.iter())
    }
}

fn parse_conjunction(text: &str) -> Result<Vec<Predicate>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split('&').map(Predicate::parse).collect()
}

impl FromStr for Sentence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Sentence::parse(s)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |preds: &[Predicate]| {
            preds
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" & ")
        };
        if self.is_fact() {
            write!(f, "{}", join(&self.conclusions))
        } else {
            write!(f, "{} > {}", join(&self.conditions), join(&self.conclusions))
        }
    }
}

/// A builder for creating `Sentence`s using a fluent API.
#[derive(Debug, Clone, Default)]
pub struct SentenceBuilder {
    sentence: Sentence,
}

impl Default for Sentence {
    fn default() -> Self {
        Self::rule(Vec::new(), Vec::new())
    }
}

impl SentenceBuilder {
    /// Appends a condition.
    pub fn when(mut self, condition: Predicate) -> Self {
        self.sentence.conditions.push(condition);
        self
    }

    /// Appends a conclusion.
    pub fn then(mut self, conclusion: Predicate) -> Self {
        self.sentence.conclusions.push(conclusion);
        self
    }

    pub fn build(self) -> Sentence {
        self.sentence
    }
}

/// An ordered collection of sentences.
///
/// Cloning yields an independent copy; nothing is shared between two knowledge
/// bases, which is what lets sibling search branches mutate their own state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    sentences: Vec<Sentence>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a knowledge base from sentence lines.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Sentence::parse)
            .collect()
    }

    /// Appends a sentence. Duplicates are allowed.
    pub fn add(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    /// Appends a ground fact.
    pub fn add_fact(&mut self, fact: Predicate) -> Result<()> {
        if !fact.is_bound() {
            return Err(Error::NotGround(fact.to_string()));
        }
        self.sentences.push(Sentence::fact(fact));
        Ok(())
    }

    /// Removes every single-predicate fact equal to `fact`.
    ///
    /// Returns how many sentences were removed.
    pub fn remove_fact(&mut self, fact: &Predicate) -> usize {
        let before = self.sentences.len();
        self.sentences
            .retain(|s| !(s.is_fact() && s.conclusions.len() == 1 && s.conclusions[0] == *fact));
        before - self.sentences.len()
    }

    /// Returns a new knowledge base with `other`'s sentences after ours.
    pub fn union(&self, other: &KnowledgeBase) -> KnowledgeBase {
        let mut sentences = Vec::with_capacity(self.sentences.len() + other.sentences.len());
        sentences.extend(self.sentences.iter().cloned());
        sentences.extend(other.sentences.iter().cloned());
        KnowledgeBase { sentences }
    }

    /// All sentences, in insertion order.
    pub fn rules(&self) -> &[Sentence] {
        &self.sentences
    }

    /// The conclusions of every fact sentence, in insertion order.
    pub fn facts(&self) -> impl Iterator<Item = &Predicate> {
        self.sentences
            .iter()
            .filter(|s| s.is_fact())
            .flat_map(|s| s.conclusions.iter())
    }

    pub fn contains_fact(&self, fact: &Predicate) -> bool {
        self.facts().any(|f| f == fact)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Collects the arity of every predicate name.
    ///
    /// Fails with `ArityMismatch` if a name is used with two arities, whatever
    /// operator or negation it carries. Comparisons are not recorded.
    pub fn signature(&self) -> Result<Signature> {
        let mut signature = Signature::default();
        for predicate in self.sentences.iter().flat_map(Sentence::predicates) {
            signature.record(predicate)?;
        }
        Ok(signature)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<Sentence> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = Sentence>>(iter: I) -> Self {
        Self {
            sentences: iter.into_iter().collect(),
        }
    }
}

impl Extend<Sentence> for KnowledgeBase {
    fn extend<I: IntoIterator<Item = Sentence>>(&mut self, iter: I) {
        self.sentences.extend(iter);
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sentence in &self.sentences {
            writeln!(f, "{}", sentence)?;
        }
        Ok(())
    }
}

/// Predicate names mapped to their arity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    arities: IndexMap<String, usize>,
}

impl Signature {
    /// Records `predicate`'s arity, failing if its name already has another.
    pub fn record(&mut self, predicate: &Predicate) -> Result<()> {
        if predicate.kind() != PredicateKind::Atom {
            return Ok(());
        }
        match self.arities.get(predicate.name()) {
            Some(&expected) if expected != predicate.arity() => Err(Error::ArityMismatch {
                name: predicate.name().to_string(),
                expected,
                found: predicate.arity(),
            }),
            Some(_) => Ok(()),
            None => {
                self.arities
                    .insert(predicate.name().to_string(), predicate.arity());
                Ok(())
            }
        }
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.arities.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.arities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arities.is_empty()
    }
}
