use std::fmt;

use itertools::Itertools;

use crate::models::{matcher::FieldMatcher, phrase::Phrase, record::Record};

/// Marks a negated clause in the search box.
pub const NOT_PREFIX: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClauseError {
    /// A clause or phrase that cannot exist was requested.
    #[error("invalid clause construction: {0}")]
    InvalidClause(String),
}

/// A boolean combinator over search phrases.
///
/// `Not` asserts a record does NOT match its phrase.
/// `And` asserts a record matches every one of its phrases. An empty
/// `And` matches everything.
///
/// Clauses are immutable. Equality is structural and variant sensitive:
/// a `Not` never equals an `And`, and two `And` clauses are equal when
/// they hold the same set of phrases, in any order.
///
/// Example:
/// ```
/// use studyquery::prelude::*;
///
/// let (a, b) = (Phrase::plain("breast"), Phrase::plain("tcga"));
/// let and = SearchClause::and(vec![a.clone(), b.clone()]);
/// assert_eq!(and, SearchClause::and(vec![b, a.clone()]));
/// assert_ne!(SearchClause::not(a.clone()), SearchClause::and(vec![a]));
/// assert_eq!(and.to_string(), "breast tcga");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchClause {
    Not(Option<Phrase>),
    And(Vec<Phrase>),
}

impl SearchClause {
    pub fn not(phrase: Phrase) -> Self {
        SearchClause::Not(Some(phrase))
    }

    /// A negation of nothing. Never kept in a query after an update.
    pub fn empty_not() -> Self {
        SearchClause::Not(None)
    }

    pub fn and(phrases: Vec<Phrase>) -> Self {
        SearchClause::And(phrases)
    }

    /// Builds a clause from its variant and phrases.
    /// A negated clause needs exactly one phrase.
    pub fn from_parts(negated: bool, mut phrases: Vec<Phrase>) -> Result<Self, ClauseError> {
        if !negated {
            return Ok(SearchClause::And(phrases));
        }
        match (phrases.pop(), phrases.is_empty()) {
            (Some(p), true) => Ok(SearchClause::not(p)),
            (None, _) => Err(ClauseError::InvalidClause(
                "a negated clause needs a phrase".into(),
            )),
            (Some(_), false) => Err(ClauseError::InvalidClause(format!(
                "a negated clause holds one phrase, got {}",
                phrases.len() + 1
            ))),
        }
    }

    pub fn is_not(&self) -> bool {
        matches!(self, SearchClause::Not(_))
    }

    pub fn is_and(&self) -> bool {
        matches!(self, SearchClause::And(_))
    }

    /// The phrases of this clause, in display order.
    pub fn phrases(&self) -> &[Phrase] {
        match self {
            SearchClause::Not(p) => p.as_slice(),
            SearchClause::And(ps) => ps,
        }
    }

    /// Does this hold a phrase equal to the given one?
    /// With `None`, does this hold no phrase at all?
    pub fn contains_phrase(&self, phrase: Option<&Phrase>) -> bool {
        match phrase {
            None => self.phrases().is_empty(),
            Some(p) => self.phrases().iter().any(|held| held == p),
        }
    }

    /// Does any phrase of this satisfy the predicate?
    pub fn contains_matching<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Phrase) -> bool,
    {
        self.phrases().iter().any(predicate)
    }

    /// Does the record satisfy this clause, with the default matching policy?
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            SearchClause::Not(p) => !p.as_ref().is_some_and(|p| p.matches(record)),
            SearchClause::And(ps) => ps.iter().all(|p| p.matches(record)),
        }
    }

    /// Does the record satisfy this clause, with the given matching policy?
    pub fn matches_with<R: Record>(&self, record: &R, matcher: &FieldMatcher) -> bool {
        match self {
            SearchClause::Not(p) => !p.as_ref().is_some_and(|p| p.matches_with(record, matcher)),
            SearchClause::And(ps) => ps.iter().all(|p| p.matches_with(record, matcher)),
        }
    }

    /// This clause without any of the removed phrases, or nothing when
    /// no phrase survives.
    pub(crate) fn without_phrases(&self, removed: &[Phrase]) -> Option<SearchClause> {
        match self {
            SearchClause::Not(Some(p)) if !removed.contains(p) => Some(self.clone()),
            SearchClause::Not(_) => None,
            SearchClause::And(ps) => {
                let kept = ps.iter().filter(|p| !removed.contains(p)).cloned().collect_vec();
                (!kept.is_empty()).then_some(SearchClause::And(kept))
            }
        }
    }
}

impl PartialEq for SearchClause {
    fn eq(&self, other: &Self) -> bool {
        match self {
            SearchClause::Not(p) => other.is_not() && other.contains_phrase(p.as_ref()),
            SearchClause::And(ps) => {
                other.is_and()
                    && ps.iter().all(|p| other.contains_phrase(Some(p)))
                    && other.phrases().iter().all(|p| self.contains_phrase(Some(p)))
            }
        }
    }
}

impl Eq for SearchClause {}

impl fmt::Display for SearchClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchClause::Not(Some(p)) => write!(f, "{NOT_PREFIX} {p}"),
            SearchClause::Not(None) => Ok(()),
            SearchClause::And(ps) => write!(f, "{}", ps.iter().join(" ")),
        }
    }
}
