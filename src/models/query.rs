use std::fmt;

use itertools::Itertools;

use crate::models::{
    clause::SearchClause,
    matcher::FieldMatcher,
    phrase::Phrase,
    record::{Record, RecordTree},
};

pub mod parsing;
pub mod update;

use update::{QueryUpdate, apply_query_update};

/// The outcome of searching one record of a tree.
///
/// A record that does not match is still `forced` into the results
/// when one of its ancestors matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub matched: bool,
    pub forced: bool,
}

impl SearchResult {
    /// Should the record be shown?
    pub fn is_visible(&self) -> bool {
        self.matched || self.forced
    }
}

/// An ordered sequence of clauses, all of which a record must satisfy.
///
/// Queries are values: [`Query::apply_update`] returns a new query
/// and leaves this one untouched.
///
/// Example:
/// ```
/// use studyquery::prelude::*;
///
/// let q: Query = "breast -tcga".parse().unwrap();
/// let record: StudyRecord = [(FieldTag::Name, "Breast Cancer (METABRIC)")].into();
/// assert!(q.matches(&record));
///
/// let q = q.apply_update(&QueryUpdate::new().remove(Phrase::plain("breast")));
/// assert_eq!(q.to_string(), "- tcga");
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query(Vec<SearchClause>);

impl Query {
    pub fn new(clauses: Vec<SearchClause>) -> Self {
        Self(clauses)
    }

    pub fn clauses(&self) -> &[SearchClause] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All phrases of all clauses, in display order.
    pub fn phrases(&self) -> impl Iterator<Item = &Phrase> + use<'_> {
        self.0.iter().flat_map(|c| c.phrases().iter())
    }

    /// Does any clause hold this phrase, whatever the clause variant?
    pub fn contains_phrase(&self, phrase: &Phrase) -> bool {
        self.0.iter().any(|c| c.contains_phrase(Some(phrase)))
    }

    /// The query following this one once the update is applied.
    /// See [`apply_query_update`].
    pub fn apply_update(&self, update: &QueryUpdate) -> Self {
        Self(apply_query_update(&self.0, update))
    }

    /// Does the record satisfy every clause? An empty query matches everything.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.0.iter().all(|c| c.matches(record))
    }

    pub fn matches_with<R: Record>(&self, record: &R, matcher: &FieldMatcher) -> bool {
        self.0.iter().all(|c| c.matches_with(record, matcher))
    }

    /// Searches one record, knowing whether an ancestor matched.
    pub fn search<R: Record>(&self, record: &R, ancestor_matched: bool) -> SearchResult {
        let matched = self.matches(record);
        SearchResult {
            matched,
            forced: !matched && ancestor_matched,
        }
    }

    /// Searches every record of the tree, depth first, root first.
    /// The walk recurses, so stack use grows with the depth of the tree.
    pub fn search_tree<'a, R: RecordTree>(&self, root: &'a R) -> Vec<(&'a R, SearchResult)> {
        let mut results = Vec::new();
        self.search_node(root, false, &mut results);
        results
    }

    fn search_node<'a, R: RecordTree>(
        &self,
        node: &'a R,
        ancestor_matched: bool,
        results: &mut Vec<(&'a R, SearchResult)>,
    ) {
        let result = self.search(node, ancestor_matched);
        results.push((node, result));
        for child in node.children() {
            self.search_node(child, ancestor_matched || result.matched, results);
        }
    }
}

/// Two queries are equal when they hold equal clauses, in any order.
impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().all(|c| other.0.contains(c)) && other.0.iter().all(|c| self.0.contains(c))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|c| c.to_string())
                .filter(|s| !s.is_empty())
                .join(" ")
        )
    }
}

impl From<Vec<SearchClause>> for Query {
    fn from(clauses: Vec<SearchClause>) -> Self {
        Self(clauses)
    }
}

impl FromIterator<SearchClause> for Query {
    fn from_iter<T: IntoIterator<Item = SearchClause>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
