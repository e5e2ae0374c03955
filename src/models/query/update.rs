use crate::models::{clause::SearchClause, phrase::Phrase};

/// An edit of a query: clauses to add and phrases to remove.
///
/// Removal works on phrases, ignoring the variant of the clause holding
/// them, so an edit never leaves `x` and `- x` side by side.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryUpdate {
    to_add: Vec<SearchClause>,
    to_remove: Vec<Phrase>,
}

impl QueryUpdate {
    /// Alias for default. An update changing nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(to_add: Vec<SearchClause>, to_remove: Vec<Phrase>) -> Self {
        Self { to_add, to_remove }
    }

    /// This update, also adding the clause
    pub fn add(mut self, clause: SearchClause) -> Self {
        self.to_add.push(clause);
        self
    }

    /// This update, also removing the phrase
    pub fn remove(mut self, phrase: Phrase) -> Self {
        self.to_remove.push(phrase);
        self
    }

    pub fn to_add(&self) -> &[SearchClause] {
        &self.to_add
    }

    pub fn to_remove(&self) -> &[Phrase] {
        &self.to_remove
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// The clause sequence following `current` once the update is applied.
///
/// 1. Removed phrases are taken out of every clause. Clauses left without
///    a phrase are dropped, and so are clauses that became equal to an
///    earlier one.
/// 2. Each added clause replaces any equal clause, and is appended.
///
/// The result never holds two equal clauses.
pub fn apply_query_update(current: &[SearchClause], update: &QueryUpdate) -> Vec<SearchClause> {
    let mut next: Vec<SearchClause> = Vec::with_capacity(current.len() + update.to_add().len());
    for clause in current
        .iter()
        .filter_map(|c| c.without_phrases(update.to_remove()))
    {
        if !next.contains(&clause) {
            next.push(clause);
        }
    }
    log::trace!(
        "removing {} phrases left {}/{} clauses",
        update.to_remove().len(),
        next.len(),
        current.len()
    );

    for clause in update.to_add() {
        next.retain(|existing| existing != clause);
        next.push(clause.clone());
    }

    log::debug!("query update: {} clauses -> {}", current.len(), next.len());
    next
}
