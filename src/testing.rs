//! Testing oriented utilities.
use rand::Rng;

use crate::prelude::{FieldTag, Phrase, Query, QueryUpdate, SearchClause};

static WORDS: [&str; 12] = [
    "breast", "lung", "tcga", "glioma", "pan can", "metastatic", "hg19", "hg38", "cell", "msk",
    "adenocarcinoma", "pediatric",
];

static SCOPES: [FieldTag; 4] = [
    FieldTag::StudyId,
    FieldTag::SearchTerms,
    FieldTag::ReferenceGenome,
    FieldTag::CancerTypeId,
];

fn random_phrase<U: Rng>(rng: &mut U) -> Phrase {
    let word = WORDS[rng.random_range(0..WORDS.len())];
    if rng.random_bool(0.2) {
        Phrase::scoped(SCOPES[rng.random_range(0..SCOPES.len())], word)
    } else {
        Phrase::plain(word)
    }
}

impl Phrase {
    /// Builds a random phrase from a small vocabulary.
    /// This is mainly useful for testing and benchmarking.
    pub fn random<U: Rng>(rng: &mut U) -> Self {
        random_phrase(rng)
    }
}

impl Query {
    /// Builds a random query, as the search box would produce it.
    /// This is mainly useful for testing and benchmarking.
    /// Example:
    /// ```
    /// use studyquery::prelude::Query;
    ///
    /// let mut rng = rand::rng();
    /// let q = Query::random(&mut rng);
    /// assert!(q.len() <= 4);
    /// ```
    pub fn random<U: Rng>(rng: &mut U) -> Self {
        let positives = (0..rng.random_range(0..4))
            .map(|_| random_phrase(rng))
            .collect::<Vec<_>>();
        let update = (0..rng.random_range(0..4)).fold(
            if positives.is_empty() {
                QueryUpdate::new()
            } else {
                QueryUpdate::new().add(SearchClause::and(positives))
            },
            |u, _| u.add(SearchClause::not(random_phrase(rng))),
        );
        Query::default().apply_update(&update)
    }

    /// Generate a random query string, compatible with parsing.
    /// This is mainly useful for testing and benchmarking.
    ///
    /// Example:
    /// ```
    /// use studyquery::prelude::Query;
    ///
    /// let mut rng = rand::rng();
    /// let s = Query::random_string(&mut rng);
    /// assert!( s.parse::<Query>().is_ok() )
    /// ```
    pub fn random_string<U: Rng>(rng: &mut U) -> String {
        Query::random(rng).to_string()
    }
}
