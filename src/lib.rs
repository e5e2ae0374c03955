//! A clause algebra to filter a catalogue of study records with
//! free-text search phrases.
//!
//! A [`Query`](prelude::Query) is a sequence of clauses which must all be
//! satisfied. A clause is either a negated phrase (`- lung`) or a
//! conjunction of phrases (`breast tcga`). A phrase can be scoped to
//! some fields of the records (`reference-genome:hg19`).
//!
//! ```
//! use studyquery::prelude::*;
//!
//! let q: Query = "breast -cell reference-genome:hg19".parse().unwrap();
//!
//! let metabric = StudyRecord::new()
//!     .with_value(FieldTag::Name, "Breast Cancer (METABRIC, Nature 2012)")
//!     .with_value(FieldTag::ReferenceGenome, "hg19");
//! let ccle = StudyRecord::new()
//!     .with_value(FieldTag::Name, "Breast Cancer Cell Lines")
//!     .with_value(FieldTag::ReferenceGenome, "hg19");
//!
//! assert!(q.matches(&metabric));
//! assert!(!q.matches(&ccle));
//!
//! // Editing a query gives a new one. Removing a phrase
//! // removes it from any clause.
//! let edit = QueryUpdate::new()
//!     .remove(Phrase::plain("cell"))
//!     .add(SearchClause::not(Phrase::plain("metabric")));
//! let q2 = q.apply_update(&edit);
//! assert!(!q2.matches(&metabric));
//! assert!(q2.matches(&ccle));
//! assert_eq!(q2.to_string(), "breast reference-genome:hg19 - metabric");
//! ```
pub mod models;
pub mod prelude;
mod testing;
