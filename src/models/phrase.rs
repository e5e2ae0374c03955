use std::{
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
};

use crate::models::{
    clause::ClauseError,
    field::FieldTag,
    matcher::{DEFAULT_MATCHER, FieldMatcher},
    record::Record,
    types::OurStr,
};

/// Separates a field scoping prefix from the phrase in the search box.
pub const FILTER_SEPARATOR: &str = ":";

// Characters that force a phrase to be quoted in its display form.
const QUOTE_TRIGGERS: [char; 3] = ['"', '\\', ':'];

/// The form a value takes in the search box, quoted and escaped when
/// reading it back naked would not give the same value.
pub(crate) fn display_form(value: &str) -> String {
    let naked = !value.is_empty()
        && !value.starts_with('-')
        && !value.chars().any(|c| c.is_whitespace() || QUOTE_TRIGGERS.contains(&c));
    if naked {
        value.to_string()
    } else {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    }
}

/// A search phrase and the record fields it is restricted to.
///
/// Two phrases are equal when their text and field sets are equal.
/// The text representation (what the user typed, prefix included)
/// is only used for display.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phrase {
    phrase: OurStr,
    text_representation: OurStr,
    fields: BTreeSet<FieldTag>,
}

impl Phrase {
    /// Constructor. An empty set of fields means the default fields.
    pub fn new<T, U, I>(phrase: T, text_representation: U, fields: I) -> Self
    where
        T: Into<OurStr>,
        U: Into<OurStr>,
        I: IntoIterator<Item = FieldTag>,
    {
        Self {
            phrase: phrase.into(),
            text_representation: text_representation.into(),
            fields: fields.into_iter().collect(),
        }
    }

    /// Like [`Phrase::new`], refusing a blank phrase.
    pub fn try_new<T, U, I>(phrase: T, text_representation: U, fields: I) -> Result<Self, ClauseError>
    where
        T: Into<OurStr>,
        U: Into<OurStr>,
        I: IntoIterator<Item = FieldTag>,
    {
        let p = Self::new(phrase, text_representation, fields);
        if p.phrase.trim().is_empty() {
            return Err(ClauseError::InvalidClause("blank phrase".into()));
        }
        Ok(p)
    }

    /// A phrase searching the default fields, displayed as typed.
    ///
    /// Example:
    /// ```
    /// use studyquery::prelude::*;
    ///
    /// let p = Phrase::plain("breast cancer");
    /// assert_eq!(p.to_string(), "\"breast cancer\"");
    /// assert!(p.fields().is_empty());
    /// ```
    pub fn plain<T: AsRef<str>>(phrase: T) -> Self {
        let phrase = phrase.as_ref();
        Self::new(phrase, display_form(phrase), [])
    }

    /// A phrase restricted to one field, displayed with the field's
    /// search prefix when it has one.
    ///
    /// `Name` and `Description` have no search prefix: their display form
    /// reads back as a plain phrase over the default fields, which is not
    /// equal to this one.
    ///
    /// Example:
    /// ```
    /// use studyquery::prelude::*;
    ///
    /// let p = Phrase::scoped(FieldTag::ReferenceGenome, "hg19");
    /// assert_eq!(p.to_string(), "reference-genome:hg19");
    ///
    /// let named = Phrase::scoped(FieldTag::Name, "metabric");
    /// let reparsed: Query = named.to_string().parse().unwrap();
    /// assert!(!reparsed.contains_phrase(&named));
    /// ```
    pub fn scoped<T: AsRef<str>>(field: FieldTag, phrase: T) -> Self {
        let phrase = phrase.as_ref();
        let text = match field.search_prefix() {
            Some(prefix) => format!("{prefix}{FILTER_SEPARATOR}{}", display_form(phrase)),
            None => display_form(phrase),
        };
        Self::new(phrase, text, [field])
    }

    /// The raw phrase text
    pub fn phrase(&self) -> OurStr {
        self.phrase.clone()
    }

    /// How this phrase is shown in the search box
    pub fn text_representation(&self) -> OurStr {
        self.text_representation.clone()
    }

    /// The fields this is restricted to. Empty means the default fields.
    pub fn fields(&self) -> &BTreeSet<FieldTag> {
        &self.fields
    }

    /// Does this match the record, with the default matching policy?
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_with(record, &DEFAULT_MATCHER)
    }

    /// Does this match the record, with the given matching policy?
    pub fn matches_with<R: Record>(&self, record: &R, matcher: &FieldMatcher) -> bool {
        matcher.phrase_matches(&self.phrase, &self.fields, record)
    }
}

impl PartialEq for Phrase {
    fn eq(&self, other: &Self) -> bool {
        self.phrase == other.phrase && self.fields == other.fields
    }
}

impl Eq for Phrase {}

impl Hash for Phrase {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.phrase.hash(state);
        self.fields.hash(state);
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text_representation)
    }
}
