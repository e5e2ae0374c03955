use std::{borrow::Cow, collections::BTreeSet, sync::LazyLock};

use strum::{Display, EnumString};

use crate::models::{
    field::{DEFAULT_FIELDS, FieldTag},
    record::Record,
};

/// How a phrase is compared to one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchMode {
    /// The phrase occurs anywhere in the value.
    #[default]
    Substring,
    /// The value starts with the phrase.
    Prefix,
    /// The value is the phrase.
    Exact,
}

pub(crate) static DEFAULT_MATCHER: LazyLock<FieldMatcher> = LazyLock::new(FieldMatcher::default);

/// The field-level string matching policy used by phrases.
///
/// The default is a case-insensitive substring match against
/// [`DEFAULT_FIELDS`] for phrases without a field restriction.
///
/// Example:
/// ```
/// use studyquery::prelude::*;
///
/// let m = FieldMatcher::builder()
///     .mode(MatchMode::Exact)
///     .case_sensitive(true)
///     .build();
/// assert!(m.value_matches("TCGA", "TCGA"));
/// assert!(!m.value_matches("tcga", "TCGA"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldMatcher {
    mode: MatchMode,
    case_sensitive: bool,
    default_fields: Vec<FieldTag>,
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),
            case_sensitive: false,
            default_fields: DEFAULT_FIELDS.to_vec(),
        }
    }
}

impl FieldMatcher {
    /// Returns a matcher builder for configurability
    pub fn builder() -> MatcherBuilder {
        MatcherBuilder::default()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// The fields used for phrases without field restriction.
    pub fn default_fields(&self) -> &[FieldTag] {
        &self.default_fields
    }

    fn fold_case<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(s)
        } else {
            Cow::Owned(s.to_lowercase())
        }
    }

    fn compare(&self, needle: &str, candidate: &str) -> bool {
        match self.mode {
            MatchMode::Substring => candidate.contains(needle),
            MatchMode::Prefix => candidate.starts_with(needle),
            MatchMode::Exact => candidate == needle,
        }
    }

    /// Does the phrase text match this single value?
    pub fn value_matches(&self, phrase: &str, value: &str) -> bool {
        self.compare(&self.fold_case(phrase), &self.fold_case(value))
    }

    /// Does the phrase text match any value of any of the given fields?
    /// An empty field set means the default fields.
    pub fn phrase_matches<R: Record>(
        &self,
        phrase: &str,
        fields: &BTreeSet<FieldTag>,
        record: &R,
    ) -> bool {
        let needle = self.fold_case(phrase);
        let in_field = |tag: FieldTag| {
            record
                .field_values(tag)
                .any(|v| self.compare(&needle, &self.fold_case(v)))
        };
        if fields.is_empty() {
            self.default_fields.iter().copied().any(in_field)
        } else {
            fields.iter().copied().any(in_field)
        }
    }
}

#[derive(Default)]
/// A builder should you want a matcher with a different policy
pub struct MatcherBuilder {
    config: FieldMatcher,
}

impl MatcherBuilder {
    pub fn build(self) -> FieldMatcher {
        self.config
    }

    /// Sets how phrases are compared to values.
    ///
    /// The default is [`MatchMode::Substring`].
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Sets the case policy. The default is case-insensitive.
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.config.case_sensitive = yes;
        self
    }

    /// Sets the fields searched by phrases without field restriction.
    ///
    /// The default is [`DEFAULT_FIELDS`].
    pub fn default_fields(mut self, fields: Vec<FieldTag>) -> Self {
        self.config.default_fields = fields;
        self
    }
}
