use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The searchable fields of a study record.
///
/// Tags are rendered and parsed in camelCase, like `studyId` or `searchTerms`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FieldTag {
    Name,
    Description,
    StudyId,
    SearchTerms,
    ReferenceGenome,
    CancerTypeId,
}

/// Fields a phrase is matched against when it carries no field restriction.
pub const DEFAULT_FIELDS: [FieldTag; 4] = [
    FieldTag::Name,
    FieldTag::Description,
    FieldTag::StudyId,
    FieldTag::SearchTerms,
];

impl FieldTag {
    /// The search box prefix scoping a phrase to this field, if any.
    /// Name and description are only reachable through the default fields.
    pub fn search_prefix(&self) -> Option<&'static str> {
        match self {
            FieldTag::ReferenceGenome => Some("reference-genome"),
            FieldTag::StudyId => Some("study"),
            FieldTag::CancerTypeId => Some("cancer-type"),
            FieldTag::SearchTerms => Some("tag"),
            FieldTag::Name | FieldTag::Description => None,
        }
    }

    /// The field scoped by a search box prefix (without the separator).
    pub fn from_search_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "reference-genome" => Some(FieldTag::ReferenceGenome),
            "study" => Some(FieldTag::StudyId),
            "cancer-type" => Some(FieldTag::CancerTypeId),
            "tag" => Some(FieldTag::SearchTerms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_camel_case() {
        assert_eq!(FieldTag::StudyId.to_string(), "studyId");
        assert_eq!(FieldTag::from_str("searchTerms"), Ok(FieldTag::SearchTerms));
        assert!(FieldTag::from_str("search_terms").is_err());
    }

    #[test]
    fn test_prefixes_roundtrip() {
        for tag in FieldTag::iter() {
            if let Some(prefix) = tag.search_prefix() {
                assert_eq!(FieldTag::from_search_prefix(prefix), Some(tag));
            }
        }
        assert_eq!(FieldTag::from_search_prefix("name"), None);
    }
}
