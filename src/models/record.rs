use std::collections::HashMap;

use crate::models::{field::FieldTag, types::OurStr};

/// Anything exposing string values by field tag.
/// A field can hold several values (think search terms).
pub trait Record {
    /// All values of the field. Empty when the field is missing.
    fn field_values(&self, field: FieldTag) -> impl Iterator<Item = &str>;
}

/// A record that sits in a hierarchy, like a study inside a cancer type.
pub trait RecordTree: Record {
    fn children(&self) -> impl Iterator<Item = &Self>;
}

/// A study (or group of studies) of the catalogue.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudyRecord {
    fields: HashMap<FieldTag, Vec<OurStr>>,
    children: Vec<StudyRecord>,
}

impl StudyRecord {
    /// Alias for default. An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// This record with a new field,value pair
    pub fn with_value<U>(mut self, field: FieldTag, value: U) -> Self
    where
        U: Into<OurStr>,
    {
        self.fields.entry(field).or_default().push(value.into());
        self
    }

    /// This record with a new child record
    pub fn with_child(mut self, child: StudyRecord) -> Self {
        self.children.push(child);
        self
    }

    /// All values of the field
    pub fn values(&self, field: FieldTag) -> Vec<OurStr> {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    /// All fields of this record
    pub fn fields(&self) -> impl Iterator<Item = FieldTag> + use<'_> {
        self.fields.keys().copied()
    }
}

impl Record for StudyRecord {
    fn field_values(&self, field: FieldTag) -> impl Iterator<Item = &str> {
        self.fields
            .get(&field)
            .into_iter()
            .flatten()
            .map(|v| v.as_ref())
    }
}

impl RecordTree for StudyRecord {
    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }
}

impl<const N: usize> From<[(FieldTag, &str); N]> for StudyRecord {
    fn from(fvs: [(FieldTag, &str); N]) -> Self {
        fvs.into_iter()
            .fold(StudyRecord::new(), |r, (f, v)| r.with_value(f, v))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_multi_values() {
        let r = StudyRecord::new()
            .with_value(FieldTag::SearchTerms, "breast")
            .with_value(FieldTag::SearchTerms, "tcga");
        assert_eq!(
            r.field_values(FieldTag::SearchTerms).collect::<Vec<_>>(),
            vec!["breast", "tcga"]
        );
        assert_eq!(r.field_values(FieldTag::Name).count(), 0);
        assert!(r.values(FieldTag::Name).is_empty());
    }

    #[test]
    fn test_from_array() {
        let r: StudyRecord = [(FieldTag::Name, "Lung"), (FieldTag::StudyId, "luad")].into();
        assert_eq!(r.fields().count(), 2);
        assert_eq!(r.values(FieldTag::StudyId), vec![OurStr::from("luad")]);
        assert_eq!(r.children().count(), 0);
    }
}
