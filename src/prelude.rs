pub use crate::models::clause::{ClauseError, NOT_PREFIX, SearchClause};
pub use crate::models::field::{DEFAULT_FIELDS, FieldTag};
pub use crate::models::matcher::{FieldMatcher, MatchMode, MatcherBuilder};
pub use crate::models::phrase::{FILTER_SEPARATOR, Phrase};
pub use crate::models::query::parsing::{ParseError, parse_query};
pub use crate::models::query::update::{QueryUpdate, apply_query_update};
pub use crate::models::query::{Query, SearchResult};
pub use crate::models::record::{Record, RecordTree, StudyRecord};
