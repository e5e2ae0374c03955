pub mod clause;
pub mod field;
pub mod matcher;
pub mod phrase;
pub mod query;
pub mod record;
pub(crate) mod types;
