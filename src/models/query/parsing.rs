// Parsing search box text into queries
use chumsky::prelude::*;
use itertools::{Either, Itertools};

use crate::models::{
    clause::{NOT_PREFIX, SearchClause},
    field::FieldTag,
    phrase::{FILTER_SEPARATOR, Phrase},
    query::{Query, update::QueryUpdate},
};

type Extra<'src> = extra::Err<Rich<'src, char>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse search query: {}", .0.join("; "))]
pub struct ParseError(Vec<String>);

impl ParseError {
    /// The individual parser messages
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

// One whitespace separated token of the search box.
#[derive(Debug, PartialEq, Clone)]
struct RawToken {
    prefix: Option<String>,
    value: String,
}

impl RawToken {
    fn bare(value: String) -> Self {
        Self {
            prefix: None,
            value,
        }
    }

    fn from_naked(token: String) -> Self {
        match token.split_once(FILTER_SEPARATOR) {
            Some((prefix, value)) if !prefix.is_empty() && !value.is_empty() => Self {
                prefix: Some(prefix.to_string()),
                value: value.to_string(),
            },
            _ => Self::bare(token),
        }
    }

    // Unknown prefixes are just part of the text.
    // A blank value gives no phrase.
    fn into_phrase(self) -> Option<Phrase> {
        let phrase = match self.prefix {
            Some(prefix) => match FieldTag::from_search_prefix(&prefix) {
                Some(field) => Phrase::scoped(field, self.value),
                None => Phrase::plain(format!("{prefix}{FILTER_SEPARATOR}{}", self.value)),
            },
            None => Phrase::plain(self.value),
        };
        if phrase.phrase().trim().is_empty() {
            log::trace!("skipping blank phrase {phrase}");
            return None;
        }
        Some(phrase)
    }
}

#[derive(Debug, PartialEq, Clone)]
enum Item {
    Pos(RawToken),
    Neg(RawToken),
}

fn quoted_parser<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    let term_char = just('\\')
        .ignore_then(any()) // After backslash, accept any character
        .or(none_of('"'));

    just('"')
        .ignore_then(term_char.repeated().collect::<String>())
        .then_ignore(just('"').labelled("closing double quote"))
        .labelled("quote enclosed phrase")
}

fn naked_parser<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    none_of('"')
        .filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .collect::<String>()
}

static NON_PREFIX: [char; 2] = ['"', ':'];

fn token_parser<'src>() -> impl Parser<'src, &'src str, RawToken, Extra<'src>> + Clone {
    let prefix = none_of(NON_PREFIX)
        .filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .collect::<String>();

    // prefix:"some quoted value"
    let scoped_quoted = prefix
        .then_ignore(just(':'))
        .then(quoted_parser())
        .map(|(prefix, value)| RawToken {
            prefix: Some(prefix),
            value,
        });

    choice((
        scoped_quoted,
        quoted_parser().map(RawToken::bare),
        naked_parser().map(RawToken::from_naked),
    ))
}

fn query_parser<'src>() -> impl Parser<'src, &'src str, Vec<Item>, Extra<'src>> {
    let negated = just(NOT_PREFIX)
        .then_ignore(text::inline_whitespace())
        .ignore_then(token_parser())
        .map(Item::Neg);

    let item = choice((negated, token_parser().map(Item::Pos)));

    item.padded()
        .repeated()
        .collect::<Vec<_>>()
        .padded()
        .then_ignore(end())
}

/// Parses search box text into a query.
///
/// Positive phrases make up one AND clause, placed first.
/// Each phrase prefixed with `-` makes a NOT clause.
/// `reference-genome:`, `study:`, `cancer-type:` and `tag:` scope
/// a phrase to one field. Blank quoted phrases such as `""` are skipped.
///
/// Example:
/// ```
/// use studyquery::prelude::*;
///
/// let q = parse_query("breast -\"cell line\" reference-genome:hg19").unwrap();
/// assert_eq!(q.len(), 2);
/// assert_eq!(q.to_string(), "breast reference-genome:hg19 - \"cell line\"");
/// ```
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    let items = query_parser()
        .parse(input)
        .into_result()
        .map_err(|errs| ParseError(errs.into_iter().map(|e| e.to_string()).collect()))?;

    let (positives, negatives): (Vec<Phrase>, Vec<Phrase>) = items
        .into_iter()
        .filter_map(|item| match item {
            Item::Pos(t) => t.into_phrase().map(Either::Left),
            Item::Neg(t) => t.into_phrase().map(Either::Right),
        })
        .partition_map(|e| e);

    let positives = positives.into_iter().unique().collect_vec();
    let update = if positives.is_empty() {
        QueryUpdate::new()
    } else {
        QueryUpdate::new().add(SearchClause::and(positives))
    };
    let update = negatives
        .into_iter()
        .fold(update, |u, p| u.add(SearchClause::not(p)));

    let query = Query::default().apply_update(&update);
    log::debug!("parsed {:?} into {} clauses", input, query.len());
    Ok(query)
}

impl std::str::FromStr for Query {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_query(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(prefix: Option<&str>, value: &str) -> RawToken {
        RawToken {
            prefix: prefix.map(String::from),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_token_parser() {
        let p = token_parser();
        assert_eq!(p.parse("abcd").output(), Some(&raw(None, "abcd")));
        assert_eq!(p.parse("non-small").output(), Some(&raw(None, "non-small")));
        assert_eq!(
            p.parse("study:brca_tcga").output(),
            Some(&raw(Some("study"), "brca_tcga"))
        );
        assert_eq!(
            p.parse("tag:\"pan can\"").output(),
            Some(&raw(Some("tag"), "pan can"))
        );
        assert_eq!(p.parse("study:").output(), Some(&raw(None, "study:")));
        assert_eq!(p.parse(":x").output(), Some(&raw(None, ":x")));
        assert!(p.parse("").has_errors());
    }

    #[test]
    fn test_quoted_parser() {
        let p = quoted_parser();
        assert_eq!(
            p.parse("\"boudin blanc\"").output(),
            Some(&"boudin blanc".to_string())
        );
        assert_eq!(
            p.parse("\"boudin \\\" blanc\"").output(),
            Some(&"boudin \" blanc".to_string())
        );
        assert!(p.parse("\"boudin blanc").has_errors());
    }

    #[test]
    fn test_query_parser() {
        let p = query_parser();
        assert_eq!(p.parse("").output(), Some(&vec![]));
        assert_eq!(p.parse("   ").output(), Some(&vec![]));
        assert_eq!(
            p.parse(" a -b - c ").output(),
            Some(&vec![
                Item::Pos(raw(None, "a")),
                Item::Neg(raw(None, "b")),
                Item::Neg(raw(None, "c")),
            ])
        );
        // A lone dash is just text.
        assert_eq!(p.parse("-").output(), Some(&vec![Item::Pos(raw(None, "-"))]));
    }

    #[test]
    fn test_into_phrase() {
        assert_eq!(
            raw(Some("reference-genome"), "hg38").into_phrase(),
            Some(Phrase::scoped(FieldTag::ReferenceGenome, "hg38"))
        );
        let unknown = raw(Some("foo"), "bar").into_phrase();
        assert_eq!(unknown, Some(Phrase::plain("foo:bar")));
        assert!(unknown.is_some_and(|p| p.fields().is_empty()));

        assert_eq!(raw(None, "").into_phrase(), None);
        assert_eq!(raw(Some("tag"), "  ").into_phrase(), None);
        assert_eq!(raw(Some("foo"), "").into_phrase(), Some(Phrase::plain("foo:")));
    }

    #[test]
    fn test_blank_phrases_are_skipped() {
        assert!(parse_query("\"\"").unwrap().is_empty());
        assert!(parse_query("-\"\"").unwrap().is_empty());
        assert!(parse_query("- \"  \"").unwrap().is_empty());
        assert!(parse_query("tag:\"\"").unwrap().is_empty());

        let q = parse_query("lung -\"\" study:\" \"").unwrap();
        assert_eq!(q.clauses(), &[SearchClause::and(vec![Phrase::plain("lung")])]);
    }

    #[test]
    fn test_parse_query() {
        let q = parse_query("lung lung -tcga").unwrap();
        assert_eq!(
            q.clauses(),
            &[
                SearchClause::and(vec![Phrase::plain("lung")]),
                SearchClause::not(Phrase::plain("tcga")),
            ]
        );
        assert_eq!(q.clauses()[0].phrases().len(), 1);

        let q: Query = "-a -a".parse().unwrap();
        assert_eq!(q.clauses(), &[SearchClause::not(Phrase::plain("a"))]);

        assert!(parse_query("").unwrap().is_empty());

        let err = parse_query("\"unclosed").unwrap_err();
        assert!(!err.messages().is_empty());
        assert!(err.to_string().starts_with("cannot parse search query"));
    }
}
