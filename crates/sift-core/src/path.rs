use crate::schema::{FieldKind, Introspect, RecordSchema};
use serde::{Deserialize, Serialize};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, OnceLock, RwLock},
};
use thiserror::Error as ThisError;

///
/// Property paths
///
/// Grammar: dot-separated identifier segments; a segment may carry one
/// literal index suffix (`orders[0]`) reaching into a list-typed field.
/// Resolution walks declared field kinds, unwrapping `Nullable` at every
/// link, and produces the flat access program the evaluators execute.
///

///
/// Segment
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Segment {
    Field(String),
    Index(usize),
}

///
/// ResolvedPath
///
/// One resolved access chain: the segments to walk, the leaf kind after
/// the final nullable unwrap, and whether any link was nullable.
/// Immutable once built; shared via `Arc` by compiled artifacts.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedPath {
    pub path: String,
    pub segments: Vec<Segment>,
    pub leaf: FieldKind,
    pub nullable: bool,
}

///
/// PathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("empty property path")]
    Empty,

    #[error("path '{path}' has an invalid segment '{segment}'")]
    InvalidSegment { path: String, segment: String },

    #[error("path '{path}' has an invalid index in segment '{segment}'")]
    InvalidIndex { path: String, segment: String },

    #[error("record '{record}' has no field '{field}' (path '{path}')")]
    UnknownField {
        path: String,
        record: &'static str,
        field: String,
    },

    #[error("path '{path}' traverses non-record field '{field}'")]
    NotARecord { path: String, field: String },

    #[error("path '{path}' indexes non-list field '{field}'")]
    NotAList { path: String, field: String },
}

/// Parse a path string into segments without consulting any schema.
pub fn parse_path(path: &str) -> Result<Vec<Segment>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let mut segments = Vec::new();
    for raw in path.split('.') {
        let (name, index) = split_index(path, raw)?;

        if name.is_empty() || !is_identifier(name) {
            return Err(PathError::InvalidSegment {
                path: path.to_string(),
                segment: raw.to_string(),
            });
        }

        segments.push(Segment::Field(name.to_string()));
        if let Some(index) = index {
            segments.push(Segment::Index(index));
        }
    }

    Ok(segments)
}

fn split_index<'a>(path: &str, raw: &'a str) -> Result<(&'a str, Option<usize>), PathError> {
    let Some(open) = raw.find('[') else {
        return Ok((raw, None));
    };

    let Some(inner) = raw[open..].strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        return Err(PathError::InvalidIndex {
            path: path.to_string(),
            segment: raw.to_string(),
        });
    };

    let index = inner.parse().map_err(|_| PathError::InvalidIndex {
        path: path.to_string(),
        segment: raw.to_string(),
    })?;

    Ok((&raw[..open], Some(index)))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolve a path against a record schema.
///
/// Pure and uncached; invoked once per condition or sort key during
/// compilation. `resolve_for` adds the process-wide cache.
pub fn resolve(schema: &'static RecordSchema, path: &str) -> Result<ResolvedPath, PathError> {
    let segments = parse_path(path)?;

    let mut kind = FieldKind::Record(schema);
    let mut nullable = false;
    let mut last_field = String::new();

    for segment in &segments {
        let (current, was_nullable) = kind.unwrap_nullable();
        nullable |= was_nullable;

        match segment {
            Segment::Field(name) => {
                let FieldKind::Record(record) = current else {
                    return Err(PathError::NotARecord {
                        path: path.to_string(),
                        field: last_field,
                    });
                };

                let field = record
                    .field(name)
                    .ok_or_else(|| PathError::UnknownField {
                        path: path.to_string(),
                        record: record.record_name,
                        field: name.clone(),
                    })?;

                kind = field.kind;
                last_field = name.clone();
            }
            Segment::Index(_) => {
                let FieldKind::List(element) = current else {
                    return Err(PathError::NotAList {
                        path: path.to_string(),
                        field: last_field,
                    });
                };

                kind = *element;
            }
        }
    }

    let (leaf, leaf_nullable) = kind.unwrap_nullable();
    nullable |= leaf_nullable;

    Ok(ResolvedPath {
        path: path.to_string(),
        segments,
        leaf,
        nullable,
    })
}

type CacheKey = (TypeId, String);
type Cache = RwLock<HashMap<CacheKey, Arc<ResolvedPath>>>;

static RESOLVE_CACHE: OnceLock<Cache> = OnceLock::new();

/// Resolve a path for a record type through the process-wide cache.
///
/// Entries are immutable once inserted; a lost insertion race only costs
/// a duplicate resolution. Correctness never depends on this cache.
pub fn resolve_for<R: Introspect>(path: &str) -> Result<Arc<ResolvedPath>, PathError> {
    let cache = RESOLVE_CACHE.get_or_init(|| RwLock::new(HashMap::new()));
    let key = (TypeId::of::<R>(), path.to_string());

    if let Some(hit) = cache.read().expect("resolve cache poisoned").get(&key) {
        return Ok(Arc::clone(hit));
    }

    let resolved = Arc::new(resolve(R::SCHEMA, path)?);

    let mut write = cache.write().expect("resolve cache poisoned");
    let entry = write.entry(key).or_insert_with(|| Arc::clone(&resolved));

    Ok(Arc::clone(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::Customer;

    #[test]
    fn parses_dotted_paths() {
        let segments = parse_path("address.city").unwrap();

        assert_eq!(
            segments,
            vec![
                Segment::Field("address".to_string()),
                Segment::Field("city".to_string()),
            ]
        );
    }

    #[test]
    fn parses_indexed_segments() {
        let segments = parse_path("tags[2]").unwrap();

        assert_eq!(
            segments,
            vec![Segment::Field("tags".to_string()), Segment::Index(2)]
        );
    }

    #[test]
    fn rejects_bad_grammar() {
        assert_eq!(parse_path(""), Err(PathError::Empty));
        assert!(matches!(
            parse_path("a..b"),
            Err(PathError::InvalidSegment { .. })
        ));
        assert!(matches!(
            parse_path("tags[x]"),
            Err(PathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            parse_path("tags[1"),
            Err(PathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            parse_path("9lives"),
            Err(PathError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn resolves_nested_leaf() {
        let resolved = resolve(Customer::SCHEMA, "address.city").unwrap();

        assert_eq!(resolved.leaf, FieldKind::Text);
        assert!(!resolved.nullable);
    }

    #[test]
    fn resolves_nullable_leaf() {
        let resolved = resolve(Customer::SCHEMA, "score").unwrap();

        assert_eq!(resolved.leaf, FieldKind::Float);
        assert!(resolved.nullable);
    }

    #[test]
    fn resolves_indexed_list_element() {
        let resolved = resolve(Customer::SCHEMA, "tags[0]").unwrap();

        assert_eq!(resolved.leaf, FieldKind::Text);
    }

    #[test]
    fn unknown_field_is_fatal() {
        assert!(matches!(
            resolve(Customer::SCHEMA, "nope"),
            Err(PathError::UnknownField { .. })
        ));
        assert!(matches!(
            resolve(Customer::SCHEMA, "address.nope"),
            Err(PathError::UnknownField { .. })
        ));
    }

    #[test]
    fn traversal_shape_errors() {
        assert!(matches!(
            resolve(Customer::SCHEMA, "name.len"),
            Err(PathError::NotARecord { .. })
        ));
        assert!(matches!(
            resolve(Customer::SCHEMA, "name[0]"),
            Err(PathError::NotAList { .. })
        ));
    }

    #[test]
    fn cache_returns_shared_entries() {
        let first = resolve_for::<Customer>("age").unwrap();
        let second = resolve_for::<Customer>("age").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }
}
