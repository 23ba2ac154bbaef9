use std::cmp::Ordering;

use serde_json::Value;

use super::{Document, Fields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Equality predicates ANDed together, plus an optional single-field ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<(String, Direction)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push((field.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    pub fn matches(&self, fields: &Fields) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| fields.get(field) == Some(expected))
    }

    /// Evaluates the query in process over an already loaded collection.
    pub fn apply(&self, documents: Vec<Document>) -> Vec<Document> {
        let mut matching: Vec<Document> = documents
            .into_iter()
            .filter(|document| self.matches(&document.fields))
            .collect();

        if let Some((field, direction)) = &self.order_by {
            matching.sort_by(|a, b| {
                compare_field(a.fields.get(field), b.fields.get(field), *direction)
            });
        }

        matching
    }
}

// documents missing the field go last in either direction
fn compare_field(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = SortKey::of(a).cmp(&SortKey::of(b));
            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Position of a single value in a sort, independent of what it is compared against.
///
/// Timestamps stored as RFC 3339 text or `{seconds, nanoseconds}` rank as their epoch
/// milliseconds, so they interleave with numeric `createdAt` values. Values of different kinds
/// rank null, bool, number, text, then anything else.
#[derive(Debug)]
enum SortKey<'a> {
    Null,
    Bool(bool),
    Number(f64),
    Text(&'a str),
    Other,
}

impl<'a> SortKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => number.as_f64().map_or(Self::Other, Self::Number),
            Value::String(text) => match timestamp_millis(value) {
                Some(millis) => Self::Number(millis as f64),
                None => Self::Text(text),
            },
            Value::Object(_) => timestamp_millis(value).map_or(Self::Other, |millis| {
                Self::Number(millis as f64)
            }),
            Value::Array(_) => Self::Other,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
            Self::Other => 4,
        }
    }
}

impl PartialEq for SortKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey<'_> {}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn timestamp_millis(value: &Value) -> Option<i64> {
    catalog::timestamp::deserialize(value)
        .ok()
        .map(|timestamp| timestamp.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document(id: &str, value: Value) -> Document {
        let Value::Object(fields) = value else {
            panic!("fixture must be an object");
        };

        Document {
            id: id.to_string(),
            fields,
        }
    }

    fn ids(documents: &[Document]) -> Vec<&str> {
        documents.iter().map(|document| document.id.as_str()).collect()
    }

    fn collection() -> Vec<Document> {
        vec![
            document("a", json!({ "status": "approved", "isFeatured": true, "createdAt": 30 })),
            document("b", json!({ "status": "approved", "isFeatured": false, "createdAt": 10 })),
            document("c", json!({ "status": "pending", "isFeatured": false, "createdAt": 20 })),
            document("d", json!({ "status": "approved", "isFeatured": false })),
            document("e", json!({ "status": "approved", "isFeatured": false, "createdAt": 40 })),
        ]
    }

    #[test]
    fn test_filters_are_anded() {
        let query = Query::new().eq("status", "approved").eq("isFeatured", false);
        let result = query.apply(collection());

        assert_eq!(ids(&result), vec!["b", "d", "e"]);
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        assert_eq!(Query::new().apply(collection()).len(), 5);
    }

    #[test]
    fn test_order_descending_missing_last() {
        let query = Query::new()
            .eq("status", "approved")
            .order_by("createdAt", Direction::Descending);

        assert_eq!(ids(&query.apply(collection())), vec!["e", "a", "b", "d"]);
    }

    #[test]
    fn test_order_ascending_missing_last() {
        let query = Query::new().order_by("createdAt", Direction::Ascending);

        assert_eq!(ids(&query.apply(collection())), vec!["b", "c", "a", "e", "d"]);
    }

    #[test]
    fn test_order_mixes_timestamp_encodings() {
        let documents = vec![
            document("millis", json!({ "createdAt": 1_735_700_000_000_i64 })),
            document("text", json!({ "createdAt": "2025-01-03T00:00:00Z" })),
            document("native", json!({ "createdAt": { "seconds": 1_735_600_000, "nanoseconds": 0 } })),
            document("oldest", json!({ "createdAt": "2024-06-01T00:00:00+02:00" })),
        ];

        let query = Query::new().order_by("createdAt", Direction::Descending);

        assert_eq!(
            ids(&query.apply(documents)),
            vec!["text", "millis", "native", "oldest"]
        );
    }

    #[test]
    fn test_order_is_total_across_kinds() {
        let documents: Vec<Document> = [
            json!("zeta"),
            json!(5),
            json!(true),
            json!(null),
            json!("alpha"),
            json!([1]),
            json!(false),
            json!(2.5),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, value)| document(&i.to_string(), json!({ "rank": value })))
        .collect();

        let query = Query::new().order_by("rank", Direction::Ascending);

        assert_eq!(
            ids(&query.apply(documents)),
            vec!["3", "6", "2", "7", "1", "4", "0", "5"]
        );
    }

    #[test]
    fn test_equality_is_type_strict() {
        let query = Query::new().eq("isFeatured", "true");
        assert!(query.apply(collection()).is_empty());
    }
}
