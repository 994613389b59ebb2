use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error type for query parsing
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid query: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("query must be a JSON object")]
    NotAnObject,
    #[error("no type specified")]
    MissingType,
}

/// Which list of items to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryType {
    /// Items scheduled for the day
    Today,
    /// Items due on the day
    DueToday,
}

impl QueryType {
    /// Remote resource key for this query type
    pub fn endpoint(self) -> &'static str {
        match self {
            QueryType::Today => "todayItems",
            QueryType::DueToday => "dueItems",
        }
    }
}

/// Switches controlling which pipeline stages run and how the result is shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Heading shown above the rendered list
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<QueryType>,
    #[serde(default = "default_true")]
    pub color_title: bool,
    #[serde(default)]
    pub show_note: bool,
    #[serde(default = "default_true")]
    pub hide_empty: bool,
    #[serde(default = "default_true")]
    pub inherit_color: bool,
    #[serde(default = "default_true")]
    pub show_label: bool,
    /// Accepted for compatibility with existing codeblocks; has no effect here
    #[serde(default = "default_true")]
    pub is_animated: bool,
    /// Day to fetch instead of the service's notion of today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

impl Default for Query {
    fn default() -> Self {
        Query {
            title: String::new(),
            kind: None,
            color_title: true,
            show_note: false,
            hide_empty: true,
            inherit_color: true,
            show_label: true,
            is_animated: true,
            date: None,
        }
    }
}

impl Query {
    /// Parse a codeblock body. Missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Query, QueryError> {
        Query::default().overlay(text)
    }

    /// Apply the keys present in `text` on top of this query
    pub fn overlay(&self, text: &str) -> Result<Query, QueryError> {
        if text.trim().is_empty() {
            return Ok(self.clone());
        }
        let Value::Object(overrides) = serde_json::from_str::<Value>(text)? else {
            return Err(QueryError::NotAnObject);
        };
        let mut base = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut base {
            fields.extend(overrides);
        }
        Ok(serde_json::from_value(base)?)
    }

    /// The query type, which every fetch requires
    pub fn query_type(&self) -> Result<QueryType, QueryError> {
        self.kind.ok_or(QueryError::MissingType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let q = Query::from_json("{}").unwrap();
        assert_eq!(q, Query::default());
        assert!(q.hide_empty);
        assert!(q.inherit_color);
        assert!(!q.show_note);
    }

    #[test]
    fn test_parse_codeblock() {
        let q = Query::from_json(r#"{"type":"due-today","title":"Due","showNote":true,"hideEmpty":false}"#)
            .unwrap();
        assert_eq!(q.query_type().unwrap(), QueryType::DueToday);
        assert_eq!(q.query_type().unwrap().endpoint(), "dueItems");
        assert_eq!(q.title, "Due");
        assert!(q.show_note);
        assert!(!q.hide_empty);
        assert!(q.show_label);
    }

    #[test]
    fn test_missing_type() {
        let q = Query::from_json(r#"{"title":"x"}"#).unwrap();
        assert!(matches!(q.query_type(), Err(QueryError::MissingType)));
        assert_eq!(q.query_type().unwrap_err().to_string(), "no type specified");
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(
            Query::from_json(r#"{"type":"tomorrow"}"#),
            Err(QueryError::Parse(_))
        ));
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(Query::from_json("[1,2]"), Err(QueryError::NotAnObject)));
    }

    #[test]
    fn test_overlay_keeps_base() {
        let base = Query {
            kind: Some(QueryType::Today),
            show_note: true,
            ..Query::default()
        };
        let q = base.overlay(r#"{"showLabel":false,"date":"2026-10-18"}"#).unwrap();
        assert_eq!(q.kind, Some(QueryType::Today));
        assert!(q.show_note);
        assert!(!q.show_label);
        assert_eq!(q.date, NaiveDate::from_ymd_opt(2026, 10, 18));
    }

    #[test]
    fn test_overlay_empty_text() {
        let base = Query::from_json(r#"{"type":"today"}"#).unwrap();
        assert_eq!(base.overlay("  ").unwrap(), base);
    }
}
