//! Todo and subtask records plus the completion rule.
//!
//! # Design
//! `completed` on a `Todo` is never taken from client input. It is always
//! recomputed from the subtask list with [`all_completed`], so the store calls
//! it on every create and update.

use serde::{Deserialize, Serialize};

/// A subtask embedded in a todo. Every field is optional on input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub images: Vec<String>,
    pub subtasks: Vec<Subtask>,
}

/// `true` only when there is at least one subtask and all of them are done.
pub fn all_completed(subtasks: &[Subtask]) -> bool {
    !subtasks.is_empty() && subtasks.iter().all(|s| s.completed)
}

/// Decode the `subtasks` form field.
///
/// An empty field (or JSON `null`) means no subtasks. Anything else that is
/// not a JSON array of subtask objects, whitespace included, is rejected as a
/// whole.
pub fn parse_subtasks(raw: &str) -> Result<Vec<Subtask>, serde_json::Error> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Option<Vec<Subtask>> = serde_json::from_str(raw)?;
    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtask(completed: bool) -> Subtask {
        Subtask {
            completed,
            ..Subtask::default()
        }
    }

    #[test]
    fn no_subtasks_is_not_completed() {
        assert!(!all_completed(&[]));
    }

    #[test]
    fn single_done_subtask_completes() {
        assert!(all_completed(&[subtask(true)]));
    }

    #[test]
    fn one_open_subtask_keeps_todo_open() {
        assert!(!all_completed(&[subtask(true), subtask(false)]));
    }

    #[test]
    fn empty_field_parses_to_no_subtasks() {
        assert!(parse_subtasks("").unwrap().is_empty());
        assert!(parse_subtasks("null").unwrap().is_empty());
    }

    #[test]
    fn whitespace_only_field_is_rejected() {
        assert!(parse_subtasks("   ").is_err());
        assert!(parse_subtasks("\n").is_err());
    }

    #[test]
    fn parse_keeps_order_and_defaults_missing_fields() {
        let parsed =
            parse_subtasks(r#"[{"id":7,"title":"b","completed":true},{"completed":false}]"#)
                .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, Some(7));
        assert_eq!(parsed[0].title, "b");
        assert!(parsed[0].completed);
        assert_eq!(parsed[1].id, None);
        assert_eq!(parsed[1].title, "");
        assert!(!parsed[1].completed);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(parse_subtasks("[{").is_err());
        assert!(parse_subtasks(r#"{"title":"not a list"}"#).is_err());
        assert!(parse_subtasks(r#"[{"completed":"yes"}]"#).is_err());
    }

    #[test]
    fn subtask_without_id_omits_it_in_json() {
        let json = serde_json::to_value(subtask(true)).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["completed"], true);
    }

    #[test]
    fn todo_serializes_empty_lists() {
        let todo = Todo {
            id: 1,
            title: "Test".to_string(),
            description: String::new(),
            completed: false,
            images: Vec::new(),
            subtasks: Vec::new(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["images"], serde_json::json!([]));
        assert_eq!(json["subtasks"], serde_json::json!([]));
    }
}
