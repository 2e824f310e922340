use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::validate_body::{require_non_empty, FieldErrors, Validate};

/// One unit of asynchronous work. Request body and row share this layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub assigner: String,
    pub assignee: String,
    #[serde(default)]
    pub task_summarization: String,
    pub room_id: String,
    #[serde(default)]
    pub context: Value,
    #[serde(default = "empty_list")]
    pub tools_called: Value,
    pub status: String,
    #[serde(default)]
    pub result: Value,
}

fn empty_list() -> Value {
    Value::Array(Vec::new())
}

impl Validate for Task {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "task_id", &self.task_id);
        require_non_empty(&mut errors, "assigner", &self.assigner);
        require_non_empty(&mut errors, "assignee", &self.assignee);
        require_non_empty(&mut errors, "room_id", &self.room_id);
        require_non_empty(&mut errors, "status", &self.status);

        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if end < start {
                errors.insert("end_time".to_string(), "Must not be earlier than start_time".to_string());
            }
        }

        if !matches!(self.tools_called, Value::Array(_) | Value::Null) {
            errors.insert("tools_called".to_string(), "Must be a list".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
