use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "" | "pending" | "todo" => Some(Self::Pending),
            "in_progress" | "doing" => Some(Self::InProgress),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: String::new(),
            date: None,
            time: None,
            status: TaskStatus::default(),
        }
    }
}

/// Task payload sent to `addTask`: the task fields plus the owner id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedTask<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub user_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRegistration {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Registration {
    Profile(ProfileRegistration),
    Account { username: String, password: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: Option<String>,
    pub email: Option<String>,
}

impl Session {
    /// Builds a session from a login response.
    ///
    /// Accepts `{ user: { id }, token }`, `{ userId, token }` and a bare user
    /// object; `_id` is accepted wherever `id` is. Numeric ids are kept as
    /// their decimal text.
    pub fn from_login(payload: &Value) -> Option<Self> {
        let user = payload.get("user").unwrap_or(payload);
        let user_id = ["id", "_id", "userId"]
            .iter()
            .filter_map(|key| user.get(key).or_else(|| payload.get(key)))
            .find_map(id_text)?;

        let token = payload
            .get("token")
            .or_else(|| payload.get("accessToken"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let email = user.get("email").and_then(Value::as_str).map(str::to_string);

        Some(Self { user_id, token, email })
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn owned_task_flattens_fields_with_user_id() {
        let task = Task {
            title: "Write report".to_string(),
            detail: "quarterly".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14),
            time: NaiveTime::from_hms_opt(9, 30, 0),
            status: TaskStatus::InProgress,
        };
        let body = serde_json::to_value(OwnedTask { task: &task, user_id: "u-1" }).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "Write report",
                "detail": "quarterly",
                "date": "2025-03-14",
                "time": "09:30:00",
                "status": "in_progress",
                "userId": "u-1"
            })
        );
    }

    #[test]
    fn session_accepts_common_login_shapes() {
        let nested = Session::from_login(&json!({ "user": { "_id": "abc", "email": "a@b.c" }, "token": "t" })).unwrap();
        assert_eq!(nested.user_id, "abc");
        assert_eq!(nested.token.as_deref(), Some("t"));
        assert_eq!(nested.email.as_deref(), Some("a@b.c"));

        let flat = Session::from_login(&json!({ "userId": 7 })).unwrap();
        assert_eq!(flat.user_id, "7");

        assert!(Session::from_login(&json!({ "ok": true })).is_none());
    }

    #[test]
    fn registration_variants_serialize_untagged() {
        let account = Registration::Account {
            username: "ana".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(
            serde_json::to_value(account).unwrap(),
            json!({ "username": "ana", "password": "pw" })
        );
    }

    #[test]
    fn status_parse_accepts_aliases() {
        assert_eq!(TaskStatus::parse("In progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse(""), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::parse("blocked"), None);
    }
}
