//! Homework status API response handling
//!
//! Validates the shape of a status response and turns a single homework
//! record into the text sent to the chat. Everything here is pure.

use crate::error::{ResponseError, ResponseResult};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Logged when a response carries no homework records
pub const NO_NEW_STATUSES: &str = "Нет новых статусов";

/// Review verdict for a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Human-readable verdict sentence
    pub const fn text(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    /// Status code as reported by the API
    pub const fn code(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for Verdict {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(ResponseError::UnexpectedStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a JSON value the way it should appear in a message
fn display_value(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}

/// Check that a response matches the documented shape
///
/// Returns the `homeworks` list, most recent first. A missing `homeworks`
/// field is an error: the API always includes it, so its absence means the
/// response is not what we asked for.
pub fn check_response(response: &Value) -> ResponseResult<&[Value]> {
    let Some(body) = response.as_object() else {
        return Err(ResponseError::NotAnObject(json_kind(response)));
    };

    let homeworks = body
        .get("homeworks")
        .ok_or(ResponseError::MissingHomeworks)?;

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ResponseError::HomeworksNotAList(json_kind(homeworks)))
}

/// Server-reported timestamp to use as the next `from_date`
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

/// Build the notification text for one homework record
pub fn parse_status(homework: &Value) -> ResponseResult<String> {
    let name = homework
        .get("homework_name")
        .ok_or(ResponseError::MissingKey("homework_name"))?;
    let status = homework
        .get("status")
        .ok_or(ResponseError::MissingKey("status"))?;

    let verdict: Verdict = match status.as_str() {
        Some(code) => code.parse()?,
        None => return Err(ResponseError::UnexpectedStatus(display_value(status))),
    };

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        display_value(name),
        verdict.text()
    ))
}

/// Text relayed to the chat when a poll cycle fails
pub fn failure_message(error: &dyn fmt::Display) -> String {
    format!("Сбой в работе программы: {error}")
}

/// Compute the cursor for the next request
///
/// The server-reported `current_date` wins. Without it the window restarts one
/// poll period before `now`, never going below zero.
pub fn next_cursor(current_date: Option<i64>, now: i64, retry_period_secs: u64) -> i64 {
    current_date.unwrap_or_else(|| {
        let period = i64::try_from(retry_period_secs).unwrap_or(i64::MAX);
        now.saturating_sub(period).max(0)
    })
}
