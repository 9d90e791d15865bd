use agentflow_core::{JsonType, Parameter, ToolDefinition, ToolResult};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use serde_json::{Map, Value};

use crate::registry::ToolDyn;

pub struct GetDatetime {
    definition: ToolDefinition,
}

impl GetDatetime {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition {
                name: "get_datetime".to_string(),
                description: "Returns the current date and time in a given timezone.".to_string(),
                parameters: vec![
                    Parameter::optional(
                        "timezone",
                        JsonType::String,
                        "IANA timezone name, e.g. \"America/New_York\"",
                        Value::String("UTC".to_string()),
                    ),
                    Parameter::optional(
                        "output_format",
                        JsonType::String,
                        "Either \"iso\" or \"human\"",
                        Value::String("iso".to_string()),
                    )
                    .with_enum(["iso", "human"]),
                ],
                require_approval: false,
                allow_in_sandbox: true,
            },
        }
    }
}

impl Default for GetDatetime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolDyn for GetDatetime {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Map<String, Value>) -> ToolResult {
        let timezone_name = params
            .get("timezone")
            .and_then(Value::as_str)
            .unwrap_or("UTC");
        let output_format = params
            .get("output_format")
            .and_then(Value::as_str)
            .unwrap_or("iso");

        // An unrecognized IANA name falls back to UTC rather than erroring —
        // the caller still gets a usable timestamp back.
        let tz: Tz = timezone_name.parse().unwrap_or(chrono_tz::UTC);
        let now: DateTime<Tz> = Utc::now().with_timezone(&tz);

        let rendered = if output_format == "human" {
            now.format("%A, %B %d, %Y at %I:%M %p %Z").to_string()
        } else {
            now.to_rfc3339()
        };

        let mut data = Map::new();
        data.insert("timestamp".to_string(), Value::String(now.to_rfc3339()));
        data.insert("timezone".to_string(), Value::String(tz.to_string()));
        data.insert("year".to_string(), Value::from(now.year()));
        data.insert("month".to_string(), Value::from(now.month()));
        data.insert("day".to_string(), Value::from(now.day()));
        data.insert("hour".to_string(), Value::from(now.hour()));
        data.insert("minute".to_string(), Value::from(now.minute()));

        ToolResult::success(rendered, data)
    }
}

#[cfg(test)]
mod tests {
    use agentflow_core::ToolStatus;

    use super::*;

    #[tokio::test]
    async fn defaults_to_utc_iso_format() {
        let result = GetDatetime::new().execute(Map::new()).await;
        assert_eq!(result.status, ToolStatus::Success);
        assert_eq!(result.data.get("timezone").unwrap(), "UTC");
    }

    #[tokio::test]
    async fn unknown_timezone_falls_back_to_utc() {
        let mut params = Map::new();
        params.insert("timezone".to_string(), Value::String("Not/AZone".to_string()));
        let result = GetDatetime::new().execute(params).await;
        assert_eq!(result.status, ToolStatus::Success);
        assert_eq!(result.data.get("timezone").unwrap(), "UTC");
    }

    #[tokio::test]
    async fn human_format_is_used_when_requested() {
        let mut params = Map::new();
        params.insert("output_format".to_string(), Value::String("human".to_string()));
        let result = GetDatetime::new().execute(params).await;
        assert_eq!(result.status, ToolStatus::Success);
        assert!(result.output.contains("at"));
    }

    #[tokio::test]
    async fn accepts_named_timezone() {
        let mut params = Map::new();
        params.insert(
            "timezone".to_string(),
            Value::String("America/New_York".to_string()),
        );
        let result = GetDatetime::new().execute(params).await;
        assert_eq!(result.data.get("timezone").unwrap(), "America/New_York");
    }
}
