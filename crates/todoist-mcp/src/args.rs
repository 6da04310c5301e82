//! Tool argument validation
//!
//! Arguments arrive as untyped JSON. [`parse`] first checks them against the
//! tool's catalog entry (an object, with every required field present and of
//! its declared kind) and then decodes them into the tool's typed record.
//!
//! Optional fields are not type-checked: a value of the wrong kind is logged
//! at warn level and treated as if the field were absent. Enum membership and
//! ranges are left to the Todoist API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::tools::Tool;
use crate::{Error, Result};

/// Validate `arguments` for `tool` and decode them into `T`.
pub fn parse<T: DeserializeOwned>(tool: Tool, arguments: &Value) -> Result<T> {
    check_required(tool, arguments)?;
    serde_json::from_value(arguments.clone()).map_err(|e| Error::invalid_arguments(tool, e))
}

/// Check the structural contract of `tool` against `arguments`.
pub fn check_required(tool: Tool, arguments: &Value) -> Result<&Map<String, Value>> {
    let object = arguments
        .as_object()
        .ok_or_else(|| Error::invalid_arguments(tool, "arguments must be an object"))?;

    for field in tool.spec().required_fields() {
        match object.get(field.name) {
            None => {
                return Err(Error::invalid_arguments(
                    tool,
                    format!("missing required field '{}'", field.name),
                ));
            }
            Some(value) if !field.kind.matches(value) => {
                return Err(Error::invalid_arguments(
                    tool,
                    format!("field '{}' must be a {}", field.name, field.kind.as_str()),
                ));
            }
            Some(_) => {}
        }
    }

    Ok(object)
}

fn optional_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => {
            tracing::warn!(value = %other, "Ignoring optional argument that is not a string");
            None
        }
    })
}

/// Integers and integral floats (`2.0`) that fit `T`
fn optional_integer<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = Value::deserialize(deserializer)?;
    let integer = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    });

    let converted = integer.and_then(|n| T::try_from(n).ok());
    if converted.is_none() && !value.is_null() {
        tracing::warn!(value = %value, "Ignoring optional argument that is not a usable number");
    }
    Ok(converted)
}

/// Arguments for todoist_create_task
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskArgs {
    pub content: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub due_string: Option<String>,
    #[serde(default, deserialize_with = "optional_integer")]
    pub priority: Option<u8>,
    #[serde(default, deserialize_with = "optional_string")]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub section_id: Option<String>,
}

/// Arguments for todoist_get_tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GetTasksArgs {
    #[serde(default, deserialize_with = "optional_string")]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub filter: Option<String>,
    #[serde(default, deserialize_with = "optional_integer")]
    pub priority: Option<u8>,
    #[serde(default, deserialize_with = "optional_integer")]
    pub limit: Option<usize>,
    #[serde(default, deserialize_with = "optional_string")]
    pub section_id: Option<String>,
}

/// Arguments for todoist_update_task
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskArgs {
    pub task_name: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub due_string: Option<String>,
    #[serde(default, deserialize_with = "optional_integer")]
    pub priority: Option<u8>,
    #[serde(default, deserialize_with = "optional_string")]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub section_id: Option<String>,
}

/// Arguments for todoist_delete_task and todoist_complete_task
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskNameArgs {
    pub task_name: String,
}

/// Arguments for todoist_get_projects
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GetProjectsArgs {
    #[serde(default, deserialize_with = "optional_integer")]
    pub limit: Option<usize>,
}

/// Arguments for todoist_create_project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProjectArgs {
    pub name: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub parent_id: Option<String>,
}

/// Arguments for todoist_update_project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProjectArgs {
    pub project_name: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub color: Option<String>,
}

/// Arguments for todoist_delete_project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectNameArgs {
    pub project_name: String,
}

/// Arguments for todoist_get_sections
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetSectionsArgs {
    pub project_name: String,
    #[serde(default, deserialize_with = "optional_integer")]
    pub limit: Option<usize>,
}

/// Arguments for todoist_create_section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSectionArgs {
    pub name: String,
    pub project_name: String,
    #[serde(default, deserialize_with = "optional_integer")]
    pub order: Option<i64>,
}

/// Arguments for todoist_update_section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateSectionArgs {
    pub section_name: String,
    pub project_name: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub name: Option<String>,
}

/// Arguments for todoist_delete_section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionNameArgs {
    pub section_name: String,
    pub project_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn message(error: Error) -> String {
        match error {
            Error::InvalidArguments { message } => message,
            other => panic!("Expected InvalidArguments, got {other:?}"),
        }
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!("content"))]
    #[case(json!([{"content": "x"}]))]
    #[case(json!(42))]
    fn non_object_arguments_are_rejected(#[case] arguments: Value) {
        let error = check_required(Tool::GetTasks, &arguments).unwrap_err();
        assert_eq!(
            message(error),
            "Invalid arguments for todoist_get_tasks: arguments must be an object"
        );
    }

    #[test]
    fn empty_object_satisfies_tools_without_required_fields() {
        let args: GetTasksArgs = parse(Tool::GetTasks, &json!({})).unwrap();
        assert_eq!(args, GetTasksArgs::default());

        let args: GetProjectsArgs = parse(Tool::GetProjects, &json!({})).unwrap();
        assert_eq!(args.limit, None);
    }

    #[test]
    fn missing_required_field_is_named() {
        let error = parse::<CreateSectionArgs>(Tool::CreateSection, &json!({"name": "Backlog"}))
            .unwrap_err();
        assert_eq!(
            message(error),
            "Invalid arguments for todoist_create_section: missing required field 'project_name'"
        );
    }

    #[test]
    fn required_field_of_wrong_type_is_rejected() {
        let error = parse::<TaskNameArgs>(Tool::DeleteTask, &json!({"task_name": 7})).unwrap_err();
        assert_eq!(
            message(error),
            "Invalid arguments for todoist_delete_task: field 'task_name' must be a string"
        );
    }

    #[test]
    fn null_required_field_is_rejected() {
        let result = parse::<CreateTaskArgs>(Tool::CreateTask, &json!({"content": null}));
        assert!(matches!(result, Err(Error::InvalidArguments { .. })));
    }

    #[test]
    fn create_task_decodes_all_fields() {
        let args: CreateTaskArgs = parse(
            Tool::CreateTask,
            &json!({
                "content": "Buy milk",
                "description": "2 litres",
                "due_string": "tomorrow",
                "priority": 4,
                "project_id": "p1",
                "section_id": "s1"
            }),
        )
        .unwrap();

        assert_eq!(
            args,
            CreateTaskArgs {
                content: "Buy milk".to_string(),
                description: Some("2 litres".to_string()),
                due_string: Some("tomorrow".to_string()),
                priority: Some(4),
                project_id: Some("p1".to_string()),
                section_id: Some("s1".to_string()),
            }
        );
    }

    #[test]
    fn optional_fields_of_wrong_type_are_ignored() {
        let args: CreateTaskArgs = parse(
            Tool::CreateTask,
            &json!({"content": "Buy milk", "priority": "high", "description": 12}),
        )
        .unwrap();
        assert_eq!(args.priority, None);
        assert_eq!(args.description, None);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn dropped_optional_fields_are_logged_as_warnings() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let args: CreateTaskArgs = tracing::subscriber::with_default(subscriber, || {
            parse(Tool::CreateTask, &json!({"content": "Buy milk", "priority": "4"})).unwrap()
        });

        assert_eq!(args.priority, None);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("not a usable number"), "{output}");
    }

    #[rstest]
    #[case(json!(2), Some(2))]
    #[case(json!(2.0), Some(2))]
    #[case(json!(2.5), None)]
    #[case(json!(-1), None)]
    #[case(json!(null), None)]
    fn limit_accepts_integral_numbers(#[case] limit: Value, #[case] expected: Option<usize>) {
        let args: GetTasksArgs = parse(Tool::GetTasks, &json!({"limit": limit})).unwrap();
        assert_eq!(args.limit, expected);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let args: TaskNameArgs =
            parse(Tool::CompleteTask, &json!({"task_name": "milk", "extra": true})).unwrap();
        assert_eq!(args.task_name, "milk");
    }

    #[test]
    fn enum_membership_is_not_enforced() {
        let args: UpdateTaskArgs =
            parse(Tool::UpdateTask, &json!({"task_name": "milk", "priority": 9})).unwrap();
        assert_eq!(args.priority, Some(9));
    }
}
