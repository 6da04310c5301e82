//! MCP tool catalog
//!
//! Every tool is described once, as a [`ToolSpec`] with an ordered list of
//! [`FieldSpec`]s. The JSON input schema served by `tools/list` and the
//! required-field check applied to `tools/call` arguments are both derived
//! from that single table.
//!
//! # Tool Categories
//!
//! ## Tasks
//! - `todoist_create_task` - Create a task
//! - `todoist_get_tasks` - List tasks with optional filters
//! - `todoist_update_task` - Update a task found by name
//! - `todoist_delete_task` - Delete a task found by name
//! - `todoist_complete_task` - Complete a task found by name
//!
//! ## Projects
//! - `todoist_get_projects` - List projects
//! - `todoist_create_project` - Create a project
//! - `todoist_update_project` - Update a project found by name
//! - `todoist_delete_project` - Delete a project found by name
//!
//! ## Sections
//! - `todoist_get_sections` - List the sections of a project found by name
//! - `todoist_create_section` - Create a section in a project found by name
//! - `todoist_update_section` - Rename a section found by name
//! - `todoist_delete_section` - Delete a section found by name

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

/// Content types for tool results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Text of the first content block
    pub fn text_content(&self) -> &str {
        match self.content.first() {
            Some(ToolContent::Text { text }) => text,
            None => "",
        }
    }
}

/// The tools this server exposes, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    CreateTask,
    GetTasks,
    UpdateTask,
    DeleteTask,
    CompleteTask,
    GetProjects,
    CreateProject,
    UpdateProject,
    DeleteProject,
    GetSections,
    CreateSection,
    UpdateSection,
    DeleteSection,
}

impl Tool {
    pub const ALL: [Tool; 13] = [
        Tool::CreateTask,
        Tool::GetTasks,
        Tool::UpdateTask,
        Tool::DeleteTask,
        Tool::CompleteTask,
        Tool::GetProjects,
        Tool::CreateProject,
        Tool::UpdateProject,
        Tool::DeleteProject,
        Tool::GetSections,
        Tool::CreateSection,
        Tool::UpdateSection,
        Tool::DeleteSection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::CreateTask => "todoist_create_task",
            Tool::GetTasks => "todoist_get_tasks",
            Tool::UpdateTask => "todoist_update_task",
            Tool::DeleteTask => "todoist_delete_task",
            Tool::CompleteTask => "todoist_complete_task",
            Tool::GetProjects => "todoist_get_projects",
            Tool::CreateProject => "todoist_create_project",
            Tool::UpdateProject => "todoist_update_project",
            Tool::DeleteProject => "todoist_delete_project",
            Tool::GetSections => "todoist_get_sections",
            Tool::CreateSection => "todoist_create_section",
            Tool::UpdateSection => "todoist_update_section",
            Tool::DeleteSection => "todoist_delete_section",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn spec(self) -> &'static ToolSpec {
        &TOOL_SPECS[self as usize]
    }
}

/// Primitive JSON type of a tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
        }
    }

    /// Whether `value` is of this kind
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
        }
    }
}

/// One argument of a tool
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
    /// Allowed values, rendered as a schema `enum` when non-empty
    pub allowed: &'static [i64],
    pub default: Option<i64>,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            allowed: &[],
            default: None,
        }
    }

    const fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::String, description)
    }

    const fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Number, description)
    }

    const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    const fn one_of(self, allowed: &'static [i64]) -> Self {
        Self { allowed, ..self }
    }

    const fn default_value(self, default: i64) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    fn schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind.as_str(),
            "description": self.description,
        });
        if !self.allowed.is_empty() {
            schema["enum"] = json!(self.allowed);
        }
        if let Some(default) = self.default {
            schema["default"] = json!(default);
        }
        schema
    }
}

/// Catalog entry for one tool
#[derive(Debug)]
pub struct ToolSpec {
    pub tool: Tool,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ToolSpec {
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> + '_ {
        self.fields.iter().filter(|field| field.required)
    }

    /// JSON Schema for the tool's arguments
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.to_string(), field.schema()))
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });

        let required: Vec<&str> = self.required_fields().map(|field| field.name).collect();
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.tool.name().to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema(),
        }
    }
}

const PRIORITIES: &[i64] = &[1, 2, 3, 4];

/// Tool specs, indexed by [`Tool`] discriminant
static TOOL_SPECS: [ToolSpec; 13] = [
    // Tasks
    ToolSpec {
        tool: Tool::CreateTask,
        description: "Create a new task in Todoist with optional description, due date, and priority",
        fields: &[
            FieldSpec::string("content", "The content/title of the task").required(),
            FieldSpec::string("description", "Detailed description of the task (optional)"),
            FieldSpec::string(
                "due_string",
                "Natural language due date like 'tomorrow', 'next Monday', 'Jan 23' (optional)",
            ),
            FieldSpec::number(
                "priority",
                "Task priority from 1 (normal) to 4 (urgent) (optional)",
            )
            .one_of(PRIORITIES),
            FieldSpec::string("project_id", "ID of the project to add the task to (optional)"),
            FieldSpec::string("section_id", "ID of the section to add the task to (optional)"),
        ],
    },
    ToolSpec {
        tool: Tool::GetTasks,
        description: "Get a list of tasks from Todoist with various filters",
        fields: &[
            FieldSpec::string("project_id", "Filter tasks by project ID (optional)"),
            FieldSpec::string(
                "filter",
                "Natural language filter like 'today', 'tomorrow', 'next week', 'priority 1', 'overdue' (optional)",
            ),
            FieldSpec::number("priority", "Filter by priority level (1-4) (optional)")
                .one_of(PRIORITIES),
            FieldSpec::number("limit", "Maximum number of tasks to return (optional)")
                .default_value(10),
            FieldSpec::string("section_id", "Filter tasks by section ID (optional)"),
        ],
    },
    ToolSpec {
        tool: Tool::UpdateTask,
        description: "Update an existing task in Todoist by searching for it by name and then updating it",
        fields: &[
            FieldSpec::string("task_name", "Name/content of the task to search for and update")
                .required(),
            FieldSpec::string("content", "New content/title for the task (optional)"),
            FieldSpec::string("description", "New description for the task (optional)"),
            FieldSpec::string(
                "due_string",
                "New due date in natural language like 'tomorrow', 'next Monday' (optional)",
            ),
            FieldSpec::number(
                "priority",
                "New priority level from 1 (normal) to 4 (urgent) (optional)",
            )
            .one_of(PRIORITIES),
            FieldSpec::string("project_id", "ID of the project to move the task to (optional)"),
            FieldSpec::string("section_id", "ID of the section to move the task to (optional)"),
        ],
    },
    ToolSpec {
        tool: Tool::DeleteTask,
        description: "Delete a task from Todoist by searching for it by name",
        fields: &[FieldSpec::string(
            "task_name",
            "Name/content of the task to search for and delete",
        )
        .required()],
    },
    ToolSpec {
        tool: Tool::CompleteTask,
        description: "Mark a task as complete by searching for it by name",
        fields: &[FieldSpec::string(
            "task_name",
            "Name/content of the task to search for and complete",
        )
        .required()],
    },
    // Projects
    ToolSpec {
        tool: Tool::GetProjects,
        description: "Get a list of all projects from Todoist",
        fields: &[
            FieldSpec::number("limit", "Maximum number of projects to return (optional)")
                .default_value(50),
        ],
    },
    ToolSpec {
        tool: Tool::CreateProject,
        description: "Create a new project in Todoist",
        fields: &[
            FieldSpec::string("name", "Name of the project").required(),
            FieldSpec::string(
                "color",
                "Color of the project, e.g. 'berry_red', 'blue' (optional)",
            ),
            FieldSpec::string(
                "parent_id",
                "ID of the parent project to nest this project under (optional)",
            ),
        ],
    },
    ToolSpec {
        tool: Tool::UpdateProject,
        description: "Update an existing project in Todoist by searching for it by name",
        fields: &[
            FieldSpec::string("project_name", "Name of the project to search for and update")
                .required(),
            FieldSpec::string("name", "New name for the project (optional)"),
            FieldSpec::string("color", "New color for the project (optional)"),
        ],
    },
    ToolSpec {
        tool: Tool::DeleteProject,
        description: "Delete a project from Todoist by searching for it by name",
        fields: &[FieldSpec::string(
            "project_name",
            "Name of the project to search for and delete",
        )
        .required()],
    },
    // Sections
    ToolSpec {
        tool: Tool::GetSections,
        description: "Get the sections of a Todoist project, found by searching for the project by name",
        fields: &[
            FieldSpec::string("project_name", "Name of the project to list sections for")
                .required(),
            FieldSpec::number("limit", "Maximum number of sections to return (optional)")
                .default_value(50),
        ],
    },
    ToolSpec {
        tool: Tool::CreateSection,
        description: "Create a new section in a Todoist project, found by searching for the project by name",
        fields: &[
            FieldSpec::string("name", "Name of the section").required(),
            FieldSpec::string("project_name", "Name of the project to add the section to")
                .required(),
            FieldSpec::number(
                "order",
                "Position of the section within the project (optional)",
            ),
        ],
    },
    ToolSpec {
        tool: Tool::UpdateSection,
        description: "Rename a section in a Todoist project by searching for the project and the section by name",
        fields: &[
            FieldSpec::string("section_name", "Name of the section to search for and update")
                .required(),
            FieldSpec::string("project_name", "Name of the project containing the section")
                .required(),
            FieldSpec::string("name", "New name for the section (optional)"),
        ],
    },
    ToolSpec {
        tool: Tool::DeleteSection,
        description: "Delete a section from a Todoist project by searching for the project and the section by name",
        fields: &[
            FieldSpec::string("section_name", "Name of the section to search for and delete")
                .required(),
            FieldSpec::string("project_name", "Name of the project containing the section")
                .required(),
        ],
    },
];

/// Get all available tool definitions
///
/// Rendered on first use and shared for the rest of the process.
pub fn tool_definitions() -> &'static [ToolDefinition] {
    static DEFINITIONS: OnceLock<Vec<ToolDefinition>> = OnceLock::new();
    DEFINITIONS.get_or_init(|| Tool::ALL.iter().map(|tool| tool.spec().definition()).collect())
}
