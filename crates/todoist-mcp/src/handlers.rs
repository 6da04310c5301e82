//! MCP Tool Handlers
//!
//! This module routes tool calls to the Todoist API and renders the outcome.
//!
//! Tools that take a name instead of an ID resolve it by fetching the whole
//! collection and taking the first entry whose name contains the search term,
//! ignoring case. Section tools resolve the project first, then the section
//! within it. Remote calls within one tool call run one after another.

use serde_json::Value;
use todoist_api::{Project, Section, Task, TaskQuery, TodoistApi};

use crate::args::{
    self, CreateProjectArgs, CreateSectionArgs, CreateTaskArgs, GetProjectsArgs, GetSectionsArgs,
    GetTasksArgs, ProjectNameArgs, SectionNameArgs, TaskNameArgs, UpdateProjectArgs,
    UpdateSectionArgs, UpdateTaskArgs,
};
use crate::format;
use crate::tools::{Tool, ToolResult};
use crate::{Error, Result};

/// Handle a tool call by dispatching to the appropriate handler.
///
/// Never fails: every error is reported as an error-flagged result.
pub async fn handle_tool_call(
    api: &dyn TodoistApi,
    tool_name: &str,
    arguments: Option<Value>,
) -> ToolResult {
    match dispatch(api, tool_name, arguments).await {
        Ok(text) => ToolResult::text(text),
        Err(e) => {
            tracing::warn!(tool = tool_name, error = %e, "Tool call failed");
            e.into_tool_result()
        }
    }
}

async fn dispatch(api: &dyn TodoistApi, tool_name: &str, arguments: Option<Value>) -> Result<String> {
    let arguments = arguments
        .filter(|a| !a.is_null())
        .ok_or_else(Error::no_arguments)?;
    let tool =
        Tool::from_name(tool_name).ok_or_else(|| Error::UnknownTool(tool_name.to_string()))?;

    tracing::debug!(tool = tool.name(), "Dispatching tool call");

    match tool {
        // Tasks
        Tool::CreateTask => handle_create_task(api, args::parse(tool, &arguments)?).await,
        Tool::GetTasks => handle_get_tasks(api, args::parse(tool, &arguments)?).await,
        Tool::UpdateTask => handle_update_task(api, args::parse(tool, &arguments)?).await,
        Tool::DeleteTask => handle_delete_task(api, args::parse(tool, &arguments)?).await,
        Tool::CompleteTask => handle_complete_task(api, args::parse(tool, &arguments)?).await,

        // Projects
        Tool::GetProjects => handle_get_projects(api, args::parse(tool, &arguments)?).await,
        Tool::CreateProject => handle_create_project(api, args::parse(tool, &arguments)?).await,
        Tool::UpdateProject => handle_update_project(api, args::parse(tool, &arguments)?).await,
        Tool::DeleteProject => handle_delete_project(api, args::parse(tool, &arguments)?).await,

        // Sections
        Tool::GetSections => handle_get_sections(api, args::parse(tool, &arguments)?).await,
        Tool::CreateSection => handle_create_section(api, args::parse(tool, &arguments)?).await,
        Tool::UpdateSection => handle_update_section(api, args::parse(tool, &arguments)?).await,
        Tool::DeleteSection => handle_delete_section(api, args::parse(tool, &arguments)?).await,
    }
}

// ============================================================================
// Name Lookup
// ============================================================================

/// First entry of `items` whose name contains `term`, ignoring case.
pub fn find_by_name<'a, T>(items: &'a [T], term: &str, name: impl Fn(&T) -> &str) -> Option<&'a T> {
    let needle = term.to_lowercase();
    items
        .iter()
        .find(|item| name(*item).to_lowercase().contains(&needle))
}

async fn resolve_task(api: &dyn TodoistApi, term: &str) -> Result<Task> {
    let tasks = api.get_tasks(&TaskQuery::default()).await?;
    find_by_name(&tasks, term, |t| t.content.as_str())
        .cloned()
        .ok_or_else(|| Error::TaskNotFound {
            term: term.to_string(),
        })
}

async fn resolve_project(api: &dyn TodoistApi, term: &str) -> Result<Project> {
    let projects = api.get_projects().await?;
    find_by_name(&projects, term, |p| p.name.as_str())
        .cloned()
        .ok_or_else(|| Error::ProjectNotFound {
            term: term.to_string(),
        })
}

async fn resolve_section(api: &dyn TodoistApi, project: &Project, term: &str) -> Result<Section> {
    let sections = api.get_sections(&project.id).await?;
    find_by_name(&sections, term, |s| s.name.as_str())
        .cloned()
        .ok_or_else(|| Error::SectionNotFound {
            term: term.to_string(),
            project: project.name.clone(),
        })
}

/// Positive limits truncate; zero or absent means no limit.
fn effective_limit(limit: Option<usize>) -> usize {
    limit.filter(|&n| n > 0).unwrap_or(usize::MAX)
}

// ============================================================================
// Task Handlers
// ============================================================================

/// Handle todoist_create_task
async fn handle_create_task(api: &dyn TodoistApi, args: CreateTaskArgs) -> Result<String> {
    let request = todoist_api::AddTaskArgs {
        content: args.content,
        description: args.description,
        due_string: args.due_string,
        priority: args.priority,
        project_id: args.project_id,
        section_id: args.section_id,
    };
    let task = api.add_task(&request).await?;
    tracing::info!(task_id = %task.id, "Created task");
    Ok(format::task_created(&task, args.priority))
}

/// Handle todoist_get_tasks - remote query, then priority and section filters, then limit
async fn handle_get_tasks(api: &dyn TodoistApi, args: GetTasksArgs) -> Result<String> {
    let query = TaskQuery {
        project_id: args.project_id,
        section_id: None,
        filter: args.filter,
    };
    let tasks = api.get_tasks(&query).await?;

    let selected: Vec<Task> = tasks
        .into_iter()
        .filter(|t| args.priority.is_none_or(|p| t.priority == Some(p)))
        .filter(|t| {
            args.section_id
                .as_ref()
                .is_none_or(|s| t.section_id.as_ref() == Some(s))
        })
        .take(effective_limit(args.limit))
        .collect();

    Ok(format::task_list(&selected))
}

/// Handle todoist_update_task
async fn handle_update_task(api: &dyn TodoistApi, args: UpdateTaskArgs) -> Result<String> {
    let task = resolve_task(api, &args.task_name).await?;

    let request = todoist_api::UpdateTaskArgs {
        content: args.content,
        description: args.description,
        due_string: args.due_string,
        priority: args.priority,
        project_id: args.project_id,
        section_id: args.section_id,
    };
    let updated = api.update_task(&task.id, &request).await?;
    tracing::info!(task_id = %task.id, "Updated task");
    Ok(format::task_updated(&task, &updated, args.priority))
}

/// Handle todoist_delete_task
async fn handle_delete_task(api: &dyn TodoistApi, args: TaskNameArgs) -> Result<String> {
    let task = resolve_task(api, &args.task_name).await?;
    api.delete_task(&task.id).await?;
    tracing::info!(task_id = %task.id, "Deleted task");
    Ok(format::task_deleted(&task))
}

/// Handle todoist_complete_task
async fn handle_complete_task(api: &dyn TodoistApi, args: TaskNameArgs) -> Result<String> {
    let task = resolve_task(api, &args.task_name).await?;
    api.close_task(&task.id).await?;
    tracing::info!(task_id = %task.id, "Completed task");
    Ok(format::task_completed(&task))
}

// ============================================================================
// Project Handlers
// ============================================================================

/// Handle todoist_get_projects
async fn handle_get_projects(api: &dyn TodoistApi, args: GetProjectsArgs) -> Result<String> {
    let projects: Vec<Project> = api
        .get_projects()
        .await?
        .into_iter()
        .take(effective_limit(args.limit))
        .collect();
    Ok(format::project_list(&projects))
}

/// Handle todoist_create_project
async fn handle_create_project(api: &dyn TodoistApi, args: CreateProjectArgs) -> Result<String> {
    let request = todoist_api::AddProjectArgs {
        name: args.name,
        color: args.color,
        parent_id: args.parent_id,
    };
    let project = api.add_project(&request).await?;
    tracing::info!(project_id = %project.id, "Created project");
    Ok(format::project_created(&project))
}

/// Handle todoist_update_project
async fn handle_update_project(api: &dyn TodoistApi, args: UpdateProjectArgs) -> Result<String> {
    let project = resolve_project(api, &args.project_name).await?;

    let request = todoist_api::UpdateProjectArgs {
        name: args.name,
        color: args.color,
    };
    let updated = api.update_project(&project.id, &request).await?;
    tracing::info!(project_id = %project.id, "Updated project");
    Ok(format::project_updated(&project, &updated))
}

/// Handle todoist_delete_project
async fn handle_delete_project(api: &dyn TodoistApi, args: ProjectNameArgs) -> Result<String> {
    let project = resolve_project(api, &args.project_name).await?;
    api.delete_project(&project.id).await?;
    tracing::info!(project_id = %project.id, "Deleted project");
    Ok(format::project_deleted(&project))
}

// ============================================================================
// Section Handlers
// ============================================================================

/// Handle todoist_get_sections
async fn handle_get_sections(api: &dyn TodoistApi, args: GetSectionsArgs) -> Result<String> {
    let project = resolve_project(api, &args.project_name).await?;
    let sections: Vec<Section> = api
        .get_sections(&project.id)
        .await?
        .into_iter()
        .take(effective_limit(args.limit))
        .collect();
    Ok(format::section_list(&project, &sections))
}

/// Handle todoist_create_section
async fn handle_create_section(api: &dyn TodoistApi, args: CreateSectionArgs) -> Result<String> {
    let project = resolve_project(api, &args.project_name).await?;

    let request = todoist_api::AddSectionArgs {
        name: args.name,
        project_id: project.id.clone(),
        order: args.order,
    };
    let section = api.add_section(&request).await?;
    tracing::info!(section_id = %section.id, project_id = %project.id, "Created section");
    Ok(format::section_created(&section, &project))
}

/// Handle todoist_update_section
async fn handle_update_section(api: &dyn TodoistApi, args: UpdateSectionArgs) -> Result<String> {
    let project = resolve_project(api, &args.project_name).await?;
    let section = resolve_section(api, &project, &args.section_name).await?;

    let request = todoist_api::UpdateSectionArgs { name: args.name };
    let updated = api.update_section(&section.id, &request).await?;
    tracing::info!(section_id = %section.id, "Updated section");
    Ok(format::section_updated(&section, &updated))
}

/// Handle todoist_delete_section
async fn handle_delete_section(api: &dyn TodoistApi, args: SectionNameArgs) -> Result<String> {
    let project = resolve_project(api, &args.project_name).await?;
    let section = resolve_section(api, &project, &args.section_name).await?;
    api.delete_section(&section.id).await?;
    tracing::info!(section_id = %section.id, "Deleted section");
    Ok(format::section_deleted(&section))
}
