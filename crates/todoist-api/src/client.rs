//! TodoistApi trait

use async_trait::async_trait;

use crate::Result;
use crate::models::{
    AddProjectArgs, AddSectionArgs, AddTaskArgs, Project, Section, Task, TaskQuery,
    UpdateProjectArgs, UpdateSectionArgs, UpdateTaskArgs,
};

/// Operations the MCP server needs from Todoist.
///
/// Collections are returned in the order the service provides them; callers
/// that search by name rely on that order being stable for one call.
#[async_trait]
pub trait TodoistApi: Send + Sync {
    async fn get_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>>;
    async fn add_task(&self, args: &AddTaskArgs) -> Result<Task>;
    async fn update_task(&self, id: &str, args: &UpdateTaskArgs) -> Result<Task>;
    /// Mark a task as completed
    async fn close_task(&self, id: &str) -> Result<()>;
    async fn delete_task(&self, id: &str) -> Result<()>;

    async fn get_projects(&self) -> Result<Vec<Project>>;
    async fn add_project(&self, args: &AddProjectArgs) -> Result<Project>;
    async fn update_project(&self, id: &str, args: &UpdateProjectArgs) -> Result<Project>;
    async fn delete_project(&self, id: &str) -> Result<()>;

    async fn get_sections(&self, project_id: &str) -> Result<Vec<Section>>;
    async fn add_section(&self, args: &AddSectionArgs) -> Result<Section>;
    async fn update_section(&self, id: &str, args: &UpdateSectionArgs) -> Result<Section>;
    async fn delete_section(&self, id: &str) -> Result<()>;
}
