//! [`FakeTodoist`], an in-memory Todoist backend.
//!
//! Collections keep insertion order, which stands in for the order the real
//! service returns. Every trait call is appended to a call log so tests can
//! assert which remote operations a tool performed, and in what sequence.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use todoist_api::{
    AddProjectArgs, AddSectionArgs, AddTaskArgs, Due, Error, Project, Result, Section, Task,
    TaskQuery, TodoistApi, UpdateProjectArgs, UpdateSectionArgs, UpdateTaskArgs,
};

use crate::fixtures;

#[derive(Debug, Default)]
struct State {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    sections: Vec<Section>,
    calls: Vec<String>,
    task_queries: Vec<TaskQuery>,
    failure: Option<(u16, String)>,
    next_id: u64,
}

impl State {
    fn record(&mut self, call: String) -> Result<()> {
        self.calls.push(call);
        match &self.failure {
            Some((status, body)) => Err(Error::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }

    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format!("fake-{}", self.next_id)
    }
}

fn not_found(kind: &str, id: &str) -> Error {
    Error::Status {
        status: 404,
        body: format!("{kind} {id} not found"),
    }
}

/// In-memory [`TodoistApi`] implementation.
///
/// # Example
///
/// ```rust
/// use todoist_test_utils::{FakeTodoist, project, task};
///
/// let fake = FakeTodoist::new()
///     .with_project(project("p1", "Work"))
///     .with_task(task("t1", "Write report"));
/// assert_eq!(fake.tasks().len(), 1);
/// assert!(fake.calls().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct FakeTodoist {
    state: Mutex<State>,
}

impl FakeTodoist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(self, task: Task) -> Self {
        self.lock().tasks.push(task);
        self
    }

    pub fn with_project(self, project: Project) -> Self {
        self.lock().projects.push(project);
        self
    }

    pub fn with_section(self, section: Section) -> Self {
        self.lock().sections.push(section);
        self
    }

    /// Make every subsequent call fail with the given HTTP status and body.
    pub fn failing_with(self, status: u16, body: &str) -> Self {
        self.lock().failure = Some((status, body.to_string()));
        self
    }

    /// Remote operations performed so far, e.g. `"delete_task:t1"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Queries passed to `get_tasks`, in call order.
    pub fn task_queries(&self) -> Vec<TaskQuery> {
        self.lock().task_queries.clone()
    }

    /// Active (not completed) tasks.
    pub fn tasks(&self) -> Vec<Task> {
        self.lock()
            .tasks
            .iter()
            .filter(|t| !t.is_completed)
            .cloned()
            .collect()
    }

    pub fn completed_tasks(&self) -> Vec<Task> {
        self.lock()
            .tasks
            .iter()
            .filter(|t| t.is_completed)
            .cloned()
            .collect()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.lock().projects.clone()
    }

    pub fn sections(&self) -> Vec<Section> {
        self.lock().sections.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("FakeTodoist state poisoned")
    }
}

#[async_trait]
impl TodoistApi for FakeTodoist {
    async fn get_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let mut state = self.lock();
        state.record("get_tasks".to_string())?;
        state.task_queries.push(query.clone());

        Ok(state
            .tasks
            .iter()
            .filter(|t| !t.is_completed)
            .filter(|t| query.project_id.as_ref().is_none_or(|p| &t.project_id == p))
            .filter(|t| {
                query
                    .section_id
                    .as_ref()
                    .is_none_or(|s| t.section_id.as_ref() == Some(s))
            })
            .cloned()
            .collect())
    }

    async fn add_task(&self, args: &AddTaskArgs) -> Result<Task> {
        let mut state = self.lock();
        state.record("add_task".to_string())?;

        let id = state.allocate_id();
        let task = Task {
            description: args.description.clone().unwrap_or_default(),
            project_id: args.project_id.clone().unwrap_or_else(|| "inbox".to_string()),
            section_id: args.section_id.clone(),
            // The service reports priority 1 when none is given
            priority: args.priority.or(Some(1)),
            due: args.due_string.as_deref().map(Due::from_string),
            ..fixtures::task(&id, &args.content)
        };
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &str, args: &UpdateTaskArgs) -> Result<Task> {
        let mut state = self.lock();
        state.record(format!("update_task:{id}"))?;

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("task", id))?;
        if let Some(content) = &args.content {
            task.content = content.clone();
        }
        if let Some(description) = &args.description {
            task.description = description.clone();
        }
        if let Some(due) = &args.due_string {
            task.due = Some(Due::from_string(due.clone()));
        }
        if args.priority.is_some() {
            task.priority = args.priority;
        }
        if let Some(project_id) = &args.project_id {
            task.project_id = project_id.clone();
        }
        if args.section_id.is_some() {
            task.section_id = args.section_id.clone();
        }
        Ok(task.clone())
    }

    async fn close_task(&self, id: &str) -> Result<()> {
        let mut state = self.lock();
        state.record(format!("close_task:{id}"))?;

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("task", id))?;
        task.is_completed = true;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let mut state = self.lock();
        state.record(format!("delete_task:{id}"))?;

        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(not_found("task", id));
        }
        Ok(())
    }

    async fn get_projects(&self) -> Result<Vec<Project>> {
        let mut state = self.lock();
        state.record("get_projects".to_string())?;
        Ok(state.projects.clone())
    }

    async fn add_project(&self, args: &AddProjectArgs) -> Result<Project> {
        let mut state = self.lock();
        state.record("add_project".to_string())?;

        let id = state.allocate_id();
        let project = Project {
            color: args.color.clone(),
            parent_id: args.parent_id.clone(),
            ..fixtures::project(&id, &args.name)
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: &str, args: &UpdateProjectArgs) -> Result<Project> {
        let mut state = self.lock();
        state.record(format!("update_project:{id}"))?;

        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("project", id))?;
        if let Some(name) = &args.name {
            project.name = name.clone();
        }
        if args.color.is_some() {
            project.color = args.color.clone();
        }
        Ok(project.clone())
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        let mut state = self.lock();
        state.record(format!("delete_project:{id}"))?;

        let before = state.projects.len();
        state.projects.retain(|p| p.id != id);
        if state.projects.len() == before {
            return Err(not_found("project", id));
        }
        state.sections.retain(|s| s.project_id != id);
        state.tasks.retain(|t| t.project_id != id);
        Ok(())
    }

    async fn get_sections(&self, project_id: &str) -> Result<Vec<Section>> {
        let mut state = self.lock();
        state.record(format!("get_sections:{project_id}"))?;
        Ok(state
            .sections
            .iter()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn add_section(&self, args: &AddSectionArgs) -> Result<Section> {
        let mut state = self.lock();
        state.record("add_section".to_string())?;

        let id = state.allocate_id();
        let section = Section {
            order: args.order,
            ..fixtures::section(&id, &args.project_id, &args.name)
        };
        state.sections.push(section.clone());
        Ok(section)
    }

    async fn update_section(&self, id: &str, args: &UpdateSectionArgs) -> Result<Section> {
        let mut state = self.lock();
        state.record(format!("update_section:{id}"))?;

        let section = state
            .sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("section", id))?;
        if let Some(name) = &args.name {
            section.name = name.clone();
        }
        Ok(section.clone())
    }

    async fn delete_section(&self, id: &str) -> Result<()> {
        let mut state = self.lock();
        state.record(format!("delete_section:{id}"))?;

        let before = state.sections.len();
        state.sections.retain(|s| s.id != id);
        if state.sections.len() == before {
            return Err(not_found("section", id));
        }
        Ok(())
    }
}
