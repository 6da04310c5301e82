//! Text rendering of Todoist entities for tool results
//!
//! Each block starts with a heading line followed by `Label: value` lines.
//! Optional values that are absent (or empty strings) produce no line at all.
//!
//! Todoist reports priority 1 for every task without one, so the priority
//! line of create and update results reflects what the caller asked for.

use std::fmt::{Display, Write};

use todoist_api::{Project, Section, Task};

struct Block {
    text: String,
    indent: &'static str,
}

impl Block {
    fn new(heading: impl Display) -> Self {
        Self {
            text: heading.to_string(),
            indent: "",
        }
    }

    /// A list entry whose detail lines are indented under the heading
    fn item(heading: impl Display) -> Self {
        Self {
            text: heading.to_string(),
            indent: "  ",
        }
    }

    fn line(mut self, label: &str, value: impl Display) -> Self {
        // Writing to a String cannot fail
        let _ = write!(self.text, "\n{}{}: {}", self.indent, label, value);
        self
    }

    fn optional(self, label: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.line(label, value),
            None => self,
        }
    }

    fn finish(self) -> String {
        self.text
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn due_string(task: &Task) -> Option<&str> {
    task.due.as_ref().map(|due| due.string.as_str())
}

fn join_blocks(blocks: impl Iterator<Item = String>) -> String {
    blocks.collect::<Vec<_>>().join("\n\n")
}

// ============================================================================
// Tasks
// ============================================================================

pub fn task_created(task: &Task, requested_priority: Option<u8>) -> String {
    Block::new("Task created:")
        .line("ID", &task.id)
        .line("Title", &task.content)
        .optional("Description", non_empty(&task.description))
        .optional("Due", due_string(task))
        .optional("Priority", requested_priority.map(|p| task.priority.unwrap_or(p)))
        .finish()
}

fn task_item(task: &Task) -> String {
    Block::item(format!("- {} (ID: {})", task.content, task.id))
        .optional("Description", non_empty(&task.description))
        .optional("Due", due_string(task))
        .optional("Priority", task.priority)
        .finish()
}

pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found matching the criteria".to_string();
    }
    join_blocks(tasks.iter().map(task_item))
}

pub fn task_updated(previous: &Task, updated: &Task, requested_priority: Option<u8>) -> String {
    Block::new(format!("Task \"{}\" updated:", previous.content))
        .line("New Title", &updated.content)
        .optional("New Description", non_empty(&updated.description))
        .optional("New Due Date", due_string(updated))
        .optional("New Priority", requested_priority.map(|p| updated.priority.unwrap_or(p)))
        .finish()
}

pub fn task_deleted(task: &Task) -> String {
    format!("Successfully deleted task: \"{}\"", task.content)
}

pub fn task_completed(task: &Task) -> String {
    format!("Successfully completed task: \"{}\"", task.content)
}

// ============================================================================
// Projects
// ============================================================================

fn project_item(project: &Project) -> String {
    Block::item(format!("- **{}** (ID: {})", project.name, project.id))
        .optional("Color", project.color.as_deref())
        .optional("Parent ID", project.parent_id.as_deref())
        .optional("Favorite", project.is_favorite.then_some("Yes"))
        .finish()
}

pub fn project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found".to_string();
    }
    format!("Projects:\n\n{}", join_blocks(projects.iter().map(project_item)))
}

pub fn project_created(project: &Project) -> String {
    Block::new("Project created:")
        .line("Name", &project.name)
        .line("ID", &project.id)
        .optional("Color", project.color.as_deref())
        .optional("Parent ID", project.parent_id.as_deref())
        .finish()
}

pub fn project_updated(previous: &Project, updated: &Project) -> String {
    Block::new(format!("Project \"{}\" updated:", previous.name))
        .line("New Name", &updated.name)
        .optional("New Color", updated.color.as_deref())
        .finish()
}

pub fn project_deleted(project: &Project) -> String {
    format!("Successfully deleted project: \"{}\"", project.name)
}

// ============================================================================
// Sections
// ============================================================================

fn section_item(section: &Section) -> String {
    Block::item(format!("- **{}** (ID: {})", section.name, section.id))
        .optional("Order", section.order)
        .finish()
}

pub fn section_list(project: &Project, sections: &[Section]) -> String {
    if sections.is_empty() {
        return format!("No sections found in project \"{}\"", project.name);
    }
    format!(
        "Sections in project \"{}\":\n\n{}",
        project.name,
        join_blocks(sections.iter().map(section_item))
    )
}

pub fn section_created(section: &Section, project: &Project) -> String {
    Block::new("Section created:")
        .line("Name", &section.name)
        .line("ID", &section.id)
        .line("Project", &project.name)
        .optional("Order", section.order)
        .finish()
}

pub fn section_updated(previous: &Section, updated: &Section) -> String {
    Block::new(format!("Section \"{}\" updated:", previous.name))
        .line("New Name", &updated.name)
        .finish()
}

pub fn section_deleted(section: &Section) -> String {
    format!("Successfully deleted section: \"{}\"", section.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use todoist_api::Due;
    use todoist_test_utils::{project, section, task};

    #[test]
    fn created_task_omits_unset_fields() {
        assert_eq!(
            task_created(&task("t1", "Buy milk"), None),
            "Task created:\nID: t1\nTitle: Buy milk"
        );
    }

    #[test]
    fn created_task_ignores_default_priority_from_api() {
        // Todoist returns priority 1 when none was requested
        let created: Task = serde_json::from_value(serde_json::json!({
            "id": "2995104339",
            "project_id": "2203306141",
            "section_id": null,
            "parent_id": null,
            "content": "Buy milk",
            "description": "",
            "is_completed": false,
            "labels": [],
            "order": 1,
            "priority": 1,
            "due": null,
            "url": "https://todoist.com/showTask?id=2995104339",
            "comment_count": 0,
            "creator_id": "2671355",
            "created_at": "2019-12-11T22:36:50.000000Z"
        }))
        .unwrap();

        assert_eq!(
            task_created(&created, None),
            "Task created:\nID: 2995104339\nTitle: Buy milk"
        );
        assert_eq!(
            task_created(&created, Some(1)),
            "Task created:\nID: 2995104339\nTitle: Buy milk\nPriority: 1"
        );
    }

    #[test]
    fn created_task_lists_set_fields() {
        let task = Task {
            description: "2 litres".to_string(),
            due: Some(Due::from_string("tomorrow")),
            priority: Some(4),
            ..task("t1", "Buy milk")
        };
        assert_eq!(
            task_created(&task, Some(4)),
            "Task created:\nID: t1\nTitle: Buy milk\nDescription: 2 litres\nDue: tomorrow\nPriority: 4"
        );
    }

    #[test]
    fn task_list_indents_details_and_separates_entries() {
        let tasks = vec![
            Task {
                priority: Some(2),
                ..task("t1", "Buy milk")
            },
            task("t2", "Call mom"),
        ];
        assert_eq!(
            task_list(&tasks),
            "- Buy milk (ID: t1)\n  Priority: 2\n\n- Call mom (ID: t2)"
        );
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(task_list(&[]), "No tasks found matching the criteria");
        assert_eq!(project_list(&[]), "No projects found");
        assert_eq!(
            section_list(&project("p1", "Work"), &[]),
            "No sections found in project \"Work\""
        );
    }

    #[test]
    fn task_update_reports_previous_name() {
        let before = task("t1", "Buy milk");
        let after = Task {
            due: Some(Due::from_string("friday")),
            priority: Some(1),
            ..task("t1", "Buy oat milk")
        };
        assert_eq!(
            task_updated(&before, &after, None),
            "Task \"Buy milk\" updated:\nNew Title: Buy oat milk\nNew Due Date: friday"
        );
        assert_eq!(
            task_updated(&before, &after, Some(1)),
            "Task \"Buy milk\" updated:\nNew Title: Buy oat milk\nNew Due Date: friday\nNew Priority: 1"
        );
    }

    #[test]
    fn project_list_has_heading() {
        let projects = vec![
            Project {
                color: Some("blue".to_string()),
                is_favorite: true,
                ..project("p1", "Work")
            },
            project("p2", "Home"),
        ];
        assert_eq!(
            project_list(&projects),
            "Projects:\n\n- **Work** (ID: p1)\n  Color: blue\n  Favorite: Yes\n\n- **Home** (ID: p2)"
        );
    }

    #[test]
    fn project_created_and_updated() {
        let created = Project {
            parent_id: Some("p0".to_string()),
            ..project("p1", "Work")
        };
        assert_eq!(
            project_created(&created),
            "Project created:\nName: Work\nID: p1\nParent ID: p0"
        );
        assert_eq!(
            project_updated(&project("p1", "Work"), &project("p1", "Office")),
            "Project \"Work\" updated:\nNew Name: Office"
        );
    }

    #[test]
    fn section_blocks() {
        let work = project("p1", "Work");
        let backlog = Section {
            order: Some(3),
            ..section("s1", "p1", "Backlog")
        };

        assert_eq!(
            section_list(&work, std::slice::from_ref(&backlog)),
            "Sections in project \"Work\":\n\n- **Backlog** (ID: s1)\n  Order: 3"
        );
        assert_eq!(
            section_created(&backlog, &work),
            "Section created:\nName: Backlog\nID: s1\nProject: Work\nOrder: 3"
        );
        assert_eq!(
            section_updated(&backlog, &section("s1", "p1", "Icebox")),
            "Section \"Backlog\" updated:\nNew Name: Icebox"
        );
        assert_eq!(section_deleted(&backlog), "Successfully deleted section: \"Backlog\"");
    }

    #[test]
    fn deletion_and_completion_messages_quote_content() {
        let task = task("t1", "Buy milk");
        assert_eq!(task_deleted(&task), "Successfully deleted task: \"Buy milk\"");
        assert_eq!(task_completed(&task), "Successfully completed task: \"Buy milk\"");
        assert_eq!(
            project_deleted(&project("p1", "Work")),
            "Successfully deleted project: \"Work\""
        );
    }
}
