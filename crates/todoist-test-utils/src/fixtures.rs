//! Entity fixtures with only identifying fields set.
//!
//! Use struct update syntax to fill in the rest:
//!
//! ```rust
//! use todoist_test_utils::task;
//! use todoist_api::Task;
//!
//! let urgent = Task { priority: Some(4), ..task("1", "Buy milk") };
//! assert_eq!(urgent.content, "Buy milk");
//! ```

use todoist_api::{Project, Section, Task};

/// An active task in the inbox with no optional fields set.
pub fn task(id: &str, content: &str) -> Task {
    Task {
        id: id.to_string(),
        content: content.to_string(),
        description: String::new(),
        project_id: "inbox".to_string(),
        section_id: None,
        parent_id: None,
        priority: None,
        due: None,
        labels: Vec::new(),
        order: None,
        url: None,
        is_completed: false,
    }
}

/// A top-level project with no optional fields set.
pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        color: None,
        parent_id: None,
        order: None,
        is_favorite: false,
        is_shared: false,
        is_inbox_project: false,
        url: None,
    }
}

/// A section of `project_id` with no order.
pub fn section(id: &str, project_id: &str, name: &str) -> Section {
    Section {
        id: id.to_string(),
        project_id: project_id.to_string(),
        name: name.to_string(),
        order: None,
    }
}
