//! End-to-end workflow tests
//!
//! Each test drives the server through JSON-RPC messages only, the way an MCP
//! client would, against an in-memory Todoist backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use todoist_api::TodoistApi;
use todoist_mcp::TodoistMcpServer;
use todoist_test_utils::{FakeTodoist, project, section, task};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// An MCP client session against a fake backend
struct Session {
    server: TodoistMcpServer,
    fake: Arc<FakeTodoist>,
    next_id: u64,
}

impl Session {
    fn new(fake: FakeTodoist) -> Self {
        let fake = Arc::new(fake);
        let api: Arc<dyn TodoistApi> = fake.clone();
        Self {
            server: TodoistMcpServer::new(api),
            fake,
            next_id: 0,
        }
    }

    /// Perform the initialize handshake
    async fn handshake(fake: FakeTodoist) -> Self {
        let mut session = Self::new(fake);
        let init = session.request("initialize", json!({"protocolVersion": "2024-11-05"})).await;
        assert_eq!(init["result"]["serverInfo"]["name"], "todoist-mcp-server");

        let ack = session
            .server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .unwrap();
        assert!(ack.is_empty());
        session
    }

    async fn request(&mut self, method: &str, params: Value) -> Value {
        self.next_id += 1;
        let message = json!({
            "jsonrpc": "2.0",
            "id": self.next_id,
            "method": method,
            "params": params
        });
        let response: Value = serde_json::from_str(
            &self.server.handle_message(&message.to_string()).await.unwrap(),
        )
        .unwrap();
        assert_eq!(response["id"], self.next_id);
        response
    }

    /// Call a tool and return its text, asserting the expected error flag
    async fn call(&mut self, tool: &str, arguments: Value, expect_error: bool) -> String {
        let response = self
            .request("tools/call", json!({"name": tool, "arguments": arguments}))
            .await;
        let result = &response["result"];
        let text = result["content"][0]["text"].as_str().unwrap().to_string();
        assert_eq!(result["isError"], expect_error, "{tool}: {text}");
        text
    }

    async fn ok(&mut self, tool: &str, arguments: Value) -> String {
        self.call(tool, arguments, false).await
    }

    async fn fails(&mut self, tool: &str, arguments: Value) -> String {
        self.call(tool, arguments, true).await
    }
}

// =============================================================================
// Workflows
// =============================================================================

#[tokio::test]
async fn test_project_section_task_lifecycle() {
    let mut session = Session::handshake(FakeTodoist::new()).await;

    let created = session
        .ok(
            "todoist_create_project",
            json!({"name": "Home Renovation", "color": "berry_red"}),
        )
        .await;
    assert_eq!(
        created,
        "Project created:\nName: Home Renovation\nID: fake-1\nColor: berry_red"
    );

    let created = session
        .ok(
            "todoist_create_section",
            json!({"name": "Kitchen", "project_name": "renovation", "order": 1}),
        )
        .await;
    assert_eq!(
        created,
        "Section created:\nName: Kitchen\nID: fake-2\nProject: Home Renovation\nOrder: 1"
    );

    let created = session
        .ok(
            "todoist_create_task",
            json!({
                "content": "Buy paint",
                "due_string": "next monday",
                "priority": 3,
                "project_id": "fake-1",
                "section_id": "fake-2"
            }),
        )
        .await;
    assert_eq!(
        created,
        "Task created:\nID: fake-3\nTitle: Buy paint\nDue: next monday\nPriority: 3"
    );

    let listed = session
        .ok(
            "todoist_get_tasks",
            json!({"project_id": "fake-1", "section_id": "fake-2"}),
        )
        .await;
    assert_eq!(listed, "- Buy paint (ID: fake-3)\n  Due: next monday\n  Priority: 3");

    let updated = session
        .ok(
            "todoist_update_task",
            json!({"task_name": "PAINT", "content": "Buy blue paint"}),
        )
        .await;
    assert_eq!(
        updated,
        "Task \"Buy paint\" updated:\nNew Title: Buy blue paint\nNew Due Date: next monday"
    );

    let completed = session
        .ok("todoist_complete_task", json!({"task_name": "blue paint"}))
        .await;
    assert_eq!(completed, "Successfully completed task: \"Buy blue paint\"");

    let listed = session
        .ok("todoist_get_tasks", json!({"project_id": "fake-1"}))
        .await;
    assert_eq!(listed, "No tasks found matching the criteria");

    let deleted = session
        .ok(
            "todoist_delete_section",
            json!({"section_name": "kitchen", "project_name": "home"}),
        )
        .await;
    assert_eq!(deleted, "Successfully deleted section: \"Kitchen\"");

    let deleted = session
        .ok("todoist_delete_project", json!({"project_name": "Home Renovation"}))
        .await;
    assert_eq!(deleted, "Successfully deleted project: \"Home Renovation\"");

    let listed = session.ok("todoist_get_projects", json!({})).await;
    assert_eq!(listed, "No projects found");

    assert_eq!(session.fake.completed_tasks().len(), 0, "project deletion removes its tasks");
}

#[tokio::test]
async fn test_rename_then_find_by_new_name() {
    let mut session = Session::handshake(
        FakeTodoist::new()
            .with_project(project("p1", "Work"))
            .with_section(section("s1", "p1", "Backlog")),
    )
    .await;

    session
        .ok(
            "todoist_update_project",
            json!({"project_name": "work", "name": "Office"}),
        )
        .await;
    session
        .ok(
            "todoist_update_section",
            json!({"section_name": "backlog", "project_name": "office", "name": "Icebox"}),
        )
        .await;

    let listed = session
        .ok("todoist_get_sections", json!({"project_name": "Office"}))
        .await;
    assert_eq!(listed, "Sections in project \"Office\":\n\n- **Icebox** (ID: s1)");

    let missing = session
        .fails("todoist_get_sections", json!({"project_name": "Work"}))
        .await;
    assert_eq!(missing, "Could not find a project matching \"Work\"");
}

#[tokio::test]
async fn test_failed_lookup_leaves_backend_untouched() {
    let mut session = Session::handshake(
        FakeTodoist::new()
            .with_project(project("p1", "Work"))
            .with_section(section("s1", "p1", "Backlog"))
            .with_task(task("t1", "Write report")),
    )
    .await;

    let missing = session
        .fails(
            "todoist_update_section",
            json!({"section_name": "done", "project_name": "work", "name": "Archive"}),
        )
        .await;
    assert_eq!(
        missing,
        "Could not find a section matching \"done\" in project \"Work\""
    );

    let missing = session
        .fails("todoist_complete_task", json!({"task_name": "groceries"}))
        .await;
    assert_eq!(missing, "Could not find a task matching \"groceries\"");

    assert_eq!(
        session.fake.calls(),
        vec!["get_projects", "get_sections:p1", "get_tasks"]
    );
    assert_eq!(session.fake.sections()[0].name, "Backlog");
    assert!(session.fake.completed_tasks().is_empty());
}

#[tokio::test]
async fn test_backend_outage_is_reported_per_call() {
    let mut session =
        Session::handshake(FakeTodoist::new().failing_with(503, "Service Unavailable")).await;

    for (tool, arguments) in [
        ("todoist_get_projects", json!({})),
        ("todoist_create_task", json!({"content": "Buy milk"})),
        ("todoist_delete_task", json!({"task_name": "milk"})),
    ] {
        let text = session.fails(tool, arguments).await;
        assert_eq!(
            text,
            "Error: Todoist API request failed with status 503: Service Unavailable"
        );
    }

    // The session keeps serving after failures
    let pong = session.request("ping", json!({})).await;
    assert_eq!(pong["result"], json!({}));
}
