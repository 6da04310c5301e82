//! HTTP implementation of [`TodoistApi`] against the Todoist REST v2 API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::client::TodoistApi;
use crate::models::{
    AddProjectArgs, AddSectionArgs, AddTaskArgs, Project, Section, Task, TaskQuery,
    UpdateProjectArgs, UpdateSectionArgs, UpdateTaskArgs,
};
use crate::{Error, Result};

/// Todoist REST API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Todoist REST API client
pub struct RestClient {
    client: Client,
    api_token: String,
    base_url: String,
}

impl RestClient {
    /// Create a client authenticating with `api_token`
    pub fn new(api_token: impl Into<String>, config: RestConfig) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(Error::InvalidConfig("API token must not be empty".to_string()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.api_token)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "Todoist request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %body, "Todoist request failed");
        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.execute(builder).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<()> {
        self.execute(builder).await.map(|_| ())
    }

    fn get_tasks_request(&self, query: &TaskQuery) -> RequestBuilder {
        self.request(Method::GET, "tasks").query(query)
    }

    fn add_task_request(&self, args: &AddTaskArgs) -> RequestBuilder {
        self.request(Method::POST, "tasks").json(args)
    }

    fn update_task_request(&self, id: &str, args: &UpdateTaskArgs) -> RequestBuilder {
        self.request(Method::POST, &format!("tasks/{id}")).json(args)
    }

    fn close_task_request(&self, id: &str) -> RequestBuilder {
        self.request(Method::POST, &format!("tasks/{id}/close"))
    }

    fn get_sections_request(&self, project_id: &str) -> RequestBuilder {
        self.request(Method::GET, "sections")
            .query(&[("project_id", project_id)])
    }
}

#[async_trait]
impl TodoistApi for RestClient {
    async fn get_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        self.fetch(self.get_tasks_request(query)).await
    }

    async fn add_task(&self, args: &AddTaskArgs) -> Result<Task> {
        self.fetch(self.add_task_request(args)).await
    }

    async fn update_task(&self, id: &str, args: &UpdateTaskArgs) -> Result<Task> {
        self.fetch(self.update_task_request(id, args)).await
    }

    async fn close_task(&self, id: &str) -> Result<()> {
        self.send(self.close_task_request(id)).await
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("tasks/{id}")))
            .await
    }

    async fn get_projects(&self) -> Result<Vec<Project>> {
        self.fetch(self.request(Method::GET, "projects")).await
    }

    async fn add_project(&self, args: &AddProjectArgs) -> Result<Project> {
        self.fetch(self.request(Method::POST, "projects").json(args))
            .await
    }

    async fn update_project(&self, id: &str, args: &UpdateProjectArgs) -> Result<Project> {
        self.fetch(self.request(Method::POST, &format!("projects/{id}")).json(args))
            .await
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("projects/{id}")))
            .await
    }

    async fn get_sections(&self, project_id: &str) -> Result<Vec<Section>> {
        self.fetch(self.get_sections_request(project_id)).await
    }

    async fn add_section(&self, args: &AddSectionArgs) -> Result<Section> {
        self.fetch(self.request(Method::POST, "sections").json(args))
            .await
    }

    async fn update_section(&self, id: &str, args: &UpdateSectionArgs) -> Result<Section> {
        self.fetch(self.request(Method::POST, &format!("sections/{id}")).json(args))
            .await
    }

    async fn delete_section(&self, id: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("sections/{id}")))
            .await
    }
}
