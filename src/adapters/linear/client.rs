//! Linear GraphQL client.
//!
//! Executes the read-only queries in [`super::queries`] over HTTPS with
//! bearer-style authentication. Every call is a single round trip: no
//! retry and no backoff, so a remote failure aborts the current
//! operation and is surfaced to the caller.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::errors::{AppError, AppResult};
use crate::domain::models::{FilterCriteria, Issue, LinearConfig, Team, User};
use crate::domain::ports::IssueGateway;

use super::models::{IssuesData, TeamsData, UsersData, ViewerData};
use super::queries;

/// GraphQL response envelope: either `data`, or `errors`, or both.
#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

/// One error entry from the GraphQL `errors` array.
#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// HTTP client for the Linear GraphQL API.
#[derive(Debug, Clone)]
pub struct LinearClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl LinearClient {
    /// Create a client for the given endpoint and per-session API key.
    pub fn new(api_key: impl Into<String>, config: &LinearConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.api_url.clone(),
            api_key: api_key.into(),
        })
    }

    /// The query document plus serialized variables, for diagnostics.
    fn describe(query: &str, variables: &Value) -> String {
        format!("{query}\nvariables: {variables}")
    }

    /// Execute one GraphQL request and decode its `data` payload.
    async fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> AppResult<T> {
        let body = json!({ "query": query, "variables": variables });

        let response = self
            .http
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, &self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Linear request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Transport(format!(
                "Linear rejected the API key ({status})"
            )));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Protocol {
                message: format!("Linear returned {status}: {text}"),
                query: Self::describe(query, &variables),
            });
        }

        let envelope: GraphQlEnvelope = response.json().await.map_err(|e| AppError::Protocol {
            message: format!("Failed to parse Linear response: {e}"),
            query: Self::describe(query, &variables),
        })?;

        if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
            let messages = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::Protocol {
                message: format!("Linear query failed: {messages}"),
                query: Self::describe(query, &variables),
            });
        }

        let data = envelope.data.ok_or_else(|| AppError::Protocol {
            message: "Linear response had neither data nor errors".to_string(),
            query: Self::describe(query, &variables),
        })?;

        serde_json::from_value(data).map_err(|e| AppError::Protocol {
            message: format!("Unexpected Linear response shape: {e}"),
            query: Self::describe(query, &variables),
        })
    }
}

#[async_trait]
impl IssueGateway for LinearClient {
    async fn list_teams(&self) -> AppResult<Vec<Team>> {
        let data: TeamsData = self.execute(queries::TEAMS_QUERY, json!({})).await?;
        Ok(data.teams.nodes.into_iter().map(Into::into).collect())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let data: UsersData = self.execute(queries::USERS_QUERY, json!({})).await?;
        Ok(data.users.nodes.into_iter().map(Into::into).collect())
    }

    async fn query_issues(&self, criteria: &FilterCriteria) -> AppResult<Vec<Issue>> {
        let variables = queries::issue_variables(criteria);
        let data: IssuesData = self.execute(queries::ISSUES_QUERY, variables).await?;
        Ok(data.issues.nodes.into_iter().map(Into::into).collect())
    }

    async fn verify_credentials(&self) -> AppResult<()> {
        let data: ViewerData = self.execute(queries::VIEWER_QUERY, json!({})).await?;
        tracing::debug!(viewer_id = %data.viewer.id, "Linear credentials verified");
        Ok(())
    }
}
