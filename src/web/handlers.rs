//! HTTP handlers for the form-based UI.
//!
//! Every handler catches its own errors: the full diagnostic detail
//! (including the attempted query, when there is one) is logged
//! server-side, while the user sees a concise message. A failed action
//! never touches stored session state, so filters and credentials
//! survive it.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use axum_extra::extract::Form;
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::adapters::{AnthropicClient, LinearClient};
use crate::domain::errors::AppError;
use crate::domain::ports::{CompletionBackend, IssueGateway};
use crate::services::{build_criteria, Credentials, FilterSelection, SummaryService};

use super::server::AppState;
use super::views::{render, FiltersPage, KeysPage, MessagePage, SelectOption, SummaryPage};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "issuebrief_session";

/// Query parameters for the filter form page.
#[derive(Debug, Deserialize)]
pub struct IndexParams {
    /// Team whose statuses should populate the status selector.
    #[serde(default)]
    pub team: Option<String>,
}

/// Fields of the API key form.
#[derive(Debug, Deserialize)]
pub struct KeysForm {
    /// Issue-tracker API key.
    #[serde(default)]
    pub linear_api_key: String,
    /// Completion API key.
    #[serde(default)]
    pub anthropic_api_key: String,
}

/// Fields of the filter form.
#[derive(Debug, Deserialize)]
pub struct SummaryForm {
    /// Chosen team id.
    pub team_id: String,
    /// "Completed after" date, `YYYY-MM-DD` or empty.
    #[serde(default)]
    pub completed_after: String,
    /// "Completed before" date, `YYYY-MM-DD` or empty.
    #[serde(default)]
    pub completed_before: String,
    /// Selected status ids.
    #[serde(default)]
    pub status_ids: Vec<String>,
    /// Selected assignee ids.
    #[serde(default)]
    pub assignee_ids: Vec<String>,
    /// Present when the raw-data preview is requested.
    #[serde(default)]
    pub show_raw: Option<String>,
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

/// The session id carried by the request, if any.
fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .build()
}

async fn lookup_credentials(state: &AppState, jar: &CookieJar) -> Option<Credentials> {
    let id = session_id(jar)?;
    state.sessions.credentials(id).await
}

/// Log an error with full detail and render the concise message page.
fn surface_error(action: &str, err: &AppError) -> Response {
    match err.query_text() {
        Some(query) => tracing::error!(error = %err, %query, "{action} failed"),
        None => tracing::error!(error = %err, "{action} failed"),
    }
    render(&MessagePage {
        heading: "Error".to_string(),
        message: format!("An error occurred: {err}"),
    })
}

/// GET `/` — the key form, or the filter form once keys are stored.
pub async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<IndexParams>,
) -> Response {
    let Some(credentials) = lookup_credentials(&state, &jar).await else {
        return render(&KeysPage {
            error: String::new(),
        });
    };

    let client = match LinearClient::new(credentials.linear_api_key, &state.config.linear) {
        Ok(client) => client,
        Err(e) => return surface_error("building the tracker client", &e),
    };

    let teams = match client.list_teams().await {
        Ok(teams) => teams,
        Err(e) => return surface_error("listing teams", &e),
    };
    let users = match client.list_users().await {
        Ok(users) => users,
        Err(e) => return surface_error("listing users", &e),
    };

    let selected_team_id = params
        .team
        .or_else(|| teams.first().map(|t| t.id.clone()))
        .unwrap_or_default();

    let statuses = teams
        .iter()
        .find(|t| t.id == selected_team_id)
        .map(|t| {
            t.states
                .iter()
                .map(|s| SelectOption {
                    id: s.id.clone(),
                    label: s.name.clone(),
                    selected: false,
                })
                .collect()
        })
        .unwrap_or_default();

    let today = Utc::now().date_naive();
    let page = FiltersPage {
        teams: teams
            .iter()
            .map(|t| SelectOption {
                id: t.id.clone(),
                label: t.display_label(),
                selected: t.id == selected_team_id,
            })
            .collect(),
        statuses,
        users: users
            .iter()
            .map(|u| SelectOption {
                id: u.id.clone(),
                label: u.name.clone(),
                selected: false,
            })
            .collect(),
        default_after: (today - Duration::days(30)).format("%Y-%m-%d").to_string(),
        default_before: today.format("%Y-%m-%d").to_string(),
    };
    render(&page)
}

/// POST `/keys` — validate both keys with probe calls and store them.
///
/// Any probe failure blocks progression: neither key is accepted and
/// the session stays keyless.
pub async fn submit_keys(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<KeysForm>,
) -> Response {
    if form.linear_api_key.is_empty() || form.anthropic_api_key.is_empty() {
        return render(&KeysPage {
            error: "Please provide both API keys.".to_string(),
        });
    }

    let keys_error = |e: &AppError| {
        tracing::warn!(error = %e, "API key validation failed");
        render(&KeysPage {
            error: format!("Error validating API keys: {e}"),
        })
    };

    let linear = match LinearClient::new(form.linear_api_key.clone(), &state.config.linear) {
        Ok(client) => client,
        Err(e) => return keys_error(&e),
    };
    let anthropic =
        match AnthropicClient::new(form.anthropic_api_key.clone(), &state.config.anthropic) {
            Ok(client) => client,
            Err(e) => return keys_error(&e),
        };

    if let Err(e) = linear.verify_credentials().await {
        return keys_error(&e);
    }
    if let Err(e) = anthropic.verify_credentials().await {
        return keys_error(&e);
    }

    let id = match session_id(&jar) {
        Some(id) => id,
        None => state.sessions.create().await,
    };
    state
        .sessions
        .store_credentials(
            id,
            Credentials {
                linear_api_key: form.linear_api_key,
                anthropic_api_key: form.anthropic_api_key,
            },
        )
        .await;

    (jar.add(session_cookie(id)), Redirect::to("/")).into_response()
}

/// POST `/reset` — explicit teardown of the session's keys.
pub async fn reset_keys(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(id) = session_id(&jar) {
        state.sessions.clear_keys(id).await;
        tracing::info!(session = %id, "API keys cleared");
    }
    Redirect::to("/").into_response()
}

fn parse_date(value: &str, field: &str) -> Result<Option<NaiveDate>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Invalid {field} date: {value}"))
}

/// POST `/summary` — query issues for the chosen filters and generate
/// the executive summary.
pub async fn generate_summary(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SummaryForm>,
) -> Response {
    let Some(credentials) = lookup_credentials(&state, &jar).await else {
        return Redirect::to("/").into_response();
    };

    let completed_after = match parse_date(&form.completed_after, "completed-after") {
        Ok(date) => date,
        Err(message) => {
            return render(&MessagePage {
                heading: "Invalid input".to_string(),
                message,
            })
        }
    };
    let completed_before = match parse_date(&form.completed_before, "completed-before") {
        Ok(date) => date,
        Err(message) => {
            return render(&MessagePage {
                heading: "Invalid input".to_string(),
                message,
            })
        }
    };

    let criteria = build_criteria(FilterSelection {
        team_id: form.team_id,
        completed_after,
        completed_before,
        status_ids: form.status_ids,
        assignee_ids: form.assignee_ids,
    });

    let linear = match LinearClient::new(credentials.linear_api_key, &state.config.linear) {
        Ok(client) => client,
        Err(e) => return surface_error("building the tracker client", &e),
    };
    let issues = match linear.query_issues(&criteria).await {
        Ok(issues) => issues,
        Err(e) => return surface_error("querying issues", &e),
    };

    if issues.is_empty() {
        return render(&MessagePage {
            heading: "No issues found".to_string(),
            message: "No issues found matching the selected criteria.".to_string(),
        });
    }

    let anthropic =
        match AnthropicClient::new(credentials.anthropic_api_key, &state.config.anthropic) {
            Ok(client) => client,
            Err(e) => return surface_error("building the completion client", &e),
        };
    let service = SummaryService::new(anthropic, state.config.anthropic.max_tokens);
    let summary = match service.generate(&issues).await {
        Ok(summary) => summary,
        Err(e) => return surface_error("generating the summary", &e),
    };

    if let Some(id) = session_id(&jar) {
        state.sessions.store_summary(id, summary.clone()).await;
    }
    tracing::info!(issues = issues.len(), "summary generated");

    let raw_json = if form.show_raw.is_some() {
        serde_json::to_string_pretty(&issues).unwrap_or_default()
    } else {
        String::new()
    };

    render(&SummaryPage {
        summary,
        issue_count: issues.len(),
        raw_json,
    })
}

/// GET `/download` — the last summary as a dated markdown attachment.
pub async fn download_summary(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let summary = match session_id(&jar) {
        Some(id) => state.sessions.summary(id).await,
        None => None,
    };
    let Some(summary) = summary else {
        return Redirect::to("/").into_response();
    };

    let filename = format!("issue_summary_{}.md", Utc::now().format("%Y%m%d"));
    (
        [
            (
                header::CONTENT_TYPE,
                "text/markdown; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        summary,
    )
        .into_response()
}
