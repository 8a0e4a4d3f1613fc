//! Askama page templates.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// One entry in a select or multi-select control.
pub struct SelectOption {
    /// Submitted value.
    pub id: String,
    /// Text shown to the user.
    pub label: String,
    /// Whether the option is pre-selected.
    pub selected: bool,
}

/// The API key entry form.
#[derive(Template)]
#[template(path = "keys.html")]
pub struct KeysPage {
    /// Validation error to show; empty when there is none.
    pub error: String,
}

/// The filter selection form.
#[derive(Template)]
#[template(path = "filters.html")]
pub struct FiltersPage {
    /// Teams to choose from.
    pub teams: Vec<SelectOption>,
    /// Workflow states of the selected team.
    pub statuses: Vec<SelectOption>,
    /// Users selectable as assignees.
    pub users: Vec<SelectOption>,
    /// Suggested "completed after" date (YYYY-MM-DD).
    pub default_after: String,
    /// Suggested "completed before" date (YYYY-MM-DD).
    pub default_before: String,
}

/// The generated summary page.
#[derive(Template)]
#[template(path = "summary.html")]
pub struct SummaryPage {
    /// The generated markdown summary.
    pub summary: String,
    /// How many issues fed the summary.
    pub issue_count: usize,
    /// Pretty-printed raw issue JSON; empty when the preview is off.
    pub raw_json: String,
}

/// A plain message page, used for warnings and surfaced errors alike.
#[derive(Template)]
#[template(path = "message.html")]
pub struct MessagePage {
    /// Short heading.
    pub heading: String,
    /// The message body.
    pub message: String,
}

/// Render a template into a response, degrading to a 500 on failure.
pub fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template rendering failed").into_response()
        }
    }
}
