//! Summary generator: issue serialization and completion request.

use std::fmt::Write as _;

use crate::domain::errors::{AppError, AppResult};
use crate::domain::models::Issue;
use crate::domain::ports::{CompletionBackend, CompletionRequest};

/// System instruction framing the model's role.
pub const SYSTEM_PROMPT: &str =
    "You are an expert at analyzing project management data and creating executive summaries.";

/// Render a batch of issues as fixed-structure prompt blocks.
///
/// Blocks follow the input order and the output is byte-deterministic
/// for a given input. History lines are limited to transitions where
/// both ends are present.
pub fn format_issues(issues: &[Issue]) -> String {
    let mut out = String::new();
    for issue in issues {
        let status_changes = issue
            .history
            .iter()
            .filter_map(|h| match (&h.from_state, &h.to_state) {
                (Some(from), Some(to)) => {
                    Some(format!("- Changed from {from} to {to} on {}", h.updated_at))
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        let labels = issue.labels.join(", ");
        let assignee = issue
            .assignee
            .as_ref()
            .map_or("Unassigned", |a| a.name.as_str());
        let completed = issue.completed_at.as_deref().unwrap_or("Not completed");
        let description = issue.description.as_deref().unwrap_or("");

        // Infallible for String; the Result is required by write!.
        let _ = write!(
            out,
            "\nIssue: {} - {}\nAssignee: {}\nStatus: {}\nPriority: {}\nCompleted: {}\nLabels: {}\nDescription: {}\nStatus Changes:\n{}\n---\n",
            issue.identifier,
            issue.title,
            assignee,
            issue.state.name,
            issue.priority,
            completed,
            labels,
            description,
            status_changes,
        );
    }
    out
}

/// Embed formatted issue blocks into the fixed instructional template.
pub fn build_prompt(issues_text: &str) -> String {
    format!(
        "Please analyze these Linear issues and create a concise executive summary.\n\
Focus on:\n\
1. Key accomplishments and progress\n\
2. Notable status changes or blockers\n\
3. Emerging trends or patterns\n\
4. High-priority items requiring attention\n\
5. Team member contributions and workload distribution\n\
\n\
Issues:\n\
{issues_text}\n\
\n\
Please format the summary in clear, business-appropriate language suitable for executives."
    )
}

/// Turns issue batches into executive summaries via a completion backend.
pub struct SummaryService<C> {
    backend: C,
    max_tokens: u32,
}

impl<C: CompletionBackend> SummaryService<C> {
    /// Create a service with the given backend and output token cap.
    pub fn new(backend: C, max_tokens: u32) -> Self {
        Self { backend, max_tokens }
    }

    /// Generate a narrative summary for the given issues.
    ///
    /// The completion runs at temperature zero with a bounded output
    /// length, so identical input yields identical requests. An empty
    /// issue list is rejected before any remote call is made.
    pub async fn generate(&self, issues: &[Issue]) -> AppResult<String> {
        if issues.is_empty() {
            return Err(AppError::Validation(
                "No issues to summarize".to_string(),
            ));
        }

        let prompt = build_prompt(&format_issues(issues));
        tracing::debug!(issues = issues.len(), "requesting summary completion");

        self.backend
            .complete(CompletionRequest {
                system: SYSTEM_PROMPT.to_string(),
                prompt,
                max_tokens: self.max_tokens,
                temperature: 0.0,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::models::{StatusChange, StatusRef};

    use super::*;

    /// Completion backend that records requests and returns a canned reply.
    struct RecordingBackend {
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for RecordingBackend {
        async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
            self.requests.lock().unwrap().push(request);
            Ok("A fine summary.".to_string())
        }

        async fn verify_credentials(&self) -> AppResult<()> {
            Ok(())
        }
    }

    fn sample_issue() -> Issue {
        Issue {
            identifier: "ENG-12".to_string(),
            title: "Fix login bug".to_string(),
            description: Some("...".to_string()),
            priority: 1.0,
            state: StatusRef {
                name: "Done".to_string(),
                category: "completed".to_string(),
            },
            assignee: None,
            completed_at: Some("2024-05-01".to_string()),
            labels: vec!["bug".to_string()],
            history: vec![StatusChange {
                from_state: Some("In Progress".to_string()),
                to_state: Some("Done".to_string()),
                updated_at: "2024-05-01".to_string(),
            }],
        }
    }

    #[test]
    fn formats_the_fixed_block_structure() {
        let text = format_issues(&[sample_issue()]);
        assert!(text.contains("Issue: ENG-12 - Fix login bug"));
        assert!(text.contains("Assignee: Unassigned"));
        assert!(text.contains("Status: Done"));
        assert!(text.contains("Priority: 1\n"));
        assert!(text.contains("Completed: 2024-05-01"));
        assert!(text.contains("Labels: bug"));
        assert!(text.contains("- Changed from In Progress to Done on 2024-05-01"));
        assert!(text.contains("---"));
    }

    #[test]
    fn skips_history_entries_missing_either_end() {
        let mut issue = sample_issue();
        issue.history.push(StatusChange {
            from_state: None,
            to_state: Some("Done".to_string()),
            updated_at: "2024-05-02".to_string(),
        });
        let text = format_issues(&[issue]);
        assert!(!text.contains("2024-05-02"));
    }

    #[test]
    fn formatting_is_deterministic_and_order_preserving() {
        let mut second = sample_issue();
        second.identifier = "ENG-13".to_string();
        let issues = vec![sample_issue(), second];

        let first_pass = format_issues(&issues);
        let second_pass = format_issues(&issues);
        assert_eq!(first_pass, second_pass);

        let eng12 = first_pass.find("ENG-12").unwrap();
        let eng13 = first_pass.find("ENG-13").unwrap();
        assert!(eng12 < eng13);
    }

    #[tokio::test]
    async fn generate_embeds_the_block_verbatim() {
        let backend = RecordingBackend::new();
        let service = SummaryService::new(backend, 1000);
        let issues = vec![sample_issue()];

        let summary = service.generate(&issues).await.unwrap();
        assert_eq!(summary, "A fine summary.");

        let requests = service.backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(request.prompt.contains(&format_issues(&issues)));
        assert!(request.prompt.starts_with("Please analyze these Linear issues"));
        assert_eq!(request.system, SYSTEM_PROMPT);
        assert_eq!(request.max_tokens, 1000);
        assert_eq!(request.temperature, 0.0);
    }

    #[tokio::test]
    async fn empty_issue_list_never_reaches_the_backend() {
        let backend = RecordingBackend::new();
        let service = SummaryService::new(backend, 1000);

        let result = service.generate(&[]).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.backend.requests.lock().unwrap().is_empty());
    }
}
