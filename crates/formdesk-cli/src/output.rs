//! Terminal painting of review cards and request tables

use formdesk_render::{paint_text, RenderConfig};
use formdesk_review::{ProcessRequest, ReviewAction, ReviewView};
use std::fmt::Write as _;

/// Paint a decorated review card
pub(crate) fn paint_view(view: &ReviewView, request: &ProcessRequest, config: &RenderConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.title);
    let _ = writeln!(
        out,
        "{} | {} | submitted by {}",
        request.id, request.status, request.submitted_by
    );
    out.push('\n');
    out.push_str(&paint_text(&view.body, config));

    if let Some(footer) = &view.footer {
        let _ = writeln!(out, "\n-- {} --\n{}", footer.label, footer.text);
    }

    if !view.actions.is_empty() {
        let buttons: Vec<_> = view
            .actions
            .iter()
            .map(|action| match action {
                ReviewAction::Approve => "[Approve]",
                ReviewAction::Reject => "[Reject]",
            })
            .collect();
        let _ = writeln!(out, "\n{}", buttons.join(" "));
    }

    out
}

/// Paint one row per request: id, requester, submitted, decided
pub(crate) fn paint_table(requests: &[ProcessRequest]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<12} {:<14} {:<14} STATUS",
        "REQUEST #", "REQUESTER", "SUBMITTED", "DECISION DATE"
    );

    for request in requests {
        let decided = request
            .decided_at
            .map_or_else(|| "--".to_string(), |at| at.format("%b %-d, %Y").to_string());
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:<14} {:<14} {}",
            request.id,
            request.submitted_by,
            request.created_at.format("%b %-d, %Y").to_string(),
            decided,
            request.status.as_str().to_uppercase()
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdesk_render::Renderer;
    use formdesk_review::ReviewSession;
    use formdesk_test_utils::{sample_request, sample_requests};
    use pretty_assertions::assert_eq;

    #[test]
    fn pending_card_has_buttons() {
        let request: ProcessRequest = serde_json::from_value(sample_request("pending")).unwrap();
        let session = ReviewSession::open(request.clone(), Renderer::default());
        let text = paint_view(&session.view(), &request, &RenderConfig::default());

        assert!(text.starts_with("== Form Submission Review ==\nREQ-1001 | pending | submitted by user123\n"));
        assert!(text.contains("[+] contactInfo (2) <contactInfo>\n"));
        assert!(text.ends_with("\n[Approve] [Reject]\n"));
    }

    #[test]
    fn rejected_card_has_footer() {
        let request: ProcessRequest = serde_json::from_value(sample_request("rejected")).unwrap();
        let session = ReviewSession::open(request.clone(), Renderer::default());
        let text = paint_view(&session.view(), &request, &RenderConfig::default());
        assert!(text.ends_with(
            "\n-- Rejection Comment --\nBudget constraints - please find a lower-cost alternative\n"
        ));
    }

    #[test]
    fn table_rows() {
        let requests: Vec<ProcessRequest> =
            serde_json::from_value(sample_requests("approved")).unwrap();
        let table = paint_table(&requests);
        let rows: Vec<_> = table.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            "REQ-0901   user789      May 10, 2023   May 11, 2023   APPROVED"
        );
    }
}
