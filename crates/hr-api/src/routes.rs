//! Route table.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{
    attendance, discipline, documents, employees, leaves, notifications, reports, tasks, whoami,
};

/// Build the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_router())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/whoami", get(whoami::whoami))
        .route("/employees", get(employees::list))
        .route("/tasks", post(tasks::create))
        .route("/tasks/me", get(tasks::mine))
        .route("/tasks/:id/done", patch(tasks::done))
        .route("/attendance/check-in", post(attendance::check_in))
        .route("/attendance/check-out", post(attendance::check_out))
        .route("/attendance/me", get(attendance::mine))
        .route("/leaves", post(leaves::submit))
        .route("/leaves/me", get(leaves::mine))
        .route("/leaves/department", get(leaves::department))
        .route("/leaves/:id/approve", post(leaves::approve))
        .route("/leaves/:id/reject", post(leaves::reject))
        .route("/absences/yesterday", get(discipline::absences_yesterday))
        .route("/warnings", post(discipline::issue_warning))
        .route("/discipline/flags", get(discipline::flags))
        .route("/notifications", get(notifications::list))
        .route("/notifications/:id/read", post(notifications::mark_read))
        .route("/documents", post(documents::upload))
        .route("/documents/me", get(documents::mine))
        .route("/documents/:id/send", post(documents::send))
        .route("/documents/:id/comment", post(documents::comment))
        .route("/documents/:id/validate", post(documents::validate))
        .route("/documents/:id/archive", post(documents::archive))
        .route("/documents/:id/history", get(documents::history))
        .route("/reports/summary", get(reports::summary))
}
