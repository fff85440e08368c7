//! Admin views: aggregate stats, read-only listings, course export/import.
//!
//! Nothing here is access-controlled.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tracing::info;

use super::responses::{ok, ApiJson, ApiResult};
use super::state::{GuardedCourseStore, GuardedUserStore, ServerState};
use crate::course_store::Course;

/// Placeholder kept for the dashboard, not computed from any data.
pub const PLACEHOLDER_COMPLETION_RATE: f64 = 78.5;
/// Placeholder kept for the dashboard, not computed from any data.
pub const PLACEHOLDER_ACTIVE_USERS: u64 = 1234;

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_courses: usize,
    pub total_lessons: usize,
    pub total_users: usize,
    pub total_comments: usize,
    pub completion_rate: f64,
    pub active_users: u64,
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
}

async fn get_stats(State(state): State<ServerState>) -> ApiResult {
    let courses = state.course_store.list_courses()?;
    let stats = AdminStats {
        total_courses: courses.len(),
        total_lessons: courses.iter().map(|course| course.lessons.len()).sum(),
        total_users: state.user_store.list_users()?.len(),
        total_comments: state.comment_store.list_comments()?.len(),
        completion_rate: PLACEHOLDER_COMPLETION_RATE,
        active_users: PLACEHOLDER_ACTIVE_USERS,
    };
    Ok(ok(stats, "Admin stats retrieved successfully"))
}

async fn get_courses(State(store): State<GuardedCourseStore>) -> ApiResult {
    let courses = store.list_courses()?;
    Ok(ok(courses, "Admin courses retrieved successfully"))
}

async fn get_users(State(store): State<GuardedUserStore>) -> ApiResult {
    let users = store.list_users()?;
    Ok(ok(users, "Admin users retrieved successfully"))
}

async fn export_courses(State(store): State<GuardedCourseStore>) -> ApiResult {
    let courses = store.list_courses()?;
    Ok(ok(courses, "Courses exported successfully"))
}

async fn import_courses(
    State(store): State<GuardedCourseStore>,
    ApiJson(courses): ApiJson<Vec<Course>>,
) -> ApiResult {
    let imported = store.replace_all(courses)?;
    info!("Imported {} courses", imported);
    Ok(ok(ImportSummary { imported }, "Courses imported successfully"))
}

pub fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/courses", get(get_courses))
        .route("/users", get(get_users))
        .route("/export", get(export_courses))
        .route("/import", post(import_courses))
}
