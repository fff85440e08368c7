//! Course and lesson HTTP routes.
//!
//! Lessons are reachable both through their course
//! (`/courses/{id}/lessons/{lesson_id}`) and by their own ID
//! (`/lessons/{id}`).

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::debug;

use super::responses::{created, done, ok, ApiError, ApiJson, ApiResult};
use super::state::{GuardedCourseStore, ServerState};
use crate::course_store::{CoursePayload, LessonPayload};
use crate::store_error::ResourceKind;

// =============================================================================
// Courses
// =============================================================================

async fn list_courses(State(store): State<GuardedCourseStore>) -> ApiResult {
    let courses = store.list_courses()?;
    Ok(ok(courses, "Courses retrieved successfully"))
}

async fn get_course(State(store): State<GuardedCourseStore>, Path(id): Path<String>) -> ApiResult {
    let course = store.get_course(&id)?;
    Ok(ok(course, "Course retrieved successfully"))
}

async fn create_course(
    State(store): State<GuardedCourseStore>,
    ApiJson(payload): ApiJson<CoursePayload>,
) -> ApiResult {
    let course = store.create_course(payload)?;
    debug!("Course {} created", course.id);
    Ok(created(course, "Course created successfully"))
}

async fn update_course(
    State(store): State<GuardedCourseStore>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CoursePayload>,
) -> ApiResult {
    let course = store.update_course(&id, payload)?;
    Ok(ok(course, "Course updated successfully"))
}

async fn delete_course(
    State(store): State<GuardedCourseStore>,
    Path(id): Path<String>,
) -> ApiResult {
    store.delete_course(&id)?;
    debug!("Course {} deleted", id);
    Ok(done("Course deleted successfully"))
}

// =============================================================================
// Lessons under a course
// =============================================================================

async fn list_lessons(
    State(store): State<GuardedCourseStore>,
    Path(course_id): Path<String>,
) -> ApiResult {
    let lessons = store.list_lessons(&course_id)?;
    Ok(ok(lessons, "Lessons retrieved successfully"))
}

async fn create_lesson(
    State(store): State<GuardedCourseStore>,
    Path(course_id): Path<String>,
    ApiJson(payload): ApiJson<LessonPayload>,
) -> ApiResult {
    let lesson = store.create_lesson(&course_id, payload)?;
    debug!("Lesson {} added to course {}", lesson.id, course_id);
    Ok(created(lesson, "Lesson created successfully"))
}

async fn get_course_lesson(
    State(store): State<GuardedCourseStore>,
    Path((course_id, lesson_id)): Path<(String, String)>,
) -> ApiResult {
    let lesson = store
        .get_course(&course_id)?
        .lesson(&lesson_id)
        .cloned()
        .ok_or(ApiError::NotFound(ResourceKind::Lesson))?;
    Ok(ok(lesson, "Lesson retrieved successfully"))
}

async fn update_course_lesson(
    State(store): State<GuardedCourseStore>,
    Path((course_id, lesson_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<LessonPayload>,
) -> ApiResult {
    let lesson = store.update_course_lesson(&course_id, &lesson_id, payload)?;
    Ok(ok(lesson, "Lesson updated successfully"))
}

async fn delete_course_lesson(
    State(store): State<GuardedCourseStore>,
    Path((course_id, lesson_id)): Path<(String, String)>,
) -> ApiResult {
    store.delete_course_lesson(&course_id, &lesson_id)?;
    Ok(done("Lesson deleted successfully"))
}

// =============================================================================
// Lessons by ID
// =============================================================================

async fn get_lesson(State(store): State<GuardedCourseStore>, Path(id): Path<String>) -> ApiResult {
    let lesson = store.get_lesson(&id)?;
    Ok(ok(lesson, "Lesson retrieved successfully"))
}

async fn update_lesson(
    State(store): State<GuardedCourseStore>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<LessonPayload>,
) -> ApiResult {
    let lesson = store.update_lesson(&id, payload)?;
    Ok(ok(lesson, "Lesson updated successfully"))
}

async fn delete_lesson(
    State(store): State<GuardedCourseStore>,
    Path(id): Path<String>,
) -> ApiResult {
    store.delete_lesson(&id)?;
    Ok(done("Lesson deleted successfully"))
}

pub fn course_routes() -> Router<ServerState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route(
            "/courses/{id}/lessons",
            get(list_lessons).post(create_lesson),
        )
        .route(
            "/courses/{id}/lessons/{lesson_id}",
            get(get_course_lesson)
                .put(update_course_lesson)
                .delete(delete_course_lesson),
        )
        .route(
            "/lessons/{id}",
            get(get_lesson).put(update_lesson).delete(delete_lesson),
        )
}
