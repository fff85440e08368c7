//! CourseStore trait definition.
//!
//! Abstracts course and lesson persistence so the server can run on top of
//! either the in-memory store or the one-file-per-course directory store.

use super::models::{Course, CoursePayload, Lesson, LessonPayload};
use crate::store_error::StoreResult;

/// Trait for course storage backends.
///
/// Lookups that miss return `StoreError::NotFound` with the kind of the
/// entity that could not be resolved.
pub trait CourseStore: Send + Sync {
    // =========================================================================
    // Courses
    // =========================================================================

    /// All courses, with their lessons.
    fn list_courses(&self) -> StoreResult<Vec<Course>>;

    fn get_course(&self, id: &str) -> StoreResult<Course>;

    /// Creates a course with a fresh ID and timestamps.
    fn create_course(&self, payload: CoursePayload) -> StoreResult<Course>;

    /// Replaces a course, keeping its ID and creation time.
    fn update_course(&self, id: &str, payload: CoursePayload) -> StoreResult<Course>;

    /// Deletes a course together with its lessons.
    fn delete_course(&self, id: &str) -> StoreResult<()>;

    // =========================================================================
    // Lessons
    // =========================================================================

    /// Lessons of a course, in stored order. Fails if the course is missing.
    fn list_lessons(&self, course_id: &str) -> StoreResult<Vec<Lesson>>;

    /// Finds a lesson by ID across all courses.
    fn get_lesson(&self, lesson_id: &str) -> StoreResult<Lesson>;

    /// Appends a lesson to a course and touches the course's update time.
    fn create_lesson(&self, course_id: &str, payload: LessonPayload) -> StoreResult<Lesson>;

    /// Replaces a lesson, keeping its ID, course and creation time.
    fn update_lesson(&self, lesson_id: &str, payload: LessonPayload) -> StoreResult<Lesson>;

    fn delete_lesson(&self, lesson_id: &str) -> StoreResult<()>;

    /// Like `update_lesson`, but only for a lesson of the given course. The
    /// ownership check and the write happen as one step.
    fn update_course_lesson(
        &self,
        course_id: &str,
        lesson_id: &str,
        payload: LessonPayload,
    ) -> StoreResult<Lesson>;

    /// Like `delete_lesson`, scoped to one course.
    fn delete_course_lesson(&self, course_id: &str, lesson_id: &str) -> StoreResult<()>;

    // =========================================================================
    // Bulk
    // =========================================================================

    /// Replaces the whole content of the store. Courses and lessons without an
    /// ID get a fresh one. Clashing or unsafe IDs fail with
    /// `StoreError::Invalid` and leave the store untouched. Returns the number
    /// of courses stored.
    fn replace_all(&self, courses: Vec<Course>) -> StoreResult<usize>;
}
