use super::models::{now_timestamp, validate_import, Course, CoursePayload, Lesson, LessonPayload};
use super::trait_def::CourseStore;
use crate::id_sequence::IdSequence;
use crate::store_error::{ResourceKind, StoreError, StoreResult};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

struct Courses {
    courses: Vec<Course>,
    course_ids: IdSequence,
    lesson_ids: IdSequence,
}

impl Courses {
    fn new(courses: Vec<Course>) -> Courses {
        let course_ids = IdSequence::starting_after(courses.iter().map(|c| c.id.as_str()));
        let lesson_ids = IdSequence::starting_after(
            courses
                .iter()
                .flat_map(|c| c.lessons.iter())
                .map(|l| l.id.as_str()),
        );
        Courses {
            courses,
            course_ids,
            lesson_ids,
        }
    }

    fn course_mut(&mut self, id: &str) -> StoreResult<&mut Course> {
        self.courses
            .iter_mut()
            .find(|course| course.id == id)
            .ok_or(StoreError::NotFound(ResourceKind::Course))
    }

    fn course_with_lesson_mut(&mut self, lesson_id: &str) -> StoreResult<&mut Course> {
        self.courses
            .iter_mut()
            .find(|course| course.lesson(lesson_id).is_some())
            .ok_or(StoreError::NotFound(ResourceKind::Lesson))
    }
}

/// Course store living in process memory.
///
/// Every operation runs under a single mutex, so concurrent writers are
/// serialized instead of racing on the course list.
pub struct MemoryCourseStore {
    state: Mutex<Courses>,
}

impl MemoryCourseStore {
    pub fn new(courses: Vec<Course>) -> MemoryCourseStore {
        MemoryCourseStore {
            state: Mutex::new(Courses::new(courses)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Courses> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryCourseStore {
    fn default() -> Self {
        MemoryCourseStore::new(vec![])
    }
}

impl CourseStore for MemoryCourseStore {
    fn list_courses(&self) -> StoreResult<Vec<Course>> {
        Ok(self.lock().courses.clone())
    }

    fn get_course(&self, id: &str) -> StoreResult<Course> {
        self.lock()
            .courses
            .iter()
            .find(|course| course.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(ResourceKind::Course))
    }

    fn create_course(&self, payload: CoursePayload) -> StoreResult<Course> {
        let mut state = self.lock();
        let id = state.course_ids.next_id().to_string();
        let lesson_ids = &mut state.lesson_ids;
        let course = Course::new(id, payload, &now_timestamp(), |course_id| {
            format!("{}-{}", course_id, lesson_ids.next_id())
        });
        debug!("Created course {} ({})", course.id, course.title);
        state.courses.push(course.clone());
        Ok(course)
    }

    fn update_course(&self, id: &str, payload: CoursePayload) -> StoreResult<Course> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let lesson_ids = &mut state.lesson_ids;
        let course = state
            .courses
            .iter_mut()
            .find(|course| course.id == id)
            .ok_or(StoreError::NotFound(ResourceKind::Course))?;
        course.apply_update(payload, &now_timestamp(), |course_id| {
            format!("{}-{}", course_id, lesson_ids.next_id())
        });
        Ok(course.clone())
    }

    fn delete_course(&self, id: &str) -> StoreResult<()> {
        let mut state = self.lock();
        let before = state.courses.len();
        state.courses.retain(|course| course.id != id);
        if state.courses.len() == before {
            return Err(StoreError::NotFound(ResourceKind::Course));
        }
        Ok(())
    }

    fn list_lessons(&self, course_id: &str) -> StoreResult<Vec<Lesson>> {
        self.get_course(course_id).map(|course| course.lessons)
    }

    fn get_lesson(&self, lesson_id: &str) -> StoreResult<Lesson> {
        self.lock()
            .courses
            .iter()
            .find_map(|course| course.lesson(lesson_id))
            .cloned()
            .ok_or(StoreError::NotFound(ResourceKind::Lesson))
    }

    fn create_lesson(&self, course_id: &str, payload: LessonPayload) -> StoreResult<Lesson> {
        let mut state = self.lock();
        // Resolve the course before consuming an ID.
        state.course_mut(course_id)?;
        let lesson_id = format!("{}-{}", course_id, state.lesson_ids.next_id());
        let now = now_timestamp();
        let course = state.course_mut(course_id)?;
        let lesson = Lesson::new(lesson_id, course_id, payload, &now);
        course.lessons.push(lesson.clone());
        course.updated_at = now;
        Ok(lesson)
    }

    fn update_lesson(&self, lesson_id: &str, payload: LessonPayload) -> StoreResult<Lesson> {
        let mut state = self.lock();
        let now = now_timestamp();
        let course = state.course_with_lesson_mut(lesson_id)?;
        let lesson = course
            .lesson_mut(lesson_id)
            .ok_or(StoreError::NotFound(ResourceKind::Lesson))?;
        lesson.apply_update(payload, &now);
        let updated = lesson.clone();
        course.updated_at = now;
        Ok(updated)
    }

    fn delete_lesson(&self, lesson_id: &str) -> StoreResult<()> {
        let mut state = self.lock();
        let course = state.course_with_lesson_mut(lesson_id)?;
        course.remove_lesson(lesson_id);
        course.updated_at = now_timestamp();
        Ok(())
    }

    fn update_course_lesson(
        &self,
        course_id: &str,
        lesson_id: &str,
        payload: LessonPayload,
    ) -> StoreResult<Lesson> {
        let mut state = self.lock();
        state
            .course_mut(course_id)?
            .update_lesson(lesson_id, payload, &now_timestamp())
            .ok_or(StoreError::NotFound(ResourceKind::Lesson))
    }

    fn delete_course_lesson(&self, course_id: &str, lesson_id: &str) -> StoreResult<()> {
        let mut state = self.lock();
        let course = state.course_mut(course_id)?;
        if !course.remove_lesson(lesson_id) {
            return Err(StoreError::NotFound(ResourceKind::Lesson));
        }
        course.updated_at = now_timestamp();
        Ok(())
    }

    fn replace_all(&self, mut courses: Vec<Course>) -> StoreResult<usize> {
        let mut ids = IdSequence::starting_after(courses.iter().map(|c| c.id.as_str()));
        for course in courses.iter_mut() {
            if course.id.trim().is_empty() {
                course.id = ids.next_id().to_string();
            }
            course.adopt_lessons();
        }
        let count = courses.len();
        let mut state = Courses::new(courses);
        let lesson_ids = &mut state.lesson_ids;
        for course in state.courses.iter_mut() {
            course.fill_lesson_ids(|course_id| format!("{}-{}", course_id, lesson_ids.next_id()));
        }
        validate_import(&state.courses)?;
        *self.lock() = state;
        Ok(count)
    }
}
