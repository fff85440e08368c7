//! Directory-backed course store.
//!
//! Each course is one pretty-printed JSON document named
//! `<slug>--<id>.json`. The ID is a UUID fixed at creation, so renaming a
//! course only changes the readable prefix of its file name. Files that do
//! not follow the naming scheme are still listed and resolved by decoding
//! them and comparing IDs.

use super::models::{now_timestamp, validate_import, Course, CoursePayload, Lesson, LessonPayload};
use super::trait_def::CourseStore;
use crate::store_error::{ResourceKind, StoreError, StoreResult};
use std::{
    collections::HashSet,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};
use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, info, warn};
use uuid::Uuid;

const FILE_EXTENSION: &str = "json";
const ID_SEPARATOR: &str = "--";

/// Lowercased, hyphen-separated form of a title usable as a file name.
pub fn slugify(title: &str) -> String {
    let slug: String = title
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if slug.is_empty() {
        "course".to_string()
    } else {
        slug
    }
}

pub fn course_file_name(course: &Course) -> String {
    format!(
        "{}{}{}.{}",
        slugify(&course.title),
        ID_SEPARATOR,
        course.id,
        FILE_EXTENSION
    )
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub struct FileCourseStore {
    dir: PathBuf,
    io_lock: Mutex<()>,
}

impl FileCourseStore {
    /// Opens the store, creating the directory if needed.
    pub fn open(dir: &Path) -> StoreResult<FileCourseStore> {
        fs::create_dir_all(dir)?;
        info!("Course files stored in {:?}", dir);
        Ok(FileCourseStore {
            dir: dir.to_path_buf(),
            io_lock: Mutex::new(()),
        })
    }

    /// Writes `courses` when the directory holds no course yet. Returns
    /// whether anything was written.
    pub fn seed_if_empty(&self, courses: Vec<Course>) -> StoreResult<bool> {
        let _guard = self.lock();
        if !self.course_files()?.is_empty() {
            return Ok(false);
        }
        for course in courses.iter() {
            self.write_course(course)?;
        }
        info!("Seeded {} courses into {:?}", courses.len(), self.dir);
        Ok(true)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.io_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn course_files(&self) -> StoreResult<Vec<PathBuf>> {
        let mut files = vec![];
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_json = path
                .extension()
                .is_some_and(|extension| extension == FILE_EXTENSION);
            if is_json && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_course(path: &Path) -> StoreResult<Course> {
        let content = fs::read_to_string(path)?;
        let course: Course = serde_json::from_str(&content)?;
        Ok(course)
    }

    /// Atomically writes a course under its current file name in `dir`.
    fn write_course_in(dir: &Path, course: &Course) -> StoreResult<PathBuf> {
        let target = dir.join(course_file_name(course));
        let json = serde_json::to_string_pretty(course)?;
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.persist(&target).map_err(|e| StoreError::Io(e.error))?;
        Ok(target)
    }

    fn write_course(&self, course: &Course) -> StoreResult<PathBuf> {
        Self::write_course_in(&self.dir, course)
    }

    /// Writes a course and drops the file it was previously stored in when
    /// the name changed. The new file lands before the old one goes away.
    fn save_replacing(&self, previous: &Path, course: &Course) -> StoreResult<()> {
        let target = self.write_course(course)?;
        if target != previous {
            debug!("Course {} moved from {:?} to {:?}", course.id, previous, target);
            fs::remove_file(previous)?;
        }
        Ok(())
    }

    fn load_all(&self) -> StoreResult<Vec<(PathBuf, Course)>> {
        let mut courses = vec![];
        for path in self.course_files()? {
            match Self::read_course(&path) {
                Ok(course) => courses.push((path, course)),
                Err(StoreError::Serialization(err)) => {
                    warn!("Skipping unreadable course file {:?}: {}", path, err);
                }
                Err(err) => return Err(err),
            }
        }
        courses.sort_by(|(a_path, a), (b_path, b)| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a_path.cmp(b_path))
        });
        Ok(courses)
    }

    fn resolve_course(&self, id: &str) -> StoreResult<(PathBuf, Course)> {
        let suffix = format!("{}{}.{}", ID_SEPARATOR, id, FILE_EXTENSION);
        let files = self.course_files()?;
        let (named, legacy): (Vec<PathBuf>, Vec<PathBuf>) =
            files.into_iter().partition(|path| {
                path.file_name()
                    .is_some_and(|name| name.to_string_lossy().ends_with(&suffix))
            });

        for path in named.into_iter().chain(legacy) {
            match Self::read_course(&path) {
                Ok(course) if course.id == id => return Ok((path, course)),
                Ok(_) => {}
                Err(StoreError::Serialization(err)) => {
                    warn!("Skipping unreadable course file {:?}: {}", path, err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(StoreError::NotFound(ResourceKind::Course))
    }

    fn resolve_lesson(&self, lesson_id: &str) -> StoreResult<(PathBuf, Course)> {
        self.load_all()?
            .into_iter()
            .find(|(_, course)| course.lesson(lesson_id).is_some())
            .ok_or(StoreError::NotFound(ResourceKind::Lesson))
    }
}

impl CourseStore for FileCourseStore {
    fn list_courses(&self) -> StoreResult<Vec<Course>> {
        let _guard = self.lock();
        Ok(self
            .load_all()?
            .into_iter()
            .map(|(_, course)| course)
            .collect())
    }

    fn get_course(&self, id: &str) -> StoreResult<Course> {
        let _guard = self.lock();
        self.resolve_course(id).map(|(_, course)| course)
    }

    fn create_course(&self, payload: CoursePayload) -> StoreResult<Course> {
        let _guard = self.lock();
        let course = Course::new(new_id(), payload, &now_timestamp(), |_| new_id());
        let path = self.write_course(&course)?;
        debug!("Created course {} at {:?}", course.id, path);
        Ok(course)
    }

    fn update_course(&self, id: &str, payload: CoursePayload) -> StoreResult<Course> {
        let _guard = self.lock();
        let (path, mut course) = self.resolve_course(id)?;
        course.apply_update(payload, &now_timestamp(), |_| new_id());
        self.save_replacing(&path, &course)?;
        Ok(course)
    }

    fn delete_course(&self, id: &str) -> StoreResult<()> {
        let _guard = self.lock();
        let (path, _) = self.resolve_course(id)?;
        fs::remove_file(&path)?;
        debug!("Deleted course {} ({:?})", id, path);
        Ok(())
    }

    fn list_lessons(&self, course_id: &str) -> StoreResult<Vec<Lesson>> {
        let _guard = self.lock();
        self.resolve_course(course_id)
            .map(|(_, course)| course.lessons)
    }

    fn get_lesson(&self, lesson_id: &str) -> StoreResult<Lesson> {
        let _guard = self.lock();
        let (_, course) = self.resolve_lesson(lesson_id)?;
        course
            .lesson(lesson_id)
            .cloned()
            .ok_or(StoreError::NotFound(ResourceKind::Lesson))
    }

    fn create_lesson(&self, course_id: &str, payload: LessonPayload) -> StoreResult<Lesson> {
        let _guard = self.lock();
        let (path, mut course) = self.resolve_course(course_id)?;
        let now = now_timestamp();
        let lesson = Lesson::new(new_id(), &course.id, payload, &now);
        course.lessons.push(lesson.clone());
        course.updated_at = now;
        self.save_replacing(&path, &course)?;
        Ok(lesson)
    }

    fn update_lesson(&self, lesson_id: &str, payload: LessonPayload) -> StoreResult<Lesson> {
        let _guard = self.lock();
        let (path, mut course) = self.resolve_lesson(lesson_id)?;
        let now = now_timestamp();
        let lesson = course
            .lesson_mut(lesson_id)
            .ok_or(StoreError::NotFound(ResourceKind::Lesson))?;
        lesson.apply_update(payload, &now);
        let updated = lesson.clone();
        course.updated_at = now;
        self.save_replacing(&path, &course)?;
        Ok(updated)
    }

    fn delete_lesson(&self, lesson_id: &str) -> StoreResult<()> {
        let _guard = self.lock();
        let (path, mut course) = self.resolve_lesson(lesson_id)?;
        course.remove_lesson(lesson_id);
        course.updated_at = now_timestamp();
        self.save_replacing(&path, &course)
    }

    fn update_course_lesson(
        &self,
        course_id: &str,
        lesson_id: &str,
        payload: LessonPayload,
    ) -> StoreResult<Lesson> {
        let _guard = self.lock();
        let (path, mut course) = self.resolve_course(course_id)?;
        let updated = course
            .update_lesson(lesson_id, payload, &now_timestamp())
            .ok_or(StoreError::NotFound(ResourceKind::Lesson))?;
        self.save_replacing(&path, &course)?;
        Ok(updated)
    }

    fn delete_course_lesson(&self, course_id: &str, lesson_id: &str) -> StoreResult<()> {
        let _guard = self.lock();
        let (path, mut course) = self.resolve_course(course_id)?;
        if !course.remove_lesson(lesson_id) {
            return Err(StoreError::NotFound(ResourceKind::Lesson));
        }
        course.updated_at = now_timestamp();
        self.save_replacing(&path, &course)
    }

    fn replace_all(&self, mut courses: Vec<Course>) -> StoreResult<usize> {
        for course in courses.iter_mut() {
            if course.id.trim().is_empty() {
                course.id = new_id();
            }
            course.fill_lesson_ids(|_| new_id());
            course.adopt_lessons();
        }
        validate_import(&courses)?;

        let _guard = self.lock();
        // Everything is written to a scratch directory first; the current
        // files are only touched once the whole set is on disk.
        let staging = TempDir::new_in(&self.dir)?;
        let mut names = Vec::with_capacity(courses.len());
        for course in courses.iter() {
            Self::write_course_in(staging.path(), course)?;
            names.push(course_file_name(course));
        }
        let stale: Vec<PathBuf> = {
            let keep: HashSet<&str> = names.iter().map(String::as_str).collect();
            self.course_files()?
                .into_iter()
                .filter(|path| {
                    !path
                        .file_name()
                        .is_some_and(|name| keep.contains(&*name.to_string_lossy()))
                })
                .collect()
        };
        for name in names.iter() {
            fs::rename(staging.path().join(name), self.dir.join(name))?;
        }
        for path in stale {
            debug!("Removing replaced course file {:?}", path);
            fs::remove_file(&path)?;
        }
        info!("Replaced store content with {} courses", courses.len());
        Ok(courses.len())
    }
}
