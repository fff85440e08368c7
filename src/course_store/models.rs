//! Course, lesson and code block models.
//!
//! Stored entities are decoded leniently: missing fields fall back to their
//! defaults and `null` list fields become empty lists, so a response never
//! carries `null` where a list is expected.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::store_error::{StoreError, StoreResult};

/// Timestamp carried by the seeded demo content.
pub const SEED_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

/// Current UTC time in RFC 3339 form, second precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Stored entities
// =============================================================================

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Code,
    Text,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub language: String,
    #[serde(alias = "content")]
    pub code: String,
    pub order: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lesson {
    pub id: String,
    #[serde(alias = "courseId")]
    pub course_id: String,
    pub title: String,
    pub content: String,
    #[serde(alias = "codeBlocks", deserialize_with = "null_as_empty")]
    pub code_blocks: Vec<CodeBlock>,
    pub order: i64,
    pub completed: bool,
    #[serde(alias = "createdAt")]
    pub created_at: String,
    #[serde(alias = "updatedAt")]
    pub updated_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub difficulty: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub lessons: Vec<Lesson>,
    #[serde(alias = "createdAt")]
    pub created_at: String,
    #[serde(alias = "updatedAt")]
    pub updated_at: String,
}

// =============================================================================
// Request payloads
// =============================================================================

/// Body of course create and replace requests.
///
/// Server-owned fields (`id`, timestamps) are ignored when present.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub difficulty: String,
    /// `None` keeps the lessons already attached to the course.
    pub lessons: Option<Vec<LessonPayload>>,
}

/// Body of lesson create and replace requests, also used for the lessons
/// nested in a course payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LessonPayload {
    /// Only read inside a course replace, where it names the existing lesson
    /// to keep. Ignored everywhere else.
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(alias = "codeBlocks", deserialize_with = "null_as_empty")]
    pub code_blocks: Vec<CodeBlock>,
    pub order: i64,
    pub completed: bool,
}

// =============================================================================
// Import checks
// =============================================================================

/// IDs end up in file names, so they must not reach outside the store
/// directory.
fn is_safe_id(id: &str) -> bool {
    !id.trim().is_empty()
        && !id.contains(['/', '\\'])
        && !id.contains("..")
        && !id.chars().any(char::is_control)
}

/// Rejects a course set that would break ID uniqueness. Runs after missing
/// IDs have been filled in.
pub fn validate_import(courses: &[Course]) -> StoreResult<()> {
    let mut course_ids = HashSet::new();
    let mut lesson_ids = HashSet::new();
    for course in courses {
        if !is_safe_id(&course.id) {
            return Err(StoreError::Invalid(format!(
                "Invalid course id {:?}",
                course.id
            )));
        }
        if !course_ids.insert(course.id.as_str()) {
            return Err(StoreError::Invalid(format!(
                "Duplicate course id {:?}",
                course.id
            )));
        }
        for lesson in course.lessons.iter() {
            if !lesson_ids.insert(lesson.id.as_str()) {
                return Err(StoreError::Invalid(format!(
                    "Duplicate lesson id {:?}",
                    lesson.id
                )));
            }
        }
    }
    Ok(())
}

// =============================================================================
// Field copy and ownership rules
// =============================================================================

fn assign_block_ids(lesson_id: &str, blocks: &mut [CodeBlock]) {
    for (index, block) in blocks.iter_mut().enumerate() {
        if block.id.trim().is_empty() {
            block.id = format!("{}-{}", lesson_id, index + 1);
        }
    }
}

impl Lesson {
    pub fn new(id: String, course_id: &str, payload: LessonPayload, now: &str) -> Lesson {
        let mut lesson = Lesson {
            id,
            course_id: course_id.to_string(),
            title: payload.title,
            content: payload.content,
            code_blocks: payload.code_blocks,
            order: payload.order,
            completed: payload.completed,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        };
        assign_block_ids(&lesson.id, &mut lesson.code_blocks);
        lesson
    }

    /// Overwrites every client-editable field, keeping identity, owner and
    /// creation time.
    pub fn apply_update(&mut self, payload: LessonPayload, now: &str) {
        self.title = payload.title;
        self.content = payload.content;
        self.code_blocks = payload.code_blocks;
        self.order = payload.order;
        self.completed = payload.completed;
        self.updated_at = now.to_string();
        assign_block_ids(&self.id, &mut self.code_blocks);
    }
}

impl Course {
    /// Builds a new course; `lesson_id` mints the ID of every lesson the
    /// payload carries.
    pub fn new(
        id: String,
        payload: CoursePayload,
        now: &str,
        mut lesson_id: impl FnMut(&str) -> String,
    ) -> Course {
        let lessons = payload
            .lessons
            .unwrap_or_default()
            .into_iter()
            .map(|lesson| Lesson::new(lesson_id(&id), &id, lesson, now))
            .collect();
        Course {
            title: payload.title,
            description: payload.description,
            icon: payload.icon,
            difficulty: payload.difficulty,
            lessons,
            created_at: now.to_string(),
            updated_at: now.to_string(),
            id,
        }
    }

    pub fn apply_update(
        &mut self,
        payload: CoursePayload,
        now: &str,
        mut lesson_id: impl FnMut(&str) -> String,
    ) {
        self.title = payload.title;
        self.description = payload.description;
        self.icon = payload.icon;
        self.difficulty = payload.difficulty;
        if let Some(lessons) = payload.lessons {
            // Lessons naming a current lesson keep its ID and creation time;
            // anything else becomes a new lesson.
            let mut previous = std::mem::take(&mut self.lessons);
            self.lessons = lessons
                .into_iter()
                .map(|lesson| {
                    let existing = previous
                        .iter()
                        .position(|current| !lesson.id.is_empty() && current.id == lesson.id);
                    match existing {
                        Some(index) => {
                            let mut kept = previous.swap_remove(index);
                            kept.apply_update(lesson, now);
                            kept
                        }
                        None => Lesson::new(lesson_id(&self.id), &self.id, lesson, now),
                    }
                })
                .collect();
        }
        self.updated_at = now.to_string();
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id == lesson_id)
    }

    pub fn lesson_mut(&mut self, lesson_id: &str) -> Option<&mut Lesson> {
        self.lessons.iter_mut().find(|lesson| lesson.id == lesson_id)
    }

    /// Replaces one of this course's lessons and touches the course. `None`
    /// when the lesson belongs elsewhere.
    pub fn update_lesson(
        &mut self,
        lesson_id: &str,
        payload: LessonPayload,
        now: &str,
    ) -> Option<Lesson> {
        let lesson = self.lesson_mut(lesson_id)?;
        lesson.apply_update(payload, now);
        let updated = lesson.clone();
        self.updated_at = now.to_string();
        Some(updated)
    }

    /// Removes a lesson, returning whether it was present.
    pub fn remove_lesson(&mut self, lesson_id: &str) -> bool {
        let before = self.lessons.len();
        self.lessons.retain(|lesson| lesson.id != lesson_id);
        self.lessons.len() != before
    }

    /// Gives an ID to every lesson that arrived without one.
    pub fn fill_lesson_ids(&mut self, mut lesson_id: impl FnMut(&str) -> String) {
        for lesson in self.lessons.iter_mut() {
            if lesson.id.trim().is_empty() {
                lesson.id = lesson_id(&self.id);
            }
        }
    }

    /// Makes every lesson point back at this course.
    pub fn adopt_lessons(&mut self) {
        for lesson in self.lessons.iter_mut() {
            lesson.course_id = self.id.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_null_lists_as_empty() {
        let course: Course = serde_json::from_str(
            r#"{"id":"1","title":"Go","lessons":null,"created_at":"x","updated_at":"x"}"#,
        )
        .unwrap();
        assert!(course.lessons.is_empty());

        let lesson: Lesson = serde_json::from_str(r#"{"id":"1-1","code_blocks":null}"#).unwrap();
        assert!(lesson.code_blocks.is_empty());
    }

    #[test]
    fn serializes_empty_lessons_as_list() {
        let course = Course::new(
            "7".to_string(),
            CoursePayload::default(),
            SEED_TIMESTAMP,
            |_| unreachable!(),
        );
        let value = serde_json::to_value(&course).unwrap();
        assert_eq!(value["lessons"], serde_json::json!([]));
        assert_eq!(value["created_at"], SEED_TIMESTAMP);
    }

    #[test]
    fn accepts_camel_case_payload_fields() {
        let payload: LessonPayload = serde_json::from_str(
            r#"{"title":"Intro","codeBlocks":[{"type":"text","content":"hello"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.code_blocks.len(), 1);
        assert_eq!(payload.code_blocks[0].kind, BlockKind::Text);
        assert_eq!(payload.code_blocks[0].code, "hello");
    }

    #[test]
    fn assigns_missing_code_block_ids_by_position() {
        let payload = LessonPayload {
            code_blocks: vec![
                CodeBlock::default(),
                CodeBlock {
                    id: "keep".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let lesson = Lesson::new("3-4".to_string(), "3", payload, SEED_TIMESTAMP);
        assert_eq!(lesson.code_blocks[0].id, "3-4-1");
        assert_eq!(lesson.code_blocks[1].id, "keep");
    }

    #[test]
    fn lesson_update_keeps_identity_and_creation_time() {
        let mut lesson = Lesson::new(
            "1-1".to_string(),
            "1",
            LessonPayload::default(),
            SEED_TIMESTAMP,
        );
        let payload = LessonPayload {
            title: "Renamed".to_string(),
            order: 4,
            ..Default::default()
        };
        lesson.apply_update(payload, "2025-02-02T00:00:00Z");

        assert_eq!(lesson.id, "1-1");
        assert_eq!(lesson.course_id, "1");
        assert_eq!(lesson.created_at, SEED_TIMESTAMP);
        assert_eq!(lesson.updated_at, "2025-02-02T00:00:00Z");
        assert_eq!(lesson.title, "Renamed");
        assert_eq!(lesson.order, 4);
    }

    #[test]
    fn course_update_keeps_named_lessons() {
        let mut course = Course::new(
            "1".to_string(),
            CoursePayload {
                lessons: Some(vec![LessonPayload::default(), LessonPayload::default()]),
                ..Default::default()
            },
            SEED_TIMESTAMP,
            {
                let mut next = 0;
                move |course_id| {
                    next += 1;
                    format!("{}-{}", course_id, next)
                }
            },
        );
        course.apply_update(
            CoursePayload {
                title: "Same course".to_string(),
                lessons: Some(vec![
                    LessonPayload {
                        id: "1-2".to_string(),
                        title: "Second, now first".to_string(),
                        ..Default::default()
                    },
                    LessonPayload {
                        id: "1-99".to_string(),
                        title: "Unknown id".to_string(),
                        ..Default::default()
                    },
                    LessonPayload {
                        title: "Brand new".to_string(),
                        ..Default::default()
                    },
                ]),
                ..Default::default()
            },
            "2025-01-01T00:00:00Z",
            |course_id| format!("{}-fresh", course_id),
        );

        let ids: Vec<&str> = course.lessons.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1-2", "1-fresh", "1-fresh"]);
        assert_eq!(course.lessons[0].created_at, SEED_TIMESTAMP);
        assert_eq!(course.lessons[0].updated_at, "2025-01-01T00:00:00Z");
        assert_eq!(course.lessons[0].title, "Second, now first");
        assert_eq!(course.lessons[2].created_at, "2025-01-01T00:00:00Z");
    }

    #[test]
    fn course_update_round_trip_keeps_lesson_identity() {
        let mut course = Course::new(
            "1".to_string(),
            CoursePayload {
                lessons: Some(vec![LessonPayload::default()]),
                ..Default::default()
            },
            SEED_TIMESTAMP,
            |course_id| format!("{}-1", course_id),
        );
        // A client sends back what it fetched.
        let payload: CoursePayload =
            serde_json::from_value(serde_json::to_value(&course).unwrap()).unwrap();
        course.apply_update(payload, "2025-01-01T00:00:00Z", |_| unreachable!());

        assert_eq!(course.lessons.len(), 1);
        assert_eq!(course.lessons[0].id, "1-1");
        assert_eq!(course.lessons[0].created_at, SEED_TIMESTAMP);
    }

    #[test]
    fn update_lesson_only_touches_own_lessons() {
        let mut course = Course::new(
            "1".to_string(),
            CoursePayload {
                lessons: Some(vec![LessonPayload::default()]),
                ..Default::default()
            },
            SEED_TIMESTAMP,
            |course_id| format!("{}-1", course_id),
        );

        assert!(course
            .update_lesson("2-1", LessonPayload::default(), "2025-01-01T00:00:00Z")
            .is_none());
        assert_eq!(course.updated_at, SEED_TIMESTAMP);

        let updated = course
            .update_lesson("1-1", LessonPayload::default(), "2025-01-01T00:00:00Z")
            .unwrap();
        assert_eq!(updated.created_at, SEED_TIMESTAMP);
        assert_eq!(course.updated_at, "2025-01-01T00:00:00Z");
    }

    fn imported(id: &str, lesson_ids: &[&str]) -> Course {
        Course {
            id: id.to_string(),
            lessons: lesson_ids
                .iter()
                .map(|lesson_id| Lesson {
                    id: lesson_id.to_string(),
                    course_id: id.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn import_check_rejects_clashing_and_unsafe_ids() {
        assert!(validate_import(&[imported("a", &["a-1"]), imported("b", &["b-1"])]).is_ok());

        for courses in [
            vec![imported("x", &[]), imported("x", &[])],
            vec![imported("a", &["same"]), imported("b", &["same"])],
            vec![imported("a/b", &[])],
            vec![imported("..", &[])],
            vec![imported("a\\b", &[])],
        ] {
            assert!(matches!(
                validate_import(&courses),
                Err(StoreError::Invalid(_))
            ));
        }
    }

    #[test]
    fn course_update_without_lessons_keeps_existing_ones() {
        let mut course = Course::new(
            "1".to_string(),
            CoursePayload {
                lessons: Some(vec![LessonPayload::default()]),
                ..Default::default()
            },
            SEED_TIMESTAMP,
            |course_id| format!("{}-1", course_id),
        );
        course.apply_update(
            CoursePayload {
                title: "New title".to_string(),
                ..Default::default()
            },
            "2025-01-01T00:00:00Z",
            |_| unreachable!(),
        );
        assert_eq!(course.lessons.len(), 1);
        assert_eq!(course.lessons[0].id, "1-1");
        assert_eq!(course.title, "New title");
    }
}
