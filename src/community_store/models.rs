use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Informational only, no route checks it.
    pub role: UserRole,
    pub created_at: String,
    pub updated_at: String,
}

/// A comment left on a lesson.
///
/// Lesson and user are referenced by ID only; neither is checked to exist.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: String,
    pub lesson_id: String,
    pub user_id: String,
    pub content: String,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentPayload {
    #[serde(alias = "userId")]
    pub user_id: String,
    pub content: String,
    pub author: String,
}

impl User {
    pub fn new(id: String, payload: UserPayload, now: &str) -> User {
        User {
            id,
            name: payload.name,
            email: payload.email,
            role: payload.role,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    pub fn apply_update(&mut self, payload: UserPayload, now: &str) {
        self.name = payload.name;
        self.email = payload.email;
        self.role = payload.role;
        self.updated_at = now.to_string();
    }
}

impl Comment {
    pub fn new(id: String, lesson_id: &str, payload: CommentPayload, now: &str) -> Comment {
        Comment {
            id,
            lesson_id: lesson_id.to_string(),
            user_id: payload.user_id,
            content: payload.content,
            author: payload.author,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Only the text and the author label are editable; the comment stays
    /// attached to its lesson and user.
    pub fn apply_update(&mut self, payload: CommentPayload, now: &str) {
        self.content = payload.content;
        self.author = payload.author;
        self.updated_at = now.to_string();
    }
}
