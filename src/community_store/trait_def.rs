use super::models::{Comment, CommentPayload, User, UserPayload};
use crate::store_error::StoreResult;

pub trait CommentStore: Send + Sync {
    fn list_comments(&self) -> StoreResult<Vec<Comment>>;

    /// Comments attached to a lesson, oldest first. Unknown lessons simply
    /// have no comments.
    fn list_lesson_comments(&self, lesson_id: &str) -> StoreResult<Vec<Comment>>;

    fn get_comment(&self, id: &str) -> StoreResult<Comment>;

    fn create_comment(&self, lesson_id: &str, payload: CommentPayload) -> StoreResult<Comment>;

    /// Replaces the comment text, keeping its lesson, user and creation time.
    fn update_comment(&self, id: &str, payload: CommentPayload) -> StoreResult<Comment>;

    fn delete_comment(&self, id: &str) -> StoreResult<()>;
}

pub trait UserStore: Send + Sync {
    fn list_users(&self) -> StoreResult<Vec<User>>;

    fn get_user(&self, id: &str) -> StoreResult<User>;

    fn create_user(&self, payload: UserPayload) -> StoreResult<User>;

    /// Replaces a user, keeping its ID and creation time.
    fn update_user(&self, id: &str, payload: UserPayload) -> StoreResult<User>;

    fn delete_user(&self, id: &str) -> StoreResult<()>;
}
