use super::models::{Comment, CommentPayload, User, UserPayload};
use super::trait_def::{CommentStore, UserStore};
use crate::course_store::now_timestamp;
use crate::id_sequence::IdSequence;
use crate::store_error::{ResourceKind, StoreError, StoreResult};
use std::sync::{Mutex, MutexGuard, PoisonError};

trait Identified: Clone {
    const KIND: ResourceKind;
    fn id(&self) -> &str;
}

impl Identified for Comment {
    const KIND: ResourceKind = ResourceKind::Comment;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for User {
    const KIND: ResourceKind = ResourceKind::User;
    fn id(&self) -> &str {
        &self.id
    }
}

struct Entries<T> {
    items: Vec<T>,
    ids: IdSequence,
}

impl<T: Identified> Entries<T> {
    fn position(&self, id: &str) -> StoreResult<usize> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(StoreError::NotFound(T::KIND))
    }

    fn get(&self, id: &str) -> StoreResult<T> {
        self.position(id).map(|index| self.items[index].clone())
    }

    fn insert(&mut self, build: impl FnOnce(String) -> T) -> T {
        let item = build(self.ids.next_id().to_string());
        self.items.push(item.clone());
        item
    }

    fn update(&mut self, id: &str, apply: impl FnOnce(&mut T)) -> StoreResult<T> {
        let index = self.position(id)?;
        let item = &mut self.items[index];
        apply(item);
        Ok(item.clone())
    }

    fn remove(&mut self, id: &str) -> StoreResult<()> {
        let index = self.position(id)?;
        self.items.remove(index);
        Ok(())
    }
}

/// Mutex-guarded list with its own ID sequence.
struct Collection<T> {
    entries: Mutex<Entries<T>>,
}

impl<T: Identified> Collection<T> {
    fn new(items: Vec<T>) -> Collection<T> {
        let ids = IdSequence::starting_after(items.iter().map(|item| item.id()));
        Collection {
            entries: Mutex::new(Entries { items, ids }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries<T>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct MemoryCommentStore {
    comments: Collection<Comment>,
}

impl MemoryCommentStore {
    pub fn new(comments: Vec<Comment>) -> MemoryCommentStore {
        MemoryCommentStore {
            comments: Collection::new(comments),
        }
    }
}

impl Default for MemoryCommentStore {
    fn default() -> Self {
        MemoryCommentStore::new(vec![])
    }
}

impl CommentStore for MemoryCommentStore {
    fn list_comments(&self) -> StoreResult<Vec<Comment>> {
        Ok(self.comments.lock().items.clone())
    }

    fn list_lesson_comments(&self, lesson_id: &str) -> StoreResult<Vec<Comment>> {
        Ok(self
            .comments
            .lock()
            .items
            .iter()
            .filter(|comment| comment.lesson_id == lesson_id)
            .cloned()
            .collect())
    }

    fn get_comment(&self, id: &str) -> StoreResult<Comment> {
        self.comments.lock().get(id)
    }

    fn create_comment(&self, lesson_id: &str, payload: CommentPayload) -> StoreResult<Comment> {
        let now = now_timestamp();
        Ok(self
            .comments
            .lock()
            .insert(|id| Comment::new(id, lesson_id, payload, &now)))
    }

    fn update_comment(&self, id: &str, payload: CommentPayload) -> StoreResult<Comment> {
        let now = now_timestamp();
        self.comments
            .lock()
            .update(id, |comment| comment.apply_update(payload, &now))
    }

    fn delete_comment(&self, id: &str) -> StoreResult<()> {
        self.comments.lock().remove(id)
    }
}

pub struct MemoryUserStore {
    users: Collection<User>,
}

impl MemoryUserStore {
    pub fn new(users: Vec<User>) -> MemoryUserStore {
        MemoryUserStore {
            users: Collection::new(users),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        MemoryUserStore::new(vec![])
    }
}

impl UserStore for MemoryUserStore {
    fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.lock().items.clone())
    }

    fn get_user(&self, id: &str) -> StoreResult<User> {
        self.users.lock().get(id)
    }

    fn create_user(&self, payload: UserPayload) -> StoreResult<User> {
        let now = now_timestamp();
        Ok(self.users.lock().insert(|id| User::new(id, payload, &now)))
    }

    fn update_user(&self, id: &str, payload: UserPayload) -> StoreResult<User> {
        let now = now_timestamp();
        self.users
            .lock()
            .update(id, |user| user.apply_update(payload, &now))
    }

    fn delete_user(&self, id: &str) -> StoreResult<()> {
        self.users.lock().remove(id)
    }
}
