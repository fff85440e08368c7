use axum::extract::FromRef;

use crate::community_store::{CommentStore, UserStore};
use crate::course_store::CourseStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCourseStore = Arc<dyn CourseStore>;
pub type GuardedCommentStore = Arc<dyn CommentStore>;
pub type GuardedUserStore = Arc<dyn UserStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub course_store: GuardedCourseStore,
    pub comment_store: GuardedCommentStore,
    pub user_store: GuardedUserStore,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        course_store: GuardedCourseStore,
        comment_store: GuardedCommentStore,
        user_store: GuardedUserStore,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            course_store,
            comment_store,
            user_store,
        }
    }
}

impl FromRef<ServerState> for GuardedCourseStore {
    fn from_ref(input: &ServerState) -> Self {
        input.course_store.clone()
    }
}

impl FromRef<ServerState> for GuardedCommentStore {
    fn from_ref(input: &ServerState) -> Self {
        input.comment_store.clone()
    }
}

impl FromRef<ServerState> for GuardedUserStore {
    fn from_ref(input: &ServerState) -> Self {
        input.user_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
