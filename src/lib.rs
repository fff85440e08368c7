//! CodeMaster API server library
//!
//! Exposes the stores and the HTTP router for the binary and the end-to-end tests.

pub mod community_store;
pub mod config;
pub mod course_store;
pub mod id_sequence;
pub mod seed;
pub mod server;
pub mod store_error;

// Re-export commonly used types for convenience
pub use community_store::{CommentStore, MemoryCommentStore, MemoryUserStore, UserStore};
pub use course_store::{CourseStore, FileCourseStore, MemoryCourseStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig, ServerState};
pub use store_error::{ResourceKind, StoreError, StoreResult};
