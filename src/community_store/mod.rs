//! Comments and users.
//!
//! Both collections only ever live in memory, whichever course backend the
//! server runs with.

mod memory_store;
mod models;
mod trait_def;

pub use memory_store::{MemoryCommentStore, MemoryUserStore};
pub use models::*;
pub use trait_def::{CommentStore, UserStore};
