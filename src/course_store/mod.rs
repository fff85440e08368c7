mod file_store;
mod memory_store;
mod models;
mod trait_def;

pub use file_store::{course_file_name, slugify, FileCourseStore};
pub use memory_store::MemoryCourseStore;
pub use models::*;
pub use trait_def::CourseStore;
