//! Shared constants for end-to-end tests
//!
//! These mirror the demo content the server seeds at startup.

#![allow(dead_code)]

/// "Go Fundamentals"
pub const SEED_COURSE_ID: &str = "1";
pub const SEED_COURSE_TITLE: &str = "Go Fundamentals";

/// "Advanced Go Patterns"
pub const SEED_COURSE_2_ID: &str = "2";

/// First lesson of the first seeded course.
pub const SEED_LESSON_ID: &str = "1-1";

/// John Doe, the admin.
pub const SEED_ADMIN_ID: &str = "1";

/// Jane Smith, author of the only seeded comment.
pub const SEED_USER_ID: &str = "2";

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
