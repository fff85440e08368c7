//! Demo content loaded at startup unless seeding is disabled.

use crate::community_store::{Comment, User, UserRole};
use crate::course_store::{BlockKind, CodeBlock, Course, Lesson};

pub use crate::course_store::SEED_TIMESTAMP;

fn lesson(
    id: &str,
    course_id: &str,
    title: &str,
    content: &str,
    language: &str,
    code: &str,
) -> Lesson {
    Lesson {
        id: id.to_string(),
        course_id: course_id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        code_blocks: vec![CodeBlock {
            id: format!("{}-1", id),
            kind: BlockKind::Code,
            language: language.to_string(),
            code: code.to_string(),
            order: 1,
        }],
        order: 1,
        completed: false,
        created_at: SEED_TIMESTAMP.to_string(),
        updated_at: SEED_TIMESTAMP.to_string(),
    }
}

pub fn courses() -> Vec<Course> {
    vec![
        Course {
            id: "1".to_string(),
            title: "Go Fundamentals".to_string(),
            description: "Master the fundamentals of Go programming language with hands-on examples and real-world projects.".to_string(),
            icon: "Code".to_string(),
            difficulty: "Beginner".to_string(),
            lessons: vec![lesson(
                "1-1",
                "1",
                "Introduction to Go",
                "Welcome to Go programming...",
                "go",
                "package main\n\nimport \"fmt\"\n\nfunc main() {\n    fmt.Println(\"Hello, World!\")\n}",
            )],
            created_at: SEED_TIMESTAMP.to_string(),
            updated_at: SEED_TIMESTAMP.to_string(),
        },
        Course {
            id: "2".to_string(),
            title: "Advanced Go Patterns".to_string(),
            description: "Deep dive into advanced Go concepts including interfaces, goroutines, channels, and design patterns.".to_string(),
            icon: "Zap".to_string(),
            difficulty: "Advanced".to_string(),
            lessons: vec![lesson(
                "2-1",
                "2",
                "Interfaces and Polymorphism",
                "Interfaces in Go are one of the most powerful features...",
                "go",
                "type Writer interface {\n    Write([]byte) (int, error)\n}",
            )],
            created_at: SEED_TIMESTAMP.to_string(),
            updated_at: SEED_TIMESTAMP.to_string(),
        },
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            role: UserRole::Admin,
            created_at: SEED_TIMESTAMP.to_string(),
            updated_at: SEED_TIMESTAMP.to_string(),
        },
        User {
            id: "2".to_string(),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            role: UserRole::User,
            created_at: SEED_TIMESTAMP.to_string(),
            updated_at: SEED_TIMESTAMP.to_string(),
        },
    ]
}

pub fn comments() -> Vec<Comment> {
    vec![Comment {
        id: "1".to_string(),
        lesson_id: "1-1".to_string(),
        user_id: "2".to_string(),
        content: "Great introduction to Go! Very clear explanations.".to_string(),
        author: "Jane Smith".to_string(),
        created_at: SEED_TIMESTAMP.to_string(),
        updated_at: SEED_TIMESTAMP.to_string(),
    }]
}
