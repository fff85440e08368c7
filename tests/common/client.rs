//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per API endpoint. When routes or request
//! formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.api(path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.api(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.api(path))
            .json(body)
            .send()
            .await
            .expect("PUT request failed")
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.api(path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    // ========================================================================
    // Health
    // ========================================================================

    pub async fn health(&self) -> Response {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .expect("Health request failed")
    }

    // ========================================================================
    // Courses
    // ========================================================================

    pub async fn list_courses(&self) -> Response {
        self.get("/courses").await
    }

    pub async fn get_course(&self, id: &str) -> Response {
        self.get(&format!("/courses/{}", id)).await
    }

    pub async fn create_course(&self, body: &Value) -> Response {
        self.post("/courses", body).await
    }

    pub async fn update_course(&self, id: &str, body: &Value) -> Response {
        self.put(&format!("/courses/{}", id), body).await
    }

    pub async fn delete_course(&self, id: &str) -> Response {
        self.delete(&format!("/courses/{}", id)).await
    }

    /// Sends a raw, possibly malformed, JSON body to the course endpoint.
    pub async fn create_course_raw(&self, body: &str) -> Response {
        self.client
            .post(self.api("/courses"))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("POST request failed")
    }

    // ========================================================================
    // Lessons
    // ========================================================================

    pub async fn list_lessons(&self, course_id: &str) -> Response {
        self.get(&format!("/courses/{}/lessons", course_id)).await
    }

    pub async fn create_lesson(&self, course_id: &str, body: &Value) -> Response {
        self.post(&format!("/courses/{}/lessons", course_id), body)
            .await
    }

    pub async fn get_course_lesson(&self, course_id: &str, lesson_id: &str) -> Response {
        self.get(&format!("/courses/{}/lessons/{}", course_id, lesson_id))
            .await
    }

    pub async fn update_course_lesson(
        &self,
        course_id: &str,
        lesson_id: &str,
        body: &Value,
    ) -> Response {
        self.put(&format!("/courses/{}/lessons/{}", course_id, lesson_id), body)
            .await
    }

    pub async fn delete_course_lesson(&self, course_id: &str, lesson_id: &str) -> Response {
        self.delete(&format!("/courses/{}/lessons/{}", course_id, lesson_id))
            .await
    }

    pub async fn get_lesson(&self, id: &str) -> Response {
        self.get(&format!("/lessons/{}", id)).await
    }

    pub async fn update_lesson(&self, id: &str, body: &Value) -> Response {
        self.put(&format!("/lessons/{}", id), body).await
    }

    pub async fn delete_lesson(&self, id: &str) -> Response {
        self.delete(&format!("/lessons/{}", id)).await
    }

    // ========================================================================
    // Comments
    // ========================================================================

    pub async fn list_comments(&self) -> Response {
        self.get("/comments").await
    }

    pub async fn list_lesson_comments(&self, lesson_id: &str) -> Response {
        self.get(&format!("/lessons/{}/comments", lesson_id)).await
    }

    pub async fn create_comment(&self, lesson_id: &str, body: &Value) -> Response {
        self.post(&format!("/lessons/{}/comments", lesson_id), body)
            .await
    }

    pub async fn get_comment(&self, id: &str) -> Response {
        self.get(&format!("/comments/{}", id)).await
    }

    pub async fn update_comment(&self, id: &str, body: &Value) -> Response {
        self.put(&format!("/comments/{}", id), body).await
    }

    pub async fn delete_comment(&self, id: &str) -> Response {
        self.delete(&format!("/comments/{}", id)).await
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn list_users(&self) -> Response {
        self.get("/users").await
    }

    pub async fn create_user(&self, body: &Value) -> Response {
        self.post("/users", body).await
    }

    pub async fn get_user(&self, id: &str) -> Response {
        self.get(&format!("/users/{}", id)).await
    }

    pub async fn update_user(&self, id: &str, body: &Value) -> Response {
        self.put(&format!("/users/{}", id), body).await
    }

    pub async fn delete_user(&self, id: &str) -> Response {
        self.delete(&format!("/users/{}", id)).await
    }

    // ========================================================================
    // Admin
    // ========================================================================

    pub async fn admin_stats(&self) -> Response {
        self.get("/admin/stats").await
    }

    pub async fn admin_courses(&self) -> Response {
        self.get("/admin/courses").await
    }

    pub async fn admin_users(&self) -> Response {
        self.get("/admin/users").await
    }

    pub async fn export_courses(&self) -> Response {
        self.get("/admin/export").await
    }

    pub async fn import_courses(&self, body: &Value) -> Response {
        self.post("/admin/import", body).await
    }
}
