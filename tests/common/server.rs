//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own stores. When the course
//! store is file-backed, its directory lives in a temp dir owned by the server.

use super::constants::*;
use codemaster_server::server::{make_app, RequestsLoggingLevel, ServerConfig, ServerState};
use codemaster_server::{
    seed, CourseStore, FileCourseStore, MemoryCommentStore, MemoryCourseStore, MemoryUserStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance; shuts down when dropped.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Course directory when running on the file store.
    pub data_dir: Option<PathBuf>,

    _temp_dir: Option<TempDir>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Memory stores loaded with the demo content.
    pub async fn spawn() -> Self {
        let course_store = Arc::new(MemoryCourseStore::new(seed::courses()));
        Self::spawn_with(course_store, true, None).await
    }

    /// Memory stores with nothing in them.
    #[allow(dead_code)]
    pub async fn spawn_empty() -> Self {
        let course_store = Arc::new(MemoryCourseStore::default());
        Self::spawn_with(course_store, false, None).await
    }

    /// File-backed course store over an empty temp directory.
    #[allow(dead_code)]
    pub async fn spawn_with_file_store() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("courses");
        let course_store =
            Arc::new(FileCourseStore::open(&data_dir).expect("Failed to open file store"));
        let mut server = Self::spawn_with(course_store, false, Some(temp_dir)).await;
        server.data_dir = Some(data_dir);
        server
    }

    async fn spawn_with(
        course_store: Arc<dyn CourseStore>,
        seeded: bool,
        temp_dir: Option<TempDir>,
    ) -> Self {
        let (comments, users) = if seeded {
            (seed::comments(), seed::users())
        } else {
            (Vec::new(), Vec::new())
        };

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let state = ServerState::new(
            config,
            course_store,
            Arc::new(MemoryCommentStore::new(comments)),
            Arc::new(MemoryUserStore::new(users)),
        );
        let app = make_app(state);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            data_dir: None,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Polls /health until the server answers.
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/health", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
