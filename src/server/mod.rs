mod admin_routes;
mod community_routes;
pub mod config;
mod course_routes;
mod http_layers;
pub mod responses;
pub mod server;
pub mod state;

pub(self) use admin_routes::admin_routes;
pub(self) use community_routes::community_routes;
pub use config::{ServerConfig, DEFAULT_ALLOWED_ORIGINS};
pub(self) use course_routes::course_routes;
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use state::ServerState;
