pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod gql;
pub mod session;
pub mod state;

pub use state::AppState;
