pub mod messages;
pub mod server;

pub use server::{AppState, router, run_server};
