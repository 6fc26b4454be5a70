pub mod routes;
pub mod server;
pub mod types;

pub use server::{router, ApiServer, AppState};
