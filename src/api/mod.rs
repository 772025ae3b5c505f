mod client;
mod models;

pub use client::{ApiError, QueryClient};
pub use models::{QueryRequest, QueryResponse};
