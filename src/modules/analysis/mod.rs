pub mod action;
pub mod analyzer;
pub mod cache;
pub mod company;
pub mod parser;
pub mod prompts;
pub mod render;
mod routes;

pub use routes::analyze::types::{request::Payload as AnalysisRequest, response::AnalysisResponse};
pub use routes::get_router;
