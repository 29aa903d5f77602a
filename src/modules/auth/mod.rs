pub mod middleware;
pub mod service;
