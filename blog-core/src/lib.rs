//! blog-core: shared infrastructure for the blog admin console and the blog reader.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
