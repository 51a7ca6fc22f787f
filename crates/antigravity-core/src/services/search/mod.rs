pub mod service;


pub use service::{SearchService, DEFAULT_SEARCH_LIMIT};
