// src/rest/mod.rs

// Declare modules
pub mod response;
pub mod retry;
pub mod service;


// Re-export public API
pub use self::response::RestResponse;
pub use self::retry::RetryPolicy;
pub use self::service::RestService;
