/// Error handling middleware for consistent error responses
pub mod error_handling;
