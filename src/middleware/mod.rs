pub mod call_limit;

// Re-export middleware functions
pub use call_limit::call_limit_middleware;
