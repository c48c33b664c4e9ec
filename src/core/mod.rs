//! Core application primitives (orchestrator, HTTP surface, scheduler)

pub mod http;
pub mod recommendation;
pub mod scheduler;

pub use http::*;
pub use recommendation::*;
pub use scheduler::*;
