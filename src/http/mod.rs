//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, RPC route)
//!     → request.rs (x-request-id assigned or propagated)
//!     → intake.rs (HTTP verb → body decode → version check)
//!         ├─ rejected → response.rs with 405/400 and a JSON-RPC error
//!         └─ accepted → dispatch::Dispatcher → response.rs with 200
//! ```

pub mod intake;
pub mod request;
pub mod response;
pub mod server;

pub use intake::{validate, IntakeError, Rejection};
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::write_response;
pub use server::HttpServer;
