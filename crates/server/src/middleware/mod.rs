//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. CORS (any origin; the contact form is served from another host)
//! 3. `TraceLayer` (request span with `request_id`, status and latency)
//! 4. Request ID (reuse a short printable `x-request-id` or generate one)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
