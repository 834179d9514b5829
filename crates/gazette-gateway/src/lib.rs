// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Gazette.
//!
//! Serves the JSON API, streams debates as Server-Sent Events, and serves
//! synthesized podcasts from the public directory. All work is delegated to
//! the services in `gazette-debate`; this crate only translates between
//! HTTP and those services.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;
pub mod sse;

pub use auth::AuthConfig;
pub use error::{ApiError, ErrorResponse, JsonBody};
pub use server::{GatewayState, HealthState, build_router, start_server};
