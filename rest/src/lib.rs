// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for a hosted PostgREST-style table API and its password-grant auth provider.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::single_match_else, clippy::match_bool)]

mod auth;
mod client;
mod config;
mod error;
mod http;
mod query;

pub use crate::auth::{Session, User};
pub use crate::client::RestClient;
pub use crate::config::{AuthMethod, RestConfig};
pub use crate::error::RestError;
pub use crate::query::Query;
