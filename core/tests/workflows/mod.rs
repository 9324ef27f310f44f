// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the plancal-core crate.
//!
//! These tests drive the planner through multi-step workflows: category and
//! content lifecycles, drag-and-drop scheduling, the month calendar, and the
//! remote backend.

mod calendar_view;
mod category_lifecycle;
mod content_lifecycle;
mod remote_backend;
mod scheduling;
