// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The interactive entry point: argument parsing and logging setup. Kept
//! thin on purpose — it only gathers a [`crate::config::WorkConfig`]
//! and a [`crate::geometry::VisSpec`] and hands them to the core.

pub mod args;
pub mod logging;

pub use args::Args;
