// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command templates: `%{name}` placeholders, value lists, cartesian
//! expansion and per-command operation descriptors.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod expand;
mod operation;
mod placeholder;
mod plan;
mod values;

pub use expand::expand;
pub use operation::{Operation, OperationKind};
pub use placeholder::{first_placeholder, placeholders, Placeholder, PLACEHOLDER_PATTERN};
pub use plan::{plan, PlannedCommand};
pub use values::{parse_definition, parse_values, Bindings, ValueError};
