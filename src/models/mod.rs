// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity_type;
pub mod aggregate;
pub mod filter;
pub mod record;

pub use activity_type::ActivityFilter;
pub use aggregate::{Aggregate, TotalField};
pub use filter::{FilterContext, FilterQuery, SortDirection, SortField, SortModel};
pub use record::{ActivityRecord, RawRecord};
