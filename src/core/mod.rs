//! # Core Application Logic
//!
//! This module contains Atlas's business logic.
//! It knows nothing about any specific UI technology or HTTP client.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (record store) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • derive() (pipeline)  │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    API     │
//!     │  Adapter   │                          │  (fetch)   │
//!     │ (ratatui)  │                          │ (reqwest)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`pipeline`]: Filter + sort from the full list to the derived list
//! - [`selection`]: Selected record, identifier fallback, neighbours
//! - [`detail`]: Display strings and placeholders for the detail view

pub mod action;
pub mod config;
pub mod country;
pub mod criteria;
pub mod detail;
pub mod navigation;
pub mod pipeline;
pub mod selection;
pub mod state;
