//! # Core Application Logic
//!
//! This module contains Holocron's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ListController       │
//!                    │  • App (all screens)    │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Remote   │      │  Config    │
//!     │  Adapter   │      │  (reqwest) │      │  (toml)    │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`]: `RecordView`, the normalized shape every upstream record takes
//! - [`filter`]: the derived, case-insensitive search filter
//! - [`controller`]: `ListController`, one list screen's lifecycle
//! - [`navigation`]: `Route` and the injectable `Navigator`
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: settings and their override hierarchy

pub mod action;
pub mod config;
pub mod controller;
pub mod filter;
pub mod navigation;
pub mod record;
pub mod state;
