//! # zoo-session — Host Integration for the Zoo Engine
//!
//! This crate connects the synchronous `zoo-core` engine to a running game:
//! it knows which mini-game each animal plays, hands games a progress
//! callback, settles rewards when a game ends, and drives the periodic
//! timers (decay and the session countdown) on tokio.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  host (UI / headless runner)             │
//! │   ┌────────────────┐  ┌───────────────┐  │
//! │   │ SessionDriver  │  │  PlaySession  │  │
//! │   │ (tokio timers) │  │  (callbacks)  │  │
//! │   └───────┬────────┘  └───────┬───────┘  │
//! │           ▼                   ▼          │
//! │      ┌─────────────────────────────┐     │
//! │      │  Zoo (Arc<Mutex<..>>)       │     │
//! │      │  registry · ledger · decay  │     │
//! │      └─────────────────────────────┘     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `games` — the mini-game catalogue ([`GameKind`])
//! - `hooks` — play sessions and the progress callback ([`PlaySession`])
//! - `events` — notifications for the host to render ([`SessionEvent`])
//! - `zoo` — the engine aggregate ([`Zoo`])
//! - `driver` — tokio timers over a shared zoo ([`SessionDriver`])

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod driver;
pub mod error;
pub mod events;
pub mod games;
pub mod hooks;
pub mod zoo;

pub use driver::{SessionDriver, SharedZoo};
pub use error::SessionError;
pub use events::{EventLog, SessionEvent};
pub use games::GameKind;
pub use hooks::{PlaySession, ProgressReporter};
pub use zoo::Zoo;
