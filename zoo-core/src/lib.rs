//! # Zoo Core Library
//!
//! Game-agnostic well-being and progression engine for a virtual zoo.
//!
//! Every playable animal carries three vitals (happiness, hunger, energy)
//! that drift down over time and are restored when a child plays the
//! animal's mini-game. A shared star balance buys access to locked animals.
//!
//! - **Registry** — the authoritative animal collection ([`Registry`])
//! - **Mood** — derived tier from the weakest vital ([`MoodTier`])
//! - **Ledger** — star balance, unlock purchases, reward ingestion ([`Ledger`])
//! - **Decay** — periodic population-wide vital loss ([`DecayProcess`])
//!
//! All engine operations are synchronous and run to completion. Timers,
//! rendering and the mini-games themselves live with the host.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod config;
pub mod content;
pub mod decay;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod mood;
pub mod persistence;
pub mod registry;
pub mod reward;
pub mod types;
pub mod world;

pub use config::ZooConfig;
pub use decay::DecayProcess;
pub use error::ZooError;
pub use ledger::Ledger;
pub use mood::{MoodReport, MoodTable, MoodTier};
pub use registry::Registry;
pub use reward::{PerformanceScore, RewardPolicy, Settlement};
pub use types::*;
