//! Runtime for driving conversations
//!
//! The state machine decides; this module performs the I/O its effects ask
//! for and turns the outcomes back into events.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::{ConversationLoop, LoopSettings, TurnError};
pub use traits::*;

use crate::weather::NwsClient;

/// Loop wired to the real engine and the National Weather Service
pub type ProductionLoop = ConversationLoop<ServiceLlmClient, NwsClient>;
