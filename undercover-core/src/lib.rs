//! Round-orchestration engine for "Who is the Spy" played by LLM agents.
//!
//! One agent moderates (GM), N agents play, and exactly one player secretly
//! holds a different word. Each round the survivors speak in turn and then
//! vote; the highest-voted player is eliminated (ties eliminate nobody).
//! Civilians win when the spy is voted out; the spy wins when only two
//! players remain with the spy alive.
//!
//! # Quick Start
//!
//! ```ignore
//! use undercover_core::{DeepSeekResponder, GameSession, SetupConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let responder = DeepSeekResponder::from_env()?;
//!     let config = SetupConfig::new(4).with_words("apple", "pear");
//!
//!     let mut session = GameSession::setup(config, Box::new(responder)).await?;
//!     while !session.is_over() {
//!         let outcome = session.play_round().await?;
//!         println!("round {} eliminated {:?}", outcome.round, outcome.eliminated);
//!     }
//!     println!("{:?}", session.result());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod conversation;
pub mod names;
pub mod prompt;
pub mod protocol;
pub mod responder;
pub mod round;
pub mod session;
pub mod testing;

// Primary public API
pub use agent::{Agent, AgentId, GameRole};
pub use conversation::{ChatMessage, ChatRole, Conversation};
pub use protocol::VoteIntent;
pub use responder::{DeepSeekResponder, Responder, ResponderError, SamplingConfig};
pub use round::{Ballot, GameResult, RoundOutcome, RoundStatus, Speech, Winner};
pub use session::{ChatRecord, GameSession, SessionError, SetupConfig, WordSource};
