//! Application layer: agent configuration and how it is loaded.
//!
//! ```no_run
//! use wumpus_agent::{WumpusAgent, app::AgentConfig};
//!
//! // parameters.txt (or $WUMPUS_PARAMETERS), then WUMPUS_* overrides
//! let config = AgentConfig::load();
//! let mut agent = WumpusAgent::new(config);
//! agent.initialize();
//! ```

pub mod config;

pub use config::AgentConfig;
