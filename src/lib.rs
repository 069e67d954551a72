//! foundry-agents: async client for hosted conversational agents.
//!
//! Creates agents, threads and messages on the hosted service, starts runs,
//! and waits for them with a cancellable fixed-interval poller.
//!
//! # Quick Start
//!
//! ```no_run
//! use foundry_agents::prelude::*;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = AgentsConfig::from_env()?;
//! let client = AgentsClient::new(&config)?;
//!
//! let agent = client
//!     .create_agent(
//!         &CreateAgentRequest::builder()
//!             .model(config.require_model_deployment()?)
//!             .name("my-agent")
//!             .instructions("You are a helpful agent")
//!             .build(),
//!     )
//!     .await?;
//! let thread = client.create_thread(&CreateThreadRequest::default()).await?;
//! client
//!     .create_message(&thread.id, &CreateMessageRequest::user("Hello, tell me a joke"))
//!     .await?;
//!
//! let run = client
//!     .create_and_process(
//!         &thread.id,
//!         &CreateRunRequest::for_agent(&agent.id),
//!         &config.poll_policy(),
//!         &CancellationToken::new(),
//!     )
//!     .await?;
//! println!("run finished: {}", run.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod poll;
pub mod prelude;
pub mod tools;
pub mod types;
pub mod util;

pub use client::AgentsClient;
pub use config::AgentsConfig;
pub use error::{AgentsError, Result};
pub use poll::{wait_until_terminal, PollError, PollPolicy, RunStatusSource};
