//! Wire types of the agent service.

pub mod agent;
pub mod list;
pub mod message;
pub mod run;
pub mod run_step;
pub mod thread;
pub mod usage;

pub use agent::*;
pub use list::*;
pub use message::*;
pub use run::*;
pub use run_step::*;
pub use thread::*;
pub use usage::*;
