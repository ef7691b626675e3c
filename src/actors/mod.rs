//! # Actor Runtime
//!
//! Isolated, address-addressed computation units that talk to each other only
//! through messages.
//!
//! ## Core Components
//!
//! - **[`Manager`]**: owns the address table; the only thing that can spawn,
//!   route to and cancel actors
//! - **[`Actor`]**: behaviour trait, `handle(ctx, message) -> effects`
//! - **[`Message`]**: immutable addressed envelope over an embedder payload
//! - **[`Effect`]**: what a handler asks the manager to do once it returns
//! - **[`TeardownObserver`]**: receives the single "going away" notice per actor
//!
//! ## Usage
//!
//! ```rust
//! use troupe::actors::{Actor, Effect, HandlerContext, Manager, Message, SpawnToken, Spawned};
//!
//! #[derive(Debug)]
//! enum Ping {
//!     Ping,
//!     Stop,
//! }
//!
//! struct Pinger;
//!
//! impl Actor<Ping> for Pinger {
//!     fn handle(&mut self, _ctx: &HandlerContext<'_>, msg: Message<Ping>) -> Vec<Effect<Ping>> {
//!         match msg.payload() {
//!             Ping::Ping => Vec::new(),
//!             Ping::Stop => vec![Effect::Terminate],
//!         }
//!     }
//! }
//!
//! fn pinger(token: SpawnToken, _: ()) -> Spawned<Ping> {
//!     token.seal(Pinger)
//! }
//!
//! let manager = Manager::new();
//! let address = manager.spawn(pinger, ()).unwrap();
//! manager.send(Message::new("main", &address, Ping::Stop)).unwrap();
//! assert!(!manager.is_alive(&address).unwrap());
//! ```

mod address;
mod effects;
mod errors;
mod manager;
mod message;
mod teardown;
mod traits;

pub use address::Address;
pub use effects::{Effect, SpawnRequest};
pub use errors::{RuntimeError, RuntimeResult};
pub use manager::{Manager, ManagerHandle};
pub use message::{Message, Payload};
pub use teardown::{ChannelObserver, TeardownNotice, TeardownObserver, TeardownReason};
pub use traits::{Actor, HandlerContext, SpawnToken, Spawned};
