//! # Core Actor Traits
//!
//! Defines the behaviour contract every actor implements and the capability
//! types that keep actor state out of reach of everything but the
//! [`Manager`](super::Manager).
//!
//! Two types make the encapsulation rules structural rather than conventional:
//!
//! - [`SpawnToken`] is minted only by the manager while it runs a factory. An
//!   actor becomes runnable only after being sealed with a token into a
//!   [`Spawned`] value, so an actor built anywhere else can never be registered.
//! - [`HandlerContext`] is required to call [`Actor::handle`] and can only be
//!   built by the manager, so a behaviour cannot be driven from outside it.
//!
//! ```compile_fail
//! use troupe::actors::{Address, SpawnToken};
//!
//! // Tokens cannot be forged outside the runtime.
//! let token = SpawnToken { address: Address::new("printer") };
//! ```
//!
//! ```compile_fail
//! use troupe::actors::{Address, HandlerContext};
//!
//! // Neither can handler contexts, so `handle` is unreachable from tests or embedders.
//! let me = Address::new("printer");
//! let ctx = HandlerContext { address: &me, prefix: "actor" };
//! ```

use super::address::Address;
use super::effects::Effect;
use super::message::Message;
use super::teardown::TeardownReason;

/// Behaviour of a single actor over payload type `P`
///
/// ## Example
///
/// ```rust
/// use troupe::actors::{Actor, Effect, HandlerContext, Manager, Message, SpawnToken, Spawned};
///
/// #[derive(Debug)]
/// enum Greeting {
///     Hello(String),
/// }
///
/// struct Printer {
///     count: usize,
/// }
///
/// impl Actor<Greeting> for Printer {
///     fn name(&self) -> &'static str {
///         "Printer"
///     }
///
///     fn handle(&mut self, ctx: &HandlerContext<'_>, msg: Message<Greeting>) -> Vec<Effect<Greeting>> {
///         self.count += 1;
///         match msg.payload() {
///             Greeting::Hello(text) => println!("{}[{}]: {} said {text}", ctx.address(), self.count, msg.source()),
///         }
///         Vec::new()
///     }
/// }
///
/// fn printer(token: SpawnToken, _: ()) -> Spawned<Greeting> {
///     token.seal(Printer { count: 0 })
/// }
///
/// let manager = Manager::new();
/// let address = manager.spawn_named("printer", printer, ()).unwrap();
/// manager
///     .send(Message::new("example", address, Greeting::Hello("hi".into())))
///     .unwrap();
/// ```
pub trait Actor<P>: Send + 'static {
    /// Actor name for logging and teardown notices
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Handle one message, returning the effects to run once this call returns
    ///
    /// Payload variants the actor does not understand should simply produce no
    /// effects.
    fn handle(&mut self, ctx: &HandlerContext<'_>, msg: Message<P>) -> Vec<Effect<P>>;

    /// Called exactly once when the actor is torn down (optional)
    ///
    /// Lets an actor observe its own cancellation. No effects can be emitted
    /// from here; the actor is already unreachable.
    #[allow(unused_variables)]
    fn stopped(&mut self, ctx: &HandlerContext<'_>, reason: TeardownReason) {}
}

/// Capability handed to a factory while the manager is spawning an actor
///
/// Not `Clone`, and consumed by [`SpawnToken::seal`].
#[derive(Debug)]
pub struct SpawnToken {
    address: Address,
}

impl SpawnToken {
    pub(crate) fn new(address: Address) -> Self {
        Self { address }
    }

    /// Address the actor being built will live at
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Seal a freshly built actor so the manager can register it
    pub fn seal<P, A>(self, actor: A) -> Spawned<P>
    where
        A: Actor<P>,
    {
        Spawned {
            address: self.address,
            actor: Box::new(actor),
        }
    }
}

/// An actor sealed by a [`SpawnToken`], ready for registration
pub struct Spawned<P> {
    address: Address,
    actor: Box<dyn Actor<P>>,
}

impl<P> Spawned<P> {
    pub(crate) fn address(&self) -> &Address {
        &self.address
    }

    pub(crate) fn into_actor(self) -> Box<dyn Actor<P>> {
        self.actor
    }
}

impl<P: 'static> std::fmt::Debug for Spawned<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spawned")
            .field("address", &self.address)
            .field("actor", &self.actor.name())
            .finish()
    }
}

/// What a running handler may know about its surroundings
#[derive(Debug)]
pub struct HandlerContext<'a> {
    address: &'a Address,
    prefix: &'a str,
}

impl<'a> HandlerContext<'a> {
    pub(crate) fn new(address: &'a Address, prefix: &'a str) -> Self {
        Self { address, prefix }
    }

    /// The handling actor's own address
    pub fn address(&self) -> &Address {
        self.address
    }

    /// Mint a fresh address, e.g. to request for a spawn effect
    pub fn mint_address(&self) -> Address {
        Address::mint(self.prefix)
    }

    /// Build a send effect originating from this actor
    pub fn send_to<P>(&self, dest: impl Into<Address>, payload: P) -> Effect<P> {
        Effect::Send(Message::new(self.address.clone(), dest, payload))
    }
}
