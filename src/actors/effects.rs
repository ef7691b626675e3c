use super::address::Address;
use super::message::Message;
use super::traits::{SpawnToken, Spawned};
use std::fmt;

type BoxedFactory<P> = Box<dyn FnOnce(SpawnToken) -> Spawned<P> + Send>;

/// Side effect requested by a handler, applied by the manager after the
/// handler returns
pub enum Effect<P> {
    /// Deliver a message; build it with [`HandlerContext::send_to`](super::HandlerContext::send_to)
    Send(Message<P>),
    /// Create a new actor
    Spawn(SpawnRequest<P>),
    /// Cancel the actor at an address (the emitter's own address behaves like `Terminate`)
    Cancel(Address),
    /// Cancel the emitting actor as soon as the current handler returns
    Terminate,
}

impl<P> Effect<P> {
    /// Spawn under a freshly minted address
    pub fn spawn<F, A>(factory: F, args: A) -> Self
    where
        F: FnOnce(SpawnToken, A) -> Spawned<P> + Send + 'static,
        A: Send + 'static,
    {
        Self::Spawn(SpawnRequest::new(None, factory, args))
    }

    /// Spawn under a requested address; dropped if that address is live
    pub fn spawn_named<F, A>(address: impl Into<Address>, factory: F, args: A) -> Self
    where
        F: FnOnce(SpawnToken, A) -> Spawned<P> + Send + 'static,
        A: Send + 'static,
    {
        Self::Spawn(SpawnRequest::new(Some(address.into()), factory, args))
    }

    pub fn cancel(address: impl Into<Address>) -> Self {
        Self::Cancel(address.into())
    }

    pub fn effect_type(&self) -> &'static str {
        match self {
            Self::Send(_) => "send",
            Self::Spawn(_) => "spawn",
            Self::Cancel(_) => "cancel",
            Self::Terminate => "terminate",
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Effect<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Send(msg) => f.debug_tuple("Send").field(msg).finish(),
            Self::Spawn(request) => f.debug_tuple("Spawn").field(request).finish(),
            Self::Cancel(address) => f.debug_tuple("Cancel").field(address).finish(),
            Self::Terminate => f.write_str("Terminate"),
        }
    }
}

/// Deferred actor construction: a factory with its arguments already bound
pub struct SpawnRequest<P> {
    requested: Option<Address>,
    factory: BoxedFactory<P>,
}

impl<P> SpawnRequest<P> {
    pub fn new<F, A>(requested: Option<Address>, factory: F, args: A) -> Self
    where
        F: FnOnce(SpawnToken, A) -> Spawned<P> + Send + 'static,
        A: Send + 'static,
    {
        Self {
            requested,
            factory: Box::new(move |token| factory(token, args)),
        }
    }

    pub fn requested_address(&self) -> Option<&Address> {
        self.requested.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Option<Address>, BoxedFactory<P>) {
        (self.requested, self.factory)
    }
}

impl<P> fmt::Debug for SpawnRequest<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpawnRequest")
            .field("requested", &self.requested)
            .finish_non_exhaustive()
    }
}
