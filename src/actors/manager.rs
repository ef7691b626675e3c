//! # Actor Manager
//!
//! The manager owns the address table and is the only component allowed to
//! create, drive and destroy actors.
//!
//! ## Dispatch model
//!
//! All state lives behind a single mutex. A `send` enqueues the message and then
//! drains the work queue on the calling thread: each delivery runs one handler to
//! completion, and the effects it returns are appended to the back of the queue.
//! Handlers therefore never run re-entrantly, effects become visible only after
//! the emitting handler returns, and effects from one handler keep their order.
//!
//! Self-termination is applied the moment the handler returns, and tearing an
//! actor down purges every queued delivery addressed to it.

use super::address::Address;
use super::effects::{Effect, SpawnRequest};
use super::errors::{encapsulation_violation, foreign_token, RuntimeError, RuntimeResult};
use super::message::{Message, Payload};
use super::teardown::{TeardownNotice, TeardownObserver, TeardownReason};
use super::traits::{Actor, HandlerContext, SpawnToken, Spawned};
use crate::config::RuntimeConfig;
use crate::logging::log_actor_operation;
use parking_lot::{Mutex, MutexGuard};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, error, info, warn};

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    // Managers whose handlers, factories or observers are running on this thread
    static CALLBACK_STACK: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// Marks the current thread as running user code on behalf of a manager
struct CallbackScope {
    manager_id: u64,
}

impl CallbackScope {
    fn enter(manager_id: u64) -> Self {
        CALLBACK_STACK.with(|stack| stack.borrow_mut().push(manager_id));
        Self { manager_id }
    }
}

impl Drop for CallbackScope {
    fn drop(&mut self) {
        CALLBACK_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|id| *id == self.manager_id) {
                stack.remove(pos);
            }
        });
    }
}

fn inside_callback(manager_id: u64) -> bool {
    CALLBACK_STACK.with(|stack| stack.borrow().contains(&manager_id))
}

struct ActorRecord<P> {
    name: &'static str,
    behavior: Box<dyn Actor<P>>,
}

enum Work<P> {
    Deliver(Message<P>),
    Spawn {
        spawner: Address,
        request: SpawnRequest<P>,
    },
    Cancel {
        requester: Address,
        target: Address,
    },
}

impl<P> Work<P> {
    fn targets(&self, address: &str) -> bool {
        match self {
            Self::Deliver(message) => message.dest().as_str() == address,
            Self::Cancel { target, .. } => target.as_str() == address,
            Self::Spawn { .. } => false,
        }
    }
}

struct RuntimeState<P> {
    actors: HashMap<Address, ActorRecord<P>>,
    queue: VecDeque<Work<P>>,
    observers: Vec<Arc<dyn TeardownObserver>>,
    closed: bool,
}

struct Shared<P: Payload> {
    id: u64,
    config: RuntimeConfig,
    state: Mutex<RuntimeState<P>>,
}

impl<P: Payload> Shared<P> {
    fn new(config: RuntimeConfig) -> Self {
        Self {
            id: NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed),
            config,
            state: Mutex::new(RuntimeState {
                actors: HashMap::new(),
                queue: VecDeque::new(),
                observers: Vec::new(),
                closed: false,
            }),
        }
    }

    fn lock(&self, operation: &'static str) -> RuntimeResult<MutexGuard<'_, RuntimeState<P>>> {
        if inside_callback(self.id) {
            warn!(manager = self.id, operation, "Manager reached from inside an actor callback");
            return Err(encapsulation_violation(operation));
        }
        let state = self.state.lock();
        if state.closed {
            return Err(RuntimeError::ManagerShutDown);
        }
        Ok(state)
    }

    fn spawn<F>(&self, requested: Option<Address>, factory: F) -> RuntimeResult<Address>
    where
        F: FnOnce(SpawnToken) -> Spawned<P>,
    {
        let mut state = self.lock("spawn")?;
        if let Some(address) = &requested {
            if state.actors.contains_key(address) {
                return Err(RuntimeError::AddressInUse {
                    address: address.clone(),
                });
            }
        }
        self.register(&mut state, requested, factory)
    }

    fn register<F>(
        &self,
        state: &mut RuntimeState<P>,
        requested: Option<Address>,
        factory: F,
    ) -> RuntimeResult<Address>
    where
        F: FnOnce(SpawnToken) -> Spawned<P>,
    {
        let address =
            requested.unwrap_or_else(|| Address::mint(&self.config.address_prefix));

        // Covers the factory, `name()` and dropping a rejected actor
        let _scope = CallbackScope::enter(self.id);
        let spawned = factory(SpawnToken::new(address.clone()));

        if spawned.address() != &address {
            let error = foreign_token(&address, spawned.address());
            warn!(
                manager = self.id,
                address = %address,
                sealed_for = %spawned.address(),
                "Spawn rejected: actor sealed with another spawn's token"
            );
            return Err(error);
        }

        let behavior = spawned.into_actor();
        let name = behavior.name();
        state
            .actors
            .insert(address.clone(), ActorRecord { name, behavior });

        log_actor_operation("spawn", address.as_str(), name, "registered", None);
        Ok(address)
    }

    fn send(&self, message: Message<P>) -> RuntimeResult<()> {
        let mut state = self.lock("send")?;
        state.queue.push_back(Work::Deliver(message));
        self.run(&mut state);
        Ok(())
    }

    fn drain(&self) -> RuntimeResult<usize> {
        let mut state = self.lock("drain")?;
        Ok(self.run(&mut state))
    }

    fn cancel(&self, address: &str) -> RuntimeResult<bool> {
        let mut state = self.lock("cancel")?;
        Ok(self.teardown(&mut state, address, TeardownReason::Cancelled))
    }

    /// Process queued work until the queue is empty or the dispatch budget is spent
    fn run(&self, state: &mut RuntimeState<P>) -> usize {
        let mut processed = 0usize;

        while let Some(work) = state.queue.pop_front() {
            match work {
                Work::Deliver(message) => self.deliver(state, message),
                Work::Spawn { spawner, request } => self.spawn_requested(state, &spawner, request),
                Work::Cancel { requester, target } => {
                    if !self.teardown(state, target.as_str(), TeardownReason::Cancelled) {
                        debug!(
                            requester = %requester,
                            target = %target,
                            "Cancel effect for unknown or dead address ignored"
                        );
                    }
                }
            }
            processed += 1;

            if self
                .config
                .dispatch_budget
                .is_some_and(|budget| processed >= budget)
                && !state.queue.is_empty()
            {
                warn!(
                    manager = self.id,
                    processed,
                    pending = state.queue.len(),
                    "Dispatch budget exhausted, remaining work left queued"
                );
                break;
            }
        }

        processed
    }

    fn deliver(&self, state: &mut RuntimeState<P>, message: Message<P>) {
        let dest = message.dest().clone();
        let Some(record) = state.actors.get_mut(&dest) else {
            debug!(
                source = %message.source(),
                dest = %dest,
                "Dropping message for unknown or dead address"
            );
            return;
        };

        let effects = {
            let _scope = CallbackScope::enter(self.id);
            let ctx = HandlerContext::new(&dest, &self.config.address_prefix);
            record.behavior.handle(&ctx, message)
        };

        self.apply_effects(state, &dest, effects);
    }

    fn apply_effects(&self, state: &mut RuntimeState<P>, emitter: &Address, effects: Vec<Effect<P>>) {
        let mut terminate = false;

        for effect in effects {
            match effect {
                Effect::Send(message) => state.queue.push_back(Work::Deliver(message)),
                Effect::Spawn(request) => state.queue.push_back(Work::Spawn {
                    spawner: emitter.clone(),
                    request,
                }),
                Effect::Cancel(target) if &target == emitter => terminate = true,
                Effect::Cancel(target) => state.queue.push_back(Work::Cancel {
                    requester: emitter.clone(),
                    target,
                }),
                Effect::Terminate => terminate = true,
            }
        }

        if terminate {
            self.teardown(state, emitter.as_str(), TeardownReason::SelfTerminated);
        }
    }

    fn spawn_requested(&self, state: &mut RuntimeState<P>, spawner: &Address, request: SpawnRequest<P>) {
        let (requested, factory) = request.into_parts();
        if let Some(address) = &requested {
            if state.actors.contains_key(address) {
                warn!(
                    spawner = %spawner,
                    address = %address,
                    "Spawn effect dropped: address already bound to a live actor"
                );
                return;
            }
        }
        if let Err(error) = self.register(state, requested, factory) {
            warn!(spawner = %spawner, error = %error, "Spawn effect dropped");
        }
    }

    /// Remove an actor, run its stop hook and emit its one teardown notice
    fn teardown(&self, state: &mut RuntimeState<P>, address: &str, reason: TeardownReason) -> bool {
        let _scope = CallbackScope::enter(self.id);
        let Some((address, mut record)) = state.actors.remove_entry(address) else {
            return false;
        };
        state.queue.retain(|work| !work.targets(address.as_str()));

        let ctx = HandlerContext::new(&address, &self.config.address_prefix);
        record.behavior.stopped(&ctx, reason);

        let notice = TeardownNotice::new(address.clone(), record.name, reason);
        info!(
            address = %address,
            actor = record.name,
            reason = %reason,
            "{notice}"
        );
        for observer in &state.observers {
            observer.on_teardown(&notice);
        }
        true
    }

    fn shutdown(&self) {
        if inside_callback(self.id) {
            error!(
                manager = self.id,
                "Manager dropped from inside one of its own callbacks; live actors were not torn down"
            );
            return;
        }

        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;

        let discarded = state.queue.len();
        state.queue.clear();

        let mut addresses: Vec<Address> = state.actors.keys().cloned().collect();
        addresses.sort();
        for address in &addresses {
            self.teardown(&mut state, address.as_str(), TeardownReason::ManagerShutdown);
        }

        info!(
            manager = self.id,
            torn_down = addresses.len(),
            discarded_work = discarded,
            "Actor manager shut down"
        );
    }
}

/// Owner of a set of actors
///
/// Dropping the manager (or calling [`Manager::shutdown`]) tears down every
/// live actor, each emitting exactly one teardown notice.
pub struct Manager<P: Payload> {
    shared: Arc<Shared<P>>,
}

impl<P: Payload> Manager<P> {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let shared = Arc::new(Shared::new(config));
        debug!(manager = shared.id, "Actor manager created");
        Self { shared }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.shared.config
    }

    /// Register an observer for teardown notices
    pub fn add_observer(&self, observer: impl TeardownObserver + 'static) -> RuntimeResult<()> {
        let mut state = self.shared.lock("add_observer")?;
        state.observers.push(Arc::new(observer));
        Ok(())
    }

    /// Build an actor with `factory(token, args)` and register it under a fresh address
    pub fn spawn<F, A>(&self, factory: F, args: A) -> RuntimeResult<Address>
    where
        F: FnOnce(SpawnToken, A) -> Spawned<P>,
    {
        self.shared.spawn(None, |token| factory(token, args))
    }

    /// Build an actor and register it under `address`
    ///
    /// # Errors
    ///
    /// [`RuntimeError::AddressInUse`] if a live actor already owns the address;
    /// the factory is not invoked in that case. [`RuntimeError::EncapsulationViolation`]
    /// if the factory seals its actor with a token it was not given for this spawn.
    pub fn spawn_named<F, A>(&self, address: impl Into<Address>, factory: F, args: A) -> RuntimeResult<Address>
    where
        F: FnOnce(SpawnToken, A) -> Spawned<P>,
    {
        self.shared
            .spawn(Some(address.into()), |token| factory(token, args))
    }

    /// Deliver a message and run every effect it causes
    ///
    /// Messages to unknown or dead addresses are dropped silently.
    pub fn send(&self, message: Message<P>) -> RuntimeResult<()> {
        self.shared.send(message)
    }

    /// Tear an actor down; returns `false` if it was not alive
    pub fn cancel(&self, address: impl AsRef<str>) -> RuntimeResult<bool> {
        self.shared.cancel(address.as_ref())
    }

    /// Continue processing work left over by an exhausted dispatch budget
    pub fn drain(&self) -> RuntimeResult<usize> {
        self.shared.drain()
    }

    pub fn is_alive(&self, address: impl AsRef<str>) -> RuntimeResult<bool> {
        let state = self.shared.lock("is_alive")?;
        Ok(state.actors.contains_key(address.as_ref()))
    }

    pub fn live_count(&self) -> RuntimeResult<usize> {
        Ok(self.shared.lock("live_count")?.actors.len())
    }

    pub fn pending_work(&self) -> RuntimeResult<usize> {
        Ok(self.shared.lock("pending_work")?.queue.len())
    }

    /// A weak, cloneable handle for use from other threads
    pub fn handle(&self) -> ManagerHandle<P> {
        ManagerHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Tear down every live actor
    pub fn shutdown(self) {
        drop(self);
    }
}

impl<P: Payload> Default for Manager<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> Drop for Manager<P> {
    fn drop(&mut self) {
        self.shared.shutdown();
    }
}

impl<P: Payload> fmt::Debug for Manager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("id", &self.shared.id)
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

/// Weak reference to a [`Manager`]
///
/// Handles do not keep the manager alive; once it is gone every call fails with
/// [`RuntimeError::ManagerShutDown`]. Calling a handle from inside one of the
/// manager's own actors fails with [`RuntimeError::EncapsulationViolation`].
pub struct ManagerHandle<P: Payload> {
    shared: Weak<Shared<P>>,
}

impl<P: Payload> ManagerHandle<P> {
    fn upgrade(&self) -> RuntimeResult<Arc<Shared<P>>> {
        self.shared.upgrade().ok_or(RuntimeError::ManagerShutDown)
    }

    pub fn spawn<F, A>(&self, factory: F, args: A) -> RuntimeResult<Address>
    where
        F: FnOnce(SpawnToken, A) -> Spawned<P>,
    {
        self.upgrade()?.spawn(None, |token| factory(token, args))
    }

    pub fn spawn_named<F, A>(&self, address: impl Into<Address>, factory: F, args: A) -> RuntimeResult<Address>
    where
        F: FnOnce(SpawnToken, A) -> Spawned<P>,
    {
        self.upgrade()?
            .spawn(Some(address.into()), |token| factory(token, args))
    }

    pub fn send(&self, message: Message<P>) -> RuntimeResult<()> {
        self.upgrade()?.send(message)
    }

    pub fn cancel(&self, address: impl AsRef<str>) -> RuntimeResult<bool> {
        self.upgrade()?.cancel(address.as_ref())
    }

    pub fn is_alive(&self, address: impl AsRef<str>) -> RuntimeResult<bool> {
        let shared = self.upgrade()?;
        let state = shared.lock("is_alive")?;
        Ok(state.actors.contains_key(address.as_ref()))
    }
}

impl<P: Payload> Clone for ManagerHandle<P> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<P: Payload> fmt::Debug for ManagerHandle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerHandle")
            .field("live", &(self.shared.strong_count() > 0))
            .finish()
    }
}
