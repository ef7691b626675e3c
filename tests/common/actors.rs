//! Test actors and sinks shared by the actor runtime suites

use parking_lot::Mutex;
use std::sync::Arc;
use troupe::actors::{
    Actor, Effect, HandlerContext, ManagerHandle, Message, RuntimeError, SpawnToken, Spawned,
    TeardownNotice, TeardownReason,
};

/// Payload vocabulary for every test actor
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Print(String),
    Increment,
    Display,
    /// Self-send chain; finishes when `remaining` hits zero
    Step { remaining: u64 },
    /// Ask a factory to spawn a counter, at the given address or a minted one
    Make(Option<String>),
    /// Cancel another actor
    CancelOther(String),
    /// Cancel oneself through a cancel effect on one's own address
    CancelSelf,
    /// Self-terminate
    Stop,
    /// Forward each `(dest, command)` pair as a separate send
    Burst(Vec<(String, Command)>),
    /// Try to reach the manager from inside a handler
    Intrude,
    /// A variant nobody handles
    Unknown,
}

/// Shared line sink
pub type Output = Arc<Mutex<Vec<String>>>;

pub fn output() -> Output {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn recorded(output: &Output) -> Vec<String> {
    output.lock().clone()
}

/// Prints what it is told and records its own teardown
pub struct Printer {
    count: usize,
    lines: Output,
    stops: Output,
}

impl Actor<Command> for Printer {
    fn name(&self) -> &'static str {
        "Printer"
    }

    fn handle(&mut self, ctx: &HandlerContext<'_>, msg: Message<Command>) -> Vec<Effect<Command>> {
        match msg.payload() {
            Command::Print(text) => {
                self.count += 1;
                self.lines
                    .lock()
                    .push(format!("{}[{}]: {} said {text}", ctx.address(), self.count, msg.source()));
                Vec::new()
            }
            Command::Stop => vec![Effect::Terminate],
            Command::CancelSelf => vec![Effect::cancel(ctx.address())],
            _ => Vec::new(),
        }
    }

    fn stopped(&mut self, ctx: &HandlerContext<'_>, reason: TeardownReason) {
        self.stops.lock().push(format!("{} {reason}", ctx.address()));
    }
}

pub fn printer(token: SpawnToken, (lines, stops): (Output, Output)) -> Spawned<Command> {
    token.seal(Printer {
        count: 0,
        lines,
        stops,
    })
}

/// Counts increments and prints its value on `Display`
pub struct Counter {
    value: u64,
    out: Output,
}

impl Actor<Command> for Counter {
    fn name(&self) -> &'static str {
        "Counter"
    }

    fn handle(&mut self, _ctx: &HandlerContext<'_>, msg: Message<Command>) -> Vec<Effect<Command>> {
        match msg.payload() {
            Command::Increment => self.value += 1,
            Command::Display => self.out.lock().push(self.value.to_string()),
            Command::Stop => return vec![Effect::Terminate],
            _ => {}
        }
        Vec::new()
    }
}

pub fn counter(token: SpawnToken, out: Output) -> Spawned<Command> {
    token.seal(Counter { value: 0, out })
}

/// Spawns counters on request, then bumps and displays them once
pub struct CounterFactory {
    out: Output,
}

impl Actor<Command> for CounterFactory {
    fn name(&self) -> &'static str {
        "CounterFactory"
    }

    fn handle(&mut self, ctx: &HandlerContext<'_>, msg: Message<Command>) -> Vec<Effect<Command>> {
        match msg.payload() {
            Command::Make(requested) => {
                let address = requested
                    .as_deref()
                    .map(Into::into)
                    .unwrap_or_else(|| ctx.mint_address());
                vec![
                    Effect::spawn_named(address.clone(), counter, self.out.clone()),
                    ctx.send_to(address.clone(), Command::Increment),
                    ctx.send_to(address, Command::Display),
                ]
            }
            _ => Vec::new(),
        }
    }
}

pub fn counter_factory(token: SpawnToken, out: Output) -> Spawned<Command> {
    token.seal(CounterFactory { out })
}

/// Sends itself `Step` messages until done, recording how many it saw
pub struct Chain {
    steps: u64,
    out: Output,
}

impl Actor<Command> for Chain {
    fn handle(&mut self, ctx: &HandlerContext<'_>, msg: Message<Command>) -> Vec<Effect<Command>> {
        match msg.payload() {
            Command::Step { remaining: 0 } => {
                self.out.lock().push(format!("done after {}", self.steps));
                Vec::new()
            }
            Command::Step { remaining } => {
                self.steps += 1;
                vec![ctx.send_to(ctx.address(), Command::Step { remaining: remaining - 1 })]
            }
            _ => Vec::new(),
        }
    }
}

pub fn chain(token: SpawnToken, out: Output) -> Spawned<Command> {
    token.seal(Chain { steps: 0, out })
}

/// Fans out bursts and cancels other actors on request
pub struct Relay;

impl Actor<Command> for Relay {
    fn name(&self) -> &'static str {
        "Relay"
    }

    fn handle(&mut self, ctx: &HandlerContext<'_>, msg: Message<Command>) -> Vec<Effect<Command>> {
        match msg.into_payload() {
            Command::Burst(sends) => sends
                .into_iter()
                .map(|(dest, command)| ctx.send_to(dest, command))
                .collect(),
            Command::CancelOther(target) => vec![Effect::cancel(target)],
            _ => Vec::new(),
        }
    }
}

pub fn relay(token: SpawnToken, _: ()) -> Spawned<Command> {
    token.seal(Relay)
}

/// Holds a captured manager handle and tries to use it from inside `handle`
pub struct Intruder {
    handle: ManagerHandle<Command>,
    errors: Arc<Mutex<Vec<RuntimeError>>>,
}

impl Actor<Command> for Intruder {
    fn handle(&mut self, ctx: &HandlerContext<'_>, msg: Message<Command>) -> Vec<Effect<Command>> {
        if msg.payload() == &Command::Intrude {
            let attempts = [
                self.handle
                    .send(Message::new(ctx.address(), "anyone", Command::Unknown)),
                self.handle.spawn(relay, ()).map(|_| ()),
                self.handle.cancel(ctx.address()).map(|_| ()),
            ];
            self.errors
                .lock()
                .extend(attempts.into_iter().filter_map(Result::err));
        }
        Vec::new()
    }
}

pub fn intruder(
    token: SpawnToken,
    (handle, errors): (ManagerHandle<Command>, Arc<Mutex<Vec<RuntimeError>>>),
) -> Spawned<Command> {
    token.seal(Intruder { handle, errors })
}

/// Observer closure that records every notice
pub fn recording_observer() -> (
    impl Fn(&TeardownNotice) + Send + Sync + 'static,
    Arc<Mutex<Vec<TeardownNotice>>>,
) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (move |notice: &TeardownNotice| sink.lock().push(notice.clone()), seen)
}
