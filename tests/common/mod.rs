#![allow(dead_code)]

pub mod actors;
pub mod elevator;
pub mod strategies;

pub use actors::*;
pub use elevator::*;
pub use strategies::*;
