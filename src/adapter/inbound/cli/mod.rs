//! CLI module graph.

pub mod action;
pub mod check;
pub mod command;
pub mod diagnostic;
pub mod dispatch;
pub mod format;
pub mod info;
pub mod output;
pub mod paths;
pub mod quote;
pub mod wallet;
