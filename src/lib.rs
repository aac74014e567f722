//! appctl-bridge
//!
//! Bridges a chat platform's slash command to an infrastructure control tool.
//! The user's command line is classified and validated, the tool is run under
//! a login shell, and its human-oriented diagnostic text is parsed into one
//! of several report shapes and rendered as a block-based chat message, with
//! a plain fenced-text fallback for everything that has no usable structure.
//!
//! The interpretation-and-rendering engine ([`engine`], [`command`],
//! [`layout`], the parser modules and [`render`]) is pure: it never performs
//! I/O and is a function from (command line, tool output, exit status) to a
//! rendering payload. Process execution lives in [`runner`], message delivery
//! in [`delivery`].

pub mod ansi;
pub mod command;
pub mod component;
pub mod config;
pub mod delivery;
pub mod engine;
pub mod error;
pub mod events;
pub mod header;
pub mod layout;
pub mod multi_section;
pub mod render;
pub mod runner;
pub mod scan;
pub mod single_unit;
pub mod state;
pub mod url_probe;
