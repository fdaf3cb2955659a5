//! skypulse-core — the engine behind the skypulse sentiment dashboard.
//!
//! Holds the domain types, the bounded review log, brand profiles, the mock
//! feed and its live-mode timer, the [`monitor::Monitor`] controller, the chat
//! buffer, and the [`analyst::Analyst`] seam to the remote language model.
//! Nothing here touches the terminal.

pub mod analyst;
pub mod brand;
pub mod chat;
pub mod feed;
pub mod log;
pub mod monitor;
pub mod report;
pub mod types;
