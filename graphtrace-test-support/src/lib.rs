//! Shared test utilities used across graphtrace crates.

pub mod ci;
pub mod recording;

pub use recording::{CapturedEvent, CapturedSpan, RecordingLayer};
