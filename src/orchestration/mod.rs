//! Concurrent fan-out/join of per-position evaluations.

pub mod orchestrator;

pub use orchestrator::Summarizer;
