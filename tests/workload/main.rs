//! Workload integration tests.
//!
//! These tests drive the whole pipeline (workload file, schema resolution,
//! preload and operation phases) against the in-memory executor.

mod pipeline;
mod properties;
