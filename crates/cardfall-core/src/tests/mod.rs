//! Cross-module test suite.
//!
//! Unit tests live next to the code they cover; this module holds the tests
//! that cross module boundaries:
//! - `determinism`: identical seeds replay identical runs
//! - `integration`: full turns wired through session, generator, pool, and
//!   combat
//! - `properties`: property-based checks over the pure rules

mod helpers;

mod integration;
