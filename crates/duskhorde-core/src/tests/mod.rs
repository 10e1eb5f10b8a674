//! Cross-module test suite.
//!
//! Unit tests live next to the code they cover; the tests in this directory
//! exercise whole ticks across pools, ledger, dispatcher, and events.

mod helpers;
