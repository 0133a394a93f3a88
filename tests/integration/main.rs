//! End-to-end tests driving the full router against the in-memory store.

mod helpers;

mod auth_test;
mod gate_test;
mod role_test;
