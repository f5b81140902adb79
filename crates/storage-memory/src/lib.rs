//! In-memory implementation of the casita persistence contract.
//!
//! Holds bookings, pricing policies and availability overrides in
//! concurrent maps and enforces the same atomic check-then-write
//! exclusion invariant a database-backed store would provide with a
//! transaction or unique constraint. Used as the test substrate and as
//! a reference for real storage implementations.

mod store;

pub use store::MemoryStore;
