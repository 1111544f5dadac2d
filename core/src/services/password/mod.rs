//! Password hashing service
//!
//! One-way, salted, deliberately slow hashing of login passwords. The
//! digest is self-describing (algorithm, cost, and salt embedded), so
//! verification needs no side-channel state.

mod hasher;

pub use hasher::{PasswordHasher, PasswordHasherConfig};
