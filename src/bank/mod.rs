//! Bank module containing account ledgers, the user directory, and the core orchestrator

pub mod account;
pub mod core;
pub mod directory;

pub use account::*;
pub use core::*;
pub use directory::*;
