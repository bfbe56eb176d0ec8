//! # hbnb Architecture
//!
//! hbnb is a small object store driven by a line-oriented command shell.
//! The shell itself is a thin client: everything it can do is reachable
//! through the library, which never touches the terminal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Flags, logging, the read loop, printing                  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ raw input lines
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Parser (parser.rs)                    │
//! │  - Rewrites dotted calls into canonical instructions        │
//! │  - Dispatches each instruction to one command               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Argument checks, record mutation, value coercion         │
//! │  - Returns CmdResult: output plus user-facing messages      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ObjectStore over a StorageBackend                        │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage errors versus faults
//!
//! A bad command (`show` with no class, an unknown id) is not an error at
//! the Rust level: commands return `Ok(CmdResult)` carrying an error-level
//! [`commands::CmdMessage`], and the session carries on. `Err(HbnbError)`
//! is reserved for faults the user cannot fix by retyping the line, such as
//! a backing file that cannot be written.
//!
//! ## Testing Strategy
//!
//! - Commands and the API are tested against `InMemoryStore`, whose
//!   `MemBackend` can simulate write failures.
//! - `FileStore` tests use temporary directories.
//! - The shell binary is tested end to end in `tests/`.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod store;
pub mod value;
