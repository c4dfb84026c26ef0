//! # inference-backend
//!
//! Execution backend resolver for pluggable inference runtimes.
//!
//! Inference engines ship as two pre-built bindings: a native one for
//! server-side processes and a WebAssembly one for browsers. This crate
//! decides, once per process, which binding is in effect and in which order
//! the hardware execution providers should be offered to it. It does not
//! load models or run tensors; those belong to the engine behind the
//! selected handle.
//!
//! ## Overview
//!
//! Resolution reads only ambient signals (server-runtime marker, host
//! operating system, browser user-agent), classifies the process as
//! server-like or browser-like, picks the matching engine from the catalog,
//! and computes the provider preference order:
//!
//! | Environment | Engine | Providers |
//! |-------------|--------|-----------|
//! | server, macOS | native | `coreml`, `cpu` |
//! | server, Linux | native | `cuda`, `cpu` |
//! | server, Windows | native | `directml`, `cpu` |
//! | server, other | native | `cpu` |
//! | browser | web | `wasm` |
//!
//! Browser hosts whose user-agent identifies an iOS device additionally get
//! the engine's WebAssembly SIMD path disabled, working around a known
//! miscompilation in that platform's wasm engine.
//!
//! ## Quick Start
//!
//! ```rust
//! fn main() -> inference_backend::Result<()> {
//!     let resolution = inference_backend::resolve()?;
//!     println!("engine: {}", resolution.engine_kind());
//!     println!("providers: {}", resolution.providers());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`resolver`] | One-time backend resolution and the published result |
//! | [`environment`] | Ambient signal collection and classification |
//! | [`engine`] | Compute-engine capability surface and catalog |
//! | [`provider`] | Execution provider ids and the ordered preference list |
//! | [`error`] | Error type (engine availability only) |
//!
//! ## Configuration
//!
//! Two environment variables adjust resolution without code changes:
//! `INFERENCE_BACKEND_EXECUTION_PROVIDERS` (comma-separated provider ids
//! replacing the computed order) and `INFERENCE_BACKEND_DISABLE_WASM_SIMD`
//! (force the SIMD mitigation in browser-like hosts). Malformed values are
//! logged and ignored; resolution always produces a usable backend.

pub mod engine;
pub mod environment;
pub mod error;
pub mod provider;
pub mod resolver;

// Re-export main types for convenience
pub use engine::{ComputeEngine, EngineCatalog, EngineKind, RuntimeHandle, WasmConfig};
pub use environment::{Environment, EnvironmentSignals, OsFamily};
pub use error::Error;
pub use provider::{ExecutionProvider, ExecutionProviders};
pub use resolver::{execution_providers, resolve, runtime_handle, Resolution, Resolver};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
