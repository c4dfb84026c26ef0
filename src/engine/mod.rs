//! Compute-engine capability surface and the catalog of loaded engines.
//!
//! The inference engines themselves are external: a native binding for
//! server hosts and a WebAssembly binding for browser hosts. Each binding
//! exposes its capability surface through its own shape, so an explicit
//! adapter per binding maps it onto the one [`ComputeEngine`] trait here;
//! the resolver and everything downstream only ever see normalized handles.
//!
//! The [`EngineCatalog`] is the module-loading seam. It owns the handles the
//! build compiled in and is the sole origin of [`crate::Error::EngineUnavailable`]:
//! selection logic never fails, asking the catalog for an engine the build
//! does not carry does.

mod catalog;
#[cfg(feature = "native-engine")]
mod native;
mod wasm_config;
#[cfg(feature = "web-engine")]
mod web;

pub use catalog::EngineCatalog;
#[cfg(feature = "native-engine")]
pub use native::NativeEngine;
pub use wasm_config::WasmConfig;
#[cfg(feature = "web-engine")]
pub use web::WebEngine;

use serde::Serialize;
use std::sync::Arc;

/// The two interchangeable engine implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Native binding, used by server-like hosts.
    Native,
    /// WebAssembly binding, used by browser-like hosts.
    Web,
}

impl EngineKind {
    pub fn id(&self) -> &'static str {
        match self {
            EngineKind::Native => "native",
            EngineKind::Web => "web",
        }
    }

    /// The engine's guaranteed-available software provider. The native and
    /// web engines name their portable paths differently (`cpu` vs `wasm`);
    /// the tokens stay distinct.
    pub fn fallback_provider(&self) -> crate::provider::ExecutionProvider {
        match self {
            EngineKind::Native => crate::provider::ExecutionProvider::Cpu,
            EngineKind::Web => crate::provider::ExecutionProvider::Wasm,
        }
    }

    /// Cargo feature that compiles this engine's adapter in.
    pub fn feature_flag(&self) -> &'static str {
        match self {
            EngineKind::Native => "native-engine",
            EngineKind::Web => "web-engine",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Normalized capability surface shared by both engine adapters.
///
/// Object-safe so handles can be passed around as `Arc<dyn ComputeEngine>`.
/// Model loading and inference live on the external bindings behind the
/// adapter; this trait only carries what resolution and configuration need.
pub trait ComputeEngine: Send + Sync + std::fmt::Debug {
    /// Which of the two implementations this is.
    fn kind(&self) -> EngineKind;

    /// Nested WebAssembly configuration surface. Only the web engine has
    /// one; the native engine returns `None`.
    fn wasm(&self) -> Option<&WasmConfig> {
        None
    }
}

/// Shared, read-only reference to the engine selected for this process.
///
/// Cloning is cheap and all clones refer to the same engine instance;
/// equality is identity, two handles compare equal iff they point at the
/// same instance.
#[derive(Debug, Clone)]
pub struct RuntimeHandle(Arc<dyn ComputeEngine>);

impl RuntimeHandle {
    pub fn new(engine: Arc<dyn ComputeEngine>) -> Self {
        Self(engine)
    }

    pub fn kind(&self) -> EngineKind {
        self.0.kind()
    }

    pub fn engine(&self) -> &dyn ComputeEngine {
        self.0.as_ref()
    }

    /// WebAssembly configuration surface of the underlying engine, if any.
    pub fn wasm(&self) -> Option<&WasmConfig> {
        self.0.wasm()
    }
}

impl PartialEq for RuntimeHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for RuntimeHandle {}
