use super::{ComputeEngine, EngineKind, WasmConfig};

/// Adapter over the WebAssembly inference-engine binding.
///
/// The binding ships its capability surface behind a default-export
/// indirection; the adapter unwraps that once at construction so callers
/// always see the same [`ComputeEngine`] shape the native adapter has, plus
/// the nested wasm configuration surface.
#[derive(Debug, Default)]
pub struct WebEngine {
    wasm: WasmConfig,
}

impl WebEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComputeEngine for WebEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Web
    }

    fn wasm(&self) -> Option<&WasmConfig> {
        Some(&self.wasm)
    }
}
