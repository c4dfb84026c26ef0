use super::{ComputeEngine, EngineKind};

/// Adapter over the native inference-engine binding.
///
/// The binding exposes model loading and inference directly on its module
/// surface; normalization here is the identity, the adapter only pins the
/// surface to [`ComputeEngine`].
#[derive(Debug, Default)]
pub struct NativeEngine {
    _private: (),
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComputeEngine for NativeEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Native
    }
}
