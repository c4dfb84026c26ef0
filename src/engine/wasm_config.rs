use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// WebAssembly execution configuration of the web engine.
///
/// The toggles are atomics because the engine handle is shared process-wide;
/// writes happen during resolution (the iOS SIMD mitigation) or from host
/// configuration, reads happen whenever the engine compiles a model. They
/// affect performance characteristics only, never correctness.
#[derive(Debug)]
pub struct WasmConfig {
    simd: AtomicBool,
    num_threads: AtomicUsize,
}

impl WasmConfig {
    pub fn new() -> Self {
        Self {
            simd: AtomicBool::new(true),
            num_threads: AtomicUsize::new(1),
        }
    }

    /// Whether the vectorized (SIMD) execution path is enabled.
    pub fn simd(&self) -> bool {
        self.simd.load(Ordering::Acquire)
    }

    pub fn set_simd(&self, enabled: bool) {
        self.simd.store(enabled, Ordering::Release);
    }

    /// Worker threads the engine may spawn for kernel execution.
    pub fn num_threads(&self) -> usize {
        self.num_threads.load(Ordering::Acquire)
    }

    pub fn set_num_threads(&self, threads: usize) {
        self.num_threads.store(threads.max(1), Ordering::Release);
    }
}

impl Default for WasmConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simd_enabled_by_default() {
        let cfg = WasmConfig::new();
        assert!(cfg.simd());
        assert_eq!(cfg.num_threads(), 1);
    }

    #[test]
    fn test_toggles_round_trip() {
        let cfg = WasmConfig::new();
        cfg.set_simd(false);
        assert!(!cfg.simd());
        cfg.set_num_threads(4);
        assert_eq!(cfg.num_threads(), 4);
        // At least one thread is always kept.
        cfg.set_num_threads(0);
        assert_eq!(cfg.num_threads(), 1);
    }
}
