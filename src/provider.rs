//! Execution provider identifiers and the ordered preference list handed to
//! the compute engine.

use serde::{Deserialize, Serialize};

/// Hardware execution provider understood by the underlying engines.
///
/// The identifiers are the exact lowercase tokens the engines negotiate with;
/// [`ExecutionProvider::id`] and the serde form both produce them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionProvider {
    /// Portable software path of the native engine.
    Cpu,
    /// Portable software path of the web engine.
    Wasm,
    /// NVIDIA CUDA (native engine, Linux hosts).
    Cuda,
    /// Apple CoreML (native engine, macOS hosts).
    CoreMl,
    /// DirectML (native engine, Windows hosts).
    DirectMl,
    /// WebGPU (web engine; not yet part of any default order).
    WebGpu,
}

impl ExecutionProvider {
    pub fn id(&self) -> &'static str {
        match self {
            ExecutionProvider::Cpu => "cpu",
            ExecutionProvider::Wasm => "wasm",
            ExecutionProvider::Cuda => "cuda",
            ExecutionProvider::CoreMl => "coreml",
            ExecutionProvider::DirectMl => "directml",
            ExecutionProvider::WebGpu => "webgpu",
        }
    }

    /// Parse a provider id. Unknown ids return `None`; callers decide whether
    /// to skip or report them.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "cpu" => Some(ExecutionProvider::Cpu),
            "wasm" => Some(ExecutionProvider::Wasm),
            "cuda" => Some(ExecutionProvider::Cuda),
            "coreml" => Some(ExecutionProvider::CoreMl),
            "directml" => Some(ExecutionProvider::DirectMl),
            "webgpu" => Some(ExecutionProvider::WebGpu),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExecutionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Ordered provider preference list.
///
/// Earlier entries are attempted first by the engine. The list is assembled
/// during resolution and frozen afterwards; it is never empty, and always
/// ends with the guaranteed-available software fallback of the selected
/// engine: `cpu` for the native engine, `wasm` for the web engine. The
/// tokens stay distinct, each engine names its own portable path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionProviders(Vec<ExecutionProvider>);

impl ExecutionProviders {
    /// Build a list from the preferred order, appending `fallback` unless it
    /// is already present.
    pub fn with_fallback(preferred: &[ExecutionProvider], fallback: ExecutionProvider) -> Self {
        let mut order: Vec<ExecutionProvider> = Vec::with_capacity(preferred.len() + 1);
        for p in preferred {
            if !order.contains(p) {
                order.push(*p);
            }
        }
        if !order.contains(&fallback) {
            order.push(fallback);
        }
        Self(order)
    }

    /// Parse a comma-separated id list (configuration override form).
    ///
    /// Unknown and duplicate ids are skipped with a warning. The `fallback`
    /// provider is appended if the override leaves it out, so the resulting
    /// list is always viable.
    pub fn parse_override(raw: &str, fallback: ExecutionProvider) -> Self {
        let mut order = Vec::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match ExecutionProvider::from_id(token) {
                Some(p) if !order.contains(&p) => order.push(p),
                Some(_) => {}
                None => {
                    tracing::warn!("ignoring unknown execution provider id: {token:?}");
                }
            }
        }
        Self::with_fallback(&order, fallback)
    }

    pub fn as_slice(&self) -> &[ExecutionProvider] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = ExecutionProvider> + '_ {
        self.0.iter().copied()
    }

    pub fn first(&self) -> ExecutionProvider {
        self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, provider: ExecutionProvider) -> bool {
        self.0.contains(&provider)
    }

    /// Ids in preference order, for logs and reports.
    pub fn ids(&self) -> Vec<&'static str> {
        self.0.iter().map(|p| p.id()).collect()
    }
}

impl std::fmt::Display for ExecutionProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ids().join(", "))
    }
}

impl<'a> IntoIterator for &'a ExecutionProviders {
    type Item = ExecutionProvider;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ExecutionProvider>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
