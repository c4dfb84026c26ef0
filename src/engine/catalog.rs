use super::{EngineKind, RuntimeHandle};
use crate::error::Error;
use crate::Result;

#[cfg(any(feature = "native-engine", feature = "web-engine"))]
use once_cell::sync::Lazy;
#[cfg(any(feature = "native-engine", feature = "web-engine"))]
use std::sync::Arc;

// One shared instance per compiled-in adapter. Every catalog hands out the
// same handle identity for a given kind, which keeps repeated resolution
// referring to the same engine.
#[cfg(feature = "native-engine")]
static NATIVE: Lazy<RuntimeHandle> =
    Lazy::new(|| RuntimeHandle::new(Arc::new(super::NativeEngine::new())));

#[cfg(feature = "web-engine")]
static WEB: Lazy<RuntimeHandle> =
    Lazy::new(|| RuntimeHandle::new(Arc::new(super::WebEngine::new())));

/// Catalog of loaded compute engines.
///
/// This is the module-loading collaborator: it owns whatever engine handles
/// this build carries and hands them out by kind. A request for an engine
/// the catalog does not hold is the one failure in this crate, reported as
/// [`Error::EngineUnavailable`] together with the cargo feature that would
/// compile the missing adapter in.
#[derive(Debug, Clone)]
pub struct EngineCatalog {
    native: Option<RuntimeHandle>,
    web: Option<RuntimeHandle>,
}

impl EngineCatalog {
    /// Catalog of the adapters compiled into this build.
    pub fn builtin() -> Self {
        Self {
            #[cfg(feature = "native-engine")]
            native: Some(NATIVE.clone()),
            #[cfg(not(feature = "native-engine"))]
            native: None,
            #[cfg(feature = "web-engine")]
            web: Some(WEB.clone()),
            #[cfg(not(feature = "web-engine"))]
            web: None,
        }
    }

    /// Catalog with no engines. Test seam for exercising the unavailable
    /// path without rebuilding with features off.
    pub fn empty() -> Self {
        Self {
            native: None,
            web: None,
        }
    }

    /// Install (or replace) the handle for its kind.
    pub fn with_engine(mut self, handle: RuntimeHandle) -> Self {
        match handle.kind() {
            EngineKind::Native => self.native = Some(handle),
            EngineKind::Web => self.web = Some(handle),
        }
        self
    }

    pub fn available(&self, kind: EngineKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Normalized handle for the requested engine.
    pub fn get(&self, kind: EngineKind) -> Result<RuntimeHandle> {
        self.slot(kind).cloned().ok_or(Error::EngineUnavailable {
            kind,
            feature_flag: kind.feature_flag(),
        })
    }

    fn slot(&self, kind: EngineKind) -> Option<&RuntimeHandle> {
        match kind {
            EngineKind::Native => self.native.as_ref(),
            EngineKind::Web => self.web.as_ref(),
        }
    }
}

impl Default for EngineCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
