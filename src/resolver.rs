//! 后端解析器 — 一次性选择计算引擎并确定执行提供者的优先顺序
//!
//! Backend resolution. Classifies the execution environment, selects the
//! matching compute engine from the catalog, computes the ordered execution
//! provider list, applies the iOS WebAssembly SIMD mitigation where needed,
//! and publishes the result as read-only process-wide state.
//!
//! The process-global [`resolve`] runs at most once; every later call
//! returns the same [`Resolution`]. [`Resolver`] is the injectable form the
//! global delegates to: tests and the report binary feed it synthetic
//! signals and catalogs.

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::engine::{EngineCatalog, EngineKind, RuntimeHandle};
use crate::environment::{Environment, EnvironmentSignals, OsFamily};
use crate::provider::{ExecutionProvider, ExecutionProviders};
use crate::Result;

/// Comma-separated provider ids replacing the computed preference order.
pub const PROVIDERS_ENV: &str = "INFERENCE_BACKEND_EXECUTION_PROVIDERS";

/// Set to `1` or `true` to disable the WebAssembly SIMD path regardless of
/// user-agent. Ignored on server-like hosts.
pub const DISABLE_WASM_SIMD_ENV: &str = "INFERENCE_BACKEND_DISABLE_WASM_SIMD";

static RESOLUTION: OnceCell<Resolution> = OnceCell::new();

/// Resolve the execution backend for this process.
///
/// The first call classifies the ambient environment and freezes the result;
/// subsequent calls return the same handle and provider list. The only
/// possible error is [`crate::Error::EngineUnavailable`], raised by the
/// engine catalog when the selected adapter is not compiled in; the error is
/// stable across calls since the build does not change.
pub fn resolve() -> Result<&'static Resolution> {
    RESOLUTION.get_or_try_init(|| Resolver::new().resolve())
}

/// Engine handle of the resolved backend.
pub fn runtime_handle() -> Result<&'static RuntimeHandle> {
    resolve().map(Resolution::handle)
}

/// Execution provider preference order of the resolved backend.
pub fn execution_providers() -> Result<&'static ExecutionProviders> {
    resolve().map(Resolution::providers)
}

/// Outcome of backend resolution: the selected engine handle and the frozen
/// execution provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    handle: RuntimeHandle,
    providers: ExecutionProviders,
}

impl Resolution {
    pub fn handle(&self) -> &RuntimeHandle {
        &self.handle
    }

    pub fn providers(&self) -> &ExecutionProviders {
        &self.providers
    }

    pub fn engine_kind(&self) -> EngineKind {
        self.handle.kind()
    }
}

/// Builder-style resolver with injectable signals and catalog.
#[derive(Debug)]
pub struct Resolver {
    signals: EnvironmentSignals,
    catalog: EngineCatalog,
    providers_override: Option<String>,
    disable_wasm_simd: bool,
}

impl Resolver {
    /// Resolver over the ambient process signals, the builtin engine
    /// catalog, and the process environment overrides.
    pub fn new() -> Self {
        Self {
            signals: EnvironmentSignals::ambient(),
            catalog: EngineCatalog::builtin(),
            providers_override: env_providers_override(),
            disable_wasm_simd: env_flag(DISABLE_WASM_SIMD_ENV),
        }
    }

    /// Resolver over synthetic signals, with no environment overrides.
    pub fn with_signals(signals: EnvironmentSignals) -> Self {
        Self {
            signals,
            catalog: EngineCatalog::builtin(),
            providers_override: None,
            disable_wasm_simd: false,
        }
    }

    pub fn with_catalog(mut self, catalog: EngineCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the computed provider order (the [`PROVIDERS_ENV`] form).
    pub fn with_providers_override(mut self, raw: impl Into<String>) -> Self {
        self.providers_override = Some(raw.into());
        self
    }

    /// Force the SIMD mitigation in browser-like contexts (the
    /// [`DISABLE_WASM_SIMD_ENV`] form).
    pub fn with_wasm_simd_disabled(mut self, disabled: bool) -> Self {
        self.disable_wasm_simd = disabled;
        self
    }

    /// Run resolution once and return the outcome.
    ///
    /// Classification and provider mapping are total; the `?` below is the
    /// catalog lookup, the single failure point.
    pub fn resolve(self) -> Result<Resolution> {
        let environment = Environment::classify(&self.signals);
        let kind = match environment {
            Environment::Server { .. } => EngineKind::Native,
            Environment::Browser { .. } => EngineKind::Web,
        };
        let handle = self.catalog.get(kind)?;

        let mut providers = provider_order(&environment);
        if let Some(raw) = self.providers_override.as_deref() {
            providers = ExecutionProviders::parse_override(raw, kind.fallback_provider());
        }

        if let Environment::Browser { wasm_simd_defect } = environment {
            if wasm_simd_defect || self.disable_wasm_simd {
                apply_simd_mitigation(&handle, wasm_simd_defect);
            }
        } else if self.disable_wasm_simd {
            warn!(
                "{} is set but the host is server-like; ignoring",
                DISABLE_WASM_SIMD_ENV
            );
        }

        info!(
            engine = %kind,
            providers = %providers,
            "resolved execution backend"
        );
        Ok(Resolution { handle, providers })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Provider preference order for a classified environment.
///
/// Server-like hosts lead with the OS-specific accelerated provider and end
/// with `cpu`; hosts with no accelerated entry get `cpu` alone. Browser-like
/// hosts run on `wasm`.
fn provider_order(environment: &Environment) -> ExecutionProviders {
    match environment {
        Environment::Server { os } => {
            let preferred: &[ExecutionProvider] = match os {
                OsFamily::MacOs => &[ExecutionProvider::CoreMl],
                OsFamily::Linux => &[ExecutionProvider::Cuda],
                OsFamily::Windows => &[ExecutionProvider::DirectMl],
                OsFamily::Other => &[],
            };
            ExecutionProviders::with_fallback(preferred, ExecutionProvider::Cpu)
        }
        Environment::Browser { .. } => {
            ExecutionProviders::with_fallback(&[], ExecutionProvider::Wasm)
        }
    }
}

/// Disable the vectorized WebAssembly path on the selected engine. Affects
/// the performance of subsequently loaded models, not their results.
fn apply_simd_mitigation(handle: &RuntimeHandle, from_user_agent: bool) {
    let reason = if from_user_agent { "user-agent" } else { "override" };
    match handle.wasm() {
        Some(wasm) => {
            wasm.set_simd(false);
            info!(reason, "disabled WebAssembly SIMD");
        }
        None => warn!("selected engine has no wasm configuration surface"),
    }
}

fn env_providers_override() -> Option<String> {
    std::env::var(PROVIDERS_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).ok().as_deref().map(str::trim),
        Some("1") | Some("true")
    )
}
