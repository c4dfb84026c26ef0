//! 运行环境分类 — 识别服务端进程与浏览器进程并归一化宿主操作系统
//!
//! Execution environment classification. Reduces the ambient signals of the
//! host process (server-runtime marker, operating-system identifier, browser
//! user-agent) to a small descriptor the resolver maps to an engine and a
//! provider order.
//!
//! Classification is a total function: unknown operating systems and
//! unrecognized user-agents never fail, they fall through to the portable
//! defaults.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Matches the device tokens of iOS phones, tablets and media players.
/// Recent iOS WebAssembly engines miscompile SIMD code, so these hosts get
/// the vectorized path disabled.
static IOS_DEVICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"iP(hone|od|ad)").expect("iOS device pattern is valid"));

/// Operating-system family of a server-like host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    MacOs,
    Linux,
    Windows,
    /// Anything the provider mapping has no acceleration entry for.
    Other,
}

impl OsFamily {
    /// Normalize an OS identifier. Accepts both the Rust target names
    /// (`macos`, `windows`) and the node-style platform names (`darwin`,
    /// `win32`) so host-supplied identifiers from either convention classify
    /// the same way.
    pub fn from_identifier(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => OsFamily::MacOs,
            "linux" => OsFamily::Linux,
            "windows" | "win32" => OsFamily::Windows,
            _ => OsFamily::Other,
        }
    }
}

/// Ambient inputs consumed by classification.
///
/// Reified as a plain struct so classification stays a pure function;
/// [`EnvironmentSignals::ambient`] reads the real process signals, tests and
/// the report binary construct synthetic ones.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSignals {
    /// Whether the process runs under a server-side runtime.
    pub server_runtime: bool,
    /// Host operating-system identifier, when known.
    pub os_identifier: Option<String>,
    /// Browser user-agent string, when the host exposes one.
    pub user_agent: Option<String>,
}

impl EnvironmentSignals {
    /// Read the signals of the current process.
    ///
    /// Native builds are server-like and report the compile-target OS.
    /// `wasm32` builds are browser-like; the user-agent is left unset unless
    /// the embedding host passes one in (no mitigation is applied without
    /// it, which is the safe default).
    pub fn ambient() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                server_runtime: true,
                os_identifier: Some(std::env::consts::OS.to_string()),
                user_agent: None,
            }
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self {
                server_runtime: false,
                os_identifier: None,
                user_agent: None,
            }
        }
    }

    /// Signals of a server-like host with the given OS identifier.
    pub fn server(os_identifier: impl Into<String>) -> Self {
        Self {
            server_runtime: true,
            os_identifier: Some(os_identifier.into()),
            user_agent: None,
        }
    }

    /// Signals of a browser-like host with the given user-agent.
    pub fn browser(user_agent: impl Into<String>) -> Self {
        Self {
            server_runtime: false,
            os_identifier: None,
            user_agent: Some(user_agent.into()),
        }
    }
}

/// Classified execution environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Environment {
    /// Server-side runtime; the OS family drives provider selection.
    Server { os: OsFamily },
    /// Browser runtime; `wasm_simd_defect` records whether the host is an
    /// iOS device with the known SIMD miscompilation.
    Browser { wasm_simd_defect: bool },
}

impl Environment {
    /// Classify the environment from its signals.
    pub fn classify(signals: &EnvironmentSignals) -> Self {
        if signals.server_runtime {
            let os = signals
                .os_identifier
                .as_deref()
                .map(OsFamily::from_identifier)
                .unwrap_or(OsFamily::Other);
            tracing::debug!(?os, "classified server-like environment");
            Environment::Server { os }
        } else {
            let wasm_simd_defect = signals
                .user_agent
                .as_deref()
                .map(|ua| IOS_DEVICE.is_match(ua))
                .unwrap_or(false);
            tracing::debug!(wasm_simd_defect, "classified browser-like environment");
            Environment::Browser { wasm_simd_defect }
        }
    }

    pub fn is_server(&self) -> bool {
        matches!(self, Environment::Server { .. })
    }

    pub fn is_browser(&self) -> bool {
        matches!(self, Environment::Browser { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_family_accepts_both_naming_conventions() {
        let cases = [
            ("macos", OsFamily::MacOs),
            ("darwin", OsFamily::MacOs),
            ("linux", OsFamily::Linux),
            ("windows", OsFamily::Windows),
            ("win32", OsFamily::Windows),
            ("freebsd", OsFamily::Other),
            ("", OsFamily::Other),
        ];
        for (id, expected) in cases {
            assert_eq!(
                OsFamily::from_identifier(id),
                expected,
                "identifier {id:?} should classify as {expected:?}"
            );
        }
    }

    #[test]
    fn test_server_classification_without_os_degrades_to_other() {
        let signals = EnvironmentSignals {
            server_runtime: true,
            os_identifier: None,
            user_agent: None,
        };
        assert_eq!(
            Environment::classify(&signals),
            Environment::Server {
                os: OsFamily::Other
            }
        );
    }

    #[test]
    fn test_browser_classification_detects_ios_devices() {
        let affected = [
            "Mozilla/5.0 (iPhone; CPU iPhone OS 16_4 like Mac OS X) AppleWebKit/605.1.15",
            "Mozilla/5.0 (iPad; CPU OS 16_4 like Mac OS X) AppleWebKit/605.1.15",
            "Mozilla/5.0 (iPod touch; CPU iPhone OS 15_0 like Mac OS X)",
        ];
        for ua in affected {
            assert_eq!(
                Environment::classify(&EnvironmentSignals::browser(ua)),
                Environment::Browser {
                    wasm_simd_defect: true
                },
                "user-agent {ua:?} should flag the SIMD defect"
            );
        }
    }

    #[test]
    fn test_browser_classification_ignores_desktop_user_agents() {
        let unaffected = [
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/118.0",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 Safari/605.1.15",
            "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/118.0",
        ];
        for ua in unaffected {
            assert_eq!(
                Environment::classify(&EnvironmentSignals::browser(ua)),
                Environment::Browser {
                    wasm_simd_defect: false
                },
                "user-agent {ua:?} should not flag the SIMD defect"
            );
        }
    }

    #[test]
    fn test_browser_classification_without_user_agent() {
        let signals = EnvironmentSignals {
            server_runtime: false,
            os_identifier: None,
            user_agent: None,
        };
        assert_eq!(
            Environment::classify(&signals),
            Environment::Browser {
                wasm_simd_defect: false
            }
        );
    }
}
