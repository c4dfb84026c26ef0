//! Provider preference order: the OS mapping, the non-empty invariant, and
//! configuration overrides.

use inference_backend::{
    EngineKind, EnvironmentSignals, ExecutionProvider, ExecutionProviders, Resolver,
};

fn providers_for(signals: EnvironmentSignals) -> ExecutionProviders {
    Resolver::with_signals(signals)
        .resolve()
        .expect("builtin engines are compiled in")
        .providers()
        .clone()
}

#[test]
fn test_server_os_mapping_is_exact() {
    let cases = [
        ("macos", vec![ExecutionProvider::CoreMl, ExecutionProvider::Cpu]),
        ("darwin", vec![ExecutionProvider::CoreMl, ExecutionProvider::Cpu]),
        ("linux", vec![ExecutionProvider::Cuda, ExecutionProvider::Cpu]),
        (
            "windows",
            vec![ExecutionProvider::DirectMl, ExecutionProvider::Cpu],
        ),
        (
            "win32",
            vec![ExecutionProvider::DirectMl, ExecutionProvider::Cpu],
        ),
    ];
    for (os, expected) in cases {
        let providers = providers_for(EnvironmentSignals::server(os));
        assert_eq!(
            providers.as_slice(),
            expected.as_slice(),
            "unexpected provider order for OS {os:?}"
        );
    }
}

#[test]
fn test_unknown_server_os_degrades_to_cpu_only() {
    for os in ["freebsd", "plan9", "solaris", ""] {
        let providers = providers_for(EnvironmentSignals::server(os));
        assert_eq!(
            providers.as_slice(),
            &[ExecutionProvider::Cpu],
            "unknown OS {os:?} must fall back to cpu alone"
        );
    }
}

#[test]
fn test_provider_list_is_never_empty() {
    let environments = [
        EnvironmentSignals::server("linux"),
        EnvironmentSignals::server("nonsense"),
        EnvironmentSignals::browser("Mozilla/5.0"),
        EnvironmentSignals::default(),
    ];
    for signals in environments {
        let providers = providers_for(signals.clone());
        assert!(
            !providers.is_empty(),
            "provider list must never be empty for {signals:?}"
        );
    }
}

#[test]
fn test_fallback_provider_matches_engine_convention() {
    // The two portable paths keep their own tokens: the native engine ends
    // with `cpu`, the web engine with `wasm`.
    let native = providers_for(EnvironmentSignals::server("linux"));
    assert_eq!(
        native.as_slice().last(),
        Some(&ExecutionProvider::Cpu)
    );
    assert_eq!(EngineKind::Native.fallback_provider(), ExecutionProvider::Cpu);

    let web = providers_for(EnvironmentSignals::browser("Mozilla/5.0"));
    assert_eq!(web.as_slice().last(), Some(&ExecutionProvider::Wasm));
    assert_eq!(EngineKind::Web.fallback_provider(), ExecutionProvider::Wasm);
}

#[test]
fn test_override_replaces_computed_order() {
    let providers = Resolver::with_signals(EnvironmentSignals::server("linux"))
        .with_providers_override("cpu,cuda")
        .resolve()
        .unwrap()
        .providers()
        .clone();
    assert_eq!(
        providers.as_slice(),
        &[ExecutionProvider::Cpu, ExecutionProvider::Cuda]
    );
}

#[test]
fn test_override_skips_unknown_ids_and_keeps_fallback() {
    let providers = Resolver::with_signals(EnvironmentSignals::server("macos"))
        .with_providers_override("tpu, coreml, npu")
        .resolve()
        .unwrap()
        .providers()
        .clone();
    assert_eq!(
        providers.as_slice(),
        &[ExecutionProvider::CoreMl, ExecutionProvider::Cpu],
        "unknown ids are skipped and the cpu fallback is re-appended"
    );
}

#[test]
fn test_garbage_override_degrades_to_fallback() {
    let providers = Resolver::with_signals(EnvironmentSignals::browser("Mozilla/5.0"))
        .with_providers_override(",,not-a-provider,")
        .resolve()
        .unwrap()
        .providers()
        .clone();
    assert_eq!(providers.as_slice(), &[ExecutionProvider::Wasm]);
}
