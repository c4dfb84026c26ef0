//! Standalone binary reporting the resolved execution backend.
//! Used to check what engine and provider order a host would get.
//!
//! Usage:
//!   backend-report                       Report for the current process
//!   backend-report --os <identifier>     Simulate a server host with this OS
//!   backend-report --ua <user-agent>     Simulate a browser host
//!   backend-report --json                Machine-readable output

use inference_backend::{Environment, EnvironmentSignals, Resolver};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut signals: Option<EnvironmentSignals> = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--os" => {
                let os = args.get(i + 1).ok_or_else(|| anyhow::anyhow!("--os needs a value"))?;
                signals = Some(EnvironmentSignals::server(os.as_str()));
                i += 2;
            }
            "--ua" => {
                let ua = args.get(i + 1).ok_or_else(|| anyhow::anyhow!("--ua needs a value"))?;
                signals = Some(EnvironmentSignals::browser(ua.as_str()));
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }

    // Simulated hosts resolve purely from the given signals; the ambient
    // report goes through the full path, environment overrides included.
    let (environment, resolution) = match signals {
        Some(s) => (Environment::classify(&s), Resolver::with_signals(s).resolve()?),
        None => (
            Environment::classify(&EnvironmentSignals::ambient()),
            Resolver::new().resolve()?,
        ),
    };

    if json {
        let report = serde_json::json!({
            "environment": environment,
            "engine": resolution.engine_kind(),
            "execution_providers": resolution.providers().ids(),
            "wasm_simd": resolution.handle().wasm().map(|w| w.simd()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== Execution Backend Report ===");
    println!("environment:         {environment:?}");
    println!("engine:              {}", resolution.engine_kind());
    println!("execution providers: {}", resolution.providers());
    if let Some(wasm) = resolution.handle().wasm() {
        println!("wasm simd:           {}", wasm.simd());
        println!("wasm threads:        {}", wasm.num_threads());
    }
    Ok(())
}

fn print_usage() {
    println!(
        r#"backend-report — execution backend diagnostic

USAGE:
    backend-report [OPTIONS]

OPTIONS:
    --os <identifier>    Simulate a server-like host with this OS identifier
    --ua <user-agent>    Simulate a browser-like host with this user-agent
    --json               Machine-readable output
    -h, --help           Show this help message

ENVIRONMENT:
    INFERENCE_BACKEND_EXECUTION_PROVIDERS   Override the provider order
    INFERENCE_BACKEND_DISABLE_WASM_SIMD     Force-disable WebAssembly SIMD"#
    );
}
