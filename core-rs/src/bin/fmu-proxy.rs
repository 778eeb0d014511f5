//! fmu-proxy - FMU proxy server CLI
//!
//! Command-line interface over the descriptor and launch library

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use fmu_proxy::{
    check_java_version_for_fmu_proxy, get_local_open_port, JavaRuntime, ProxyConfig, ProxyServer,
    SystemSpawner, TcpPortProbe,
};

#[derive(Parser)]
#[command(name = "fmu-proxy")]
#[command(version)]
#[command(about = "FMU proxy server broker", long_about = None)]
struct Cli {
    /// Settings file (YAML)
    #[arg(long, global = true, default_value = "fmu-proxy.yaml")]
    config: PathBuf,
    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical descriptor and its endpoint as JSON
    Endpoint {
        /// Descriptor (e.g., localhost:9090?file=model.fmu)
        descriptor: String,
    },
    /// Print the command that starts a local proxy
    Command {
        /// Legacy descriptor (e.g., localhost:9090?guid=abc)
        descriptor: String,
        /// FMU to wrap (defaults to the descriptor's file)
        #[arg(long)]
        fmu: Option<String>,
        /// Use paths relative to a packaged distribution
        #[arg(long)]
        package: bool,
    },
    /// Start a local proxy and print its PID
    ///
    /// Without --wait the proxy is left running with its output discarded.
    Run {
        /// Legacy descriptor (e.g., localhost:9090?guid=abc)
        descriptor: String,
        /// FMU to wrap (defaults to the descriptor's file)
        #[arg(long)]
        fmu: Option<String>,
        /// Stay attached until the proxy exits
        #[arg(long)]
        wait: bool,
    },
    /// Print the first free local port
    FreePort {
        /// First port to try (defaults to scanStartPort)
        #[arg(long)]
        start: Option<u16>,
    },
    /// Check that the configured Java runtime can host the proxy
    CheckJava,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_descriptor(text: &str) -> Result<ProxyServer> {
    ProxyServer::parse(text).with_context(|| format!("Parsing descriptor '{}'", text))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ProxyConfig::load(&cli.config)
        .with_context(|| format!("Loading {}", cli.config.display()))?;

    match cli.command {
        Commands::Endpoint { descriptor } => {
            let server = parse_descriptor(&descriptor)?;
            println!("{}", server.endpoint_str());
            println!("{}", server.endpoint().to_json()?);
        }
        Commands::Command { descriptor, fmu, package } => {
            let server = parse_descriptor(&descriptor)?;
            let argv =
                server.get_local_fmu_proxy_command(&config.launcher()?, fmu.as_deref(), package)?;
            println!("{}", argv.join(" "));
        }
        Commands::Run { descriptor, fmu, wait } => {
            let server = parse_descriptor(&descriptor)?;
            let spawner = if wait {
                SystemSpawner::piped()
            } else {
                SystemSpawner::detached()
            };
            let launcher = config.launcher()?.with_spawner(spawner);
            let child = server.run_local_fmu_proxy(&launcher, fmu.as_deref())?;
            println!("{}", child.id());
            if wait {
                let output = child.wait_with_output().context("Waiting for proxy server")?;
                eprint!("{}", String::from_utf8_lossy(&output.stderr));
                print!("{}", String::from_utf8_lossy(&output.stdout));
                println!("Proxy server exited with {}", output.status);
            }
        }
        Commands::FreePort { start } => {
            let start = start.unwrap_or(config.scan_start_port);
            let port = get_local_open_port(&TcpPortProbe, start)?;
            println!("{}", port);
        }
        Commands::CheckJava => {
            let version = check_java_version_for_fmu_proxy(&JavaRuntime::new(&config.runtime))?;
            println!("Java {} is supported", version);
        }
    }

    Ok(())
}
