use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use pkg_constants::env::DEFAULT_USER;
use pkg_constants::traceflow::{DEFAULT_SRC_PORT, POLL_INTERVAL_MS};
use pkg_nsx::{ConnectionArgs, NsxClient};
use pkg_traceflow::report::path_lines;
use pkg_traceflow::{PollOptions, TraceflowArgs, usage};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "nsx-traceflow",
    about = "Trace a TCP SYN between two pods through NSX and report whether it was delivered"
)]
struct Cli {
    /// IP address of the NSX manager (or set NSX_MANAGER)
    #[arg(long)]
    nsx_ip: Option<String>,

    /// NSX user name if other than admin (or set NSX_USER)
    #[arg(long, default_value = DEFAULT_USER)]
    nsx_user: String,

    /// NSX password (or set NSX_PASS)
    #[arg(long)]
    nsx_pass: Option<String>,

    /// Kubernetes namespace of the source pod
    #[arg(long)]
    namespace: Option<String>,

    /// Pod name of the source
    #[arg(long)]
    src_pod: Option<String>,

    /// TCP port of the source
    #[arg(long, default_value = DEFAULT_SRC_PORT)]
    src_port: Option<String>,

    /// Pod name of the destination
    #[arg(long)]
    dst_pod: Option<String>,

    /// TCP port of the destination
    #[arg(long)]
    dst_port: Option<String>,

    /// Namespace of the destination pod, if different from the source
    #[arg(long)]
    dst_namespace: Option<String>,

    /// Optional text payload
    #[arg(long)]
    payload: Option<String>,

    /// Print every observation along the simulated path
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Give up after this many status checks (default: wait for the manager)
    #[arg(long)]
    max_polls: Option<u32>,

    /// Delay between status checks, in milliseconds
    #[arg(long, default_value_t = POLL_INTERVAL_MS)]
    poll_interval_ms: u64,
}

impl Cli {
    fn trace_args(&self) -> TraceflowArgs {
        TraceflowArgs {
            connection: ConnectionArgs {
                manager: self.nsx_ip.clone(),
                user: self.nsx_user.clone(),
                password: self.nsx_pass.clone(),
            },
            namespace: self.namespace.clone(),
            src_pod: self.src_pod.clone(),
            src_port: self.src_port.clone(),
            dst_pod: self.dst_pod.clone(),
            dst_port: self.dst_port.clone(),
            dst_namespace: self.dst_namespace.clone(),
            payload: self.payload.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let cfg = match cli.trace_args().resolve(&|key: &str| std::env::var(key).ok()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}\n", e);
            eprint!("{}", usage());
            std::process::exit(1);
        }
    };
    let opts = PollOptions {
        interval: Duration::from_millis(cli.poll_interval_ms),
        max_polls: cli.max_polls,
    };

    warn!(
        "TLS certificate verification is disabled for {}",
        cfg.connection.manager
    );
    let client = NsxClient::new(&cfg.connection)?;
    info!(
        "Tracing {}:{} -> {}:{} via {}",
        cfg.src,
        cfg.src_port,
        cfg.dst,
        cfg.dst_port,
        client.base_url()
    );

    let mut ticked = false;
    let result = pkg_traceflow::run(&client, &cfg, &opts, &mut |n| {
        if n == 0 {
            print!("Traceflow in progress ");
        }
        print!(".");
        let _ = std::io::stdout().flush();
        ticked = true;
    })
    .await;
    if ticked {
        println!();
    }
    let outcome = result.context("traceflow failed")?;

    if cli.verbose {
        for line in path_lines(&outcome.job.observations) {
            println!("{}", line);
        }
    }
    for line in outcome.report.lines() {
        println!("{}", line);
    }

    Ok(())
}
