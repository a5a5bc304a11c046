use anyhow::Context;
use clap::Parser;
use pkg_constants::env::DEFAULT_USER;
use pkg_nsx::{ConnectionArgs, NsxClient};
use pkg_reclaim::{ReclaimArgs, ReclaimEvent};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "nsx-ipclean",
    about = "Find IP pool allocations not used by any load balancer or NAT rule"
)]
struct Cli {
    /// Tier-0 logical router whose NAT rules use pool addresses
    #[arg(long)]
    t0_id: Option<String>,

    /// IP pool to reconcile
    #[arg(long)]
    pool_id: Option<String>,

    /// IP address of the NSX manager (or set NSX_MANAGER)
    #[arg(long)]
    nsx_ip: Option<String>,

    /// NSX user name if other than admin (or set NSX_USER)
    #[arg(long, default_value = DEFAULT_USER)]
    nsx_user: String,

    /// NSX password (or set NSX_PASS)
    #[arg(long)]
    nsx_pass: Option<String>,

    /// Release orphaned addresses back to the pool
    #[arg(long, default_value_t = false)]
    delete: bool,
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

    let args = ReclaimArgs {
        connection: ConnectionArgs {
            manager: cli.nsx_ip,
            user: cli.nsx_user,
            password: cli.nsx_pass,
        },
        t0_id: cli.t0_id,
        pool_id: cli.pool_id,
        delete: cli.delete,
    };
    let cfg = match args.resolve(&|key: &str| std::env::var(key).ok()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: nsx-ipclean --t0-id <ID> --pool-id <ID> --nsx-ip <HOST> --nsx-pass <PASS> [--nsx-user <USER>] [--delete]");
            std::process::exit(1);
        }
    };

    warn!(
        "TLS certificate verification is disabled for {}",
        cfg.connection.manager
    );
    let client = NsxClient::new(&cfg.connection)?;
    info!("Reconciling pool {} against router {}", cfg.pool_id, cfg.t0_id);

    let summary = pkg_reclaim::run(&client, &cfg, &mut |event| match event {
        ReclaimEvent::Orphaned(ip) => println!("{}", ip),
        ReclaimEvent::Released(ip) => println!("Released {}", ip),
    })
    .await
    .context("IP reconciliation failed")?;

    info!(
        "{} allocated, {} orphaned, {} released",
        summary.allocated,
        summary.orphaned.len(),
        summary.released
    );
    Ok(())
}
