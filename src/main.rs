use anyhow::Result;
use swrisk::cli::{parse_args, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logging();
    let cli = parse_args();

    match cli.command {
        Commands::Calculate {
            project,
            format,
            output,
            config,
            root,
            standards_review,
        } => {
            let calculate_config = swrisk::commands::CalculateConfig {
                project,
                format: format.map(Into::into),
                output,
                config,
                root,
                standards_review,
            };
            swrisk::commands::handle_calculate(calculate_config)
        }
        Commands::Phases => swrisk::commands::write_phase_table(&mut std::io::stdout()),
        Commands::Init { force } => swrisk::commands::init_config(force),
    }
}

// Log records from the `log` facade are forwarded to the same subscriber.
fn init_logging() {
    let filter = EnvFilter::try_from_env("SWRISK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
