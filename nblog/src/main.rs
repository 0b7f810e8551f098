use color_eyre::eyre::{Context, Result};
use log::{LevelFilter, debug};
use nblog::{
  cli::{Cli, Commands},
  commands,
};
use nblog_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .parse_default_env()
    .init();

  let output = cli.output.as_deref();

  // Init writes the config file, so it must not require one to load
  if let Commands::Init {
    path,
    format,
    force,
  } = &cli.command
  {
    return commands::init(path, format, *force);
  }

  let config = Config::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")?;
  debug!("Configuration: {config:?}");

  // Setup thread pool once for all parallel operations
  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build_global()
    .wrap_err("Failed to set up thread pool")?;

  match &cli.command {
    Commands::Init { .. } => Ok(()),
    Commands::Toc {
      input,
      page_id,
      all,
      annotate,
    } => {
      commands::toc(
        &config,
        input,
        page_id.as_deref(),
        *all,
        *annotate,
        output,
      )
    },
    Commands::ReadingTime {
      input,
      page_id,
      summary,
      last_edited,
    } => {
      commands::reading_time(
        &config,
        input,
        page_id.as_deref(),
        summary.as_deref(),
        last_edited.as_deref(),
        output,
      )
    },
    Commands::Posts { input, record_map } => {
      commands::posts(&config, input, record_map.as_deref(), output)
    },
    Commands::Series {
      input,
      current,
      page,
    } => commands::series(&config, input, current, *page, output),
  }
}
