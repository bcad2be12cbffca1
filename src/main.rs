use clap::{Parser, Subcommand};
use log::{info, warn};
use preamble_probe::config::ProbeConfig;
use preamble_probe::{CaptureFile, plot, report};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "preamble-probe", version, about = "Explore raw sensor captures")]
struct Cli {
    /// JSON file with `scan` and `survey` settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find preambles, decode headers and summarise frames
    Scan {
        input: PathBuf,

        /// Where to write the chart (default from config)
        #[arg(long)]
        plot: Option<PathBuf>,

        #[arg(long)]
        no_plot: bool,

        /// Decode headers from the exact bit after each preamble
        #[arg(long)]
        realign_bits: bool,

        /// Decoded headers to print as a table
        #[arg(long, default_value_t = 10)]
        table_rows: usize,
    },
    /// Check fixed-size blocks for the marker word and header-like values
    Survey {
        input: PathBuf,

        #[arg(long)]
        block_size: Option<usize>,

        #[arg(long)]
        header_bits: Option<usize>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ProbeConfig::from_json_file(path)?,
        None => ProbeConfig::default(),
    };

    match cli.command {
        Command::Scan {
            input,
            plot: plot_path,
            no_plot,
            realign_bits,
            table_rows,
        } => {
            if let Some(path) = plot_path {
                config.scan.plot_path = path;
            }
            config.scan.realign_bits |= realign_bits;

            let capture = CaptureFile::open(&input)?;
            report::print_preamble(&config.scan.preamble()?);
            let result = capture.scan(&config.scan)?;

            report::print_records_table(&result.records, table_rows)?;
            report::print_summary(&result.summary);

            if no_plot {
                return Ok(());
            }
            let series = result.summary.plot_series();
            if series.is_empty() {
                warn!("no frames decoded, skipping plot");
                return Ok(());
            }
            plot::plot_min_pixels(
                &series,
                &config.scan.plot_path,
                (config.scan.plot_width, config.scan.plot_height),
            )?;
            info!("wrote {}", config.scan.plot_path.display());
        }
        Command::Survey {
            input,
            block_size,
            header_bits,
        } => {
            if let Some(block_size) = block_size {
                config.survey.block_size = block_size;
            }
            if let Some(header_bits) = header_bits {
                config.survey.header_bits = header_bits;
            }

            let capture = CaptureFile::open(&input)?;
            let survey = capture.survey(&config.survey)?;
            report::print_survey(&survey);
        }
    }

    Ok(())
}
