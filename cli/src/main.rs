//! `cek-labs`: generate a student's lab dataset from the command line
//!
//! ```text
//! cek-labs generate --lab crystal-violet --student-id 123456 \
//!     --params '{"volumes": {"cv": 10, "oh": 10, "h2o": 10}, "temperature": 298.15}'
//! cek-labs samples --lab statistics
//! ```
//!
//! Data goes to stdout; diagnostics go to stderr through `tracing`.

use std::process::ExitCode;

use cek_labs_core::{new_lab, LabKind, LabParameters};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cek-labs", version, about = "Synthetic datasets for CEK virtual labs")]
struct Cli {
    /// Log generation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a dataset and print it as CSV
    Generate {
        /// Lab to run (surface-adsorption, crystal-violet, bomb-calorimetry, statistics)
        #[arg(short, long)]
        lab: LabKind,

        /// Student ID seeding the dataset
        #[arg(short, long)]
        student_id: String,

        /// Lab parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,

        /// Include the column header and metadata comments
        #[arg(short, long)]
        document: bool,
    },
    /// List the accepted values of a lab's `sample` parameter
    Samples {
        #[arg(short, long)]
        lab: LabKind,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_params(raw: &str) -> Result<LabParameters, String> {
    match serde_json::from_str(raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err("--params must be a JSON object".to_string()),
        Err(e) => Err(format!("--params is not valid JSON: {}", e)),
    }
}

fn run(command: Command) -> Result<String, String> {
    match command {
        Command::Generate {
            lab,
            student_id,
            params,
            document,
        } => {
            let params = parse_params(&params)?;
            let mut generator = new_lab(lab);
            generator
                .set_student_id_str(&student_id)
                .map_err(|e| e.to_string())?;
            generator.set_parameters(&params).map_err(|e| e.to_string())?;

            let dataset = generator.create_data_for_lab().map_err(|e| e.to_string())?;
            debug!(
                lab = %lab,
                points = dataset.len(),
                fingerprint = %dataset.fingerprint(),
                "dataset ready"
            );
            Ok(if document {
                dataset.to_csv_document()
            } else {
                dataset.to_csv()
            })
        }
        Command::Samples { lab } => {
            let samples = new_lab(lab).available_samples();
            if samples.is_empty() {
                return Err(format!("{} has no sample parameter", lab));
            }
            Ok(samples.iter().map(|s| format!("{}\n", s)).collect())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}
