use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pchem - numeric companions to introductory physical chemistry: oscillator wavefunctions, normal modes, particle in a box, and reaction mechanisms.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample harmonic-oscillator levels, tabulate transition integrals, and solve the normal modes.
    Vibrational(VibrationalArgs),
    /// Solve the normal modes of two masses coupled by three springs.
    Modes(ModesArgs),
    /// Energies and position probabilities of a particle in a one-dimensional box.
    #[command(name = "box")]
    ParticleBox(BoxArgs),
    /// Check proposed reaction mechanisms against the overall reaction and observed rate law.
    Mechanism(MechanismArgs),
}

/// Arguments for the `vibrational` subcommand.
#[derive(Args, Debug)]
pub struct VibrationalArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Oscillator Overrides ---
    /// Override the highest oscillator level to sample (levels start at 0).
    #[arg(short = 'n', long, value_name = "INT")]
    pub max_level: Option<u32>,

    /// Override the oscillator force constant.
    #[arg(short = 'k', long, value_name = "FLOAT")]
    pub force_constant: Option<f64>,

    /// Override the oscillator mass.
    #[arg(short, long, value_name = "FLOAT")]
    pub mass: Option<f64>,

    // --- Output ---
    /// Write the full report as TOML to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the sampled wavefunctions as CSV to this path.
    #[arg(long, value_name = "PATH")]
    pub samples: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S grid.step=0.005
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `modes` subcommand.
#[derive(Args, Debug)]
pub struct ModesArgs {
    /// Spring constant between the first mass and the wall.
    #[arg(allow_negative_numbers = true)]
    pub k1: f64,
    /// Spring constant added to both diagonal terms.
    #[arg(allow_negative_numbers = true)]
    pub k2: f64,
    /// Coupling spring constant between the two masses.
    #[arg(allow_negative_numbers = true)]
    pub k3: f64,

    /// Mass of each oscillator, used to convert eigenvalues into frequencies.
    #[arg(long, default_value_t = 1.0, value_name = "FLOAT")]
    pub mass: f64,
}

/// Arguments for the `box` subcommand.
#[derive(Args, Debug)]
pub struct BoxArgs {
    /// Length of the box.
    #[arg(short, long, value_name = "FLOAT")]
    pub length: f64,

    /// Particle mass.
    #[arg(short, long, default_value_t = 1.0, value_name = "FLOAT")]
    pub mass: f64,

    /// Reduced Planck constant in the chosen unit system.
    #[arg(long, default_value_t = 1.0, value_name = "FLOAT")]
    pub hbar: f64,

    /// Number of levels to report, starting from n = 1.
    #[arg(short = 'n', long, default_value_t = 3, value_name = "INT")]
    pub levels: u32,

    /// Lower bound of the region whose probability is reported.
    #[arg(long, requires = "to", allow_negative_numbers = true, value_name = "FLOAT")]
    pub from: Option<f64>,

    /// Upper bound of the region whose probability is reported.
    #[arg(long, requires = "from", allow_negative_numbers = true, value_name = "FLOAT")]
    pub to: Option<f64>,
}

/// Arguments for the `mechanism` subcommand.
#[derive(Args, Debug)]
pub struct MechanismArgs {
    /// One or more mechanism files in TOML format.
    #[arg(required = true, value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Write the analysis reports as TOML to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
