//! CLI argument definitions for the loan approval front-end.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use loan_model::CategoricalField;

#[derive(Parser)]
#[command(
    name = "loan-approval",
    version,
    about = "Loan approval - score one applicant with a pre-trained classifier",
    long_about = "Score one loan application with a pre-trained binary classifier.\n\n\
                  The form answers are encoded onto the training feature schema\n\
                  (columns_set.json) and scored by the model artifact (model.json)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow applicant names, incomes and feature rows in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

#[derive(Args)]
pub struct ArtifactArgs {
    /// Directory holding columns_set.json and model.json
    /// (default: $LOAN_ARTIFACTS_DIR, then the bundled artifacts/).
    #[arg(long = "artifacts-dir", value_name = "DIR", global = true)]
    pub artifacts_dir: Option<PathBuf>,

    /// Feature schema artifact (overrides --artifacts-dir).
    #[arg(long = "schema", value_name = "PATH", global = true)]
    pub schema: Option<PathBuf>,

    /// Model artifact (overrides --artifacts-dir).
    #[arg(long = "model", value_name = "PATH", global = true)]
    pub model: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score one applicant and print the decision.
    Predict(PredictArgs),

    /// Print the feature row an applicant encodes to, without scoring it.
    Encode(EncodeArgs),

    /// List the schema features and their defaults.
    Schema,

    /// List the form fields, their choices and the features they set.
    Fields,

    /// Check that the schema and model artifacts agree.
    Doctor,
}

#[derive(Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub applicant: ApplicantArgs,

    /// Refuse selections that have no feature in the schema.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Also print the encoded feature row.
    #[arg(long = "show-row")]
    pub show_row: bool,
}

#[derive(Args)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub applicant: ApplicantArgs,

    /// Refuse selections that have no feature in the schema.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Print the row and drift as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// Application form answers.
///
/// Flags override values read from `--input`.
#[derive(Args, Default)]
pub struct ApplicantArgs {
    /// Read the application from a JSON file.
    #[arg(long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Applicant name.
    #[arg(long = "name")]
    pub name: Option<String>,

    #[arg(
        long = "gender",
        value_parser = PossibleValuesParser::new(CategoricalField::Gender.choices().iter().copied())
    )]
    pub gender: Option<String>,

    #[arg(
        long = "education",
        value_parser = PossibleValuesParser::new(CategoricalField::Education.choices().iter().copied())
    )]
    pub education: Option<String>,

    #[arg(
        long = "self-employed",
        value_parser = PossibleValuesParser::new(CategoricalField::SelfEmployed.choices().iter().copied())
    )]
    pub self_employed: Option<String>,

    #[arg(
        long = "marital-status",
        value_parser = PossibleValuesParser::new(CategoricalField::MaritalStatus.choices().iter().copied())
    )]
    pub marital_status: Option<String>,

    #[arg(
        long = "dependents",
        value_parser = PossibleValuesParser::new(CategoricalField::Dependents.choices().iter().copied())
    )]
    pub dependents: Option<String>,

    #[arg(
        long = "property-area",
        value_parser = PossibleValuesParser::new(CategoricalField::PropertyArea.choices().iter().copied())
    )]
    pub property_area: Option<String>,

    #[arg(
        long = "credit-history",
        value_parser = PossibleValuesParser::new(CategoricalField::CreditHistory.choices().iter().copied())
    )]
    pub credit_history: Option<String>,

    /// Monthly income in USD.
    #[arg(long = "applicant-income", value_name = "USD")]
    pub applicant_income: Option<f64>,

    /// Monthly co-applicant income in USD.
    #[arg(long = "coapplicant-income", value_name = "USD")]
    pub coapplicant_income: Option<f64>,

    /// Requested amount in USD.
    #[arg(long = "loan-amount", value_name = "USD")]
    pub loan_amount: Option<f64>,

    /// Loan term in days.
    #[arg(long = "loan-term", value_name = "DAYS")]
    pub loan_term: Option<u32>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
