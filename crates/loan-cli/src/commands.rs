use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info_span};

use loan_encode::{EncodeMode, SchemaDrift};
use loan_model::{ApplicantInput, FeatureRow};

use loan_cli::pipeline::{ArtifactPaths, LoanPipeline};

use crate::cli::{ApplicantArgs, EncodeArgs, PredictArgs};
use crate::summary::{
    print_diagnosis, print_drift, print_fields, print_prediction, print_row, print_schema,
};

#[derive(Serialize)]
struct EncodeReport<'a> {
    row: &'a FeatureRow,
    drift: &'a [SchemaDrift],
}

pub fn run_predict(paths: &ArtifactPaths, args: &PredictArgs) -> Result<()> {
    let input = read_applicant(&args.applicant)?;
    let pipeline = LoanPipeline::from_paths(paths, encode_mode(args.strict));
    let submission = pipeline.submit(&input).context("score application")?;
    print_prediction(&submission.prediction);
    if args.show_row {
        println!();
        print_row(&submission.row);
        print_drift(&submission.drift);
    }
    Ok(())
}

pub fn run_encode(paths: &ArtifactPaths, args: &EncodeArgs) -> Result<()> {
    let input = read_applicant(&args.applicant)?;
    let pipeline = LoanPipeline::from_paths(paths, encode_mode(args.strict));
    let encoded = pipeline.encode(&input).context("encode application")?;
    if args.json {
        let report = EncodeReport {
            row: &encoded.row,
            drift: &encoded.drift,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize feature row")?
        );
    } else {
        print_row(&encoded.row);
        print_drift(&encoded.drift);
    }
    Ok(())
}

pub fn run_schema(paths: &ArtifactPaths) -> Result<()> {
    let pipeline = LoanPipeline::from_paths(paths, EncodeMode::default());
    let (schema, summary) = pipeline
        .schema_registry()
        .load_with_summary()
        .context("load feature schema")?;
    print_schema(&summary, &schema);
    Ok(())
}

pub fn run_fields() -> Result<()> {
    print_fields();
    Ok(())
}

/// Returns whether the artifacts agree.
pub fn run_doctor(paths: &ArtifactPaths) -> Result<bool> {
    let span = info_span!("doctor", schema = %paths.schema.display(), model = %paths.model.display());
    let _guard = span.enter();
    let pipeline = LoanPipeline::from_paths(paths, EncodeMode::default());
    let diagnosis = pipeline.diagnose().context("inspect artifacts")?;
    print_diagnosis(&diagnosis);
    Ok(diagnosis.is_healthy())
}

/// Build the application from `--input` (if any) overlaid with flags.
pub fn read_applicant(args: &ApplicantArgs) -> Result<ApplicantInput> {
    let mut input = match &args.input {
        Some(path) => load_applicant(path)?,
        None => ApplicantInput::default(),
    };
    let categorical = [
        (&mut input.gender, &args.gender),
        (&mut input.education, &args.education),
        (&mut input.self_employed, &args.self_employed),
        (&mut input.marital_status, &args.marital_status),
        (&mut input.dependents, &args.dependents),
        (&mut input.property_area, &args.property_area),
        (&mut input.credit_history, &args.credit_history),
    ];
    for (slot, flag) in categorical {
        if flag.is_some() {
            slot.clone_from(flag);
        }
    }
    if let Some(name) = &args.name {
        input.name.clone_from(name);
    }
    if let Some(value) = args.applicant_income {
        input.applicant_income = value;
    }
    if let Some(value) = args.coapplicant_income {
        input.coapplicant_income = value;
    }
    if let Some(value) = args.loan_amount {
        input.loan_amount = value;
    }
    if let Some(value) = args.loan_term {
        input.loan_term = value;
    }
    Ok(input)
}

fn load_applicant(path: &Path) -> Result<ApplicantInput> {
    debug!(path = %path.display(), "reading application");
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read application {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse application {}", path.display()))
}

fn encode_mode(strict: bool) -> EncodeMode {
    if strict {
        EncodeMode::Strict
    } else {
        EncodeMode::Lenient
    }
}
