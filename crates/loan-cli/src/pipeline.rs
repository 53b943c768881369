//! One submission, end to end: validate, encode, predict.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, info_span, trace};

use loan_common::paths::{default_model_path, default_schema_path};
use loan_encode::rules::expected_features;
use loan_encode::{EncodeError, EncodeMode, EncodedRow, FeatureEncoder, SchemaDrift};
use loan_model::{ApplicantInput, FeatureRow, InputError, Prediction};
use loan_predict::{
    Alignment, ArtifactInfo, ModelLoadError, PredictionError, PredictionService, alignment,
};
use loan_schema::{ConfigLoadError, LoadSummary, SchemaRegistry};

use crate::logging::{log_data_enabled, redact_amount, redact_value};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid applicant input: {0}")]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Model(#[from] ModelLoadError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

/// Where the two artifacts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub schema: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    /// Resolve artifact paths: explicit file, then directory, then
    /// `LOAN_ARTIFACTS_DIR`, then the bundled `artifacts/` directory.
    pub fn resolve(dir: Option<&Path>, schema: Option<&Path>, model: Option<&Path>) -> Self {
        Self {
            schema: schema.map_or_else(|| default_schema_path(dir), Path::to_path_buf),
            model: model.map_or_else(|| default_model_path(dir), Path::to_path_buf),
        }
    }
}

/// The outcome of one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub prediction: Prediction,
    pub row: FeatureRow,
    pub drift: Vec<SchemaDrift>,
}

/// What `doctor` found on disk.
#[derive(Debug, Clone)]
pub struct Diagnosis {
    pub schema: LoadSummary,
    pub model: ArtifactInfo,
    pub alignment: Alignment,
    /// Features the form can produce that the schema does not have.
    pub unreachable: Vec<String>,
}

impl Diagnosis {
    pub fn is_healthy(&self) -> bool {
        self.alignment.is_aligned()
    }
}

/// Schema registry, encoder and prediction service for one process.
#[derive(Debug)]
pub struct LoanPipeline {
    schema: SchemaRegistry,
    predictor: PredictionService,
    encoder: FeatureEncoder,
}

impl LoanPipeline {
    pub fn new(schema: SchemaRegistry, predictor: PredictionService, encoder: FeatureEncoder) -> Self {
        Self {
            schema,
            predictor,
            encoder,
        }
    }

    pub fn from_paths(paths: &ArtifactPaths, mode: EncodeMode) -> Self {
        Self::new(
            SchemaRegistry::new(&paths.schema),
            PredictionService::new(&paths.model),
            FeatureEncoder::new(mode),
        )
    }

    pub fn schema_registry(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub fn predictor(&self) -> &PredictionService {
        &self.predictor
    }

    pub fn mode(&self) -> EncodeMode {
        self.encoder.mode()
    }

    /// Validate and encode one applicant without scoring it.
    pub fn encode(&self, input: &ApplicantInput) -> Result<EncodedRow, PipelineError> {
        input.validate()?;
        let schema = self.schema.load_schema()?;
        let encoded = self.encoder.encode(&schema, input)?;
        if log_data_enabled() {
            trace!(row = %encoded.row, "feature row");
        }
        Ok(encoded)
    }

    /// Score one applicant.
    pub fn submit(&self, input: &ApplicantInput) -> Result<Submission, PipelineError> {
        let span = info_span!("submit", applicant = %redact_value(&input.name));
        let _guard = span.enter();
        debug!(
            applicant_income = %redact_amount(input.applicant_income),
            loan_amount = %redact_amount(input.loan_amount),
            "submission received"
        );

        let EncodedRow { row, drift } = self.encode(input)?;
        let label = self.predictor.predict(&row)?;
        info!(label = %label, drift = drift.len(), "decision");

        Ok(Submission {
            prediction: Prediction::new(input.name.clone(), label),
            row,
            drift,
        })
    }

    /// Re-read both artifacts and compare them.
    pub fn diagnose(&self) -> Result<Diagnosis, PipelineError> {
        let (schema, summary) = self.schema.load_with_summary()?;
        let (model, info) = self.predictor.inspect()?;
        let alignment = alignment(model.as_ref(), &schema);
        let unreachable = expected_features()
            .into_iter()
            .filter(|feature| !schema.contains(feature))
            .collect();
        Ok(Diagnosis {
            schema: summary,
            model: info,
            alignment,
            unreachable,
        })
    }
}

impl Default for LoanPipeline {
    fn default() -> Self {
        Self::new(
            SchemaRegistry::from_default_location(),
            PredictionService::from_default_location(),
            FeatureEncoder::default(),
        )
    }
}
