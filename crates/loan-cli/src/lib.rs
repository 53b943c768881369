//! Library side of the loan approval CLI: logging setup and the submission
//! pipeline that ties the schema, encoder and prediction service together.

pub mod logging;
pub mod pipeline;
