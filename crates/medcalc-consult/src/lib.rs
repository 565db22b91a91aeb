//! medcalc-consult
//!
//! AI commentary on a computed calculator result, via Amazon Bedrock.

pub mod backend;
pub mod client;
pub mod consult;
pub mod error;
pub mod prompt;

pub use backend::{BedrockConsult, ConsultBackend, DisabledConsult};
pub use consult::{ClinicalContext, get_clinical_context};
