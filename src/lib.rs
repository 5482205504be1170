//! Persona Wizard — questionnaire-driven personality analysis.

pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod wizard;
