//! Questionnaire wizard — paginated questions, answer aggregation and the
//! hand-off to the analysis pipeline.
//!
//! The navigator walks the catalog one question at a time, collecting answers
//! keyed by question id. Once every category is exhausted the user confirms,
//! the answers go through the two-stage analysis, and the results are shown
//! until the session is reset.

pub mod analysis;
pub mod catalog;
pub mod manager;
pub mod prompts;
pub mod routes;
pub mod state;

pub use analysis::{run_analysis, AnalysisConfig, AnalysisPipeline, LlmAnalysisPipeline};
pub use catalog::{Category, QuestionCatalog, QuestionKind, QuestionSpec};
pub use manager::{WizardCommand, WizardManager, WizardView};
pub use routes::{wizard_routes, WizardRouteState};
pub use state::{
    AnalysisReport, AnalysisTicket, AnswerSet, SessionState, WizardAction, WizardPhase,
    WizardPosition,
};
