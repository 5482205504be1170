//! Error types for the persona wizard.

/// Configuration-related errors. All of these are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Question catalog has no categories")]
    EmptyCatalog,

    #[error("Category '{category}' has no questions")]
    EmptyCategory { category: String },

    #[error("Category '{category}' appears more than once in the order")]
    DuplicateCategory { category: String },

    #[error("Category '{category}' is listed in the order but has no question list")]
    MissingCategory { category: String },

    #[error("Question id '{id}' is used more than once")]
    DuplicateQuestionId { id: String },

    #[error("Choice question '{id}' has no options")]
    MissingOptions { id: String },

    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// A navigator action that is not valid in the current session state.
///
/// Returning one of these never mutates the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot go back from the first question of a category")]
    AtCategoryStart,

    #[error("All questions have already been answered")]
    AlreadyComplete,

    #[error("Questionnaire is not complete yet")]
    NotComplete,

    #[error("Current question has not been answered")]
    Unanswered,

    #[error("'{value}' is not an option for question '{question_id}'")]
    NotAnOption { question_id: String, value: String },

    #[error("Action '{action}' is not available while {phase}")]
    WrongPhase { action: String, phase: String },
}

/// Which call of the analysis pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Personality,
    Recommendations,
}

impl std::fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Personality => write!(f, "personality analysis"),
            Self::Recommendations => write!(f, "recommendations"),
        }
    }
}

/// Analysis pipeline errors, surfaced to the user as "analysis unavailable".
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{stage} unavailable: {source}")]
    Llm {
        stage: AnalysisStage,
        #[source]
        source: LlmError,
    },

    #[error("{stage} unavailable: model returned no usable text")]
    EmptyOutput { stage: AnalysisStage },
}

impl AnalysisError {
    /// The pipeline stage that failed.
    pub fn stage(&self) -> AnalysisStage {
        match self {
            Self::Llm { stage, .. } | Self::EmptyOutput { stage } => *stage,
        }
    }
}
