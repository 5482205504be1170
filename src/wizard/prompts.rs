//! Prompts for the two analysis calls.

use super::catalog::QuestionCatalog;
use super::state::AnswerSet;

/// System message shared by both analysis calls.
pub const ANALYST_SYSTEM_PROMPT: &str = "\
You are a thoughtful personality analyst and lifestyle coach. \
Write in plain language, be specific, and avoid clinical diagnoses.";

/// Serialize answers for the model, keyed by question prompt instead of id.
///
/// Identifiers never reach the model this way. Answers whose id is not in the
/// catalog are skipped.
pub fn answers_payload(answers: &AnswerSet, catalog: &QuestionCatalog) -> String {
    let mut record = serde_json::Map::new();
    for category in catalog.categories() {
        for question in &category.questions {
            if let Some(value) = answers.get(&question.id) {
                record.insert(
                    question.prompt.clone(),
                    serde_json::Value::String(value.to_string()),
                );
            }
        }
    }
    serde_json::to_string_pretty(&serde_json::Value::Object(record))
        .unwrap_or_else(|_| "{}".to_string())
}

/// Prompt asking for the personality analysis of the answer payload.
pub fn personality_prompt(payload: &str) -> String {
    format!(
        "Analyze the following user data and identify their main personality traits, \
         strengths, challenges and potential aptitudes:\n\n\
         {payload}\n\n\
         Format the analysis as follows:\n\
         1. Five main personality traits and how strongly each shows\n\
         2. How those traits interact with each other\n\
         3. How their behavior patterns shift across different environments\n\
         4. Identified strengths (3-5)\n\
         5. Areas with room for growth (2-3)\n\n\
         Do not include any question identifier strings in the analysis."
    )
}

/// Prompt asking for lifestyle recommendations based on a personality analysis.
pub fn recommendations_prompt(personality: &str) -> String {
    format!(
        "Based on the following personality profile, propose concrete ways for this \
         user to make the most of their traits:\n\n\
         {personality}\n\n\
         Give specific, actionable suggestions for each of these areas:\n\
         1. Optimizing daily habits\n\
         2. Improving work or study efficiency\n\
         3. Enriching relationships\n\
         4. Making the most of leisure time\n\
         5. Maintaining mental well-being"
    )
}
