//! WizardManager — owns the session and sequences navigator actions and the
//! analysis pipeline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::TransitionError;

use super::analysis::{run_analysis, AnalysisPipeline};
use super::catalog::{QuestionCatalog, QuestionSpec};
use super::state::{AnalysisReport, AnalysisTicket, SessionState, WizardAction, WizardPhase};

/// A user action coming from a presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardCommand {
    Answer { value: String },
    Next,
    Back,
    BeginAnalysis,
    Reset,
}

/// Everything a presentation surface needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub phase: WizardPhase,
    /// 1-based step number of the current category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionSpec>,
    /// Previously recorded answer for the displayed question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_answer: Option<String>,
    pub progress: f64,
    pub actions: Vec<WizardAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl WizardView {
    pub fn allows(&self, action: WizardAction) -> bool {
        self.actions.contains(&action)
    }

    fn build(state: &mut SessionState, catalog: &QuestionCatalog) -> Self {
        let question = state.current_question(catalog).cloned();
        let (step, category) = if question.is_some() {
            (
                Some(state.position.category + 1),
                catalog
                    .category(state.position.category)
                    .map(|c| c.name.clone()),
            )
        } else {
            (None, None)
        };
        let current_answer = question
            .as_ref()
            .and_then(|q| state.answers.get(&q.id))
            .map(String::from);

        Self {
            phase: state.phase,
            step,
            category,
            question,
            current_answer,
            progress: state.progress(catalog),
            actions: state.available_actions(catalog),
            report: state.report.clone(),
            failure: state.failure.clone(),
        }
    }
}

/// Run the pipeline for `ticket` and apply the outcome to the session.
async fn complete_analysis(
    state: Arc<RwLock<SessionState>>,
    pipeline: Arc<dyn AnalysisPipeline>,
    ticket: AnalysisTicket,
) {
    let outcome = run_analysis(pipeline.as_ref(), &ticket.answers)
        .await
        .map_err(|e| {
            tracing::warn!(session = %ticket.session_id, error = %e, "Analysis unavailable");
            e.to_string()
        });

    let mut state = state.write().await;
    if state.finish_analysis(ticket.session_id, outcome) {
        tracing::info!(session = %ticket.session_id, phase = %state.phase, "Analysis finished");
    } else {
        tracing::info!(session = %ticket.session_id, "Session was reset during analysis; discarding result");
    }
}

/// Coordinates the single wizard session: navigation, analysis hand-off and reset.
pub struct WizardManager {
    catalog: Arc<QuestionCatalog>,
    pipeline: Arc<dyn AnalysisPipeline>,
    state: Arc<RwLock<SessionState>>,
}

impl WizardManager {
    pub fn new(catalog: Arc<QuestionCatalog>, pipeline: Arc<dyn AnalysisPipeline>) -> Self {
        Self {
            catalog,
            pipeline,
            state: Arc::new(RwLock::new(SessionState::new())),
        }
    }

    /// The view for the current render.
    pub async fn view(&self) -> WizardView {
        let mut state = self.state.write().await;
        WizardView::build(&mut state, &self.catalog)
    }

    /// Snapshot of the raw session state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Apply one command. Invalid commands leave the session untouched.
    pub async fn dispatch(&self, command: WizardCommand) -> Result<WizardView, TransitionError> {
        match command {
            WizardCommand::Answer { value } => self.answer(&value).await,
            WizardCommand::Next => self.next().await,
            WizardCommand::Back => self.back().await,
            WizardCommand::BeginAnalysis => self.begin_analysis().await,
            WizardCommand::Reset => Ok(self.reset().await),
        }
    }

    /// Record the answer for the displayed question.
    pub async fn answer(&self, value: &str) -> Result<WizardView, TransitionError> {
        let mut state = self.state.write().await;
        state.answer_current(&self.catalog, value)?;
        tracing::debug!(position = ?state.position, "Answer recorded");
        Ok(WizardView::build(&mut state, &self.catalog))
    }

    pub async fn next(&self) -> Result<WizardView, TransitionError> {
        let mut state = self.state.write().await;
        state.advance(&self.catalog)?;
        if state.phase == WizardPhase::AwaitingStart {
            tracing::info!(answers = state.answers.len(), "Questionnaire complete");
        }
        Ok(WizardView::build(&mut state, &self.catalog))
    }

    pub async fn back(&self) -> Result<WizardView, TransitionError> {
        let mut state = self.state.write().await;
        state.retreat()?;
        Ok(WizardView::build(&mut state, &self.catalog))
    }

    /// Start the analysis and wait for both pipeline calls.
    ///
    /// The pipeline runs on its own task with the session lock released, so
    /// dropping this future (a client hanging up) never strands the session
    /// in `Analyzing`. If the session is reset in the meantime the result is
    /// dropped.
    pub async fn begin_analysis(&self) -> Result<WizardView, TransitionError> {
        let ticket = {
            let mut state = self.state.write().await;
            state.begin_analysis(&self.catalog)?
        };
        let session_id = ticket.session_id;
        tracing::info!(session = %session_id, "Starting analysis");

        let task = tokio::spawn(complete_analysis(
            Arc::clone(&self.state),
            Arc::clone(&self.pipeline),
            ticket,
        ));

        if let Err(e) = task.await {
            tracing::error!(session = %session_id, error = %e, "Analysis task aborted");
            let mut state = self.state.write().await;
            state.finish_analysis(session_id, Err(format!("analysis task aborted: {e}")));
        }

        let mut state = self.state.write().await;
        Ok(WizardView::build(&mut state, &self.catalog))
    }

    /// Discard the session and start over. Always valid.
    pub async fn reset(&self) -> WizardView {
        let mut state = self.state.write().await;
        state.reset();
        tracing::info!(session = %state.session_id, "Session reset");
        WizardView::build(&mut state, &self.catalog)
    }
}
