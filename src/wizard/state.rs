//! Wizard state machine: cursor, answers, and session phase.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TransitionError;

use super::catalog::{QuestionCatalog, QuestionSpec};

/// The phases of a wizard session.
///
/// Progresses linearly: Asking → AwaitingStart → Analyzing → ShowingResults.
/// Reset returns to a fresh Asking from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    Asking,
    AwaitingStart,
    Analyzing,
    ShowingResults,
}

impl WizardPhase {
    /// Check if a forward transition from `self` to `target` is valid.
    ///
    /// Reset is not a transition; it replaces the whole session.
    pub fn can_transition_to(&self, target: WizardPhase) -> bool {
        use WizardPhase::*;
        matches!(
            (self, target),
            (Asking, Asking)
                | (Asking, AwaitingStart)
                | (AwaitingStart, Analyzing)
                | (Analyzing, ShowingResults)
        )
    }

    /// Whether answers may still be recorded.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, Self::Asking)
    }
}

impl Default for WizardPhase {
    fn default() -> Self {
        Self::Asking
    }
}

impl std::fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Asking => "asking",
            Self::AwaitingStart => "awaiting_start",
            Self::Analyzing => "analyzing",
            Self::ShowingResults => "showing_results",
        };
        write!(f, "{s}")
    }
}

/// Cursor into the catalog: (category, question within category).
///
/// `category == catalog.len()` means the questionnaire is complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardPosition {
    pub category: usize,
    pub question: usize,
}

impl WizardPosition {
    pub fn new(category: usize, question: usize) -> Self {
        Self { category, question }
    }

    pub fn is_complete(&self, catalog: &QuestionCatalog) -> bool {
        self.category >= catalog.len()
    }

    /// Roll an exhausted category over to the start of the next one, repeatedly,
    /// until the cursor points at a question or the catalog is exhausted.
    pub fn normalize(mut self, catalog: &QuestionCatalog) -> Self {
        while let Some(category) = catalog.category(self.category) {
            if self.question < category.questions.len() {
                break;
            }
            self.category += 1;
            self.question = 0;
        }
        if self.category > catalog.len() {
            self.category = catalog.len();
        }
        self
    }

    /// The question under the cursor, or `None` if the category is exhausted
    /// or the catalog is complete.
    pub fn current_question<'a>(&self, catalog: &'a QuestionCatalog) -> Option<&'a QuestionSpec> {
        catalog
            .category(self.category)
            .and_then(|c| c.questions.get(self.question))
    }

    /// Step forward one question, rolling into the next category when the
    /// current one runs out. Unchanged once complete.
    pub fn advance(self, catalog: &QuestionCatalog) -> Self {
        if self.is_complete(catalog) {
            return self;
        }
        Self::new(self.category, self.question + 1).normalize(catalog)
    }

    /// Step back one question within the same category. Unchanged at the
    /// first question of a category.
    pub fn retreat(self) -> Self {
        if self.question == 0 {
            return self;
        }
        Self::new(self.category, self.question - 1)
    }
}

/// Captured answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an answer. Returns the previous value.
    pub fn record(&mut self, question_id: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(question_id.into(), value.into())
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fraction of catalog questions that have an answer, in `[0, 1]`.
    pub fn progress(&self, catalog: &QuestionCatalog) -> f64 {
        let total = catalog.total_questions();
        if total == 0 {
            return 0.0;
        }
        let answered = self
            .0
            .keys()
            .filter(|id| catalog.question(id).is_some())
            .count();
        answered as f64 / total as f64
    }

    /// Flat JSON record of the answers, keyed by question id.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Output of a successful analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub personality: String,
    pub recommendations: String,
    pub generated_at: DateTime<Utc>,
}

/// Handed out when analysis starts; carries the payload and identifies the
/// session incarnation the result belongs to.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub session_id: Uuid,
    pub answers: AnswerSet,
}

/// The whole state of one wizard session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Changes on every reset so late analysis results can be recognized.
    pub session_id: Uuid,
    pub phase: WizardPhase,
    pub position: WizardPosition,
    pub answers: AnswerSet,
    /// The user asked for the analysis to run.
    pub results_requested: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    /// Set when the pipeline failed; only reset is offered afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// A fresh session at (0, 0) with no answers.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            phase: WizardPhase::Asking,
            position: WizardPosition::default(),
            answers: AnswerSet::new(),
            results_requested: false,
            report: None,
            failure: None,
        }
    }

    pub fn is_complete(&self, catalog: &QuestionCatalog) -> bool {
        self.position.is_complete(catalog)
    }

    pub fn progress(&self, catalog: &QuestionCatalog) -> f64 {
        self.answers.progress(catalog)
    }

    /// The question to display, rolling over exhausted categories first.
    pub fn current_question<'a>(&mut self, catalog: &'a QuestionCatalog) -> Option<&'a QuestionSpec> {
        if !self.phase.accepts_answers() {
            return None;
        }
        self.position = self.position.normalize(catalog);
        self.sync_phase(catalog);
        self.position.current_question(catalog)
    }

    /// Record an answer for the question currently displayed.
    pub fn answer_current(
        &mut self,
        catalog: &QuestionCatalog,
        value: &str,
    ) -> Result<(), TransitionError> {
        self.require_phase(WizardPhase::Asking, "answer")?;
        let question = self
            .current_question(catalog)
            .ok_or(TransitionError::AlreadyComplete)?;
        if !question.accepts(value) {
            return Err(TransitionError::NotAnOption {
                question_id: question.id.clone(),
                value: value.to_string(),
            });
        }
        self.answers.record(question.id.as_str(), value);
        Ok(())
    }

    /// Move to the next question once the current one has an answer.
    pub fn advance(&mut self, catalog: &QuestionCatalog) -> Result<(), TransitionError> {
        self.require_phase(WizardPhase::Asking, "next")?;
        let question = self
            .current_question(catalog)
            .ok_or(TransitionError::AlreadyComplete)?;
        if self.answers.get(&question.id).is_none() {
            return Err(TransitionError::Unanswered);
        }
        self.position = self.position.advance(catalog);
        self.sync_phase(catalog);
        Ok(())
    }

    /// Go back one question within the current category.
    pub fn retreat(&mut self) -> Result<(), TransitionError> {
        self.require_phase(WizardPhase::Asking, "back")?;
        if self.position.question == 0 {
            return Err(TransitionError::AtCategoryStart);
        }
        self.position = self.position.retreat();
        Ok(())
    }

    /// Confirm the diagnosis. Answers are frozen from here on.
    pub fn begin_analysis(
        &mut self,
        catalog: &QuestionCatalog,
    ) -> Result<AnalysisTicket, TransitionError> {
        self.sync_phase(catalog);
        if self.phase == WizardPhase::Asking {
            return Err(TransitionError::NotComplete);
        }
        self.require_phase(WizardPhase::AwaitingStart, "begin_analysis")?;

        self.transition(WizardPhase::Analyzing);
        self.results_requested = true;
        Ok(AnalysisTicket {
            session_id: self.session_id,
            answers: self.answers.clone(),
        })
    }

    /// Apply the pipeline's outcome. Returns `false` (and changes nothing)
    /// when the ticket belongs to a session that has since been reset.
    pub fn finish_analysis(
        &mut self,
        ticket_session: Uuid,
        outcome: Result<AnalysisReport, String>,
    ) -> bool {
        if ticket_session != self.session_id || self.phase != WizardPhase::Analyzing {
            return false;
        }
        if self.failure.is_some() {
            return false;
        }
        match outcome {
            Ok(report) => {
                self.transition(WizardPhase::ShowingResults);
                self.report = Some(report);
            }
            // Stays in Analyzing; the failure makes reset the only action.
            Err(message) => self.failure = Some(message),
        }
        true
    }

    /// Discard everything and start over.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Which actions the presentation layer may offer right now.
    pub fn available_actions(&self, catalog: &QuestionCatalog) -> Vec<WizardAction> {
        let mut actions = Vec::new();
        match self.phase {
            WizardPhase::Asking => {
                let position = self.position.normalize(catalog);
                if let Some(question) = position.current_question(catalog) {
                    actions.push(WizardAction::Answer);
                    if self.answers.get(&question.id).is_some() {
                        actions.push(WizardAction::Next);
                    }
                    if position.question > 0 {
                        actions.push(WizardAction::Back);
                    }
                } else {
                    actions.push(WizardAction::BeginAnalysis);
                }
            }
            WizardPhase::AwaitingStart => actions.push(WizardAction::BeginAnalysis),
            WizardPhase::Analyzing | WizardPhase::ShowingResults => {}
        }
        actions.push(WizardAction::Reset);
        actions
    }

    fn sync_phase(&mut self, catalog: &QuestionCatalog) {
        if self.phase == WizardPhase::Asking && self.is_complete(catalog) {
            self.transition(WizardPhase::AwaitingStart);
        }
    }

    fn transition(&mut self, target: WizardPhase) {
        debug_assert!(
            self.phase.can_transition_to(target),
            "invalid transition {} -> {target}",
            self.phase
        );
        self.phase = target;
    }

    fn require_phase(&self, expected: WizardPhase, action: &str) -> Result<(), TransitionError> {
        if self.phase == expected {
            return Ok(());
        }
        if expected == WizardPhase::Asking && self.phase == WizardPhase::AwaitingStart {
            return Err(TransitionError::AlreadyComplete);
        }
        Err(TransitionError::WrongPhase {
            action: action.to_string(),
            phase: self.phase.to_string(),
        })
    }
}

/// An action the user can take from the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    Answer,
    Next,
    Back,
    BeginAnalysis,
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::catalog::Category;

    fn basics_and_style() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            Category::new("Basics", vec![QuestionSpec::select("q1", "Pick", &["A", "B"])]),
            Category::new("Style", vec![QuestionSpec::text("q2", "Describe")]),
        ])
        .unwrap()
    }

    fn three_by_two() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            Category::new(
                "One",
                vec![QuestionSpec::text("a1", "a1"), QuestionSpec::text("a2", "a2")],
            ),
            Category::new(
                "Two",
                vec![QuestionSpec::text("b1", "b1"), QuestionSpec::text("b2", "b2")],
            ),
            Category::new(
                "Three",
                vec![QuestionSpec::text("c1", "c1"), QuestionSpec::text("c2", "c2")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn valid_transitions() {
        use WizardPhase::*;
        let transitions = [
            (Asking, Asking),
            (Asking, AwaitingStart),
            (AwaitingStart, Analyzing),
            (Analyzing, ShowingResults),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use WizardPhase::*;
        assert!(!Asking.can_transition_to(Analyzing));
        assert!(!AwaitingStart.can_transition_to(Asking));
        assert!(!Analyzing.can_transition_to(Asking));
        assert!(!ShowingResults.can_transition_to(Analyzing));
        assert!(!AwaitingStart.can_transition_to(AwaitingStart));
    }

    #[test]
    fn display_matches_serde() {
        use WizardPhase::*;
        for phase in [Asking, AwaitingStart, Analyzing, ShowingResults] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(format!("\"{phase}\""), json);
        }
    }

    #[test]
    fn position_rollover_is_exact() {
        let catalog = three_by_two();
        let mut pos = WizardPosition::default();
        pos = pos.advance(&catalog);
        assert_eq!(pos, WizardPosition::new(0, 1));
        pos = pos.advance(&catalog);
        assert_eq!(pos, WizardPosition::new(1, 0));
        pos = pos.advance(&catalog).advance(&catalog);
        assert_eq!(pos, WizardPosition::new(2, 0));
        pos = pos.advance(&catalog).advance(&catalog);
        assert_eq!(pos, WizardPosition::new(3, 0));
        assert!(pos.is_complete(&catalog));
        assert_eq!(pos.advance(&catalog), pos);
    }

    #[test]
    fn normalize_is_idempotent() {
        let catalog = three_by_two();
        let exhausted = WizardPosition::new(0, 2);
        let rolled = exhausted.normalize(&catalog);
        assert_eq!(rolled, WizardPosition::new(1, 0));
        assert_eq!(rolled.normalize(&catalog), rolled);

        let past_end = WizardPosition::new(2, 7).normalize(&catalog);
        assert_eq!(past_end, WizardPosition::new(3, 0));
        assert!(past_end.current_question(&catalog).is_none());
    }

    #[test]
    fn exhausted_category_has_no_current_question() {
        let catalog = three_by_two();
        assert!(WizardPosition::new(0, 2).current_question(&catalog).is_none());
        assert_eq!(
            WizardPosition::new(0, 1).current_question(&catalog).unwrap().id,
            "a2"
        );
    }

    #[test]
    fn retreat_never_crosses_category() {
        assert_eq!(WizardPosition::new(1, 0).retreat(), WizardPosition::new(1, 0));
        assert_eq!(WizardPosition::new(1, 1).retreat(), WizardPosition::new(1, 0));
    }

    #[test]
    fn record_is_idempotent_per_key() {
        let mut answers = AnswerSet::new();
        assert!(answers.record("q1", "A").is_none());
        assert_eq!(answers.record("q1", "B").as_deref(), Some("A"));
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get("q1"), Some("B"));
    }

    #[test]
    fn progress_counts_distinct_catalog_keys() {
        let catalog = three_by_two();
        let mut answers = AnswerSet::new();
        assert_eq!(answers.progress(&catalog), 0.0);
        answers.record("a1", "x");
        answers.record("a1", "y");
        answers.record("not_in_catalog", "z");
        assert!((answers.progress(&catalog) - 1.0 / 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn full_walk_completes_with_full_progress() {
        let catalog = three_by_two();
        let mut session = SessionState::new();
        for _ in 0..catalog.total_questions() {
            session.answer_current(&catalog, "answer").unwrap();
            session.advance(&catalog).unwrap();
        }
        assert!(session.is_complete(&catalog));
        assert_eq!(session.progress(&catalog), 1.0);
        assert_eq!(session.phase, WizardPhase::AwaitingStart);
        assert_eq!(session.position, WizardPosition::new(3, 0));
    }

    #[test]
    fn end_to_end_two_categories() {
        let catalog = basics_and_style();
        let mut session = SessionState::new();

        session.answer_current(&catalog, "A").unwrap();
        session.advance(&catalog).unwrap();
        assert_eq!(session.position, WizardPosition::new(1, 0));
        session.answer_current(&catalog, "hello").unwrap();
        session.advance(&catalog).unwrap();

        assert_eq!(session.position, WizardPosition::new(2, 0));
        assert!(session.is_complete(&catalog));
        assert_eq!(session.progress(&catalog), 1.0);
        let expected: AnswerSet = [("q1", "A"), ("q2", "hello")].into_iter().collect();
        assert_eq!(session.answers, expected);
        assert_eq!(session.answers.to_json(), r#"{"q1":"A","q2":"hello"}"#);

        let ticket = session.begin_analysis(&catalog).unwrap();
        assert_eq!(ticket.answers, expected);
        assert_eq!(session.phase, WizardPhase::Analyzing);
        assert!(session.results_requested);
    }

    #[test]
    fn retreat_at_category_start_is_noop() {
        let catalog = three_by_two();
        let mut session = SessionState::new();
        session.answer_current(&catalog, "x").unwrap();
        session.advance(&catalog).unwrap();
        session.answer_current(&catalog, "y").unwrap();
        session.advance(&catalog).unwrap();
        assert_eq!(session.position, WizardPosition::new(1, 0));

        let before = session.clone();
        assert_eq!(session.retreat(), Err(TransitionError::AtCategoryStart));
        assert_eq!(session.position, before.position);
        assert_eq!(session.answers, before.answers);
    }

    #[test]
    fn retreat_then_change_answer_keeps_count() {
        let catalog = three_by_two();
        let mut session = SessionState::new();
        session.answer_current(&catalog, "first").unwrap();
        session.advance(&catalog).unwrap();
        session.retreat().unwrap();
        session.answer_current(&catalog, "changed").unwrap();
        assert_eq!(session.answers.len(), 1);
        assert_eq!(session.answers.get("a1"), Some("changed"));
    }

    #[test]
    fn advance_requires_an_answer() {
        let catalog = three_by_two();
        let mut session = SessionState::new();
        assert_eq!(session.advance(&catalog), Err(TransitionError::Unanswered));
        assert_eq!(session.position, WizardPosition::default());
    }

    #[test]
    fn choice_answer_must_be_an_option() {
        let catalog = basics_and_style();
        let mut session = SessionState::new();
        let err = session.answer_current(&catalog, "C").unwrap_err();
        assert!(matches!(err, TransitionError::NotAnOption { .. }));
        assert!(session.answers.is_empty());
    }

    #[test]
    fn actions_after_completion_are_rejected() {
        let catalog = basics_and_style();
        let mut session = SessionState::new();
        session.answer_current(&catalog, "B").unwrap();
        session.advance(&catalog).unwrap();
        session.answer_current(&catalog, "hi").unwrap();
        session.advance(&catalog).unwrap();

        let before = session.clone();
        assert_eq!(session.advance(&catalog), Err(TransitionError::AlreadyComplete));
        assert_eq!(
            session.answer_current(&catalog, "late"),
            Err(TransitionError::AlreadyComplete)
        );
        assert_eq!(session.position, before.position);
        assert_eq!(session.answers, before.answers);
    }

    #[test]
    fn begin_analysis_before_completion_rejected() {
        let catalog = basics_and_style();
        let mut session = SessionState::new();
        session.answer_current(&catalog, "A").unwrap();
        assert_eq!(
            session.begin_analysis(&catalog).unwrap_err(),
            TransitionError::NotComplete
        );
        assert_eq!(session.phase, WizardPhase::Asking);
        assert!(!session.results_requested);
    }

    #[test]
    fn no_answers_while_analyzing() {
        let catalog = basics_and_style();
        let mut session = completed(&catalog);
        session.begin_analysis(&catalog).unwrap();
        assert!(matches!(
            session.answer_current(&catalog, "A"),
            Err(TransitionError::WrongPhase { .. })
        ));
        assert!(matches!(
            session.begin_analysis(&catalog),
            Err(TransitionError::WrongPhase { .. })
        ));
    }

    fn completed(catalog: &QuestionCatalog) -> SessionState {
        let mut session = SessionState::new();
        session.answer_current(catalog, "A").unwrap();
        session.advance(catalog).unwrap();
        session.answer_current(catalog, "hello").unwrap();
        session.advance(catalog).unwrap();
        session
    }

    fn report() -> AnalysisReport {
        AnalysisReport {
            personality: "ANALYSIS".to_string(),
            recommendations: "RECS".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn finish_analysis_success_shows_results() {
        let catalog = basics_and_style();
        let mut session = completed(&catalog);
        let ticket = session.begin_analysis(&catalog).unwrap();
        assert!(session.finish_analysis(ticket.session_id, Ok(report())));
        assert_eq!(session.phase, WizardPhase::ShowingResults);
        assert_eq!(session.report.as_ref().unwrap().personality, "ANALYSIS");
        assert_eq!(session.available_actions(&catalog), vec![WizardAction::Reset]);
    }

    #[test]
    fn finish_analysis_failure_offers_only_reset() {
        let catalog = basics_and_style();
        let mut session = completed(&catalog);
        let ticket = session.begin_analysis(&catalog).unwrap();
        assert!(session.finish_analysis(ticket.session_id, Err("boom".to_string())));
        assert_eq!(session.phase, WizardPhase::Analyzing);
        assert_eq!(session.failure.as_deref(), Some("boom"));
        assert!(session.report.is_none());
        assert_eq!(session.available_actions(&catalog), vec![WizardAction::Reset]);
    }

    #[test]
    fn stale_result_after_reset_is_discarded() {
        let catalog = basics_and_style();
        let mut session = completed(&catalog);
        let ticket = session.begin_analysis(&catalog).unwrap();
        session.reset();

        assert!(!session.finish_analysis(ticket.session_id, Ok(report())));
        assert_eq!(session.phase, WizardPhase::Asking);
        assert!(session.report.is_none());
        assert!(session.answers.is_empty());
    }

    #[test]
    fn reset_from_every_phase_returns_to_start() {
        let catalog = basics_and_style();

        let mut asking = SessionState::new();
        asking.answer_current(&catalog, "A").unwrap();

        let awaiting = completed(&catalog);

        let mut analyzing = completed(&catalog);
        analyzing.begin_analysis(&catalog).unwrap();

        let mut showing = completed(&catalog);
        let ticket = showing.begin_analysis(&catalog).unwrap();
        showing.finish_analysis(ticket.session_id, Ok(report()));

        for mut session in [asking, awaiting, analyzing, showing] {
            let old_id = session.session_id;
            session.reset();
            assert_eq!(session.phase, WizardPhase::Asking);
            assert_eq!(session.position, WizardPosition::default());
            assert!(session.answers.is_empty());
            assert!(!session.results_requested);
            assert!(session.report.is_none());
            assert!(session.failure.is_none());
            assert_ne!(session.session_id, old_id);
        }
    }

    #[test]
    fn available_actions_follow_position() {
        let catalog = three_by_two();
        let mut session = SessionState::new();
        assert_eq!(
            session.available_actions(&catalog),
            vec![WizardAction::Answer, WizardAction::Reset]
        );

        session.answer_current(&catalog, "x").unwrap();
        assert_eq!(
            session.available_actions(&catalog),
            vec![WizardAction::Answer, WizardAction::Next, WizardAction::Reset]
        );

        session.advance(&catalog).unwrap();
        assert_eq!(
            session.available_actions(&catalog),
            vec![WizardAction::Answer, WizardAction::Back, WizardAction::Reset]
        );
    }

    #[test]
    fn awaiting_start_offers_begin_analysis() {
        let catalog = basics_and_style();
        let session = completed(&catalog);
        assert_eq!(
            session.available_actions(&catalog),
            vec![WizardAction::BeginAnalysis, WizardAction::Reset]
        );
    }
}
