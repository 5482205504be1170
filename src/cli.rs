//! CLI wizard — stdin/stdout front end over `WizardManager`.

use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::wizard::{QuestionKind, WizardAction, WizardCommand, WizardManager, WizardPhase, WizardView};

/// What one line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliInput {
    /// Record the answer, then move to the next question.
    AnswerAndNext(String),
    Command(WizardCommand),
    Quit,
    /// Unusable input; the message explains why.
    Invalid(String),
}

/// Interpret a line of input against the current view.
pub fn parse_input(view: &WizardView, line: &str) -> CliInput {
    let line = line.trim();
    match line {
        "/quit" | "/exit" => return CliInput::Quit,
        "/back" => return CliInput::Command(WizardCommand::Back),
        "/next" => return CliInput::Command(WizardCommand::Next),
        "/reset" => return CliInput::Command(WizardCommand::Reset),
        "/start" => return CliInput::Command(WizardCommand::BeginAnalysis),
        _ => {}
    }

    let Some(question) = view.question.as_ref() else {
        return CliInput::Invalid(match view.phase {
            WizardPhase::AwaitingStart => "Type /start to begin the analysis, or /reset.".to_string(),
            _ => "Type /reset to start over, or /quit.".to_string(),
        });
    };

    if line.is_empty() {
        return if view.current_answer.is_some() {
            CliInput::Command(WizardCommand::Next)
        } else {
            CliInput::Invalid("Please enter an answer.".to_string())
        };
    }

    match &question.kind {
        QuestionKind::Select { options } | QuestionKind::Scale { options } => {
            if let Ok(n) = line.parse::<usize>() {
                return match options.get(n.wrapping_sub(1)) {
                    Some(option) => CliInput::AnswerAndNext(option.clone()),
                    None => CliInput::Invalid(format!("Pick a number from 1 to {}.", options.len())),
                };
            }
            match options.iter().find(|o| o.eq_ignore_ascii_case(line)) {
                Some(option) => CliInput::AnswerAndNext(option.clone()),
                None => CliInput::Invalid(format!("Pick a number from 1 to {}.", options.len())),
            }
        }
        QuestionKind::Text => CliInput::AnswerAndNext(line.to_string()),
    }
}

/// Render a view as plain text.
pub fn render(view: &WizardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{:>3.0}%]", view.progress * 100.0);

    match view.phase {
        WizardPhase::Asking => {
            if let (Some(step), Some(category)) = (view.step, view.category.as_deref()) {
                let _ = writeln!(out, "Step {step}: {category}");
            }
            if let Some(question) = &view.question {
                let _ = writeln!(out, "{}", question.prompt);
                if let Some(options) = question.kind.options() {
                    for (i, option) in options.iter().enumerate() {
                        let marker = if view.current_answer.as_deref() == Some(option.as_str()) {
                            "*"
                        } else {
                            " "
                        };
                        let _ = writeln!(out, " {marker}{}. {option}", i + 1);
                    }
                } else if let Some(answer) = &view.current_answer {
                    let _ = writeln!(out, "  (current: {answer})");
                }
            }
        }
        WizardPhase::AwaitingStart => {
            let _ = writeln!(out, "All questions answered!");
            let _ = writeln!(out, "Type /start to begin the analysis.");
        }
        WizardPhase::Analyzing => match &view.failure {
            Some(failure) => {
                let _ = writeln!(out, "Analysis unavailable: {failure}");
                let _ = writeln!(out, "Type /reset to start over.");
            }
            None => {
                let _ = writeln!(out, "Analyzing...");
            }
        },
        WizardPhase::ShowingResults => {
            if let Some(report) = &view.report {
                let _ = writeln!(out, "== Personality analysis ==\n{}\n", report.personality);
                let _ = writeln!(out, "== Personalized recommendations ==\n{}\n", report.recommendations);
            }
            let _ = writeln!(out, "Type /reset to take the questionnaire again.");
        }
    }

    let hints: Vec<&str> = view
        .actions
        .iter()
        .filter_map(|a| match a {
            WizardAction::Back => Some("/back"),
            WizardAction::Next => Some("/next"),
            WizardAction::Reset => Some("/reset"),
            WizardAction::BeginAnalysis | WizardAction::Answer => None,
        })
        .collect();
    if !hints.is_empty() {
        let _ = writeln!(out, "({} | /quit)", hints.join(" | "));
    }
    out
}

/// Run the wizard on stdin/stdout until EOF or `/quit`.
pub async fn run(manager: &WizardManager) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut view = manager.view().await;

    loop {
        println!("\n{}", render(&view));
        eprint!("> ");

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let result = match parse_input(&view, &line) {
            CliInput::Quit => break,
            CliInput::Invalid(message) => {
                eprintln!("{message}");
                continue;
            }
            CliInput::AnswerAndNext(value) => match manager.answer(&value).await {
                Ok(_) => manager.next().await,
                Err(e) => Err(e),
            },
            CliInput::Command(WizardCommand::BeginAnalysis) => {
                eprintln!("⏳ Running personality analysis and recommendations...");
                manager.begin_analysis().await
            }
            CliInput::Command(command) => manager.dispatch(command).await,
        };

        view = match result {
            Ok(view) => view,
            Err(e) => {
                eprintln!("{e}");
                manager.view().await
            }
        };
    }
    Ok(())
}
