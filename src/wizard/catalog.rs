//! Question catalog: the ordered categories and their questions.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a question captures its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one option from a list.
    Select { options: Vec<String> },
    /// Free-form text.
    Text,
    /// Pick one point on a labelled scale.
    Scale { options: Vec<String> },
}

impl QuestionKind {
    /// The selectable options, or `None` for free text.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::Select { options } | Self::Scale { options } => Some(options),
            Self::Text => None,
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Select { .. } => "select",
            Self::Text => "text",
            Self::Scale { .. } => "scale",
        };
        write!(f, "{s}")
    }
}

/// One question in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub id: String,
    #[serde(alias = "question")]
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl QuestionSpec {
    pub fn select(id: &str, prompt: &str, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: QuestionKind::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    pub fn text(id: &str, prompt: &str) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: QuestionKind::Text,
        }
    }

    pub fn scale(id: &str, prompt: &str, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: QuestionKind::Scale {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    /// Whether `value` is something this question's input could have produced.
    pub fn accepts(&self, value: &str) -> bool {
        match self.kind.options() {
            Some(options) => options.iter().any(|o| o == value),
            None => true,
        }
    }
}

/// A named group of questions shown under one step heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub questions: Vec<QuestionSpec>,
}

impl Category {
    pub fn new(name: &str, questions: Vec<QuestionSpec>) -> Self {
        Self {
            name: name.to_string(),
            questions,
        }
    }
}

/// On-disk catalog layout: category order plus a table of questions per category.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    order: Vec<String>,
    questions: HashMap<String, Vec<QuestionSpec>>,
}

/// Validated, immutable questionnaire.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionCatalog {
    categories: Vec<Category>,
    total_questions: usize,
}

impl QuestionCatalog {
    /// Build a catalog, rejecting empty catalogs, repeated or empty
    /// categories, duplicate question ids and choice questions without options.
    pub fn new(categories: Vec<Category>) -> Result<Self, ConfigError> {
        if categories.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut names = HashSet::new();
        let mut seen = HashSet::new();
        for category in &categories {
            if !names.insert(category.name.as_str()) {
                return Err(ConfigError::DuplicateCategory {
                    category: category.name.clone(),
                });
            }
            if category.questions.is_empty() {
                return Err(ConfigError::EmptyCategory {
                    category: category.name.clone(),
                });
            }
            for question in &category.questions {
                if !seen.insert(question.id.as_str()) {
                    return Err(ConfigError::DuplicateQuestionId {
                        id: question.id.clone(),
                    });
                }
                if question.kind.options().is_some_and(|o| o.is_empty()) {
                    return Err(ConfigError::MissingOptions {
                        id: question.id.clone(),
                    });
                }
            }
        }

        let total_questions = categories.iter().map(|c| c.questions.len()).sum();
        Ok(Self {
            categories,
            total_questions,
        })
    }

    /// Parse the JSON catalog format: `{"order": [...], "questions": {name: [...]}}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut file: CatalogFile =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let mut categories = Vec::with_capacity(file.order.len());
        let mut listed = HashSet::new();
        for name in file.order {
            if !listed.insert(name.clone()) {
                return Err(ConfigError::DuplicateCategory { category: name });
            }
            let questions = file
                .questions
                .remove(&name)
                .ok_or_else(|| ConfigError::MissingCategory {
                    category: name.clone(),
                })?;
            categories.push(Category { name, questions });
        }

        if !file.questions.is_empty() {
            let mut unused: Vec<_> = file.questions.into_keys().collect();
            unused.sort();
            tracing::warn!(categories = ?unused, "Catalog defines categories missing from order; ignoring them");
        }

        Self::new(categories)
    }

    /// Load a JSON catalog from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            categories = catalog.len(),
            questions = catalog.total_questions(),
            "Loaded question catalog"
        );
        Ok(catalog)
    }

    /// The questionnaire shipped with the binary.
    pub fn builtin() -> Self {
        let categories = vec![
            Category::new(
                "Basics",
                vec![
                    QuestionSpec::select(
                        "age_range",
                        "Which age range are you in?",
                        &["Under 20", "20-29", "30-39", "40-49", "50-59", "60 or over"],
                    ),
                    QuestionSpec::select(
                        "occupation",
                        "What best describes your current occupation?",
                        &["Student", "Employee", "Self-employed", "Homemaker", "Between jobs", "Retired", "Other"],
                    ),
                    QuestionSpec::text("hobbies", "What do you enjoy doing in your free time?"),
                ],
            ),
            Category::new(
                "Personality",
                vec![
                    QuestionSpec::scale(
                        "social_energy",
                        "Spending time with many people leaves me energized.",
                        &["Strongly disagree", "Disagree", "Neutral", "Agree", "Strongly agree"],
                    ),
                    QuestionSpec::scale(
                        "planning",
                        "I like to plan things well in advance.",
                        &["Strongly disagree", "Disagree", "Neutral", "Agree", "Strongly agree"],
                    ),
                    QuestionSpec::scale(
                        "novelty",
                        "I enjoy trying unfamiliar things.",
                        &["Strongly disagree", "Disagree", "Neutral", "Agree", "Strongly agree"],
                    ),
                    QuestionSpec::scale(
                        "stress_response",
                        "I stay calm under pressure.",
                        &["Strongly disagree", "Disagree", "Neutral", "Agree", "Strongly agree"],
                    ),
                ],
            ),
            Category::new(
                "Lifestyle",
                vec![
                    QuestionSpec::select(
                        "chronotype",
                        "When do you feel most productive?",
                        &["Early morning", "Late morning", "Afternoon", "Evening", "Late night"],
                    ),
                    QuestionSpec::select(
                        "weekend",
                        "How do you usually spend your weekends?",
                        &["Resting at home", "Going out with friends", "Outdoors or sports", "Learning something", "Working"],
                    ),
                    QuestionSpec::text("ideal_day", "Describe your ideal day."),
                ],
            ),
            Category::new(
                "Values",
                vec![
                    QuestionSpec::select(
                        "priority",
                        "What matters most to you right now?",
                        &["Career", "Family", "Health", "Personal growth", "Friendships", "Financial security"],
                    ),
                    QuestionSpec::text("goal", "What would you like to achieve in the next year?"),
                ],
            ),
        ];

        // The built-in catalog is static and valid.
        let total_questions = categories.iter().map(|c| c.questions.len()).sum();
        Self {
            categories,
            total_questions,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of questions across all categories.
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&QuestionSpec> {
        self.categories
            .iter()
            .flat_map(|c| c.questions.iter())
            .find(|q| q.id == id)
    }
}
