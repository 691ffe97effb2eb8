// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// An answer to a multi-select question.
///
/// The survey export joins the selected options with `;` (often with a trailing
/// delimiter and stray spaces). The options are split once when the record is
/// read; the raw answer is kept for the few rules that compare it verbatim.
#[derive(Eq, PartialEq, Debug, Clone, Default, Hash)]
pub struct MultiSelect {
    raw: String,
    tokens: Vec<String>,
}

impl MultiSelect {
    pub fn parse(raw: &str) -> MultiSelect {
        let tokens: Vec<String> = raw
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();
        MultiSelect {
            raw: raw.to_string(),
            tokens,
        }
    }

    /// The answer as it appeared in the input.
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn first(&self) -> Option<&str> {
        self.tokens.first().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// True if one of the selected options contains the needle.
    ///
    /// The needle must not contain the `;` delimiter.
    pub fn contains(&self, needle: &str) -> bool {
        self.tokens.iter().any(|t| t.contains(needle))
    }
}

/// The answers of one respondent.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SurveyRecord {
    pub gpa: String,
    pub home: String,
    pub senators: String,
    pub news_source: MultiSelect,
    pub political_party: MultiSelect,
    pub parents_party: MultiSelect,
    pub ideology: String,
    pub trust_government: String,
    pub presidential_approval: String,
    pub environment: String,
    pub election_confidence: String,
    pub minimum_wage: String,
    pub grade_level: String,
    /// Whether the respondent named both senators of the state correctly.
    pub political_knowledge: bool,
}

/// How a field behaves in the explorer.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum FieldKind {
    Numeric,
    Boolean,
    Categorical,
}

/// The columns of the survey, in file order.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Field {
    Gpa,
    Home,
    Senators,
    NewsSource,
    PoliticalParty,
    ParentsParty,
    Ideology,
    TrustGovernment,
    PresidentialApproval,
    Environment,
    ElectionConfidence,
    MinimumWage,
    GradeLevel,
    PoliticalKnowledge,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::Gpa,
        Field::Home,
        Field::Senators,
        Field::NewsSource,
        Field::PoliticalParty,
        Field::ParentsParty,
        Field::Ideology,
        Field::TrustGovernment,
        Field::PresidentialApproval,
        Field::Environment,
        Field::ElectionConfidence,
        Field::MinimumWage,
        Field::GradeLevel,
        Field::PoliticalKnowledge,
    ];

    /// The stable identifier, used on the command line and in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Gpa => "GPA",
            Field::Home => "Home",
            Field::Senators => "Senators",
            Field::NewsSource => "NewsSource",
            Field::PoliticalParty => "PoliticalParty",
            Field::ParentsParty => "ParentsParty",
            Field::Ideology => "Ideology",
            Field::TrustGovernment => "TrustGovernment",
            Field::PresidentialApproval => "TrumpApproval",
            Field::Environment => "Environment",
            Field::ElectionConfidence => "ElectionConfidence",
            Field::MinimumWage => "MinimumWage",
            Field::GradeLevel => "GradeLevel",
            Field::PoliticalKnowledge => "PoliticalKnowledge",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Gpa => "GPA",
            Field::Home => "Home Location",
            Field::Senators => "Senator Knowledge",
            Field::NewsSource => "News Source",
            Field::PoliticalParty => "Political Party",
            Field::ParentsParty => "Parents' Party",
            Field::Ideology => "Political Ideology",
            Field::TrustGovernment => "Trust in Government",
            Field::PresidentialApproval => "Trump Approval",
            Field::Environment => "Environmental Protection",
            Field::ElectionConfidence => "Election Confidence",
            Field::MinimumWage => "Minimum Wage Opinion",
            Field::GradeLevel => "Grade Level",
            Field::PoliticalKnowledge => "Political Knowledge (Correct)",
        }
    }

    /// The position of the column in the input, starting at 0.
    pub fn column(&self) -> usize {
        *self as usize
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Gpa | Field::GradeLevel => FieldKind::Numeric,
            Field::PoliticalKnowledge => FieldKind::Boolean,
            _ => FieldKind::Categorical,
        }
    }

    /// The answer of a record for this field, before any normalization.
    pub fn raw_value(&self, record: &SurveyRecord) -> String {
        match self {
            Field::Gpa => record.gpa.clone(),
            Field::Home => record.home.clone(),
            Field::Senators => record.senators.clone(),
            Field::NewsSource => record.news_source.raw().to_string(),
            Field::PoliticalParty => record.political_party.raw().to_string(),
            Field::ParentsParty => record.parents_party.raw().to_string(),
            Field::Ideology => record.ideology.clone(),
            Field::TrustGovernment => record.trust_government.clone(),
            Field::PresidentialApproval => record.presidential_approval.clone(),
            Field::Environment => record.environment.clone(),
            Field::ElectionConfidence => record.election_confidence.clone(),
            Field::MinimumWage => record.minimum_wage.clone(),
            Field::GradeLevel => record.grade_level.clone(),
            Field::PoliticalKnowledge => record.political_knowledge.to_string(),
        }
    }
}

impl FromStr for Field {
    type Err = SurveyErrors;

    fn from_str(s: &str) -> Result<Field, SurveyErrors> {
        Field::ALL
            .iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| SurveyErrors::UnknownField(s.to_string()))
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ******** Output data structures *********

/// Number of respondents in one category.
#[derive(PartialEq, Debug, Clone)]
pub struct CategoryCount {
    pub name: String,
    pub count: u64,
}

/// Share of the respondents of a category that answered the knowledge question correctly.
#[derive(PartialEq, Debug, Clone)]
pub struct CategoryRate {
    pub name: String,
    /// Between 0 and 100.
    pub percentage: f64,
    pub count: u64,
    pub correct: u64,
}

impl CategoryRate {
    pub fn new(name: &str, correct: u64, count: u64) -> CategoryRate {
        CategoryRate {
            name: name.to_string(),
            percentage: crate::aggregate::percentage(correct, count),
            count,
            correct,
        }
    }

    pub fn incorrect(&self) -> u64 {
        self.count.saturating_sub(self.correct)
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct CrossTabRow {
    pub name: String,
    pub counts: Vec<(String, u64)>,
}

impl CrossTabRow {
    pub fn get(&self, column: &str) -> u64 {
        self.counts
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Counts for pairs of categories. Rows and columns are in the order they were first seen.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct CrossTab {
    pub rows: Vec<CrossTabRow>,
}

impl CrossTab {
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.total()).sum()
    }

    pub fn columns(&self) -> Vec<String> {
        let mut res: Vec<String> = Vec::new();
        for row in self.rows.iter() {
            for (c, _) in row.counts.iter() {
                if !res.contains(c) {
                    res.push(c.clone());
                }
            }
        }
        res
    }

    pub fn row(&self, name: &str) -> Option<&CrossTabRow> {
        self.rows.iter().find(|r| r.name == name)
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Errors returned by the library.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SurveyErrors {
    UnknownField(String),
}

impl Error for SurveyErrors {}

impl Display for SurveyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyErrors::UnknownField(name) => write!(
                f,
                "Unknown survey field {:?} (expected one of: {})",
                name,
                Field::ALL
                    .iter()
                    .map(|f| f.key())
                    .collect::<Vec<&str>>()
                    .join(", ")
            ),
        }
    }
}
