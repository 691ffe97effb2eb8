/*!
Descriptive statistics for the student political-opinion survey.

The survey is a small, fixed-schema export: one row per respondent, 14 columns
(GPA bracket, home location, news sources, party, ideology, opinions...). This
crate reads it into an immutable [`Survey`] and computes the tables the report
is made of:

- frequencies, knowledge rates and cross-tabulations ([`aggregate`]),
- the variable explorer ([`explorer::compute_view`]),
- the dashboard overview and topic breakdowns ([`dashboard`]),
- the pre-authored insights with their narratives ([`insights`]).

```
use survey_stats::{aggregate, Field, Survey};

let survey = Survey::bundled();
let rates = aggregate::knowledge_rates(survey.records(), Field::PoliticalParty);
assert_eq!(rates[0].name, "Republican");
```

All the functions are pure: they take the records by reference and can be called
as often as needed.
*/
mod config;
use log::info;

pub mod aggregate;
pub mod builder;
pub mod dashboard;
pub mod explorer;
pub mod insights;
pub mod manual;
pub mod normalize;
pub mod parser;
pub mod stats;

pub use crate::config::*;

/// The survey export shipped with the crate.
pub const BUNDLED_CSV: &str = include_str!("../data/survey-data.csv");

/// The answers of all the respondents. Immutable once loaded.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Survey {
    records: Vec<SurveyRecord>,
}

impl Survey {
    pub fn from_records(records: Vec<SurveyRecord>) -> Survey {
        Survey { records }
    }

    /// Parses the text of a survey export (header line first).
    pub fn from_csv(text: &str) -> Survey {
        Survey::from_records(parser::parse_records(text))
    }

    /// The survey shipped with the crate.
    pub fn bundled() -> Survey {
        Survey::from_csv(BUNDLED_CSV)
    }

    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads a survey from the text of an export.
///
/// Parsing is permissive: malformed rows produce records with empty answers
/// rather than errors.
pub fn load_survey(text: &str) -> Survey {
    let survey = Survey::from_csv(text);
    info!(
        "load_survey: {} records, {} with a correct knowledge answer",
        survey.len(),
        survey
            .records()
            .iter()
            .filter(|r| r.political_knowledge)
            .count()
    );
    survey
}
