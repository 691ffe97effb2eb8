pub use crate::config::*;

use crate::parser::record_from_fields;
use crate::Survey;

/// A builder for assembling a survey without going through a CSV file.
///
/// This is convenient to test reports on a handful of hand-written answers, or to
/// feed rows coming from another source (a spreadsheet, a database).
///
/// ```
/// use survey_stats::builder::Builder;
/// use survey_stats::Field;
///
/// let mut builder = Builder::new();
/// builder.add_row(&["3.51-4.0", "Urban", "", "Twitter;", "Democrat"]);
/// builder
///     .add_answers(&[(Field::Home, "Rural"), (Field::PoliticalKnowledge, "TRUE")]);
///
/// let survey = builder.build();
/// assert_eq!(survey.len(), 2);
/// assert!(survey.records()[1].political_knowledge);
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    pub(crate) _records: Vec<SurveyRecord>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _records: Vec::new(),
        }
    }

    /// Adds a row of answers, in the column order of the survey export.
    ///
    /// Missing trailing answers are empty.
    pub fn add_row<S: AsRef<str>>(&mut self, fields: &[S]) -> &mut Builder {
        self._records.push(record_from_fields(fields));
        self
    }

    /// Adds a respondent by naming the answered fields. The other answers are empty.
    pub fn add_answers(&mut self, answers: &[(Field, &str)]) -> &mut Builder {
        let mut fields: Vec<String> = vec![String::new(); Field::ALL.len()];
        for (field, value) in answers {
            fields[field.column()] = value.to_string();
        }
        self.add_row(&fields)
    }

    pub fn add_record(&mut self, record: SurveyRecord) -> &mut Builder {
        self._records.push(record);
        self
    }

    pub fn build(self) -> Survey {
        Survey::from_records(self._records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_rows_keep_their_order() {
        let record = SurveyRecord {
            home: "Rural".to_string(),
            political_party: MultiSelect::parse("Independent;"),
            political_knowledge: true,
            ..SurveyRecord::default()
        };
        let mut b = Builder::new();
        b.add_row(&["3.0 or below", "Urban"])
            .add_record(record.clone())
            .add_answers(&[(Field::GradeLevel, "11")]);
        let survey = b.build();
        assert_eq!(survey.len(), 3);
        assert_eq!(survey.records()[0].home, "Urban");
        assert_eq!(survey.records()[1], record);
        assert_eq!(survey.records()[2].grade_level, "11");
        assert!(!survey.records()[2].political_knowledge);
    }
}
