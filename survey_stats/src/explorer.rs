//! The variable explorer: one chart for any pair of survey fields.
//!
//! The kind of chart follows from the kinds of the two fields:
//! - two numeric fields give a scatter plot with its regression line,
//! - a boolean field (the knowledge question) gives knowledge rates per category
//!   of the other field,
//! - two categorical fields give a cross-tabulation.

use log::debug;

use crate::aggregate::{cross_tabulate, knowledge_rates};
use crate::config::*;
use crate::stats::*;

#[derive(PartialEq, Debug, Clone)]
pub struct ScatterView {
    pub points: Vec<ScatterPoint>,
    /// Not defined when all the x values are equal.
    pub regression: Option<Regression>,
    /// The regression line between the smallest and the largest x, if there is one.
    pub line: Vec<ScatterPoint>,
    pub correlation: f64,
    pub r_squared: f64,
    pub x_mean: f64,
    pub y_mean: f64,
    pub x_std_dev: f64,
    pub y_std_dev: f64,
    pub count: usize,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RateView {
    pub rows: Vec<CategoryRate>,
    /// Unweighted mean of the category rates.
    pub average: f64,
    /// Rate over all the respondents that have a category.
    pub overall_rate: f64,
    pub count: u64,
}

impl RateView {
    pub fn categories(&self) -> usize {
        self.rows.len()
    }

    pub fn highest(&self) -> Option<&CategoryRate> {
        self.rows.first()
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct GroupedView {
    pub table: CrossTab,
}

impl GroupedView {
    pub fn total_responses(&self) -> u64 {
        self.table.total()
    }

    pub fn x_categories(&self) -> usize {
        self.table.rows.len()
    }

    pub fn y_categories(&self) -> usize {
        self.table.columns().len()
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum ChartModel {
    Scatter(ScatterView),
    Rates(RateView),
    Grouped(GroupedView),
}

impl ChartModel {
    pub fn chart_type(&self) -> &'static str {
        match self {
            ChartModel::Scatter(_) => "scatter",
            ChartModel::Rates(_) => "bar",
            ChartModel::Grouped(_) => "grouped",
        }
    }
}

/// Computes the chart for the selected pair of fields.
pub fn compute_view(records: &[SurveyRecord], x: Field, y: Field) -> ChartModel {
    debug!("compute_view: x: {} y: {}", x, y);
    match (x.kind(), y.kind()) {
        (FieldKind::Numeric, FieldKind::Numeric) => ChartModel::Scatter(scatter_view(records, x, y)),
        (_, FieldKind::Boolean) => ChartModel::Rates(rate_view(records, x)),
        (FieldKind::Boolean, _) => ChartModel::Rates(rate_view(records, y)),
        (FieldKind::Categorical, FieldKind::Categorical) => {
            ChartModel::Grouped(GroupedView {
                table: cross_tabulate(records, x, y),
            })
        }
        // A numeric field against a categorical one has no chart.
        _ => ChartModel::Grouped(GroupedView::default()),
    }
}

fn numeric_value(record: &SurveyRecord, field: Field) -> f64 {
    match field {
        Field::Gpa => gpa_to_numeric(&record.gpa),
        Field::GradeLevel => grade_level_to_numeric(&record.grade_level) as f64,
        _ => 0.0,
    }
}

fn scatter_view(records: &[SurveyRecord], x: Field, y: Field) -> ScatterView {
    let points: Vec<ScatterPoint> = records
        .iter()
        .filter(|r| !x.raw_value(r).is_empty() && !y.raw_value(r).is_empty())
        .map(|r| ScatterPoint {
            x: numeric_value(r, x),
            y: numeric_value(r, y),
        })
        .filter(|p| p.x > 0.0 && p.y > 0.0)
        .collect();
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

    let correlation = correlation(&xs, &ys);
    let regression = linear_regression(&xs, &ys);
    let line = match regression {
        Some(reg) => {
            let min_x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            vec![
                ScatterPoint {
                    x: min_x,
                    y: reg.predict(min_x),
                },
                ScatterPoint {
                    x: max_x,
                    y: reg.predict(max_x),
                },
            ]
        }
        None => Vec::new(),
    };

    ScatterView {
        count: points.len(),
        regression,
        line,
        correlation,
        r_squared: correlation * correlation,
        x_mean: mean(&xs),
        y_mean: mean(&ys),
        x_std_dev: std_dev(&xs),
        y_std_dev: std_dev(&ys),
        points,
    }
}

fn rate_view(records: &[SurveyRecord], field: Field) -> RateView {
    let rows = knowledge_rates(records, field);
    let percentages: Vec<f64> = rows.iter().map(|r| r.percentage).collect();
    let correct: u64 = rows.iter().map(|r| r.correct).sum();
    let count: u64 = rows.iter().map(|r| r.count).sum();
    RateView {
        average: mean(&percentages),
        overall_rate: crate::aggregate::percentage(correct, count),
        count,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Survey;

    #[test]
    fn default_selection_is_a_rate_chart() {
        let survey = Survey::bundled();
        let view = compute_view(survey.records(), Field::PoliticalParty, Field::PoliticalKnowledge);
        let rv = match view {
            ChartModel::Rates(rv) => rv,
            v => panic!("unexpected view {:?}", v),
        };
        assert_eq!(rv.categories(), 4);
        assert_eq!(rv.count, 92);
        assert_eq!(round_to(rv.overall_rate, 1), 58.7);
        assert_eq!(rv.highest().unwrap().name, "Republican");
        assert_eq!(round_to(rv.highest().unwrap().percentage, 1), 66.0);
    }

    #[test]
    fn boolean_on_either_axis() {
        let survey = Survey::bundled();
        let a = compute_view(survey.records(), Field::PoliticalKnowledge, Field::Home);
        let b = compute_view(survey.records(), Field::Home, Field::PoliticalKnowledge);
        assert_eq!(a, b);
        assert_eq!(a.chart_type(), "bar");
    }

    #[test]
    fn numeric_pair_is_a_scatter() {
        let survey = Survey::bundled();
        let view = compute_view(survey.records(), Field::Gpa, Field::GradeLevel);
        let sv = match view {
            ChartModel::Scatter(sv) => sv,
            v => panic!("unexpected view {:?}", v),
        };
        // One respondent did not give a GPA.
        assert_eq!(sv.count, 91);
        assert_eq!(round_to(sv.correlation, 3), 0.024);
        assert!((sv.r_squared - sv.correlation * sv.correlation).abs() < 1e-12);
        assert_eq!(sv.line.len(), 2);
        assert_eq!(sv.line[0].x, 2.75);
        assert_eq!(sv.line[1].x, 4.2);
        let reg = sv.regression.unwrap();
        assert!((reg.slope - 0.0642315).abs() < 1e-6);
    }

    #[test]
    fn constant_x_has_no_regression_line() {
        let mut b = crate::builder::Builder::new();
        b.add_answers(&[(Field::Gpa, "3.51-4.0"), (Field::GradeLevel, "9")]);
        b.add_answers(&[(Field::Gpa, "3.51-4.0"), (Field::GradeLevel, "12")]);
        let survey = b.build();
        let view = compute_view(survey.records(), Field::Gpa, Field::GradeLevel);
        match view {
            ChartModel::Scatter(sv) => {
                assert_eq!(sv.count, 2);
                assert_eq!(sv.regression, None);
                assert!(sv.line.is_empty());
                assert_eq!(sv.correlation, 0.0);
                assert_eq!(sv.y_mean, 10.5);
                assert_eq!(sv.y_std_dev, 1.5);
            }
            v => panic!("unexpected view {:?}", v),
        }
    }

    #[test]
    fn categorical_pair_is_grouped() {
        let survey = Survey::bundled();
        let view = compute_view(survey.records(), Field::PoliticalParty, Field::Home);
        let gv = match view {
            ChartModel::Grouped(gv) => gv,
            v => panic!("unexpected view {:?}", v),
        };
        assert_eq!(gv.x_categories(), 4);
        assert_eq!(gv.y_categories(), 3);
        assert_eq!(gv.total_responses(), 92);
        assert_eq!(gv.table.rows[0].name, "Democrat");
        assert_eq!(gv.table.row("Republican").unwrap().get("Suburban"), 43);
    }

    #[test]
    fn mixed_numeric_and_categorical_is_empty() {
        let survey = Survey::bundled();
        let view = compute_view(survey.records(), Field::Gpa, Field::Home);
        assert_eq!(view, ChartModel::Grouped(GroupedView::default()));
    }

    #[test]
    fn empty_survey() {
        let view = compute_view(&[], Field::Ideology, Field::PoliticalKnowledge);
        match view {
            ChartModel::Rates(rv) => {
                assert_eq!(rv.categories(), 0);
                assert_eq!(rv.average, 0.0);
                assert_eq!(rv.overall_rate, 0.0);
                assert!(rv.highest().is_none());
            }
            v => panic!("unexpected view {:?}", v),
        }
    }
}
