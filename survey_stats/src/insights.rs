//! The five pre-authored findings of the report.
//!
//! Each insight comes with the data series behind its chart, a few headline
//! figures and a narrative in which the figures are rounded to one decimal.

use log::debug;

use crate::aggregate::*;
use crate::config::*;
use crate::normalize::*;

#[derive(PartialEq, Debug, Clone)]
pub enum InsightSeries {
    Counts(Vec<CategoryCount>),
    Rates(Vec<CategoryRate>),
    /// Rows are the groups, columns the stacked answers.
    Stacked(CrossTab),
}

#[derive(PartialEq, Debug, Clone)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub series: InsightSeries,
    /// Headline figures, in display order.
    pub figures: Vec<(String, f64)>,
    pub narrative: String,
}

impl Insight {
    pub fn figure(&self, name: &str) -> Option<f64> {
        self.figures.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }
}

fn insight(title: &str, description: &str, series: InsightSeries) -> Insight {
    Insight {
        title: title.to_string(),
        description: description.to_string(),
        series,
        figures: Vec::new(),
        narrative: String::new(),
    }
}

pub fn all_insights(records: &[SurveyRecord]) -> Vec<Insight> {
    debug!("all_insights: {} records", records.len());
    vec![
        news_distribution(records),
        knowledge_by_party(records),
        approval_by_ideology(records),
        parental_influence(records),
        environment_by_location(records),
    ]
}

pub fn news_distribution(records: &[SurveyRecord]) -> Insight {
    let counts = frequencies_sorted(records, Field::NewsSource);
    let total: u64 = counts.iter().map(|c| c.count).sum();
    let top = counts.first().map(|c| percentage(c.count, total)).unwrap_or(0.0);
    let tiktok = counts
        .iter()
        .find(|c| c.name == TIKTOK_INSTAGRAM)
        .map(|c| percentage(c.count, total))
        .unwrap_or(0.0);
    let narrative = format!(
        "Social media platforms, particularly TikTok and Instagram, dominate as primary news \
         sources among the surveyed students, representing {:.1}% of respondents.",
        tiktok
    );
    let sources = counts.len() as f64;
    let mut res = insight(
        "News Source Distribution",
        "Primary information channels used by the surveyed students",
        InsightSeries::Counts(counts),
    );
    res.figures = vec![
        ("sampleSize".to_string(), total as f64),
        ("topSourceShare".to_string(), top),
        ("sourceDiversity".to_string(), sources),
    ];
    res.narrative = narrative;
    res
}

/// Knowledge rate of the respondents affiliated with a party, the highest first.
pub fn knowledge_by_party(records: &[SurveyRecord]) -> Insight {
    let affiliated: Vec<SurveyRecord> = records
        .iter()
        .filter(|r| {
            let party = party_simplified(&r.political_party);
            party != NO_AFFILIATION && party != OTHER
        })
        .cloned()
        .collect();
    let rates = knowledge_rates(&affiliated, Field::PoliticalParty);
    let correct: u64 = rates.iter().map(|r| r.correct).sum();
    let count: u64 = rates.iter().map(|r| r.count).sum();
    let overall = percentage(correct, count);
    let (highest, lowest) = match (rates.first(), rates.last()) {
        (Some(h), Some(l)) => (h.clone(), l.clone()),
        _ => (CategoryRate::new("", 0, 0), CategoryRate::new("", 0, 0)),
    };
    let gap = highest.percentage - lowest.percentage;
    let narrative = format!(
        "{} students show the highest accuracy rate at {:.1}%, compared to {:.1}% among {} \
         students. This {:.1} percentage point gap suggests different levels of political \
         engagement across partisan lines.",
        highest.name, highest.percentage, lowest.percentage, lowest.name, gap
    );
    let mut res = insight(
        "Political Knowledge by Party Affiliation",
        "Percentage correctly identifying the state's U.S. Senators",
        InsightSeries::Rates(rates),
    );
    res.figures = vec![
        ("overallRate".to_string(), overall),
        ("highestRate".to_string(), highest.percentage),
        ("sampleSize".to_string(), count as f64),
        ("range".to_string(), gap),
    ];
    res.narrative = narrative;
    res
}

pub const APPROVAL_STACK: [&str; 4] = [
    "Approve",
    "Disapprove",
    "Somewhat Approve",
    "Somewhat Disapprove",
];

pub fn approval_by_ideology(records: &[SurveyRecord]) -> Insight {
    let mut tab = CrossTab::default();
    for r in records.iter() {
        let ideology = ideology_label(&r.ideology);
        let approval = r.presidential_approval.as_str();
        if is_unknown(&ideology) || approval.is_empty() || approval == "Unsure" {
            continue;
        }
        if tab.row(&ideology).is_none() {
            for column in APPROVAL_STACK {
                add_to_cross_tab(&mut tab, &ideology, column, 0);
            }
        }
        let column = if approval.contains("Approve") {
            if approval.contains("Somewhat") {
                Some("Somewhat Approve")
            } else {
                Some("Approve")
            }
        } else if approval.contains("Disapprove") {
            if approval.contains("Somewhat") {
                Some("Somewhat Disapprove")
            } else {
                Some("Disapprove")
            }
        } else {
            None
        };
        if let Some(column) = column {
            add_to_cross_tab(&mut tab, &ideology, column, 1);
        }
    }
    let total = tab.total();
    let ideologies = tab.rows.len();
    let mut res = insight(
        "Presidential Approval by Ideology",
        "Presidential approval across the ideological spectrum",
        InsightSeries::Stacked(tab),
    );
    res.figures = vec![
        ("totalResponses".to_string(), total as f64),
        ("ideologiesMeasured".to_string(), ideologies as f64),
        ("responseCategories".to_string(), APPROVAL_STACK.len() as f64),
    ];
    res.narrative = format!(
        "Presidential approval is polarized along ideological lines across {} responses: \
         conservative students mostly approve while liberal students mostly disapprove.",
        total
    );
    res
}

/// Students whose party is the party of their parents, among those where both are affiliated.
pub fn parental_influence(records: &[SurveyRecord]) -> Insight {
    let mut same = 0;
    let mut different = 0;
    for r in records.iter() {
        let student = party_simplified(&r.political_party);
        let parents = party_simplified(&r.parents_party);
        if [student, parents]
            .iter()
            .any(|p| *p == NO_AFFILIATION || *p == OTHER)
        {
            continue;
        }
        if student == parents {
            same += 1;
        } else {
            different += 1;
        }
    }
    let alignment = percentage(same, same + different);
    let mut res = insight(
        "Parental Influence on Political Identity",
        "Alignment between student and parental party affiliation",
        InsightSeries::Counts(vec![
            CategoryCount {
                name: "Same as Parents".to_string(),
                count: same,
            },
            CategoryCount {
                name: "Different from Parents".to_string(),
                count: different,
            },
        ]),
    );
    res.figures = vec![
        ("alignmentRate".to_string(), alignment),
        ("totalAnalyzed".to_string(), (same + different) as f64),
        ("independentThinkers".to_string(), different as f64),
    ];
    res.narrative = format!(
        "The {:.1}% alignment rate between student and parental party affiliation shows the \
         influence of the family on political identity.",
        alignment
    );
    res
}

pub const ENVIRONMENT_STACK: [&str; 3] = ["Too Little", "Too Much", "Right Amount"];

pub fn environment_by_location(records: &[SurveyRecord]) -> Insight {
    let mut tab = CrossTab::default();
    for r in records.iter() {
        let opinion = r.environment.as_str();
        if is_unknown(&r.home) || opinion.is_empty() || opinion.contains("Unsure") {
            continue;
        }
        if tab.row(&r.home).is_none() {
            for column in ENVIRONMENT_STACK {
                add_to_cross_tab(&mut tab, &r.home, column, 0);
            }
        }
        let column = if opinion.contains("Too little") {
            Some("Too Little")
        } else if opinion.contains("Too much") {
            Some("Too Much")
        } else if opinion.contains("right amount") {
            Some("Right Amount")
        } else {
            None
        };
        if let Some(column) = column {
            add_to_cross_tab(&mut tab, &r.home, column, 1);
        }
    }
    let total = tab.total();
    let locations = tab.rows.len();
    let mut res = insight(
        "Environmental Policy by Geographic Location",
        "Perceptions of government environmental protection by residence type",
        InsightSeries::Stacked(tab),
    );
    res.figures = vec![
        ("totalResponses".to_string(), total as f64),
        ("locations".to_string(), locations as f64),
    ];
    res.narrative = format!(
        "Across {} responses, where students live shapes whether they think the government \
         does too little or too much for environmental protection.",
        total
    );
    res
}
