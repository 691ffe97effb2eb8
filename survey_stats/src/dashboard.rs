//! The overview numbers and the per-topic tables of the dashboard.
//!
//! Unlike the explorer, these tables use fixed lists of answers, in the order they
//! are offered by the questionnaire. Most of them match answers by substring, so
//! an answer such as `Somewhat Approve` is also counted under `Approve`.

use log::debug;

use crate::aggregate::*;
use crate::config::*;
use crate::normalize::{DEMOCRAT, DONT_IDENTIFY, INDEPENDENT, REPUBLICAN};

pub const NEWS_SOURCES: [&str; 5] = [
    "Tiktok or Instagram",
    "Cable TV News",
    "Friends and Family",
    "Online Newspapers",
    "Twitter",
];
pub const PARTIES: [&str; 4] = [REPUBLICAN, DEMOCRAT, INDEPENDENT, DONT_IDENTIFY];
pub const MAJOR_PARTIES: [&str; 3] = [REPUBLICAN, DEMOCRAT, INDEPENDENT];
pub const IDEOLOGIES: [&str; 5] = [
    "Liberal",
    "Somewhat Liberal",
    "Moderate",
    "Somewhat Conservative",
    "Conservative",
];
pub const GPA_BRACKETS: [&str; 4] = ["3.0 or below", "3.01-3.5", "3.51-4.0", "4.01 or above"];
pub const APPROVAL_LEVELS: [&str; 5] = [
    "Approve",
    "Somewhat Approve",
    "Unsure",
    "Somewhat Disapprove",
    "Disapprove",
];
pub const CONFIDENCE_LEVELS: [&str; 4] = [
    "Very confident",
    "Somewhat confident",
    "Not confident",
    "Unsure",
];
pub const ENVIRONMENT_OPINIONS: [&str; 4] = [
    "Too much",
    "About the right amount",
    "Too little",
    "Unsure/Don't Know",
];
pub const TRUST_LEVELS: [&str; 4] = [
    "All of the time",
    "Most of the time",
    "Some of the time",
    "Never",
];
pub const WAGE_OPINIONS: [&str; 3] = ["Increased", "Maintained", "Don't Know"];

/// The headline numbers.
#[derive(PartialEq, Debug, Clone)]
pub struct Overview {
    pub total_responses: u64,
    pub correct_answers: u64,
    pub knowledge_rate: f64,
    pub republicans: u64,
    pub democrats: u64,
    pub independents: u64,
    pub suburban: u64,
    pub urban_rate: f64,
    pub tiktok_users: u64,
    pub tiktok_rate: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Dashboard {
    pub overview: Overview,
    /// `count` is the number of users of the source, `correct` the knowledgeable ones.
    pub news_sources: Vec<CategoryRate>,
    pub parties: Vec<CategoryCount>,
    pub ideologies: Vec<CategoryCount>,
    pub parent_alignment: Vec<CategoryCount>,
    pub knowledge_by_party: Vec<CategoryRate>,
    pub knowledge_by_gpa: Vec<CategoryRate>,
    pub approval: Vec<CategoryCount>,
    pub approval_by_party: CrossTab,
    pub election_confidence: Vec<CategoryCount>,
    pub environment: Vec<CategoryCount>,
    pub environment_by_party: CrossTab,
    pub trust: Vec<CategoryCount>,
    pub minimum_wage: Vec<CategoryCount>,
}

pub fn dashboard(records: &[SurveyRecord]) -> Dashboard {
    debug!("dashboard: {} records", records.len());
    Dashboard {
        overview: overview(records),
        news_sources: news_source_usage(records),
        parties: party_distribution(records),
        ideologies: ideology_distribution(records),
        parent_alignment: parent_alignment(records),
        knowledge_by_party: rate_by_labels(records, &PARTIES, |r, p| r.political_party.contains(p)),
        knowledge_by_gpa: rate_by_labels(records, &GPA_BRACKETS, |r, g| r.gpa == g),
        approval: approval_distribution(records),
        approval_by_party: approval_by_party(records),
        election_confidence: non_zero(count_by_labels(records, &CONFIDENCE_LEVELS, |r, l| {
            r.election_confidence.contains(l)
        })),
        environment: environment_distribution(records),
        environment_by_party: environment_by_party(records),
        trust: non_zero(count_by_labels(records, &TRUST_LEVELS, |r, l| {
            r.trust_government == l
        })),
        minimum_wage: non_zero(count_by_labels(records, &WAGE_OPINIONS, |r, l| {
            r.minimum_wage == l
        })),
    }
}

pub fn overview(records: &[SurveyRecord]) -> Overview {
    let total = records.len() as u64;
    let correct = count_where(records, |r| r.political_knowledge);
    let urban = count_where(records, |r| r.home == "Urban");
    let tiktok_users = count_where(records, |r| {
        r.news_source.contains("Tiktok") || r.news_source.contains("Instagram")
    });
    Overview {
        total_responses: total,
        correct_answers: correct,
        knowledge_rate: percentage(correct, total),
        republicans: count_where(records, |r| r.political_party.contains(REPUBLICAN)),
        democrats: count_where(records, |r| r.political_party.contains(DEMOCRAT)),
        independents: count_where(records, |r| r.political_party.contains(INDEPENDENT)),
        suburban: count_where(records, |r| r.home == "Suburban"),
        urban_rate: percentage(urban, total),
        tiktok_users,
        tiktok_rate: percentage(tiktok_users, total),
    }
}

/// Users and knowledge rate per news source, the most used first.
///
/// A respondent is counted for every source they selected.
pub fn news_source_usage(records: &[SurveyRecord]) -> Vec<CategoryRate> {
    let mut res: Vec<CategoryRate> = rate_by_labels(records, &NEWS_SOURCES, |r, s| r.news_source.contains(s))
        .into_iter()
        .map(|mut rate| {
            rate.name = rate.name.replace(" or ", "/").replace("Tiktok", "TikTok");
            rate
        })
        .collect();
    res.sort_by(|a, b| b.count.cmp(&a.count));
    res
}

pub fn party_distribution(records: &[SurveyRecord]) -> Vec<CategoryCount> {
    count_by_labels(records, &PARTIES, |r, p| r.political_party.contains(p))
}

pub fn ideology_distribution(records: &[SurveyRecord]) -> Vec<CategoryCount> {
    non_zero(count_by_labels(records, &IDEOLOGIES, |r, i| r.ideology.contains(i)))
}

/// Respondents whose first party answer is found in the answer of their parents.
///
/// The first segment of the raw answer is used, even when empty (it then matches).
/// Only respondents that answered both party questions are counted.
pub fn parent_alignment(records: &[SurveyRecord]) -> Vec<CategoryCount> {
    let answered: Vec<&SurveyRecord> = records
        .iter()
        .filter(|r| !r.political_party.is_empty() && !r.parents_party.is_empty())
        .collect();
    let same = answered
        .iter()
        .filter(|r| match r.political_party.raw().split(';').next().map(str::trim) {
            Some(p) => r.parents_party.raw().contains(p),
            None => true,
        })
        .count() as u64;
    vec![
        CategoryCount {
            name: "Same as Parents".to_string(),
            count: same,
        },
        CategoryCount {
            name: "Different from Parents".to_string(),
            count: answered.len() as u64 - same,
        },
    ]
}

pub fn approval_distribution(records: &[SurveyRecord]) -> Vec<CategoryCount> {
    non_zero(count_by_labels(records, &APPROVAL_LEVELS, |r, l| {
        r.presidential_approval.contains(l)
    }))
}

/// Approve / Disapprove / Unsure counts for each major party.
pub fn approval_by_party(records: &[SurveyRecord]) -> CrossTab {
    let mut tab = CrossTab::default();
    for party in MAJOR_PARTIES {
        let approval = |r: &SurveyRecord, answer: &str| {
            r.political_party.contains(party) && r.presidential_approval.contains(answer)
        };
        let approve = count_where(records, |r| {
            approval(r, "Approve") && !r.presidential_approval.contains("Disapprove")
        });
        let disapprove = count_where(records, |r| approval(r, "Disapprove"));
        let unsure = count_where(records, |r| approval(r, "Unsure"));
        add_to_cross_tab(&mut tab, party, "Approve", approve);
        add_to_cross_tab(&mut tab, party, "Disapprove", disapprove);
        add_to_cross_tab(&mut tab, party, "Unsure", unsure);
    }
    tab
}

pub fn environment_distribution(records: &[SurveyRecord]) -> Vec<CategoryCount> {
    non_zero(count_by_labels(records, &ENVIRONMENT_OPINIONS, |r, o| {
        r.environment == o
    }))
}

/// Environment opinions (too little, right amount, too much) for each major party.
pub fn environment_by_party(records: &[SurveyRecord]) -> CrossTab {
    let columns = [
        ("Too little", "Too little"),
        ("Right amount", "About the right amount"),
        ("Too much", "Too much"),
    ];
    let mut tab = CrossTab::default();
    for party in MAJOR_PARTIES {
        for (column, answer) in columns {
            let n = records
                .iter()
                .filter(|r| r.political_party.contains(party) && r.environment == answer)
                .count() as u64;
            add_to_cross_tab(&mut tab, party, column, n);
        }
    }
    tab
}

fn count_where<F>(records: &[SurveyRecord], pred: F) -> u64
where
    F: Fn(&SurveyRecord) -> bool,
{
    records.iter().filter(|&r| pred(r)).count() as u64
}

fn non_zero(counts: Vec<CategoryCount>) -> Vec<CategoryCount> {
    counts.into_iter().filter(|c| c.count > 0).collect()
}
