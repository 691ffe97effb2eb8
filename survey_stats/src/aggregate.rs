use log::debug;

use crate::config::*;
use crate::normalize::{category_key, is_unknown};

/// `part / total` as a percentage, 0 when the total is 0.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Percentage of all the respondents that answered the knowledge question correctly.
pub fn knowledge_rate(records: &[SurveyRecord]) -> f64 {
    let correct = records.iter().filter(|r| r.political_knowledge).count() as u64;
    percentage(correct, records.len() as u64)
}

/// Number of respondents per category, in the order the categories first appear.
///
/// Respondents without a usable answer are not counted.
pub fn frequencies(records: &[SurveyRecord], field: Field) -> Vec<CategoryCount> {
    let mut res: Vec<CategoryCount> = Vec::new();
    for r in records.iter() {
        let key = category_key(r, field);
        if is_unknown(&key) {
            continue;
        }
        match res.iter_mut().find(|c| c.name == key) {
            Some(c) => c.count += 1,
            None => res.push(CategoryCount {
                name: key,
                count: 1,
            }),
        }
    }
    debug!("frequencies: {}: {:?}", field, res);
    res
}

/// Same as [`frequencies`], the most common category first.
pub fn frequencies_sorted(records: &[SurveyRecord], field: Field) -> Vec<CategoryCount> {
    let mut res = frequencies(records, field);
    res.sort_by(|a, b| b.count.cmp(&a.count));
    res
}

/// Knowledge rate per category, the highest rate first.
pub fn knowledge_rates(records: &[SurveyRecord], field: Field) -> Vec<CategoryRate> {
    // (name, correct, total)
    let mut groups: Vec<(String, u64, u64)> = Vec::new();
    for r in records.iter() {
        let key = category_key(r, field);
        if is_unknown(&key) {
            continue;
        }
        let idx = match groups.iter().position(|(name, _, _)| *name == key) {
            Some(idx) => idx,
            None => {
                groups.push((key, 0, 0));
                groups.len() - 1
            }
        };
        let g = &mut groups[idx];
        g.2 += 1;
        if r.political_knowledge {
            g.1 += 1;
        }
    }
    let mut res: Vec<CategoryRate> = groups
        .iter()
        .map(|(name, correct, total)| CategoryRate::new(name, *correct, *total))
        .collect();
    sort_by_rate(&mut res);
    debug!("knowledge_rates: {}: {:?}", field, res);
    res
}

/// Sorts by decreasing percentage, keeping the current order for ties.
pub fn sort_by_rate(rates: &mut [CategoryRate]) {
    rates.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Two-way table of counts between the categories of `x` (rows) and `y` (columns).
pub fn cross_tabulate(records: &[SurveyRecord], x: Field, y: Field) -> CrossTab {
    cross_tabulate_by(records, |r| {
        let x_key = category_key(r, x);
        let y_key = category_key(r, y);
        if is_unknown(&x_key) || is_unknown(&y_key) {
            None
        } else {
            Some((x_key, y_key))
        }
    })
}

/// Two-way table of counts for an arbitrary classification.
///
/// Records for which `classify` returns `None` are skipped.
pub fn cross_tabulate_by<F>(records: &[SurveyRecord], classify: F) -> CrossTab
where
    F: Fn(&SurveyRecord) -> Option<(String, String)>,
{
    let mut tab = CrossTab::default();
    for r in records.iter() {
        if let Some((x_key, y_key)) = classify(r) {
            add_to_cross_tab(&mut tab, &x_key, &y_key, 1);
        }
    }
    tab
}

/// Adds a count to a cell, creating the row and the column as needed.
pub fn add_to_cross_tab(tab: &mut CrossTab, row: &str, column: &str, count: u64) {
    let row_idx = match tab.rows.iter().position(|r| r.name == row) {
        Some(idx) => idx,
        None => {
            tab.rows.push(CrossTabRow {
                name: row.to_string(),
                counts: Vec::new(),
            });
            tab.rows.len() - 1
        }
    };
    let counts = &mut tab.rows[row_idx].counts;
    match counts.iter_mut().find(|(c, _)| c == column) {
        Some((_, n)) => *n += count,
        None => counts.push((column.to_string(), count)),
    }
}

/// Counts the respondents matching each of the given answers, in the order of the answers.
pub fn count_by_labels<F>(records: &[SurveyRecord], labels: &[&str], matches: F) -> Vec<CategoryCount>
where
    F: Fn(&SurveyRecord, &str) -> bool,
{
    labels
        .iter()
        .map(|&label| CategoryCount {
            name: label.to_string(),
            count: records.iter().filter(|&r| matches(r, label)).count() as u64,
        })
        .collect()
}

/// Knowledge rate of the respondents matching each of the given answers, in the order of the answers.
pub fn rate_by_labels<F>(records: &[SurveyRecord], labels: &[&str], matches: F) -> Vec<CategoryRate>
where
    F: Fn(&SurveyRecord, &str) -> bool,
{
    labels
        .iter()
        .map(|&label| {
            let selected: Vec<&SurveyRecord> =
                records.iter().filter(|&r| matches(r, label)).collect();
            let correct = selected.iter().filter(|r| r.political_knowledge).count() as u64;
            CategoryRate::new(label, correct, selected.len() as u64)
        })
        .collect()
}
