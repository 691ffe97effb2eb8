use log::debug;

use crate::config::*;

/// Splits one line of the survey export into trimmed fields.
///
/// A double quote only toggles the quoted state and is dropped; commas inside
/// quotes are kept. Escaped quotes are not recognised.
pub fn split_line(line: &str) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                res.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    res.push(current.trim().to_string());
    res
}

/// Builds a record from positional fields. Missing fields are empty.
pub fn record_from_fields<S: AsRef<str>>(fields: &[S]) -> SurveyRecord {
    let get = |idx: usize| -> String {
        fields
            .get(idx)
            .map(|s| s.as_ref().to_string())
            .unwrap_or_default()
    };
    SurveyRecord {
        gpa: get(Field::Gpa.column()),
        home: get(Field::Home.column()),
        senators: get(Field::Senators.column()),
        news_source: MultiSelect::parse(&get(Field::NewsSource.column())),
        political_party: MultiSelect::parse(&get(Field::PoliticalParty.column())),
        parents_party: MultiSelect::parse(&get(Field::ParentsParty.column())),
        ideology: get(Field::Ideology.column()),
        trust_government: get(Field::TrustGovernment.column()),
        presidential_approval: get(Field::PresidentialApproval.column()),
        environment: get(Field::Environment.column()),
        election_confidence: get(Field::ElectionConfidence.column()),
        minimum_wage: get(Field::MinimumWage.column()),
        grade_level: get(Field::GradeLevel.column()),
        political_knowledge: get(Field::PoliticalKnowledge.column()).eq_ignore_ascii_case("TRUE"),
    }
}

/// Parses the text of a survey export. The first non-blank line is the header.
pub fn parse_records(text: &str) -> Vec<SurveyRecord> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    if let Some(header) = lines.next() {
        debug!("parse_records: header: {:?}", split_line(header));
    }
    lines
        .enumerate()
        .map(|(idx, line)| {
            let fields = split_line(line);
            debug!("parse_records: row {}: {:?}", idx + 1, fields);
            record_from_fields(&fields)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_comma_is_not_a_separator() {
        assert_eq!(split_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn fields_are_trimmed_and_quotes_dropped() {
        assert_eq!(
            split_line(r#" Republican ,  "x" , "#),
            vec!["Republican", "x", ""]
        );
        // Doubled quotes simply toggle twice.
        assert_eq!(split_line(r#"a""b,c"#), vec!["ab", "c"]);
    }

    #[test]
    fn short_rows_get_empty_fields() {
        let r = record_from_fields(&["3.51-4.0", "Urban"]);
        assert_eq!(r.gpa, "3.51-4.0");
        assert_eq!(r.home, "Urban");
        assert_eq!(r.grade_level, "");
        assert!(r.news_source.is_empty());
        assert!(!r.political_knowledge);
    }

    #[test]
    fn knowledge_is_case_insensitive() {
        let mut fields = vec![""; 13];
        fields.push("true");
        assert!(record_from_fields(&fields).political_knowledge);
        fields[13] = "TRUE";
        assert!(record_from_fields(&fields).political_knowledge);
        fields[13] = "yes";
        assert!(!record_from_fields(&fields).political_knowledge);
    }

    #[test]
    fn header_and_blank_lines_are_skipped() {
        let text = "h1,h2\n\n3.01-3.5,Rural,,Twitter;,Democrat\r\n   \n4.01 or above,Urban\n";
        let records = parse_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].home, "Rural");
        assert_eq!(records[0].news_source.tokens(), &["Twitter".to_string()]);
        assert_eq!(records[0].political_party.raw(), "Democrat");
        assert_eq!(records[1].gpa, "4.01 or above");
    }

    #[test]
    fn empty_input() {
        assert!(parse_records("").is_empty());
        assert!(parse_records("only,a,header").is_empty());
    }
}
