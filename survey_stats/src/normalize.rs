// Coarse classifiers for the free-text and multi-select answers.
// The order of the checks matters: the first match wins.

use crate::config::*;

pub const UNKNOWN: &str = "Unknown";
pub const OTHER: &str = "Other";
pub const NO_AFFILIATION: &str = "No Affiliation";
/// The answer offered by the party questions for respondents without a party.
pub const DONT_IDENTIFY: &str = "Don't Know/Don't Identify";

pub const TIKTOK_INSTAGRAM: &str = "TikTok/Instagram";
pub const CABLE_TV: &str = "Cable TV News";
pub const FRIENDS_FAMILY: &str = "Friends & Family";
pub const ONLINE_NEWS: &str = "Online News";
pub const TWITTER: &str = "Twitter";

pub const REPUBLICAN: &str = "Republican";
pub const DEMOCRAT: &str = "Democrat";
pub const INDEPENDENT: &str = "Independent";

/// The main news source of a respondent.
pub fn news_source_primary(source: &MultiSelect) -> &'static str {
    if source.is_empty() {
        UNKNOWN
    } else if source.contains("Tiktok") || source.contains("Instagram") {
        TIKTOK_INSTAGRAM
    } else if source.contains("Cable TV") {
        CABLE_TV
    } else if source.contains("Friends and Family") {
        FRIENDS_FAMILY
    } else if source.contains("Online Newspapers") {
        ONLINE_NEWS
    } else if source.contains("Twitter") {
        TWITTER
    } else {
        OTHER
    }
}

/// Reduces a party answer (student or parents) to a single party.
pub fn party_simplified(party: &MultiSelect) -> &'static str {
    if party.is_empty() || party.raw() == DONT_IDENTIFY {
        NO_AFFILIATION
    } else if party.contains(REPUBLICAN) {
        REPUBLICAN
    } else if party.contains(DEMOCRAT) {
        DEMOCRAT
    } else if party.contains(INDEPENDENT) {
        INDEPENDENT
    } else {
        OTHER
    }
}

/// Canonical ideology label. Unrecognised answers are returned unchanged.
pub fn ideology_label(ideology: &str) -> String {
    if ideology.is_empty() {
        return UNKNOWN.to_string();
    }
    let lower = ideology.to_lowercase();
    let somewhat = ideology.contains("Somewhat");
    let label = if lower.contains("liberal") {
        if somewhat {
            "Somewhat Liberal"
        } else {
            "Liberal"
        }
    } else if lower.contains("conservative") {
        if somewhat {
            "Somewhat Conservative"
        } else {
            "Conservative"
        }
    } else if lower.contains("moderate") {
        "Moderate"
    } else {
        return ideology.to_string();
    };
    label.to_string()
}

/// The category of a record for a field, as used for grouping.
///
/// An empty string or `Unknown` means the record has no usable answer.
pub fn category_key(record: &SurveyRecord, field: Field) -> String {
    match field {
        Field::NewsSource => news_source_primary(&record.news_source).to_string(),
        Field::PoliticalParty => party_simplified(&record.political_party).to_string(),
        Field::ParentsParty => party_simplified(&record.parents_party).to_string(),
        Field::Ideology => ideology_label(&record.ideology),
        f => f.raw_value(record),
    }
}

pub fn is_unknown(key: &str) -> bool {
    key.is_empty() || key == UNKNOWN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(s: &str) -> MultiSelect {
        MultiSelect::parse(s)
    }

    #[test]
    fn news_source_precedence() {
        assert_eq!(
            news_source_primary(&ms("Tiktok or Instagram;Cable TV News;")),
            TIKTOK_INSTAGRAM
        );
        assert_eq!(
            news_source_primary(&ms("Friends and Family;Cable TV News;Twitter;")),
            CABLE_TV
        );
        assert_eq!(
            news_source_primary(&ms("Twitter;Friends and Family")),
            FRIENDS_FAMILY
        );
        assert_eq!(news_source_primary(&ms("Online Newspapers;")), ONLINE_NEWS);
        assert_eq!(news_source_primary(&ms("Twitter")), TWITTER);
        assert_eq!(news_source_primary(&ms("Radio")), OTHER);
        assert_eq!(news_source_primary(&ms("")), UNKNOWN);
    }

    #[test]
    fn party_precedence() {
        assert_eq!(party_simplified(&ms("Republican ;Democrat;")), REPUBLICAN);
        assert_eq!(party_simplified(&ms("Democrat;Independent")), DEMOCRAT);
        assert_eq!(party_simplified(&ms("Independent;")), INDEPENDENT);
        assert_eq!(party_simplified(&ms(DONT_IDENTIFY)), NO_AFFILIATION);
        assert_eq!(party_simplified(&ms("")), NO_AFFILIATION);
        // Only the exact answer counts as no affiliation.
        assert_eq!(party_simplified(&ms("Don't Know;")), OTHER);
    }

    #[test]
    fn ideology_labels() {
        assert_eq!(ideology_label("Somewhat Liberal"), "Somewhat Liberal");
        assert_eq!(ideology_label("liberal"), "Liberal");
        assert_eq!(ideology_label("Somewhat Conservative"), "Somewhat Conservative");
        // The qualifier check is case sensitive.
        assert_eq!(ideology_label("somewhat conservative"), "Conservative");
        assert_eq!(ideology_label("MODERATE"), "Moderate");
        assert_eq!(ideology_label("Libertarian"), "Libertarian");
        assert_eq!(ideology_label(""), UNKNOWN);
    }

    #[test]
    fn category_keys() {
        let mut fields = vec![""; 14];
        fields[3] = "Cable TV News;Twitter;";
        fields[4] = "Republican ";
        fields[6] = "Somewhat Liberal";
        fields[12] = "11";
        fields[13] = "TRUE";
        let r = crate::parser::record_from_fields(&fields);
        assert_eq!(category_key(&r, Field::NewsSource), CABLE_TV);
        assert_eq!(category_key(&r, Field::PoliticalParty), REPUBLICAN);
        assert_eq!(category_key(&r, Field::ParentsParty), NO_AFFILIATION);
        assert_eq!(category_key(&r, Field::Ideology), "Somewhat Liberal");
        assert_eq!(category_key(&r, Field::GradeLevel), "11");
        assert_eq!(category_key(&r, Field::PoliticalKnowledge), "true");
        assert!(is_unknown(&category_key(&r, Field::Home)));
    }
}
