use crate::report::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportName")]
    pub report_name: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "surveyDate")]
    pub survey_date: Option<String>,
    #[serde(rename = "includeNarratives")]
    pub include_narratives: Option<bool>,
}

/// The configuration written in the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "reportName")]
    pub report_name: String,
    #[serde(rename = "surveyDate")]
    pub survey_date: Option<String>,
    pub provider: String,
    pub source: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerSelection {
    pub x: String,
    pub y: String,
}

impl ExplorerSelection {
    pub fn fields(&self) -> ReportResult<(Field, Field)> {
        let x = self.x.parse::<Field>().context(UnknownFieldSnafu {})?;
        let y = self.y.parse::<Field>().context(UnknownFieldSnafu {})?;
        Ok((x, y))
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "dataSource")]
    pub data_source: Option<DataSource>,
    pub explorer: Option<Vec<ExplorerSelection>>,
}

pub fn read_config(path: &str) -> ReportResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: ReportConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config() {
        let config: ReportConfig =
            serde_json::from_str(r#"{"outputSettings": {"reportName": "r"}}"#).unwrap();
        assert_eq!(config.output_settings.report_name, "r");
        assert_eq!(config.data_source, None);
        assert_eq!(config.explorer, None);
    }

    #[test]
    fn explorer_fields() {
        let sel = ExplorerSelection {
            x: "GPA".to_string(),
            y: "GradeLevel".to_string(),
        };
        assert_eq!(sel.fields().unwrap(), (Field::Gpa, Field::GradeLevel));
        let bad = ExplorerSelection {
            x: "GPA".to_string(),
            y: "Height".to_string(),
        };
        assert!(matches!(bad.fields(), Err(ReportError::UnknownField { .. })));
    }
}
