use crate::report::*;

pub fn read_csv_file(path: &str) -> ReportResult<Survey> {
    info!("read_csv_file: {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    Ok(load_survey(&contents))
}
