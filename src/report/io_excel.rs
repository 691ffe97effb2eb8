use crate::report::*;

use calamine::{open_workbook, DataType, Reader, Xlsx};
use survey_stats::builder::Builder;

/// Reads the answers from an Excel workbook, with the same columns as the CSV export.
///
/// The first row is the header.
pub fn read_excel_file(path: &str, worksheet_name: Option<&str>) -> ReportResult<Survey> {
    info!("read_excel_file: {:?} worksheet: {:?}", path, worksheet_name);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?,
    };

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu {})?;
    debug!("read_excel_file: header: {:?}", header);

    let mut builder = Builder::new();
    for (idx, row) in iter.enumerate() {
        debug!("read_excel_file: row: {:?}", row);
        let mut fields: Vec<String> = Vec::new();
        for cell in row.iter() {
            // Header is line 1.
            fields.push(read_cell(cell, (idx + 2) as u64)?);
        }
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        builder.add_row(&fields);
    }
    let survey = builder.build();
    info!("read_excel_file: {} records", survey.len());
    Ok(survey)
}

fn read_cell(cell: &DataType, lineno: u64) -> ReportResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok(String::new()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(true) => Ok("TRUE".to_string()),
        DataType::Bool(false) => Ok("FALSE".to_string()),
        _ => Err(ReportError::ExcelWrongCellType {
            lineno,
            content: format!("{:?}", cell),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_cell(&DataType::Float(12.0), 2).unwrap(), "12");
        assert_eq!(read_cell(&DataType::Float(3.5), 2).unwrap(), "3.5");
        assert_eq!(read_cell(&DataType::Int(9), 2).unwrap(), "9");
        assert_eq!(read_cell(&DataType::Bool(true), 2).unwrap(), "TRUE");
        assert_eq!(read_cell(&DataType::Empty, 2).unwrap(), "");
        assert_eq!(
            read_cell(&DataType::String("Urban".to_string()), 2).unwrap(),
            "Urban"
        );
        assert!(matches!(
            read_cell(&DataType::DateTime(44000.0), 7),
            Err(ReportError::ExcelWrongCellType { lineno: 7, .. })
        ));
    }
}
