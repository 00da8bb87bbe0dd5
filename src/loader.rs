use crate::rates::RateTable;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Marker text that identifies the header row of a rate sheet.
const HEADER_MARKER: &str = "Item";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read rate list: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Rate list contains no worksheets")]
    NoWorksheet,
}

/// Build a rate table from an uploaded spreadsheet
///
/// Reads the first worksheet. Everything up to and including the first row
/// whose column A mentions `Item` is skipped; a sheet without such a row is
/// read from the top. Each remaining row needs a name in column A and a
/// rate in column B. Rows whose rate is blank, zero or not a number are
/// dropped without failing the load.
///
/// # Arguments
/// * `bytes` - Raw file contents (xlsx, xls, xlsb or ods)
///
/// # Returns
/// * `Result<RateTable, LoadError>` - The parsed rates, possibly empty, or an
///   error when the file is not a readable workbook
///
/// # Examples
/// ```no_run
/// use fruzy_invoice::loader::parse_rate_list;
///
/// let bytes = std::fs::read("rates.xlsx").unwrap();
/// match parse_rate_list(&bytes) {
///     Ok(table) => println!("Loaded {} rates", table.len()),
///     Err(e) => eprintln!("Error loading rates: {}", e),
/// }
/// ```
pub fn parse_rate_list(bytes: &[u8]) -> Result<RateTable, LoadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)??;

    Ok(rates_from_range(&range))
}

fn rates_from_range(range: &Range<Data>) -> RateTable {
    let mut table = RateTable::new();

    // Column A must be part of the used range, otherwise no row has a name.
    let first_col = range.start().map_or(0, |(_, col)| col);
    if first_col != 0 {
        return table;
    }

    let rows: Vec<&[Data]> = range.rows().collect();
    let header = rows.iter().position(|row| {
        row.first()
            .is_some_and(|cell| is_populated(cell) && cell.to_string().contains(HEADER_MARKER))
    });
    let body = match header {
        Some(index) => &rows[index + 1..],
        None => &rows[..],
    };

    for row in body {
        let (Some(name), Some(rate)) = (row.first(), row.get(1)) else {
            continue;
        };
        if !is_populated(name) || !is_populated(rate) {
            continue;
        }
        match parse_rate(rate) {
            Some(rate) => table.insert(name.to_string().trim(), rate),
            None => log::debug!("Skipping rate row for {:?}: unreadable rate {:?}", name, rate),
        }
    }

    table
}

// Blank text and numeric zero count as empty, like an unfilled cell.
fn is_populated(cell: &Data) -> bool {
    match cell {
        Data::Empty => false,
        Data::String(s) => !s.is_empty(),
        Data::Float(f) => *f != 0.0,
        Data::Int(i) => *i != 0,
        Data::Bool(b) => *b,
        _ => true,
    }
}

fn parse_rate(cell: &Data) -> Option<f64> {
    let rate = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    rate.is_finite().then_some(rate)
}

/// Check that an uploaded file name carries a spreadsheet extension
///
/// # Examples
/// ```
/// use fruzy_invoice::loader::is_spreadsheet_filename;
///
/// assert!(is_spreadsheet_filename("rates.XLSX"));
/// assert!(!is_spreadsheet_filename("rates.csv"));
/// ```
pub fn is_spreadsheet_filename(filename: &str) -> bool {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    matches!(extension.as_deref(), Some("xlsx") | Some("xls"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{Workbook, Worksheet};

    enum Cell<'a> {
        Text(&'a str),
        Number(f64),
        Blank,
    }
    use Cell::{Blank, Number, Text};

    fn sheet_bytes(rows: &[&[Cell]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let mut worksheet = Worksheet::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Text(s) => {
                        worksheet.write_string(r as u32, c as u16, *s).unwrap();
                    }
                    Number(n) => {
                        worksheet.write_number(r as u32, c as u16, *n).unwrap();
                    }
                    Blank => {}
                }
            }
        }
        workbook.push_worksheet(worksheet);
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn blank_and_unreadable_rows_are_skipped() {
        let bytes = sheet_bytes(&[
            &[Text("Item"), Text("Rate")],
            &[Text("Tomato"), Number(120.0)],
            &[Text(""), Text("")],
            &[Text("Garlic"), Text("abc")],
        ]);
        let table = parse_rate_list(&bytes).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Tomato"), Some(120.0));
    }

    #[test]
    fn rows_above_the_header_are_ignored() {
        let bytes = sheet_bytes(&[
            &[Text("Fruzy rate list"), Number(2024.0)],
            &[Text("Item Name"), Text("Rate (PKR)")],
            &[Text(" Onion "), Text(" 75.5 ")],
        ]);
        let table = parse_rate_list(&bytes).unwrap();
        let rows: Vec<(&str, f64)> = table.iter().collect();
        assert_eq!(rows, vec![("Onion", 75.5)]);
    }

    #[test]
    fn sheet_without_header_is_read_from_the_top() {
        let bytes = sheet_bytes(&[
            &[Text("Tomato"), Number(120.0)],
            &[Text("Garlic"), Number(400.0)],
        ]);
        let table = parse_rate_list(&bytes).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Garlic"), Some(400.0));
    }

    #[test]
    fn zero_and_missing_rates_are_skipped() {
        let bytes = sheet_bytes(&[
            &[Text("Item"), Text("Rate")],
            &[Text("Onion"), Number(0.0)],
            &[Text("Garlic")],
            &[Blank, Number(50.0)],
            &[Text("Old Potato"), Number(65.0)],
        ]);
        let table = parse_rate_list(&bytes).unwrap();
        let rows: Vec<(&str, f64)> = table.iter().collect();
        assert_eq!(rows, vec![("Old Potato", 65.0)]);
    }

    #[test]
    fn garbage_bytes_fail_the_load() {
        let result = parse_rate_list(b"definitely not a workbook");
        assert!(matches!(result, Err(LoadError::Workbook(_))));
    }

    #[test]
    fn recognizes_spreadsheet_extensions() {
        assert!(is_spreadsheet_filename("rates.xlsx"));
        assert!(is_spreadsheet_filename("old-rates.xls"));
        assert!(!is_spreadsheet_filename("rates.xlsx.txt"));
        assert!(!is_spreadsheet_filename("rates"));
        assert!(!is_spreadsheet_filename(""));
    }
}
