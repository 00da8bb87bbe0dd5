use crate::invoice::{Invoice, item_label};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

/// File name offered to the browser for every rendered invoice.
pub const INVOICE_FILENAME: &str = "Fruzy_Invoice.xlsx";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const BRAND_GREEN: u32 = 0x27AE60;
const INVOICE_NUMBER: u32 = 9999;
const TIMESTAMP_FORMAT: &str = "%d-%b-%Y %I:%M %p";
const MONEY_FORMAT: &str = "#,##0.00";

const HEADER_ROW: u32 = 5;
const HEADERS: [&str; 5] = ["No.", "Item Name", "Quantity", "Rate (PKR)", "Total (PKR)"];
const COLUMN_WIDTHS: [f64; 5] = [8.0, 30.0, 15.0, 15.0, 15.0];

/// Render an invoice as an XLSX workbook
///
/// Layout, top to bottom: the green `FRUZY` band across columns A to E, the
/// invoice number and timestamp, the customer line, the header row, one
/// bordered row per item and, after a blank row, the grand total.
///
/// # Arguments
/// * `invoice` - A validated invoice
/// * `now` - Time printed in the top right corner
///
/// # Returns
/// * `Result<Vec<u8>, XlsxError>` - XLSX file content as bytes or an error
///
/// # Examples
/// ```
/// use fruzy_invoice::downloader::invoice_to_xlsx;
/// use fruzy_invoice::invoice::{InvoiceRequest, LineItem, Unit};
///
/// let invoice = InvoiceRequest {
///     customer_name: "Ali".to_string(),
///     customer_phone: String::new(),
///     items: vec![LineItem {
///         display: "ٹماٹر (Tomato) (Large)".to_string(),
///         qty: 2.0,
///         unit: Unit::Kg,
///         rate: 150.0,
///         total: 300.0,
///     }],
/// }
/// .validate()
/// .unwrap();
///
/// let now = chrono::Local::now().naive_local();
/// match invoice_to_xlsx(&invoice, now) {
///     Ok(xlsx_data) => println!("XLSX generated: {} bytes", xlsx_data.len()),
///     Err(e) => eprintln!("Failed to generate XLSX: {}", e),
/// }
/// ```
pub fn invoice_to_xlsx(invoice: &Invoice, now: NaiveDateTime) -> Result<Vec<u8>, XlsxError> {
    let green = Color::RGB(BRAND_GREEN);

    let title = Format::new()
        .set_font_size(72)
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(green)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let plain = Format::new();
    let right = Format::new().set_align(FormatAlign::Right);
    let bold = Format::new().set_bold();
    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(green)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let bordered = Format::new().set_border(FormatBorder::Thin);
    let wrapped = Format::new()
        .set_border(FormatBorder::Thin)
        .set_text_wrap();
    let money = Format::new()
        .set_border(FormatBorder::Thin)
        .set_num_format(MONEY_FORMAT);
    let total_money = Format::new().set_bold().set_num_format(MONEY_FORMAT);

    let mut worksheet = Worksheet::new();

    worksheet.merge_range(0, 0, 0, 4, "FRUZY", &title)?;
    worksheet.set_row_height(0, 90)?;

    worksheet.write_string_with_format(1, 1, &format!("Invoice #{}", INVOICE_NUMBER), &plain)?;
    worksheet.write_string_with_format(1, 4, &now.format(TIMESTAMP_FORMAT).to_string(), &right)?;

    worksheet.write_string_with_format(3, 1, "Customer Name:", &plain)?;
    worksheet.write_string_with_format(3, 2, &invoice.customer_name, &bold)?;
    worksheet.write_string_with_format(3, 4, &invoice.customer_phone, &bold)?;

    for (col, name) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(HEADER_ROW, col as u16, *name, &header)?;
    }

    let mut row = HEADER_ROW + 1;
    for (index, item) in invoice.items.iter().enumerate() {
        worksheet.write_number_with_format(row, 0, (index + 1) as f64, &bordered)?;
        worksheet.write_string_with_format(row, 1, &item_label(&item.display), &wrapped)?;
        worksheet.write_string_with_format(row, 2, &item.quantity_label(), &bordered)?;
        worksheet.write_number_with_format(row, 3, item.rate, &money)?;
        worksheet.write_number_with_format(row, 4, item.total, &money)?;
        row += 1;
    }

    let total_row = row + 1;
    worksheet.write_string_with_format(total_row, 0, "Total Amount:", &bold)?;
    worksheet.write_number_with_format(total_row, 4, invoice.grand_total(), &total_money)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let mut workbook = Workbook::new();
    workbook.push_worksheet(worksheet);

    workbook.save_to_buffer()
}
