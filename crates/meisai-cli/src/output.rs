//! CSV serialization of extracted line items.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use meisai_core::LineItem;

/// UTF-8 byte-order mark, prepended for spreadsheet compatibility.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Column labels of the output header row.
const OUTPUT_HEADER: [&str; 2] = ["明細名", "税込金額"];

/// Serialize line items as CSV: header row, quoted fields, UTF-8 with an
/// optional byte-order mark.
pub fn to_csv(items: &[LineItem], bom: bool) -> anyhow::Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::new();
    if bom {
        buf.extend_from_slice(UTF8_BOM);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(buf);

    writer.write_record(OUTPUT_HEADER)?;
    for item in items {
        let amount = item.tax_included_amount.to_string();
        writer.write_record([item.description.as_str(), amount.as_str()])?;
    }

    Ok(writer.into_inner()?)
}

/// Write line items to a file, or to stdout when no path is given.
pub fn write_items(items: &[LineItem], path: Option<&Path>, bom: bool) -> anyhow::Result<()> {
    let data = to_csv(items, bom)?;

    match path {
        Some(path) => {
            fs::write(path, &data)?;
            println!("Wrote {} line items to {}", items.len(), path.display());
        }
        None => {
            io::stdout().write_all(&data)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_output_shape() {
        let items = vec![
            LineItem::new("部材 ネジ 10台@100", 1100),
            LineItem::new("送料", 500),
        ];

        let data = to_csv(&items, false).unwrap();
        let text = String::from_utf8(data).unwrap();

        assert_eq!(
            text,
            "\"明細名\",\"税込金額\"\n\"部材 ネジ 10台@100\",\"1100\"\n\"送料\",\"500\"\n"
        );
    }

    #[test]
    fn test_bom_prefix() {
        let data = to_csv(&[], true).unwrap();
        assert!(data.starts_with(&[0xEF, 0xBB, 0xBF]));

        let data = to_csv(&[], false).unwrap();
        assert!(!data.starts_with(&[0xEF, 0xBB, 0xBF]));
    }
}
