//! Per-category palette files: one `(name, R, G, B)` row per item.
//!
//! The format is a comma-separated table with a header row. The `Name`,
//! `R`, `G` and `B` columns are located by header (case-insensitive, any
//! order); other columns are ignored. Blank lines are skipped but still
//! counted, so row `n` in an error is the `n`-th line after the header.
//!
//! A field may be wrapped in one pair of double quotes, which is removed.
//! Quoted commas are not supported. Item names must be unique within a
//! palette since they name the clusters.
//!
//! ```text
//! Name,R,G,B
//! Vermilion,227,66,52
//! "Crimson"  ,220,20,60
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::DataFormatError;

/// One colored item of a category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteItem {
    pub name: String,
    pub rgb: [u8; 3],
}

/// Reads and parses the palette file of `category`.
pub fn load_palette(category: &str, path: &Path) -> Result<Vec<PaletteItem>, DataFormatError> {
    let text = fs::read_to_string(path).map_err(|source| DataFormatError::Io {
        category: category.to_owned(),
        path: path.to_path_buf(),
        source,
    })?;
    let items = parse_palette(category, &text)?;
    log::debug!(
        "loaded {} palette rows for `{}` from {}",
        items.len(),
        category,
        path.display()
    );
    Ok(items)
}

/// Parses palette text. Row numbers in errors count lines after the
/// header from 1.
pub fn parse_palette(category: &str, text: &str) -> Result<Vec<PaletteItem>, DataFormatError> {
    let mut lines = text.lines().skip_while(|l| l.trim().is_empty());

    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    let columns = Columns::locate(category, header)?;

    let mut items = Vec::new();
    let mut seen = HashSet::new();
    for (i, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = i + 1;
        let item = columns.parse_row(category, row, line)?;
        if !seen.insert(item.name.clone()) {
            return Err(DataFormatError::DuplicateName {
                category: category.to_owned(),
                row,
                name: item.name,
            });
        }
        items.push(item);
    }
    Ok(items)
}

/// Trims a field and drops one pair of surrounding double quotes.
fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .map_or(field, str::trim)
}

/// Positions of the four used columns within a row.
struct Columns {
    name: usize,
    rgb: [usize; 3],
}

const CHANNELS: [&str; 3] = ["R", "G", "B"];

impl Columns {
    fn locate(category: &str, header: &str) -> Result<Self, DataFormatError> {
        let fields: Vec<&str> = header.split(',').map(unquote).collect();
        let find = |column: &'static str| {
            fields
                .iter()
                .position(|f| f.eq_ignore_ascii_case(column))
                .ok_or_else(|| DataFormatError::MissingColumn {
                    category: category.to_owned(),
                    column,
                })
        };

        Ok(Self {
            name: find("Name")?,
            rgb: [find(CHANNELS[0])?, find(CHANNELS[1])?, find(CHANNELS[2])?],
        })
    }

    fn parse_row(
        &self,
        category: &str,
        row: usize,
        line: &str,
    ) -> Result<PaletteItem, DataFormatError> {
        let fields: Vec<&str> = line.split(',').collect();
        let field = |idx: usize, column: &'static str| {
            fields
                .get(idx)
                .map(|f| unquote(f))
                .ok_or_else(|| DataFormatError::MissingField {
                    category: category.to_owned(),
                    row,
                    column,
                })
        };

        let name = field(self.name, "Name")?;
        if name.is_empty() {
            return Err(DataFormatError::EmptyName {
                category: category.to_owned(),
                row,
            });
        }

        let mut rgb = [0u8; 3];
        for (slot, (&idx, channel)) in rgb.iter_mut().zip(self.rgb.iter().zip(CHANNELS)) {
            let value = field(idx, channel)?;
            *slot = value.parse().map_err(|_| DataFormatError::BadChannel {
                category: category.to_owned(),
                row,
                channel,
                value: value.to_owned(),
            })?;
        }

        Ok(PaletteItem {
            name: name.to_owned(),
            rgb,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_trims_names() {
        let text = "Name,R,G,B\n  Vermilion ,227,66,52\n\nCrimson,220, 20,60\n";
        let items = parse_palette("Red", text).unwrap();
        assert_eq!(
            items,
            vec![
                PaletteItem {
                    name: "Vermilion".into(),
                    rgb: [227, 66, 52]
                },
                PaletteItem {
                    name: "Crimson".into(),
                    rgb: [220, 20, 60]
                },
            ]
        );
    }

    #[test]
    fn columns_are_found_by_header() {
        let text = "b,Note,g,name,r\n10,ignored,20,Teal,30\n";
        let items = parse_palette("Cyan", text).unwrap();
        assert_eq!(items[0].name, "Teal");
        assert_eq!(items[0].rgb, [30, 20, 10]);
    }

    #[test]
    fn empty_text_has_no_items() {
        assert!(parse_palette("White", "").unwrap().is_empty());
        assert!(parse_palette("White", "Name,R,G,B\n").unwrap().is_empty());
    }

    #[test]
    fn out_of_range_channel_names_category_and_row() {
        let text = "Name,R,G,B\nOk,1,2,3\nBad,1,256,3\n";
        match parse_palette("Yellow", text) {
            Err(DataFormatError::BadChannel {
                category,
                row,
                channel,
                value,
            }) => {
                assert_eq!(category, "Yellow");
                assert_eq!(row, 2);
                assert_eq!(channel, "G");
                assert_eq!(value, "256");
            }
            other => panic!("expected BadChannel, got {other:?}"),
        }
    }

    #[test]
    fn non_integer_channel_is_rejected() {
        for bad in ["12.5", "-1", "red", ""] {
            let text = format!("Name,R,G,B\nX,{bad},0,0\n");
            assert!(
                matches!(
                    parse_palette("Black", &text),
                    Err(DataFormatError::BadChannel { row: 1, .. })
                ),
                "accepted `{bad}`"
            );
        }
    }

    #[test]
    fn short_row_and_missing_column_are_rejected() {
        assert!(matches!(
            parse_palette("Black", "Name,R,G,B\nInk,1,2\n"),
            Err(DataFormatError::MissingField { row: 1, column: "B", .. })
        ));
        assert!(matches!(
            parse_palette("Black", "Name,R,G\nInk,1,2\n"),
            Err(DataFormatError::MissingColumn { column: "B", .. })
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            parse_palette("Black", "Name,R,G,B\n  ,1,2,3\n"),
            Err(DataFormatError::EmptyName { row: 1, .. })
        ));
    }

    #[test]
    fn rows_count_blank_lines() {
        let text = "\nName,R,G,B\nOk,1,2,3\n\nBad,1,300,3\n";
        match parse_palette("Red", text) {
            Err(DataFormatError::BadChannel { row, value, .. }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "300");
            }
            other => panic!("expected BadChannel, got {other:?}"),
        }
    }

    #[test]
    fn surrounding_quotes_are_removed() {
        let text = "\"Name\",\"R\",G,B\n\" Crimson \",\"220\",20,60\n\"\",1,2,3\n";
        match parse_palette("Red", text) {
            Err(DataFormatError::EmptyName { row: 2, .. }) => {}
            other => panic!("expected EmptyName on row 2, got {other:?}"),
        }

        let items = parse_palette("Red", "Name,R,G,B\n\"Crimson\",220,20,60\n").unwrap();
        assert_eq!(items[0].name, "Crimson");
        assert_eq!(items[0].rgb, [220, 20, 60]);
    }

    #[test]
    fn lone_quote_is_kept_as_a_name() {
        let items = parse_palette("Red", "Name,R,G,B\n\",1,2,3\n").unwrap();
        assert_eq!(items[0].name, "\"");
    }

    #[test]
    fn duplicate_item_names_are_rejected() {
        let text = "Name,R,G,B\nCrimson,220,20,60\nVermilion,227,66,52\n Crimson ,1,2,3\n";
        match parse_palette("Red", text) {
            Err(DataFormatError::DuplicateName { category, row, name }) => {
                assert_eq!(category, "Red");
                assert_eq!(row, 3);
                assert_eq!(name, "Crimson");
            }
            other => panic!("expected DuplicateName, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_the_category() {
        let err = load_palette("Cyan", Path::new("/nonexistent/cyan.csv")).unwrap_err();
        assert!(matches!(err, DataFormatError::Io { ref category, .. } if category == "Cyan"));
    }
}
