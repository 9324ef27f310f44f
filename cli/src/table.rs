// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A column of a table over rows of `T`.
pub trait TableColumn<T> {
    /// Header of the column, also the key in JSON output.
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub trait TableStyle {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result;
}

#[derive(Debug)]
pub struct Table<'a, S, C, T> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S: TableStyle, C: TableColumn<T>, T> Table<'a, S, C, T> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, C: TableColumn<T>, T> fmt::Display for Table<'_, S, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.write(f, self.columns, self.data)
    }
}

/// Space separated cells, padded to the widest cell of each column.
#[derive(Debug, Clone, Copy)]
pub struct TableStyleBasic {
    separator: &'static str,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self { separator: " " }
    }
}

impl TableStyle for TableStyleBasic {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let table: Vec<Vec<Cow<'_, str>>> = data
            .iter()
            .map(|row| columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let widths = get_column_max_width(&table, columns.len());

        for (i, (cells, row)) in table.iter().zip(data).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            for (j, (col, cell)) in columns.iter().zip(cells).enumerate() {
                let last = j == columns.len() - 1;
                let padding = widths[j].saturating_sub(cell.width());
                let cell = match col.padding_direction() {
                    // the last column does not need trailing spaces
                    PaddingDirection::Left if last => cell.to_string(),
                    PaddingDirection::Left => format!("{cell}{}", " ".repeat(padding)),
                    PaddingDirection::Right => format!("{}{cell}", " ".repeat(padding)),
                };

                match col.get_color(row) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }

                if !last {
                    write!(f, "{}", self.separator)?;
                }
            }
        }
        Ok(())
    }
}

/// A JSON array with one object per row, keyed by column name.
#[derive(Debug, Clone, Copy)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = data
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| (col.name().into_owned(), col.format(row).into_owned().into()))
                    .collect()
            })
            .collect();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

fn get_column_max_width(table: &[Vec<Cow<'_, str>>], columns: usize) -> Vec<usize> {
    let mut max_width = vec![0; columns];
    for row in table {
        for (i, cell) in row.iter().enumerate() {
            max_width[i] = max_width[i].max(cell.width());
        }
    }
    max_width
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Name;
    struct Count;

    enum Column {
        Name(Name),
        Count(Count),
    }

    impl TableColumn<(&str, u32)> for Column {
        fn name(&self) -> Cow<'_, str> {
            match self {
                Column::Name(_) => "name".into(),
                Column::Count(_) => "count".into(),
            }
        }

        fn format<'a>(&self, data: &'a (&str, u32)) -> Cow<'a, str> {
            match self {
                Column::Name(_) => data.0.into(),
                Column::Count(_) => data.1.to_string().into(),
            }
        }

        fn padding_direction(&self) -> PaddingDirection {
            match self {
                Column::Name(_) => PaddingDirection::Left,
                Column::Count(_) => PaddingDirection::Right,
            }
        }
    }

    #[test]
    fn basic_style_aligns_columns() {
        colored::control::set_override(false);
        let columns = [Column::Count(Count), Column::Name(Name)];
        let data = [("Pasta", 1), ("Ramen", 12)];

        let out = Table::new(TableStyleBasic::new(), &columns, &data).to_string();
        assert_eq!(out, " 1 Pasta\n12 Ramen");
    }

    #[test]
    fn json_style_keys_by_column_name() {
        let columns = [Column::Name(Name), Column::Count(Count)];
        let data = [("Pasta", 1)];

        let out = Table::new(TableStyleJson::new(), &columns, &data).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!([{ "name": "Pasta", "count": "1" }]));
    }

    #[test]
    fn empty_table_prints_nothing() {
        let columns = [Column::Name(Name)];
        let data: [(&str, u32); 0] = [];
        assert_eq!(
            Table::new(TableStyleBasic::new(), &columns, &data).to_string(),
            ""
        );
    }
}
