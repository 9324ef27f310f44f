// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use plancal_core::Category;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct CategoryFormatter {
    columns: Vec<CategoryColumn>,
    format: OutputFormat,
}

impl CategoryFormatter {
    pub fn new(verbose: bool) -> Self {
        let columns = if verbose {
            vec![
                CategoryColumn::ShortId,
                CategoryColumn::Uid,
                CategoryColumn::CreatedAt,
                CategoryColumn::Name,
            ]
        } else {
            vec![CategoryColumn::ShortId, CategoryColumn::Name]
        };
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, categories: &'a [Category]) -> Display<'a> {
        Display {
            categories,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    categories: &'a [Category],
    formatter: &'a CategoryFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.categories)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.categories)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum CategoryColumn {
    ShortId,
    Uid,
    Name,
    CreatedAt,
}

impl TableColumn<Category> for CategoryColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            CategoryColumn::ShortId => "id",
            CategoryColumn::Uid => "uid",
            CategoryColumn::Name => "name",
            CategoryColumn::CreatedAt => "created_at",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Category) -> Cow<'a, str> {
        match self {
            CategoryColumn::ShortId => match data.short_id {
                Some(a) => a.to_string().into(),
                None => data.id.as_str().into(),
            },
            CategoryColumn::Uid => data.id.as_str().into(),
            CategoryColumn::Name => data.name.as_str().into(),
            CategoryColumn::CreatedAt => data.created_at.strftime("%Y-%m-%d").to_string().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            CategoryColumn::ShortId => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}
