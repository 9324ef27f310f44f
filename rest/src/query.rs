// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

/// Query-string builder for table requests (`select`, filters, ordering, paging).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects columns, including embedded relations such as `*,category:categories(*)`.
    #[must_use]
    pub fn select(self, columns: &str) -> Self {
        self.push("select", columns.to_string())
    }

    /// Filters rows where `column` equals `value`.
    #[must_use]
    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("eq.{value}"))
    }

    /// Filters rows where `column` is null.
    #[must_use]
    pub fn is_null(self, column: &str) -> Self {
        self.push(column, "is.null".to_string())
    }

    /// Filters rows where `column` is not null.
    #[must_use]
    pub fn not_null(self, column: &str) -> Self {
        self.push(column, "not.is.null".to_string())
    }

    /// Filters rows where `column` is greater than or equal to `value`.
    #[must_use]
    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("gte.{value}"))
    }

    /// Filters rows where `column` is less than or equal to `value`.
    #[must_use]
    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("lte.{value}"))
    }

    /// Appends an ordering term. Repeated calls produce a combined `order` parameter.
    #[must_use]
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let term = format!("{column}.{}", if ascending { "asc" } else { "desc" });
        if let Some((_, v)) = self.params.iter_mut().find(|(k, _)| k == "order") {
            v.push(',');
            v.push_str(&term);
        } else {
            self.params.push(("order".to_string(), term));
        }
        self
    }

    /// Limits the number of returned rows.
    #[must_use]
    pub fn limit(self, limit: i64) -> Self {
        self.push("limit", limit.to_string())
    }

    /// Skips the first `offset` rows.
    #[must_use]
    pub fn offset(self, offset: i64) -> Self {
        self.push("offset", offset.to_string())
    }

    /// Query parameters in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    /// Parameters without `select`, `order`, `limit` and `offset`, i.e. the filters only.
    #[must_use]
    pub fn filters(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "select" | "order" | "limit" | "offset"))
            .cloned()
            .collect()
    }

    fn push(mut self, key: &str, value: String) -> Self {
        self.params.push((key.to_string(), value));
        self
    }
}
