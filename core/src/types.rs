// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

/// Production stage of a content item, in pipeline order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Stage {
    /// Just an idea, nothing produced yet.
    #[default]
    Idea,

    /// Being scripted.
    Script,

    /// Being shot or recorded.
    Shooting,

    /// Being edited.
    Editing,

    /// Finished and waiting for its publish date.
    Scheduled,

    /// Published.
    Posted,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 6] = [
        Stage::Idea,
        Stage::Script,
        Stage::Shooting,
        Stage::Editing,
        Stage::Scheduled,
        Stage::Posted,
    ];

    /// The stage that follows this one, `None` after [`Stage::Posted`].
    #[must_use]
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Idea => Some(Stage::Script),
            Stage::Script => Some(Stage::Shooting),
            Stage::Shooting => Some(Stage::Editing),
            Stage::Editing => Some(Stage::Scheduled),
            Stage::Scheduled => Some(Stage::Posted),
            Stage::Posted => None,
        }
    }
}

impl AsRef<str> for Stage {
    fn as_ref(&self) -> &str {
        match self {
            Stage::Idea => "Idea",
            Stage::Script => "Script",
            Stage::Shooting => "Shooting",
            Stage::Editing => "Editing",
            Stage::Scheduled => "Scheduled",
            Stage::Posted => "Posted",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|a| a.as_ref().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown stage: {s}"))
    }
}

/// Target platform of a content item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Platform {
    /// Instagram.
    #[default]
    #[serde(rename = "IG")]
    #[cfg_attr(feature = "clap", value(name = "ig"))]
    Instagram,

    /// YouTube.
    #[serde(rename = "YT")]
    #[cfg_attr(feature = "clap", value(name = "yt"))]
    YouTube,

    /// Podcast episode.
    Podcast,

    /// Short-form video.
    Shorts,
}

impl Platform {
    /// All platforms.
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::YouTube,
        Platform::Podcast,
        Platform::Shorts,
    ];
}

impl AsRef<str> for Platform {
    fn as_ref(&self) -> &str {
        match self {
            Platform::Instagram => "IG",
            Platform::YouTube => "YT",
            Platform::Podcast => "Podcast",
            Platform::Shorts => "Shorts",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|a| a.as_ref().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown platform: {s}"))
    }
}

/// Sort order, either ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,

    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Converts to a string representation suitable for SQL queries.
    pub(crate) fn sql_keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub(crate) fn is_asc(self) -> bool {
        matches!(self, SortOrder::Asc)
    }
}

/// Pagination with a limit and an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// The maximum number of items to return.
    pub limit: i64,

    /// The number of items to skip before starting to collect the result set.
    pub offset: i64,
}

impl From<(i64, i64)> for Pager {
    fn from((limit, offset): (i64, i64)) -> Self {
        Pager { limit, offset }
    }
}

/// Identifier given by the user, either a full uid or something that may be a short id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Id {
    /// A full unique identifier.
    Uid(String),

    /// A short id if it parses as one and is known, a uid otherwise.
    ShortIdOrUid(String),
}

impl Id {
    /// The raw string as given.
    #[must_use]
    pub fn as_uid(&self) -> &str {
        match self {
            Id::Uid(uid) | Id::ShortIdOrUid(uid) => uid,
        }
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_uid())
    }
}

/// The kind of record an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A category.
    Category,

    /// A content item.
    Content,
}

impl AsRef<str> for Kind {
    fn as_ref(&self) -> &str {
        match self {
            Kind::Category => "category",
            Kind::Content => "content",
        }
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(Kind::Category),
            "content" => Ok(Kind::Content),
            _ => Err(format!("Unknown kind: {s}")),
        }
    }
}
