// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::Arc;

use jiff::civil::Date;
use jiff::{Timestamp, ToSpan, Zoned};
use tokio::fs;

use crate::calendar::MonthView;
use crate::localdb::LocalDb;
use crate::remotedb::RemoteDb;
use crate::schedule::{DropTarget, check_day_drop};
use crate::short_id::ShortIds;
use crate::store::ContentStore;
use crate::{
    BackendConfig, Category, Config, ContentConditions, ContentDraft, ContentItem, ContentPatch,
    ContentSort, ContentSortKey, Id, Kind, MAX_TIMELINE_DAYS, Pager, SortOrder, YearMonth,
    normalize_category_name, session,
};

/// Categories and content items loaded together.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Snapshot {
    /// All categories, ordered by name.
    pub categories: Vec<Category>,

    /// Content items, optionally limited to one category.
    pub contents: Vec<ContentItem>,
}

/// Content planner application core.
#[derive(Debug, Clone)]
pub struct Planner {
    now: Zoned,
    config: Config,
    db: LocalDb,
    store: Arc<dyn ContentStore>,
    short_ids: ShortIds,
}

impl Planner {
    /// Creates a new planner with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the state directory or
    /// database cannot be opened, or the remote backend rejects the sign-in.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        let now = Zoned::now();

        config.normalize()?;
        prepare(&config).await?;

        let db = LocalDb::open(config.db_path().as_deref())
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        let store: Arc<dyn ContentStore> = match &config.backend {
            BackendConfig::Local => Arc::new(db.clone()),
            BackendConfig::Remote(rest) => {
                tracing::info!(base_url = %rest.base_url, "using remote backend");
                let session_path = config.session_path();
                let client = session::connect(rest, session_path.as_deref()).await?;
                Arc::new(RemoteDb::new(client))
            }
        };

        let short_ids = ShortIds::new(db.clone());
        Ok(Self {
            now,
            config,
            db,
            store,
            short_ids,
        })
    }

    /// The current time in the planner.
    pub fn now(&self) -> Zoned {
        self.now.clone()
    }

    /// Today's date in the planner.
    pub fn today(&self) -> Date {
        self.now.date()
    }

    /// Refresh the current time to now.
    pub fn refresh_now(&mut self) {
        self.now = Zoned::now();
    }

    /// Pins the current time, for callers that plan relative to another day.
    pub fn set_now(&mut self, now: Zoned) {
        self.now = now;
    }

    /// The normalized configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a default content draft based on the configuration.
    pub fn default_content_draft(&self) -> ContentDraft {
        ContentDraft::default(&self.config)
    }

    /// Lists all categories, ordered by name.
    pub async fn list_categories(&self) -> Result<Vec<Category>, Box<dyn Error>> {
        let categories = self.store.list_categories().await?;
        self.short_ids.categories(categories).await
    }

    /// Get a category by its id.
    pub async fn get_category(&self, id: &Id) -> Result<Category, Box<dyn Error>> {
        let uid = self.short_ids.get_uid(id, Kind::Category).await?;
        let found = self.store.get_category(&uid).await?;
        match found {
            Some(category) => self.short_ids.category(category).await,
            None => Err(format!("Category not found: {id}").into()),
        }
    }

    /// Adds a new category.
    pub async fn new_category(&self, name: &str) -> Result<Category, Box<dyn Error>> {
        let name = normalize_category_name(name)?;
        let category = self.store.insert_category(&name, self.timestamp()).await?;
        tracing::debug!(id = %category.id, name = %category.name, "created category");
        self.short_ids.category(category).await
    }

    /// Renames a category.
    pub async fn rename_category(&self, id: &Id, name: &str) -> Result<Category, Box<dyn Error>> {
        let name = normalize_category_name(name)?;
        let uid = self.short_ids.get_uid(id, Kind::Category).await?;
        let renamed = self.store.rename_category(&uid, &name).await?;
        match renamed {
            Some(category) => self.short_ids.category(category).await,
            None => Err(format!("Category not found: {id}").into()),
        }
    }

    /// Deletes a category that has no content items.
    pub async fn delete_category(&self, id: &Id) -> Result<Category, Box<dyn Error>> {
        let category = self.get_category(id).await?;

        let conds = ContentConditions {
            category_id: Some(category.id.clone()),
            ..Default::default()
        };
        let count = self.store.count_contents(&conds).await?;
        if count > 0 {
            return Err(format!(
                "Category {} still has {count} content item(s), move or delete them first",
                category.name
            )
            .into());
        }

        if !self.store.delete_category(&category.id).await? {
            return Err(format!("Category not found: {id}").into());
        }
        self.short_ids.remove(&category.id).await?;
        Ok(category)
    }

    /// Get a content item by its id.
    pub async fn get_content(&self, id: &Id) -> Result<ContentItem, Box<dyn Error>> {
        let uid = self.short_ids.get_uid(id, Kind::Content).await?;
        let found = self.store.get_content(&uid).await?;
        match found {
            Some(item) => self.short_ids.content(item).await,
            None => Err(format!("Content item not found: {id}").into()),
        }
    }

    /// Adds a new content item from the given draft.
    pub async fn new_content(&self, draft: ContentDraft) -> Result<ContentItem, Box<dyn Error>> {
        let mut draft = draft.normalize()?;
        draft.category_id = self.resolve_category(&draft.category_id).await?;

        let item = self.store.insert_content(&draft, self.timestamp()).await?;
        tracing::debug!(id = %item.id, name = %item.name, "created content item");
        self.short_ids.content(item).await
    }

    /// Applies a patch to a content item.
    pub async fn update_content(
        &self,
        id: &Id,
        patch: ContentPatch,
    ) -> Result<ContentItem, Box<dyn Error>> {
        let mut patch = patch.normalize()?;
        if let Some(category_id) = &patch.category_id {
            patch.category_id = Some(self.resolve_category(category_id).await?);
        }

        let uid = self.short_ids.get_uid(id, Kind::Content).await?;
        self.patch_content(&uid, &patch)
            .await?
            .ok_or_else(|| format!("Content item not found: {id}").into())
    }

    /// Deletes a content item.
    pub async fn delete_content(&self, id: &Id) -> Result<ContentItem, Box<dyn Error>> {
        let item = self.get_content(id).await?;
        if !self.store.delete_content(&item.id).await? {
            return Err(format!("Content item not found: {id}").into());
        }
        self.short_ids.remove(&item.id).await?;
        Ok(item)
    }

    /// List content items matching the given conditions, sorted and optionally paginated.
    pub async fn list_contents(
        &self,
        conds: &ContentConditions,
        sort: &[ContentSort],
        pager: Option<&Pager>,
    ) -> Result<Vec<ContentItem>, Box<dyn Error>> {
        let items = self.store.list_contents(conds, sort, pager).await?;
        self.short_ids.contents(items).await
    }

    /// Counts the content items matching the given conditions.
    pub async fn count_contents(&self, conds: &ContentConditions) -> Result<i64, Box<dyn Error>> {
        self.store.count_contents(conds).await
    }

    /// Moves a content item to the next production stage.
    pub async fn advance_stage(&self, id: &Id) -> Result<ContentItem, Box<dyn Error>> {
        let item = self.get_content(id).await?;
        let Some(next) = item.stage.next() else {
            return Err(format!("{} is already {}", item.name, item.stage).into());
        };

        let patch = ContentPatch {
            stage: Some(next),
            ..Default::default()
        };
        self.patch_content(&item.id, &patch)
            .await?
            .ok_or_else(|| format!("Content item not found: {id}").into())
    }

    /// Loads categories and content items, with the items optionally limited to one category.
    pub async fn snapshot(&self, category: Option<&Id>) -> Result<Snapshot, Box<dyn Error>> {
        let categories = self.list_categories().await?;
        let conds = ContentConditions {
            category_id: self.resolve_filter(category).await?,
            ..Default::default()
        };
        let contents = self.list_contents(&conds, &[], None).await?;
        Ok(Snapshot {
            categories,
            contents,
        })
    }

    /// Content items without a publish date.
    pub async fn backlog(&self, category: Option<&Id>) -> Result<Vec<ContentItem>, Box<dyn Error>> {
        let conds = ContentConditions::backlog(self.resolve_filter(category).await?);
        let sort = [ContentSort::from((ContentSortKey::CreatedAt, SortOrder::Asc))];
        self.list_contents(&conds, &sort, None).await
    }

    /// Builds the month grid, including timelines of items scheduled after the month.
    ///
    /// Items are fetched up to [`MAX_TIMELINE_DAYS`] past the month, which every
    /// store guarantees as the timeline limit.
    pub async fn month_view(
        &self,
        month: YearMonth,
        category: Option<&Id>,
    ) -> Result<MonthView, Box<dyn Error>> {
        let from = month.first_day();
        let until = month
            .last_day()
            .checked_add(i64::from(MAX_TIMELINE_DAYS).days())
            .unwrap_or(Date::MAX);
        let conds =
            ContentConditions::scheduled_between(from, until, self.resolve_filter(category).await?);
        let sort = [ContentSort::from((
            ContentSortKey::ScheduledDate,
            SortOrder::Asc,
        ))];
        let items = self.list_contents(&conds, &sort, None).await?;

        tracing::debug!(%month, count = items.len(), "building month view");
        Ok(MonthView::build(
            month,
            self.config.week_start,
            self.today(),
            &items,
        ))
    }

    /// Schedules a content item on a day, refusing days the timeline cannot fit.
    pub async fn schedule(&self, id: &Id, date: Date) -> Result<ContentItem, Box<dyn Error>> {
        self.drop_item(id, DropTarget::Day(date)).await
    }

    /// Moves a content item back to the backlog.
    pub async fn unschedule(&self, id: &Id) -> Result<ContentItem, Box<dyn Error>> {
        self.drop_item(id, DropTarget::Backlog).await
    }

    /// Drops a content item on a calendar day or the backlog.
    ///
    /// Dropping an unscheduled item on the backlog leaves it unchanged.
    pub async fn drop_item(
        &self,
        id: &Id,
        target: DropTarget,
    ) -> Result<ContentItem, Box<dyn Error>> {
        let item = self.get_content(id).await?;

        let scheduled_date = match target {
            DropTarget::Day(date) => {
                check_day_drop(date, item.timeline_days, self.today())?;
                Some(date)
            }
            DropTarget::Backlog if !item.is_scheduled() => {
                tracing::debug!(id = %item.id, "item already in backlog");
                return Ok(item);
            }
            DropTarget::Backlog => None,
        };

        let patch = ContentPatch {
            scheduled_date: Some(scheduled_date),
            ..Default::default()
        };
        self.patch_content(&item.id, &patch)
            .await?
            .ok_or_else(|| format!("Content item not found: {id}").into())
    }

    /// Flush the short IDs to remove all entries.
    pub async fn flush_short_ids(&self) -> Result<u64, Box<dyn Error>> {
        self.short_ids.flush().await
    }

    /// Close the planner, releasing the database connection.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.db.close().await
    }

    async fn patch_content(
        &self,
        uid: &str,
        patch: &ContentPatch,
    ) -> Result<Option<ContentItem>, Box<dyn Error>> {
        let updated = self
            .store
            .update_content(uid, patch, self.timestamp())
            .await?;
        match updated {
            Some(item) => Ok(Some(self.short_ids.content(item).await?)),
            None => Ok(None),
        }
    }

    /// Resolves a category reference to the uid of an existing category.
    async fn resolve_category(&self, raw: &str) -> Result<String, Box<dyn Error>> {
        let category = self.get_category(&Id::ShortIdOrUid(raw.to_string())).await?;
        Ok(category.id)
    }

    async fn resolve_filter(&self, category: Option<&Id>) -> Result<Option<String>, Box<dyn Error>> {
        match category {
            Some(id) => Ok(Some(self.get_category(id).await?.id)),
            None => Ok(None),
        }
    }

    /// Write time for `created_at` and `updated_at`, taken from the wall clock
    /// so a pinned or long-lived planner does not stamp stale values.
    fn timestamp(&self) -> Timestamp {
        Timestamp::now()
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = &config.state_dir {
        tracing::debug!(path = %parent.display(), "ensuring state directory exists");
        fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create state directory {}: {e}", parent.display()))?;
    }
    Ok(())
}
