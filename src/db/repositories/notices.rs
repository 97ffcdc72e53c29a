use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::{NoticeCategory, Priority};
use crate::db::models::api::PageParams;
use crate::db::models::notice::{NewNotice, Notice, UpdateNotice};
use crate::schema::notices;

#[derive(Debug, Default, Clone)]
pub struct NoticeFilters {
    /// When set, only active notices that have not expired at this instant.
    pub visible_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub category: Option<NoticeCategory>,
    pub priority: Option<Priority>,
}

pub struct NoticeRepo;

impl NoticeRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_notice: &NewNotice,
    ) -> Result<Notice, diesel::result::Error> {
        diesel::insert_into(notices::table)
            .values(new_notice)
            .returning(Notice::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        notice_id: Uuid,
    ) -> Result<Option<Notice>, diesel::result::Error> {
        notices::table
            .find(notice_id)
            .select(Notice::as_select())
            .first(conn)
            .optional()
    }

    fn filtered<'a>(filters: &NoticeFilters) -> notices::BoxedQuery<'a, Pg> {
        let mut query = notices::table.into_boxed();
        if let Some(now) = filters.visible_at {
            query = query
                .filter(notices::is_active.eq(true))
                .filter(
                    notices::expiry_date
                        .is_null()
                        .or(notices::expiry_date.gt(now)),
                );
        }
        if let Some(active) = filters.is_active {
            query = query.filter(notices::is_active.eq(active));
        }
        if let Some(category) = filters.category {
            query = query.filter(notices::category.eq(category));
        }
        if let Some(priority) = filters.priority {
            query = query.filter(notices::priority.eq(priority));
        }
        query
    }

    /// Newest first; `id` breaks ties so page boundaries stay stable.
    fn newest_first<'a, ST>(
        query: notices::BoxedQuery<'a, Pg, ST>,
    ) -> notices::BoxedQuery<'a, Pg, ST> {
        query
            .order(notices::created_at.desc())
            .then_order_by(notices::id.desc())
    }

    pub fn list(
        conn: &mut PgConnection,
        filters: &NoticeFilters,
        page: PageParams,
    ) -> Result<(Vec<Notice>, i64), diesel::result::Error> {
        let total = Self::filtered(filters).count().get_result::<i64>(conn)?;
        let rows = Self::newest_first(Self::filtered(filters).select(Notice::as_select()))
            .limit(page.limit)
            .offset(page.offset())
            .load(conn)?;
        Ok((rows, total))
    }

    pub fn count_visible(
        conn: &mut PgConnection,
        now: DateTime<Utc>,
    ) -> Result<i64, diesel::result::Error> {
        let filters = NoticeFilters {
            visible_at: Some(now),
            ..Default::default()
        };
        Self::filtered(&filters).count().get_result(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        notice_id: Uuid,
        changes: &UpdateNotice,
    ) -> Result<Notice, diesel::result::Error> {
        diesel::update(notices::table.find(notice_id))
            .set(changes)
            .returning(Notice::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        notice_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(notices::table.find(notice_id)).execute(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    #[test]
    fn listing_order_has_an_id_tiebreaker() {
        let query = NoticeRepo::newest_first(
            NoticeRepo::filtered(&NoticeFilters::default()).select(notices::id),
        );
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(
            sql.contains(r#"ORDER BY "notices"."created_at" DESC, "notices"."id" DESC"#),
            "{}",
            sql
        );
    }
}
