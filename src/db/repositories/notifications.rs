use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::api::PageParams;
use crate::db::models::notification::{NewNotification, Notification};
use crate::schema::notifications;

pub struct NotificationRepo;

impl NotificationRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_notification: &NewNotification,
    ) -> Result<Notification, diesel::result::Error> {
        diesel::insert_into(notifications::table)
            .values(new_notification)
            .returning(Notification::as_returning())
            .get_result(conn)
    }

    pub fn insert_many(
        conn: &mut PgConnection,
        batch: &[NewNotification],
    ) -> Result<usize, diesel::result::Error> {
        if batch.is_empty() {
            return Ok(0);
        }
        diesel::insert_into(notifications::table)
            .values(batch)
            .execute(conn)
    }

    fn for_user<'a>(owner_id: Uuid, unread_only: bool) -> notifications::BoxedQuery<'a, Pg> {
        let mut query = notifications::table
            .filter(notifications::user_id.eq(owner_id))
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }
        query
    }

    pub fn list_for_user(
        conn: &mut PgConnection,
        owner_id: Uuid,
        unread_only: bool,
        page: PageParams,
    ) -> Result<(Vec<Notification>, i64), diesel::result::Error> {
        let total = Self::for_user(owner_id, unread_only)
            .count()
            .get_result::<i64>(conn)?;
        let rows = Self::for_user(owner_id, unread_only)
            .select(Notification::as_select())
            .order(notifications::created_at.desc())
            .then_order_by(notifications::id.desc())
            .limit(page.limit)
            .offset(page.offset())
            .load(conn)?;
        Ok((rows, total))
    }

    pub fn count_unread(
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<i64, diesel::result::Error> {
        Self::for_user(owner_id, true).count().get_result(conn)
    }

    /// Marks one notification read. Returns `None` when it does not belong
    /// to `owner_id`.
    pub fn mark_read(
        conn: &mut PgConnection,
        owner_id: Uuid,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, diesel::result::Error> {
        diesel::update(
            notifications::table
                .filter(notifications::id.eq(notification_id))
                .filter(notifications::user_id.eq(owner_id)),
        )
        .set(notifications::is_read.eq(true))
        .returning(Notification::as_returning())
        .get_result(conn)
        .optional()
    }

    pub fn mark_all_read(
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(owner_id))
                .filter(notifications::is_read.eq(false)),
        )
        .set(notifications::is_read.eq(true))
        .execute(conn)
    }

    pub fn delete_for_user(
        conn: &mut PgConnection,
        owner_id: Uuid,
        notification_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(
            notifications::table
                .filter(notifications::id.eq(notification_id))
                .filter(notifications::user_id.eq(owner_id)),
        )
        .execute(conn)
    }
}
