use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::{ComplaintCategory, ComplaintStatus, Priority};
use crate::db::models::api::PageParams;
use crate::db::models::complaint::{
    Complaint, ComplaintStatusChange, ComplaintWithOwner, NewComplaint, UpdateComplaint,
};
use crate::schema::{complaints, users};

#[derive(Debug, Default, Clone)]
pub struct ComplaintFilters {
    /// Restricts the listing to one resident's complaints.
    pub user_id: Option<Uuid>,
    pub status: Option<ComplaintStatus>,
    pub category: Option<ComplaintCategory>,
    pub priority: Option<Priority>,
}

pub struct ComplaintRepo;

impl ComplaintRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_complaint: &NewComplaint,
    ) -> Result<Complaint, diesel::result::Error> {
        diesel::insert_into(complaints::table)
            .values(new_complaint)
            .returning(Complaint::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        complaint_id: Uuid,
    ) -> Result<Option<Complaint>, diesel::result::Error> {
        complaints::table
            .find(complaint_id)
            .select(Complaint::as_select())
            .first(conn)
            .optional()
    }

    fn filtered<'a>(filters: &ComplaintFilters) -> complaints::BoxedQuery<'a, Pg> {
        let mut query = complaints::table.into_boxed();
        if let Some(user_id) = filters.user_id {
            query = query.filter(complaints::user_id.eq(user_id));
        }
        if let Some(status) = filters.status {
            query = query.filter(complaints::status.eq(status));
        }
        if let Some(category) = filters.category {
            query = query.filter(complaints::category.eq(category));
        }
        if let Some(priority) = filters.priority {
            query = query.filter(complaints::priority.eq(priority));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filters: &ComplaintFilters,
        page: PageParams,
    ) -> Result<(Vec<ComplaintWithOwner>, i64), diesel::result::Error> {
        let total = Self::filtered(filters).count().get_result::<i64>(conn)?;

        let ids: Vec<Uuid> = Self::filtered(filters)
            .select(complaints::id)
            .order(complaints::created_at.desc())
            .then_order_by(complaints::id.desc())
            .limit(page.limit)
            .offset(page.offset())
            .load(conn)?;

        let rows: Vec<(Complaint, (String, String, String))> = complaints::table
            .inner_join(users::table)
            .filter(complaints::id.eq_any(&ids))
            .order(complaints::created_at.desc())
            .then_order_by(complaints::id.desc())
            .select((
                Complaint::as_select(),
                (users::name, users::wing, users::flat_number),
            ))
            .load(conn)?;

        let items = rows
            .into_iter()
            .map(|(complaint, (name, wing, flat))| ComplaintWithOwner {
                complaint,
                owner_name: name,
                owner_wing: wing,
                owner_flat_number: flat,
            })
            .collect();

        Ok((items, total))
    }

    pub fn list_by_user(
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<Vec<Complaint>, diesel::result::Error> {
        complaints::table
            .filter(complaints::user_id.eq(owner_id))
            .select(Complaint::as_select())
            .order(complaints::created_at.desc())
            .then_order_by(complaints::id.desc())
            .load(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        complaint_id: Uuid,
        changes: &UpdateComplaint,
    ) -> Result<Complaint, diesel::result::Error> {
        diesel::update(complaints::table.find(complaint_id))
            .set(changes)
            .returning(Complaint::as_returning())
            .get_result(conn)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        complaint_id: Uuid,
        change: &ComplaintStatusChange,
    ) -> Result<Complaint, diesel::result::Error> {
        diesel::update(complaints::table.find(complaint_id))
            .set(change)
            .returning(Complaint::as_returning())
            .get_result(conn)
    }

    pub fn count_by_status(
        conn: &mut PgConnection,
    ) -> Result<Vec<(ComplaintStatus, i64)>, diesel::result::Error> {
        complaints::table
            .group_by(complaints::status)
            .select((complaints::status, diesel::dsl::count_star()))
            .load(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        complaint_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(complaints::table.find(complaint_id)).execute(conn)
    }
}
