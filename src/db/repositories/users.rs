use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::{UserRole, UserStatus};
use crate::db::like_pattern;
use crate::db::models::api::PageParams;
use crate::db::models::user::{NewUser, UpdateUserProfile, User, UserStatusChange};
use crate::schema::users;

#[derive(Debug, Default, Clone)]
pub struct UserFilters {
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

pub struct UserRepo;

impl UserRepo {
    pub fn exists_by_email(
        conn: &mut PgConnection,
        user_email: &str,
    ) -> Result<bool, diesel::result::Error> {
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(user_email)),
        ))
        .get_result(conn)
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        user_email: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        users::table
            .filter(users::email.eq(user_email))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn update_profile(
        conn: &mut PgConnection,
        user_id: Uuid,
        changes: &UpdateUserProfile,
    ) -> Result<User, diesel::result::Error> {
        diesel::update(users::table.find(user_id))
            .set(changes)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn update_password(
        conn: &mut PgConnection,
        user_id: Uuid,
        new_hash: &str,
    ) -> Result<usize, diesel::result::Error> {
        diesel::update(users::table.find(user_id))
            .set((
                users::password_hash.eq(new_hash),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        user_id: Uuid,
        change: &UserStatusChange,
    ) -> Result<User, diesel::result::Error> {
        diesel::update(users::table.find(user_id))
            .set(change)
            .returning(User::as_returning())
            .get_result(conn)
    }

    fn filtered_residents<'a>(filters: &UserFilters) -> users::BoxedQuery<'a, Pg> {
        let mut query = users::table
            .filter(users::role.eq(UserRole::Resident))
            .into_boxed();

        if let Some(status) = filters.status {
            query = query.filter(users::status.eq(status));
        }

        if let Some(search) = filters.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(search);
            query = query.filter(
                users::name
                    .ilike(pattern.clone())
                    .or(users::email.ilike(pattern.clone()))
                    .or(users::flat_number.ilike(pattern)),
            );
        }

        query
    }

    pub fn list_residents(
        conn: &mut PgConnection,
        filters: &UserFilters,
        page: PageParams,
    ) -> Result<(Vec<User>, i64), diesel::result::Error> {
        let total = Self::filtered_residents(filters)
            .count()
            .get_result::<i64>(conn)?;

        let rows = Self::filtered_residents(filters)
            .select(User::as_select())
            .order(users::created_at.desc())
            .then_order_by(users::id.desc())
            .limit(page.limit)
            .offset(page.offset())
            .load(conn)?;

        Ok((rows, total))
    }

    pub fn ids_by_role_and_status(
        conn: &mut PgConnection,
        role: UserRole,
        status: UserStatus,
    ) -> Result<Vec<Uuid>, diesel::result::Error> {
        users::table
            .filter(users::role.eq(role))
            .filter(users::status.eq(status))
            .select(users::id)
            .load(conn)
    }

    pub fn count_residents_by_status(
        conn: &mut PgConnection,
    ) -> Result<Vec<(UserStatus, i64)>, diesel::result::Error> {
        users::table
            .filter(users::role.eq(UserRole::Resident))
            .group_by(users::status)
            .select((users::status, diesel::dsl::count_star()))
            .load(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(users::table.find(user_id)).execute(conn)
    }
}
