use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::family_member::{FamilyMember, NewFamilyMember, UpdateFamilyMember};
use crate::schema::family_members;

pub struct FamilyMemberRepo;

impl FamilyMemberRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_member: &NewFamilyMember,
    ) -> Result<FamilyMember, diesel::result::Error> {
        diesel::insert_into(family_members::table)
            .values(new_member)
            .returning(FamilyMember::as_returning())
            .get_result(conn)
    }

    pub fn list_by_user(
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<Vec<FamilyMember>, diesel::result::Error> {
        family_members::table
            .filter(family_members::user_id.eq(owner_id))
            .select(FamilyMember::as_select())
            .order(family_members::created_at.asc())
            .then_order_by(family_members::id.asc())
            .load(conn)
    }

    pub fn find_by_id_for_user(
        conn: &mut PgConnection,
        owner_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<FamilyMember>, diesel::result::Error> {
        family_members::table
            .filter(family_members::id.eq(member_id))
            .filter(family_members::user_id.eq(owner_id))
            .select(FamilyMember::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        member_id: Uuid,
    ) -> Result<Option<FamilyMember>, diesel::result::Error> {
        family_members::table
            .find(member_id)
            .select(FamilyMember::as_select())
            .first(conn)
            .optional()
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        member_id: Uuid,
        changes: &UpdateFamilyMember,
    ) -> Result<FamilyMember, diesel::result::Error> {
        diesel::update(family_members::table.find(member_id))
            .set(changes)
            .returning(FamilyMember::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        member_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(family_members::table.find(member_id)).execute(conn)
    }
}
