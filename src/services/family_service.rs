use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::family_member::{
        CreateFamilyMemberRequest, FamilyMember, NewFamilyMember, UpdateFamilyMember,
        UpdateFamilyMemberRequest,
    },
    db::repositories::{FamilyMemberRepo, UserRepo},
    error::AppError,
    services::context::RequestContext,
    validation::family::validate_update_family_member,
    validation::trimmed_text,
};

pub struct FamilyService;

impl FamilyService {
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<FamilyMember>, AppError> {
        Ok(FamilyMemberRepo::list_by_user(conn, ctx.user_id)?)
    }

    pub fn list_for_user(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<FamilyMember>, AppError> {
        ctx.require_admin()?;
        if UserRepo::find_by_id(conn, user_id)?.is_none() {
            return Err(AppError::not_found("User"));
        }
        Ok(FamilyMemberRepo::list_by_user(conn, user_id)?)
    }

    /// Residents only ever see their own rows; another household's member
    /// reads as missing.
    fn load_scoped(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        member_id: Uuid,
    ) -> Result<FamilyMember, AppError> {
        let member = if ctx.is_admin() {
            FamilyMemberRepo::find_by_id(conn, member_id)?
        } else {
            FamilyMemberRepo::find_by_id_for_user(conn, ctx.user_id, member_id)?
        };
        member.ok_or_else(|| AppError::not_found("Family member"))
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        member_id: Uuid,
    ) -> Result<FamilyMember, AppError> {
        Self::load_scoped(conn, ctx, member_id)
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateFamilyMemberRequest,
    ) -> Result<FamilyMember, AppError> {
        let new_member = NewFamilyMember {
            user_id: ctx.user_id,
            name: trimmed_text("name", &req.name, 2, 100)?,
            relation: req.relation,
            age: req.age,
            gender: req.gender.clone(),
            phone: req.phone.clone(),
            email: req.email.as_ref().map(|e| e.trim().to_lowercase()),
            occupation: req.occupation.clone(),
        };

        Ok(FamilyMemberRepo::insert(conn, &new_member)?)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        member_id: Uuid,
        req: &UpdateFamilyMemberRequest,
    ) -> Result<FamilyMember, AppError> {
        validate_update_family_member(req)?;
        let member = Self::load_scoped(conn, ctx, member_id)?;

        let changes = UpdateFamilyMember {
            name: req
                .name
                .as_deref()
                .map(|n| trimmed_text("name", n, 2, 100))
                .transpose()?,
            relation: req.relation,
            age: req.age,
            gender: req.gender.clone(),
            phone: req.phone.clone(),
            email: req.email.as_ref().map(|e| e.trim().to_lowercase()),
            occupation: req.occupation.clone(),
            updated_at: Some(Utc::now()),
        };

        Ok(FamilyMemberRepo::update_fields(conn, member.id, &changes)?)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        member_id: Uuid,
    ) -> Result<(), AppError> {
        let member = Self::load_scoped(conn, ctx, member_id)?;
        FamilyMemberRepo::delete_by_id(conn, member.id)?;
        Ok(())
    }
}
