use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::Relation;
use crate::validation::rules::validate_phone;

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::family_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FamilyMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub relation: Relation,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub occupation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::family_members)]
pub struct NewFamilyMember {
    pub user_id: Uuid,
    pub name: String,
    pub relation: Relation,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub occupation: Option<String>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::family_members)]
pub struct UpdateFamilyMember {
    pub name: Option<String>,
    pub relation: Option<Relation>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub occupation: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateFamilyMemberRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    pub relation: Relation,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,

    #[validate(length(max = 10, message = "Gender must be at most 10 characters"))]
    pub gender: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 100, message = "Occupation must be at most 100 characters"))]
    pub occupation: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateFamilyMemberRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,

    pub relation: Option<Relation>,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,

    #[validate(length(max = 10, message = "Gender must be at most 10 characters"))]
    pub gender: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 100, message = "Occupation must be at most 100 characters"))]
    pub occupation: Option<String>,
}
