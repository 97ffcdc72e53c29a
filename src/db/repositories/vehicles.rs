use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::ApprovalStatus;
use crate::db::like_pattern;
use crate::db::models::api::PageParams;
use crate::db::models::vehicle::{
    NewVehicle, Vehicle, VehicleEdit, VehicleStatusChange, VehicleWithOwner,
};
use crate::schema::{users, vehicles};

#[derive(Debug, Default, Clone)]
pub struct VehicleFilters {
    pub status: Option<ApprovalStatus>,
    pub search: Option<String>,
}

pub struct VehicleRepo;

impl VehicleRepo {
    pub fn exists_for_user(
        conn: &mut PgConnection,
        owner_id: Uuid,
        plate: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        let mut query = vehicles::table
            .filter(vehicles::user_id.eq(owner_id))
            .filter(vehicles::registration_number.eq(plate.to_string()))
            .into_boxed();
        if let Some(exclude_id) = exclude_id {
            query = query.filter(vehicles::id.ne(exclude_id));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_vehicle: &NewVehicle,
    ) -> Result<Vehicle, diesel::result::Error> {
        diesel::insert_into(vehicles::table)
            .values(new_vehicle)
            .returning(Vehicle::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        vehicle_id: Uuid,
    ) -> Result<Option<Vehicle>, diesel::result::Error> {
        vehicles::table
            .find(vehicle_id)
            .select(Vehicle::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_by_user(
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<Vec<Vehicle>, diesel::result::Error> {
        vehicles::table
            .filter(vehicles::user_id.eq(owner_id))
            .select(Vehicle::as_select())
            .order(vehicles::created_at.desc())
            .then_order_by(vehicles::id.desc())
            .load(conn)
    }

    fn filtered<'a>(filters: &VehicleFilters) -> vehicles::BoxedQuery<'a, Pg> {
        let mut query = vehicles::table.into_boxed();
        if let Some(status) = filters.status {
            query = query.filter(vehicles::status.eq(status));
        }
        if let Some(search) = filters.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query = query.filter(vehicles::registration_number.ilike(like_pattern(search)));
        }
        query
    }

    pub fn list_all(
        conn: &mut PgConnection,
        filters: &VehicleFilters,
        page: PageParams,
    ) -> Result<(Vec<VehicleWithOwner>, i64), diesel::result::Error> {
        let total = Self::filtered(filters).count().get_result::<i64>(conn)?;

        let ids: Vec<Uuid> = Self::filtered(filters)
            .select(vehicles::id)
            .order(vehicles::created_at.desc())
            .then_order_by(vehicles::id.desc())
            .limit(page.limit)
            .offset(page.offset())
            .load(conn)?;

        let rows: Vec<(Vehicle, (String, String, String))> = vehicles::table
            .inner_join(users::table)
            .filter(vehicles::id.eq_any(&ids))
            .order(vehicles::created_at.desc())
            .then_order_by(vehicles::id.desc())
            .select((
                Vehicle::as_select(),
                (users::name, users::wing, users::flat_number),
            ))
            .load(conn)?;

        let items = rows
            .into_iter()
            .map(|(vehicle, (name, wing, flat))| VehicleWithOwner {
                vehicle,
                owner_name: name,
                owner_wing: wing,
                owner_flat_number: flat,
            })
            .collect();

        Ok((items, total))
    }

    pub fn apply_edit(
        conn: &mut PgConnection,
        vehicle_id: Uuid,
        edit: &VehicleEdit,
    ) -> Result<Vehicle, diesel::result::Error> {
        diesel::update(vehicles::table.find(vehicle_id))
            .set(edit)
            .returning(Vehicle::as_returning())
            .get_result(conn)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        vehicle_id: Uuid,
        change: &VehicleStatusChange,
    ) -> Result<Vehicle, diesel::result::Error> {
        diesel::update(vehicles::table.find(vehicle_id))
            .set(change)
            .returning(Vehicle::as_returning())
            .get_result(conn)
    }

    pub fn count_by_status(
        conn: &mut PgConnection,
        status: ApprovalStatus,
    ) -> Result<i64, diesel::result::Error> {
        vehicles::table
            .filter(vehicles::status.eq(status))
            .count()
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        vehicle_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(vehicles::table.find(vehicle_id)).execute(conn)
    }
}
