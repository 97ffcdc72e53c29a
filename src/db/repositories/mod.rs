pub mod complaints;
pub mod family_members;
pub mod notices;
pub mod notifications;
pub mod users;
pub mod vehicles;

pub use complaints::{ComplaintFilters, ComplaintRepo};
pub use family_members::FamilyMemberRepo;
pub use notices::{NoticeFilters, NoticeRepo};
pub use notifications::NotificationRepo;
pub use users::{UserFilters, UserRepo};
pub use vehicles::{VehicleFilters, VehicleRepo};
