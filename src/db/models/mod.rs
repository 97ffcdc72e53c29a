// Sub-modules organized by entity
pub mod api;
pub mod complaint;
pub mod dashboard;
pub mod family_member;
pub mod notice;
pub mod notification;
pub mod user;
pub mod vehicle;

pub use api::*;
pub use complaint::*;
pub use dashboard::*;
pub use family_member::*;
pub use notice::*;
pub use notification::*;
pub use user::*;
pub use vehicle::*;
