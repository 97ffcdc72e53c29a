pub mod admin_service;
pub mod auth_service;
pub mod complaints_service;
pub mod context;
pub mod family_service;
pub mod notices_service;
pub mod notifications_service;
pub mod vehicles_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use complaints_service::ComplaintsService;
pub use family_service::FamilyService;
pub use notices_service::NoticesService;
pub use notifications_service::NotificationsService;
pub use vehicles_service::VehiclesService;
