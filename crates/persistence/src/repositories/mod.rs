//! Repository implementations for database operations.

pub mod alert;
pub mod base;
pub mod hive;
pub mod inspection;
pub mod measurement;
pub mod notification;
pub mod notification_settings;
pub mod notification_template;
pub mod sensor;
pub mod user;

pub use alert::AlertRepository;
pub use base::Repository;
pub use hive::HiveRepository;
pub use inspection::InspectionRepository;
pub use measurement::MeasurementRepository;
pub use notification::NotificationRepository;
pub use notification_settings::NotificationSettingsRepository;
pub use notification_template::NotificationTemplateRepository;
pub use sensor::SensorRepository;
pub use user::UserRepository;
