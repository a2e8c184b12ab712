pub mod api;
pub mod calendar;
pub mod errors;
pub mod migration;
pub mod models;
pub mod page;
pub mod picker;
pub mod session;
pub mod storage;
pub mod ui;

pub use api::{ApiClient, resolve_base_url};
pub use errors::ApiError;
pub use migration::{MIGRATION_TARGET, migrate_user_data};
pub use picker::DatePickers;
pub use session::Session;
pub use storage::{LocalStore, resolve_store_path};
