pub mod messages;
pub mod service;

pub use messages::UploadText;
pub use service::I18nService;
