pub mod models;
pub mod picker;
pub mod pipeline;
pub mod validation;

pub use models::{FileHandle, SelectedFile, SelectionConfig, UploadPolicy};
pub use picker::{FilePicker, PickerHost, PickerOptions, StaticPickerHost, DEFAULT_CONTROL_ID};
pub use pipeline::{validate_files, FileRules, FileValidation, ValidationState};
pub use validation::{beyond_maximal_size, is_allowed_file_type, ValidationError};
