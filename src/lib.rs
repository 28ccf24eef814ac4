pub mod cli;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used items
pub use error::{Error, Result};
pub use models::ConfigBox;
pub use utils::file_utils::{
    create_directories, get_size, load_bin, load_json, read_yaml, save_bin, save_json,
};
