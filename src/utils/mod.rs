pub mod file_utils;

pub use file_utils::{
    create_directories, get_size, load_bin, load_json, read_yaml, save_bin, save_json,
};
