pub mod file_size;
pub mod paths;
pub mod validate;
