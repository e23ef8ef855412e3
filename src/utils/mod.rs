pub mod atomic_write;
pub mod path_validator;
