pub mod boll_exception;
pub mod enums;
pub mod utils;
