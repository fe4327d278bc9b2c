pub mod engine;
pub mod form_code;
pub mod outcome;

pub use engine::classify;
