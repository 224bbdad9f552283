pub mod css;
pub mod esm;
pub mod json;
