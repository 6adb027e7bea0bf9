pub mod hold;
pub mod overview;
pub mod support;
pub mod task;
pub mod week;
