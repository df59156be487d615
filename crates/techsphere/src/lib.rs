mod macros;

pub mod config;
pub mod events;
pub mod locale;
pub mod render;
pub mod scene;
pub mod sys;
