pub mod api;
pub mod config;
pub mod default_colors;
pub mod details;
pub mod html;
pub mod list;
pub mod normalize;
pub mod pagination;
pub mod render;
pub mod session;
pub mod traits;
pub mod types;
