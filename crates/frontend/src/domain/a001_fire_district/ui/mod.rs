pub mod draw;
pub mod list;
