pub mod date_input;
pub mod timeline;
pub mod widgets;
