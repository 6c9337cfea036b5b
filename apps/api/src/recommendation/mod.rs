pub mod catalog;
pub mod form;
pub mod handlers;
pub mod pipeline;
pub mod profile;
pub mod prompt_formatter;
