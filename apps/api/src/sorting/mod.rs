// Landing-page placement: page catalog, job sorter, page handlers.

pub mod catalog;
pub mod handlers;
pub mod sorter;
