// Free-text job search: weighted field scoring, filters, suggestions.

pub mod engine;
pub mod handlers;
