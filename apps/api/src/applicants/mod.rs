// Applications: upload, screening, persistence and re-screening.

pub mod handlers;
pub mod store;
