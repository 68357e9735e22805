// Job postings: the descriptions applicants are screened against.

pub mod handlers;
pub mod store;
