pub mod sa;
pub mod lcp;
pub mod repeat;
