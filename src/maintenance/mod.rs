pub mod duplicates;
pub mod paginator;
pub mod request_queue;
