pub mod notify;
pub mod statuses;
