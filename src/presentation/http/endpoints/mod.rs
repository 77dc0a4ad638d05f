pub mod copy;
pub mod delivery_logs;
pub mod emails;
pub mod health;
pub mod reminders;
pub mod root;
pub mod webinars;
