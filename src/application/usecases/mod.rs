pub mod list_delivery_logs;
pub mod process_reminders;
pub mod send_bulk_email;
pub mod send_confirmation;
pub mod send_email;
pub mod send_thank_you;
