pub mod webinar_notifier;
