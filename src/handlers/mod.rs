pub mod edit_handlers;
pub mod event_handlers;
pub mod health_handlers;
pub mod phrase_handlers;
pub mod upload_handlers;
