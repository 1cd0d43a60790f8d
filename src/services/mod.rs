pub mod clip_service;
pub mod events;
pub mod migrations;
pub mod phrase_service;
pub mod phrase_store;
pub mod social_upload;
pub mod sqlite_phrase_store;
