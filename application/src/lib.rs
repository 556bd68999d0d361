pub mod context_builder;
pub mod session_manager;
pub mod session_store;
