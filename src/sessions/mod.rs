pub mod in_memory_session_service;
pub mod session;
pub mod session_service;

pub use in_memory_session_service::InMemorySessionService;
pub use session::Session;
pub use session_service::SessionService;
