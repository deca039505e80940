//! Portal boundary: session bootstrap, page scraping, and the three
//! appointment endpoints (days, times, submit).

pub mod gateway;
pub mod http;
pub mod portal;
pub mod scrape;
pub mod urls;

pub use gateway::AppointmentGateway;
pub use http::HttpPortal;
pub use portal::Portal;
pub use urls::extract_action_id;
