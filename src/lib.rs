//! Navigation table and history-mode host for the soil moisture records
//! application.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::NavConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Navigation, RouteMatch, RouteTable, Router, View};
