//! Query routing over the assistant's fixtures and stores

mod app;
mod response;
mod router;

pub use app::{install_fixtures, AppContext};
pub use response::{RouteModule, RouteResponse};
pub use router::Router;
