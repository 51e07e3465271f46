pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod profile;
pub mod session;
pub mod token;

pub use api::{IdentityProvider, QueryCollaborator};
pub use config::DashboardConfig;
pub use controller::DashboardController;
pub use error::{AuthError, DashboardError, DashboardResult};
pub use page::{ChartSpec, DashboardPage, MountContent, MountPoint, View};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
