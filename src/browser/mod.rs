//! Browser management: launching or attaching to Chrome and snapshotting pages

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
