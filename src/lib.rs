// Public library interface for wordcloud-rs
// The binaries drive the same pipeline through these modules

pub mod cloud;
pub mod error;
pub mod layout;
pub mod render;
pub mod schema;
pub mod source;
pub mod topic;
pub mod ui;

pub use cloud::{Cloud, CloudConfig, CloudPhase, Setting};
pub use error::{CloudError, Result};
