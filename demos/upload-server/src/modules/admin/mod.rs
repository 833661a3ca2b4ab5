pub mod controller;
pub mod model;
pub mod service;

pub use controller::AdminController;
pub use service::ArtifactStore;
