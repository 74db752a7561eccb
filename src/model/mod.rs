pub mod activity;
pub mod resource;

pub use activity::{Activity, ActivityKind};
pub use resource::Resource;
