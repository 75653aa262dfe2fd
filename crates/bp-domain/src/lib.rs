// bp-domain library entry point
pub mod blueprint;
pub mod error;
pub mod point;
pub use blueprint::Blueprint;
pub use error::DomainError;
pub use point::Point;
