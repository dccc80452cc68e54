pub mod asset;
pub mod payment;
pub mod team;
pub mod user;

pub use asset::*;
pub use payment::*;
pub use team::*;
pub use user::*;
