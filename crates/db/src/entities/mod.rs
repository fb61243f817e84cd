//! Database entities.

#![allow(missing_docs)]

pub mod likes;
pub mod review;
pub mod rollercoaster;
pub mod user;

pub use likes::Entity as Likes;
pub use review::Entity as Review;
pub use rollercoaster::Entity as Rollercoaster;
pub use user::Entity as User;
