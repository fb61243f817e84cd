//! Database repositories.

mod likes;
mod review;
mod rollercoaster;
mod user;

pub use likes::{LikesRepository, ReviewLikeCount};
pub use review::{ReviewRepository, RollercoasterAverage, RollercoasterReviewCount, UserLikeTotal};
pub use rollercoaster::RollercoasterRepository;
pub use user::UserRepository;
