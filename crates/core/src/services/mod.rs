//! Business logic services.

#![allow(missing_docs)]

pub mod like;
pub mod ranking;
pub mod review;
pub mod rollercoaster;
pub mod user;

pub use like::LikeService;
pub use ranking::{
    IndexRankings, LikedUser, RankingService, RatedRollercoaster, TrendingReview,
    TrendingRollercoaster,
};
pub use review::{
    CreateReviewInput, ProfileStats, ReviewDetail, ReviewService, ReviewWithAuthor,
    ReviewWithRollercoaster, UserProfile,
};
pub use rollercoaster::{RollercoasterService, RollercoasterWithScore};
pub use user::{SignupInput, UserService};
