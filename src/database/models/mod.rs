pub mod bio;
pub mod experience;
pub mod post;
pub mod project;
pub mod social_media;
pub mod user;

pub use bio::Bio;
pub use experience::Experience;
pub use post::{Post, PostStatus};
pub use project::Project;
pub use social_media::{SocialMedia, SocialPlatform};
pub use user::User;
