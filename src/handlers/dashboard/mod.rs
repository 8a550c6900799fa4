pub mod experiences;
pub mod posts;
pub mod profile;
pub mod projects;
