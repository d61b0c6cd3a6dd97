pub mod feed;
pub mod messages;
pub mod onboarding;
pub mod profile;
