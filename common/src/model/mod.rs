pub mod dataset;
pub mod influencer;
pub mod lenient;
pub mod view;
