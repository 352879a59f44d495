pub mod landing_behaviors;

pub use landing_behaviors::LandingBehaviors;
