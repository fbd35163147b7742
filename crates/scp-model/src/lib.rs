pub mod article;
pub mod rating;

pub use article::*;
pub use rating::*;
