pub mod answers;
pub mod product;
pub mod profile;
pub mod recommendation;
pub mod review;
