pub mod amount;
pub mod order;
pub mod product;
