pub mod loss;
pub mod simplex;
