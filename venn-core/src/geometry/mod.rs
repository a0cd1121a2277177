pub mod circle;
pub mod r2;
