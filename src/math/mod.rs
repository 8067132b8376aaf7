pub mod prepare;
pub mod scale;
pub mod smooth;
