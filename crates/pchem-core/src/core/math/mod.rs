pub mod quadrature;
pub mod special;
