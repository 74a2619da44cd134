pub mod a001_brand;
pub mod a002_product;
pub mod common;
