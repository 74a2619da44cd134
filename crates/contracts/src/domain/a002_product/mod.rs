pub mod aggregate;

pub use aggregate::{NewProduct, Product, ProductId, ProductUpdate};
