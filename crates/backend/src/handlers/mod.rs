// Aggregate handlers
pub mod a001_brand;
pub mod a002_product;

// UseCase handlers
pub mod usecases;
