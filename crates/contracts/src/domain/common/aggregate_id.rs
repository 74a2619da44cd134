use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов (brand, product)
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Преобразовать ID в строку (формат хранения в БД)
    fn as_string(&self) -> String;

    /// Разобрать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}
