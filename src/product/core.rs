//! Product records and their store operations.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

use crate::{
    Error,
    store::{
        Collection, Document, DocumentId, DocumentStore, Record, encode, lenient_amount,
        lenient_count, lenient_string, lenient_string_list, lenient_timestamp, timestamp,
    },
};

/// A validated, non-empty product name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProductName(String);

impl ProductName {
    /// Create a product name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyProductName] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyProductName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProductName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductName::new(s)
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who a product is designed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gender {
    #[default]
    Unisex,
    Male,
    Female,
}

impl Gender {
    /// The genders offered in the product forms.
    pub const FORM_OPTIONS: [(&'static str, &'static str); 3] = [
        ("unisex", "Unisex"),
        ("male", "Male"),
        ("female", "Female"),
    ];

    /// Parse a gender, ignoring case. Anything unrecognised is unisex.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Unisex,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unisex => "unisex",
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = lenient_string(deserializer)?;

        Ok(Self::parse(&text))
    }
}

/// An item in the catalog.
///
/// The same struct is used to read and write products. `created_at` is only
/// written when it is set, so updates keep the original creation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(skip)]
    pub id: DocumentId,
    #[serde(deserialize_with = "lenient_string")]
    pub category_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    pub gender: Gender,
    #[serde(deserialize_with = "lenient_amount")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_count")]
    pub stock: u32,
    #[serde(rename = "size", deserialize_with = "lenient_string_list")]
    pub sizes: Vec<String>,
    #[serde(rename = "color", deserialize_with = "lenient_string_list")]
    pub colors: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub materials: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub tags: Vec<String>,
    #[serde(rename = "image", deserialize_with = "lenient_string_list")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub occasions: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub suitable_for_body_type: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub suitable_for_skin_tone: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub temperature_suitability: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub suitable_for_face_shape: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub recommended_for_style: Vec<String>,
    #[serde(
        deserialize_with = "lenient_timestamp",
        serialize_with = "timestamp::option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

impl Record for Product {
    const KEY_ALIASES: &'static [(&'static str, &'static str)] = &[
        ("categoryId", "category_id"),
        ("sizes", "size"),
        ("colors", "color"),
        ("images", "image"),
        ("createdAt", "created_at"),
    ];
}

/// Get every product in the store, oldest first.
pub fn get_all_products(store: &dyn DocumentStore) -> Result<Vec<Product>, Error> {
    Ok(store
        .list_all(Collection::Products)?
        .iter()
        .map(decode_product)
        .collect())
}

/// Get a single product.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no product with `id`.
pub fn get_product(id: &DocumentId, store: &dyn DocumentStore) -> Result<Product, Error> {
    store
        .get(Collection::Products, id)
        .map(|document| decode_product(&document))
}

/// Add a product and return its ID.
pub fn create_product(product: &Product, store: &dyn DocumentStore) -> Result<DocumentId, Error> {
    store.create(Collection::Products, encode(product)?)
}

/// Replace the editable fields of the product with `id`.
///
/// # Errors
///
/// Returns [Error::UpdateMissingProduct] if there is no product with `id`.
pub fn update_product(
    id: &DocumentId,
    product: &Product,
    store: &dyn DocumentStore,
) -> Result<(), Error> {
    store
        .update(Collection::Products, id, encode(product)?)
        .map_err(|error| match error {
            Error::NotFound => Error::UpdateMissingProduct,
            error => error,
        })
}

/// Delete the product with `id`.
///
/// # Errors
///
/// Returns [Error::DeleteMissingProduct] if there is no product with `id`.
pub fn delete_product(id: &DocumentId, store: &dyn DocumentStore) -> Result<(), Error> {
    store
        .delete(Collection::Products, id)
        .map_err(|error| match error {
            Error::NotFound => Error::DeleteMissingProduct,
            error => error,
        })
}

fn decode_product(document: &Document) -> Product {
    Product {
        id: document.id.clone(),
        ..document.decode::<Product>()
    }
}
