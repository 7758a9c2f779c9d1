use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A bookable sports field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    /// Pitch format, e.g. "11x11"
    pub size: String,
    pub rating: f64,
    /// Hourly rate in minor currency units (centimes)
    pub price_per_hour: i64,
    pub currency: String,
    pub image_url: Option<String>,
}

impl Field {
    pub fn new(name: &str, location: &str, size: &str, rating: f64, price_per_hour: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: location.to_string(),
            size: size.to_string(),
            rating,
            price_per_hour,
            currency: "MAD".to_string(),
            image_url: None,
        }
    }
}

/// In-memory field catalog
pub struct FieldCatalog {
    fields: HashMap<Uuid, Field>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Catalog seeded with the demo venues
    pub fn with_sample_fields() -> Self {
        let mut catalog = Self::new();
        catalog.add(Field::new(
            "Al Andalus Sports Field",
            "Casablanca, Morocco",
            "11x11",
            4.8,
            150_00,
        ));
        catalog.add(Field::new(
            "Terrain des Champions",
            "Rabat, Morocco",
            "7x7",
            4.6,
            120_00,
        ));
        catalog.add(Field::new(
            "Atlas Arena",
            "Marrakech, Morocco",
            "5x5",
            4.4,
            90_00,
        ));
        catalog
    }

    pub fn add(&mut self, field: Field) -> Uuid {
        let id = field.id;
        self.fields.insert(id, field);
        id
    }

    pub fn get(&self, field_id: &Uuid) -> Result<&Field, CatalogError> {
        self.fields
            .get(field_id)
            .ok_or_else(|| CatalogError::NotFound(field_id.to_string()))
    }

    pub fn list(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.values().collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Field not found: {0}")]
    NotFound(String),
}
