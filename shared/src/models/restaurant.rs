//! Restaurant Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Restaurant entity
///
/// Stored as-is and returned as-is; UUIDs serialize as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub cuisine_type: Option<String>,
    pub opening_hours: Option<String>,
    pub owner_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// New active restaurant owned by `owner_id`
    pub fn new(owner_id: Uuid, data: RestaurantCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            address: data.address,
            phone: data.phone,
            email: data.email,
            cuisine_type: data.cuisine_type,
            opening_hours: data.opening_hours,
            owner_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the present fields of a partial update
    pub fn apply(&mut self, data: RestaurantUpdate) {
        if let Some(name) = data.name {
            self.name = name;
        }
        if let Some(description) = data.description {
            self.description = Some(description);
        }
        if let Some(address) = data.address {
            self.address = address;
        }
        if let Some(phone) = data.phone {
            self.phone = Some(phone);
        }
        if let Some(email) = data.email {
            self.email = Some(email);
        }
        if let Some(cuisine_type) = data.cuisine_type {
            self.cuisine_type = Some(cuisine_type);
        }
        if let Some(opening_hours) = data.opening_hours {
            self.opening_hours = Some(opening_hours);
        }
        if let Some(is_active) = data.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}

/// Create restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    #[validate(length(min = 1, max = 100), custom(function = "crate::models::not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200), custom(function = "crate::models::not_blank"))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub opening_hours: Option<String>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpdate {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Pagination query (`?page=0&size=20`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
        }
    }
}

/// One page of restaurants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPage {
    pub content: Vec<Restaurant>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> RestaurantCreate {
        RestaurantCreate {
            name: "Trattoria".to_string(),
            address: "1 Via Roma".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(create().validate().is_ok());

        let blank = RestaurantCreate {
            name: "  ".to_string(),
            ..create()
        };
        assert!(blank.validate().is_err());

        let bad_email = RestaurantCreate {
            email: Some("nope".to_string()),
            ..create()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_apply_partial_update() {
        let owner = Uuid::new_v4();
        let mut r = Restaurant::new(owner, create());
        assert!(r.is_active);

        r.apply(RestaurantUpdate {
            phone: Some("555".to_string()),
            is_active: Some(false),
            ..Default::default()
        });

        assert_eq!(r.name, "Trattoria");
        assert_eq!(r.phone.as_deref(), Some("555"));
        assert!(!r.is_active);
        assert_eq!(r.owner_id, owner);
    }

    #[test]
    fn test_serializes_camel_case() {
        let r = Restaurant::new(Uuid::new_v4(), create());
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("ownerId").unwrap().is_string());
        assert_eq!(json.get("isActive").unwrap(), true);
    }

    #[test]
    fn test_page_query_defaults() {
        let q: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, 0);
        assert_eq!(q.size, 20);
    }
}
