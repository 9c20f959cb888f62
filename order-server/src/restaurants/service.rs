use shared::models::{PageQuery, Restaurant, RestaurantCreate, RestaurantPage, RestaurantUpdate};
use shared::{AppError, AppResult, ErrorCode};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::db::Storage;
use crate::security_log;
use crate::utils::validation::{parse_id, validate_payload};

#[derive(Clone)]
pub struct RestaurantService {
    storage: Storage,
}

impl RestaurantService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Active restaurants, newest first
    pub fn list(&self, query: PageQuery) -> AppResult<RestaurantPage> {
        if query.page < 0 {
            return Err(AppError::invalid_request("page must not be negative"));
        }
        if query.size < 1 {
            return Err(AppError::invalid_request("size must be at least 1"));
        }
        let (page, size) = (query.page as u64, query.size as u64);

        let (content, total_elements) = self
            .storage
            .list_active_restaurants(page as usize, size as usize)?;
        Ok(RestaurantPage {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(size),
            number: page,
            size,
        })
    }

    pub fn create(&self, current: &CurrentUser, data: RestaurantCreate) -> AppResult<Restaurant> {
        validate_payload(&data)?;
        let owner_id = current.id().ok_or_else(AppError::not_authenticated)?;

        let restaurant = Restaurant::new(owner_id, data);
        self.storage.insert_restaurant(&restaurant)?;
        tracing::info!(restaurant_id = %restaurant.id, owner_id = %owner_id, "Restaurant created");
        Ok(restaurant)
    }

    pub fn get(&self, id: &str) -> AppResult<Restaurant> {
        let id = parse_id(id, "restaurantId")?;
        self.load(id)
    }

    pub fn update(
        &self,
        current: &CurrentUser,
        id: &str,
        data: RestaurantUpdate,
    ) -> AppResult<Restaurant> {
        validate_payload(&data)?;
        let id = parse_id(id, "restaurantId")?;
        let mut restaurant = self.load(id)?;
        ensure_manager(current, &restaurant)?;

        restaurant.apply(data);
        if !self.storage.update_restaurant(&restaurant)? {
            return Err(AppError::new(ErrorCode::RestaurantNotFound));
        }
        tracing::info!(restaurant_id = %id, "Restaurant updated");
        Ok(restaurant)
    }

    pub fn delete(&self, current: &CurrentUser, id: &str) -> AppResult<()> {
        let id = parse_id(id, "restaurantId")?;
        let restaurant = self.load(id)?;
        ensure_manager(current, &restaurant)?;

        self.storage.delete_restaurant(id)?;
        tracing::info!(restaurant_id = %id, "Restaurant deleted");
        Ok(())
    }

    fn load(&self, id: Uuid) -> AppResult<Restaurant> {
        self.storage
            .get_restaurant(id)?
            .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))
    }
}

/// Only the owning user or an ADMIN may change a restaurant
fn ensure_manager(current: &CurrentUser, restaurant: &Restaurant) -> AppResult<()> {
    if current.is_admin() || current.id() == Some(restaurant.owner_id) {
        return Ok(());
    }
    security_log!(
        "WARN",
        "restaurant_access_denied",
        restaurant_id = %restaurant.id,
        user_id = ?current.id()
    );
    Err(AppError::forbidden("Only the owner can modify this restaurant"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Principal, Role};

    fn caller(role: Role) -> CurrentUser {
        CurrentUser {
            principal: Principal::user(Uuid::new_v4(), [role]),
            username: "someone".to_string(),
        }
    }

    fn data(name: &str) -> RestaurantCreate {
        RestaurantCreate {
            name: name.to_string(),
            address: "1 Street".to_string(),
            ..Default::default()
        }
    }

    fn service() -> RestaurantService {
        RestaurantService::new(Storage::open_in_memory().unwrap())
    }

    #[test]
    fn test_create_sets_owner() {
        let svc = service();
        let owner = caller(Role::RestaurantOwner);
        let r = svc.create(&owner, data("Pizza")).unwrap();
        assert_eq!(Some(r.owner_id), owner.id());
        assert!(r.is_active);
        assert_eq!(svc.get(&r.id.to_string()).unwrap(), r);
    }

    #[test]
    fn test_create_rejects_invalid_payload() {
        let svc = service();
        let err = svc.create(&caller(Role::Customer), data("")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_get_errors() {
        let svc = service();
        assert_eq!(
            svc.get("nope").unwrap_err().http_status(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            svc.get(&Uuid::new_v4().to_string()).unwrap_err().code,
            ErrorCode::RestaurantNotFound
        );
    }

    #[test]
    fn test_only_owner_or_admin_modifies() {
        let svc = service();
        let owner = caller(Role::RestaurantOwner);
        let r = svc.create(&owner, data("Pizza")).unwrap();
        let id = r.id.to_string();
        let rename = RestaurantUpdate {
            name: Some("Pasta".to_string()),
            ..Default::default()
        };

        let err = svc
            .update(&caller(Role::RestaurantOwner), &id, rename.clone())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        let err = svc.delete(&caller(Role::Customer), &id).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);

        assert_eq!(svc.update(&owner, &id, rename).unwrap().name, "Pasta");
        svc.delete(&caller(Role::Admin), &id).unwrap();
        assert_eq!(svc.get(&id).unwrap_err().code, ErrorCode::RestaurantNotFound);
    }

    #[test]
    fn test_list_pages() {
        let svc = service();
        let owner = caller(Role::RestaurantOwner);
        for name in ["a", "b", "c"] {
            svc.create(&owner, data(name)).unwrap();
        }

        let page = svc.list(PageQuery { page: 0, size: 2 }).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.number, 0);

        let last = svc.list(PageQuery { page: 1, size: 2 }).unwrap();
        assert_eq!(last.content.len(), 1);

        assert!(svc.list(PageQuery { page: -1, size: 2 }).is_err());
        assert!(svc.list(PageQuery { page: 0, size: 0 }).is_err());
    }

    #[test]
    fn test_deactivated_restaurant_leaves_listing() {
        let svc = service();
        let owner = caller(Role::RestaurantOwner);
        let r = svc.create(&owner, data("Pizza")).unwrap();
        svc.update(
            &owner,
            &r.id.to_string(),
            RestaurantUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(svc.list(PageQuery::default()).unwrap().total_elements, 0);
    }
}
