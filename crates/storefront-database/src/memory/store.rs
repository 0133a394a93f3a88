//! In-memory store implementation using `DashMap`.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::hash::Hash;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_entity::permission::{CreatePermission, Permission, PermissionName, UpdatePermission};
use storefront_entity::product::{CreateProduct, Product, UpdateProduct};
use storefront_entity::role::{CreateRole, Role, RoleName, UpdateRole};
use storefront_entity::user::{CreateUser, UpdateUser, User};

use crate::store::{PermissionStore, ProductStore, RoleStore, UserStore};

/// In-memory provider for every store trait.
///
/// Unique keys are tracked in secondary index maps and reserved through
/// the `entry` API, so two concurrent writers cannot both claim a name.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    user_emails: DashMap<String, Uuid>,
    roles: DashMap<Uuid, Role>,
    role_names: DashMap<RoleName, Uuid>,
    permissions: DashMap<Uuid, Permission>,
    permission_names: DashMap<PermissionName, Uuid>,
    products: DashMap<Uuid, Product>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Claim `key` for `owner`. Succeeds when the key is free or already owned by `owner`.
fn reserve<K: Eq + Hash>(index: &DashMap<K, Uuid>, key: K, owner: Uuid) -> bool {
    match index.entry(key) {
        Entry::Occupied(existing) => *existing.get() == owner,
        Entry::Vacant(slot) => {
            slot.insert(owner);
            true
        }
    }
}

/// Release `key` if it is still owned by `owner`.
fn release<K: Eq + Hash>(index: &DashMap<K, Uuid>, key: &K, owner: Uuid) {
    index.remove_if(key, |_, id| *id == owner);
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn sorted_by_creation<T: Clone>(
    map: &DashMap<Uuid, T>,
    created_at: impl Fn(&T) -> chrono::DateTime<Utc>,
) -> Vec<T> {
    let mut items: Vec<T> = map.iter().map(|entry| entry.value().clone()).collect();
    items.sort_by_key(|item| created_at(item));
    items
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let id = self.user_emails.get(&email_key(email)).map(|id| *id);
        Ok(id.and_then(|id| self.users.get(&id).map(|u| u.clone())))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(sorted_by_creation(&self.users, |u| u.created_at))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: data.username.clone(),
            email: data.email.trim().to_string(),
            password_hash: data.password_hash.clone(),
            role_id: data.role_id,
            created_at: now,
            updated_at: now,
        };

        if !reserve(&self.user_emails, email_key(&user.email), user.id) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        // The user entry stays locked while the email index changes.
        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(email) = &data.email {
            let new_key = email_key(email);
            let old_key = email_key(&user.email);
            if new_key != old_key {
                if !reserve(&self.user_emails, new_key, id) {
                    return Err(AppError::conflict(format!(
                        "Email '{email}' is already registered"
                    )));
                }
                release(&self.user_emails, &old_key, id);
            }
            user.email = email.trim().to_string();
        }
        if let Some(username) = &data.username {
            user.username = username.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<bool> {
        Ok(self
            .users
            .get_mut(&id)
            .map(|mut user| {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
            })
            .is_some())
    }

    async fn update_role(&self, id: Uuid, role_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get_mut(&id).map(|mut user| {
            user.role_id = role_id;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        match self.users.remove(&id) {
            Some((_, user)) => {
                release(&self.user_emails, &email_key(&user.email), id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        Ok(self.roles.get(&id).map(|r| r.clone()))
    }

    async fn find_by_name(&self, name: &RoleName) -> AppResult<Option<Role>> {
        let id = self.role_names.get(name).map(|id| *id);
        Ok(id.and_then(|id| self.roles.get(&id).map(|r| r.clone())))
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        Ok(sorted_by_creation(&self.roles, |r| r.created_at))
    }

    async fn create(&self, data: &CreateRole) -> AppResult<Role> {
        let now = Utc::now();
        let role = Role {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            description: data.description.clone(),
            permission_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        if !reserve(&self.role_names, role.name.clone(), role.id) {
            return Err(AppError::conflict(format!(
                "Role '{}' already exists",
                role.name
            )));
        }
        self.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update(&self, id: Uuid, data: &UpdateRole) -> AppResult<Option<Role>> {
        let Some(current_name) = self.roles.get(&id).map(|r| r.name.clone()) else {
            return Ok(None);
        };

        if let Some(name) = &data.name {
            if !reserve(&self.role_names, name.clone(), id) {
                return Err(AppError::conflict(format!(
                    "A role named '{name}' already exists"
                )));
            }
        }

        let updated = self.roles.get_mut(&id).map(|mut role| {
            if let Some(name) = &data.name {
                role.name = name.clone();
            }
            if let Some(description) = &data.description {
                role.description = description.clone();
            }
            role.updated_at = Utc::now();
            role.clone()
        });

        if let Some(role) = &updated {
            if role.name != current_name {
                release(&self.role_names, &current_name, id);
            }
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        match self.roles.remove(&id) {
            Some((_, role)) => {
                release(&self.role_names, &role.name, id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_permissions(&self, id: Uuid, permission_ids: &[Uuid]) -> AppResult<Option<Role>> {
        Ok(self.roles.get_mut(&id).map(|mut role| {
            for permission_id in permission_ids {
                if !role.permission_ids.contains(permission_id) {
                    role.permission_ids.push(*permission_id);
                }
            }
            role.updated_at = Utc::now();
            role.clone()
        }))
    }

    async fn remove_permissions(
        &self,
        id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<Option<Role>> {
        Ok(self.roles.get_mut(&id).map(|mut role| {
            role.permission_ids.retain(|p| !permission_ids.contains(p));
            role.updated_at = Utc::now();
            role.clone()
        }))
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>> {
        Ok(self.permissions.get(&id).map(|p| p.clone()))
    }

    async fn find_by_name(&self, name: &PermissionName) -> AppResult<Option<Permission>> {
        let id = self.permission_names.get(name).map(|id| *id);
        Ok(id.and_then(|id| self.permissions.get(&id).map(|p| p.clone())))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Permission>> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(permission) = self.permissions.get(id) {
                if !found.iter().any(|p: &Permission| p.id == *id) {
                    found.push(permission.clone());
                }
            }
        }
        Ok(found)
    }

    async fn list(&self) -> AppResult<Vec<Permission>> {
        Ok(sorted_by_creation(&self.permissions, |p| p.created_at))
    }

    async fn create(&self, data: &CreatePermission) -> AppResult<Permission> {
        let now = Utc::now();
        let permission = Permission {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            description: data.description.clone(),
            created_at: now,
            updated_at: now,
        };

        if !reserve(&self.permission_names, permission.name.clone(), permission.id) {
            return Err(AppError::conflict(format!(
                "Permission '{}' already exists",
                permission.name
            )));
        }
        self.permissions.insert(permission.id, permission.clone());
        Ok(permission)
    }

    async fn update(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Option<Permission>> {
        let Some(current_name) = self.permissions.get(&id).map(|p| p.name.clone()) else {
            return Ok(None);
        };

        if let Some(name) = &data.name {
            if !reserve(&self.permission_names, name.clone(), id) {
                return Err(AppError::conflict(format!(
                    "A permission named '{name}' already exists"
                )));
            }
        }

        let updated = self.permissions.get_mut(&id).map(|mut permission| {
            if let Some(name) = &data.name {
                permission.name = name.clone();
            }
            if let Some(description) = &data.description {
                permission.description = description.clone();
            }
            permission.updated_at = Utc::now();
            permission.clone()
        });

        if let Some(permission) = &updated {
            if permission.name != current_name {
                release(&self.permission_names, &current_name, id);
            }
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let Some((_, permission)) = self.permissions.remove(&id) else {
            return Ok(false);
        };
        release(&self.permission_names, &permission.name, id);

        for mut role in self.roles.iter_mut() {
            role.permission_ids.retain(|p| *p != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_active(&self) -> AppResult<Vec<Product>> {
        let mut products = sorted_by_creation(&self.products, |p| p.created_at);
        products.retain(|p| p.is_active);
        Ok(products)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.products.get(&id).map(|p| p.clone()))
    }

    async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            description: data.description.clone(),
            price: data.price,
            stock: data.stock,
            image: data.image.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, data: &UpdateProduct) -> AppResult<Option<Product>> {
        Ok(self.products.get_mut(&id).map(|mut product| {
            if let Some(name) = &data.name {
                product.name = name.clone();
            }
            if let Some(description) = &data.description {
                product.description = description.clone();
            }
            if let Some(price) = data.price {
                product.price = price;
            }
            if let Some(stock) = data.stock {
                product.stock = stock;
            }
            if let Some(image) = &data.image {
                product.image = image.clone();
            }
            if let Some(is_active) = data.is_active {
                product.is_active = is_active;
            }
            product.updated_at = Utc::now();
            product.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.products.remove(&id).is_some())
    }
}
