use common::MenuItemId;
use serde::{Deserialize, Serialize};
use store::Store;

use crate::database::PosDatabase;
use crate::error::{DomainError, NotFound, ValidationError};
use crate::order::Money;

/// An entry on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub category: String,
    pub price: Money,
    pub enabled: bool,
}

/// Fields for a new menu entry. New entries start enabled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: Money,
}

/// Partial update for a menu entry; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub enabled: Option<bool>,
}

/// Menu management over the shared store.
#[derive(Clone)]
pub struct MenuCatalog {
    store: Store<PosDatabase>,
}

impl MenuCatalog {
    pub fn new(store: Store<PosDatabase>) -> Self {
        Self { store }
    }

    /// Entries a cashier can sell.
    pub async fn enabled(&self) -> Vec<MenuItem> {
        self.store
            .read(|db| db.menu.iter().filter(|m| m.enabled).cloned().collect())
            .await
    }

    /// Every entry, disabled ones included.
    pub async fn all(&self) -> Vec<MenuItem> {
        self.store.read(|db| db.menu.clone()).await
    }

    pub async fn find(&self, id: MenuItemId) -> Option<MenuItem> {
        self.store
            .read(|db| db.menu.iter().find(|m| m.id == id).cloned())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn add(&self, item: NewMenuItem) -> Result<MenuItem, DomainError> {
        let name = item.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if item.price.is_negative() {
            return Err(ValidationError::NegativePrice.into());
        }

        let created = self
            .store
            .update(|db| {
                let entry = MenuItem {
                    id: MenuItemId::next_after(db.menu.iter().map(|m| m.id)),
                    name,
                    category: item.category,
                    price: item.price,
                    enabled: true,
                };
                db.menu.push(entry.clone());
                entry
            })
            .await;

        tracing::info!(menu_item_id = %created.id, name = %created.name, "menu item added");
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, DomainError> {
        if patch.price.is_some_and(|p| p.is_negative()) {
            return Err(ValidationError::NegativePrice.into());
        }

        self.store
            .try_update(|db| {
                let entry = db
                    .menu
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or(NotFound::MenuItem { menu_item_id: id })?;
                if let Some(name) = patch.name {
                    entry.name = name;
                }
                if let Some(category) = patch.category {
                    entry.category = category;
                }
                if let Some(price) = patch.price {
                    entry.price = price;
                }
                if let Some(enabled) = patch.enabled {
                    entry.enabled = enabled;
                }
                Ok(entry.clone())
            })
            .await
    }
}

/// The house menu a fresh database starts with.
pub fn default_menu() -> Vec<MenuItem> {
    [
        ("Butter Chicken", "Main Course", 350),
        ("Dal Makhani", "Main Course", 250),
        ("Paneer Tikka", "Starter", 280),
        ("Naan", "Breads", 40),
        ("Garlic Naan", "Breads", 50),
        ("Biryani", "Main Course", 320),
        ("Raita", "Sides", 60),
        ("Gulab Jamun", "Dessert", 80),
        ("Masala Dosa", "South Indian", 120),
        ("Filter Coffee", "Beverages", 50),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, category, price), id)| MenuItem {
        id: MenuItemId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Money::from_cents(price * 100),
        enabled: true,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MenuCatalog {
        MenuCatalog::new(Store::in_memory())
    }

    #[tokio::test]
    async fn test_add_assigns_next_id_and_enables() {
        let catalog = catalog();
        let item = catalog
            .add(NewMenuItem {
                name: "Lassi".into(),
                category: "Beverages".into(),
                price: Money::from_major(70),
            })
            .await
            .unwrap();

        assert_eq!(item.id, MenuItemId::new(11));
        assert!(item.enabled);
        assert_eq!(catalog.all().await.len(), 11);
    }

    #[tokio::test]
    async fn test_add_requires_name() {
        let err = catalog()
            .add(NewMenuItem {
                name: "  ".into(),
                category: String::new(),
                price: Money::zero(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingField("name"))
        ));
    }

    #[tokio::test]
    async fn test_disable_hides_from_enabled_list() {
        let catalog = catalog();
        catalog
            .update(
                MenuItemId::new(1),
                MenuItemPatch {
                    enabled: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(catalog.enabled().await.len(), 9);
        assert_eq!(catalog.all().await.len(), 10);
    }

    #[tokio::test]
    async fn test_update_only_touches_given_fields() {
        let catalog = catalog();
        let updated = catalog
            .update(
                MenuItemId::new(4),
                MenuItemPatch {
                    price: Some(Money::from_major(45)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Naan");
        assert_eq!(updated.price, Money::from_major(45));
    }

    #[tokio::test]
    async fn test_update_unknown_item() {
        let err = catalog()
            .update(MenuItemId::new(404), MenuItemPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Item not found");
    }
}
