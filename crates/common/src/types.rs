use serde::{Deserialize, Serialize};

/// Declares a positive integer identifier newtype.
///
/// Records in the POS store are keyed by small sequential integers that
/// travel over the wire as bare JSON numbers, so every id is
/// `#[serde(transparent)]` around a `u64`.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// The identifier handed out when a collection is empty.
            pub const fn first() -> Self {
                Self(1)
            }

            /// Returns the identifier that follows this one.
            pub const fn next(self) -> Self {
                Self(self.0 + 1)
            }

            /// Returns the raw value.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Returns `max(ids) + 1`, or [`Self::first`] when `ids` is empty.
            pub fn next_after(ids: impl IntoIterator<Item = Self>) -> Self {
                ids.into_iter().max().map_or(Self::first(), Self::next)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

numeric_id!(
    /// Identifier of an order. Assigned once, never reused.
    OrderId
);

numeric_id!(
    /// Identifier of an item, unique only within its parent order.
    ItemId
);

numeric_id!(
    /// Identifier of a bill.
    BillId
);

numeric_id!(
    /// Identifier of a kitchen order ticket log entry.
    KotLogId
);

numeric_id!(
    /// Identifier of a staff user (cashier, kitchen, admin).
    UserId
);

numeric_id!(
    /// Identifier of a menu entry.
    MenuItemId
);

impl From<MenuItemId> for ItemId {
    fn from(id: MenuItemId) -> Self {
        ItemId::new(id.get())
    }
}

impl From<ItemId> for MenuItemId {
    fn from(id: ItemId) -> Self {
        MenuItemId::new(id.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_after_empty_is_first() {
        assert_eq!(OrderId::next_after(Vec::new()), OrderId::first());
    }

    #[test]
    fn next_after_uses_max_not_count() {
        let ids = [OrderId::new(3), OrderId::new(7), OrderId::new(5)];
        assert_eq!(OrderId::next_after(ids), OrderId::new(8));
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&BillId::new(42)).unwrap();
        assert_eq!(json, "42");
        let id: BillId = serde_json::from_str("42").unwrap();
        assert_eq!(id, BillId::new(42));
    }

    #[test]
    fn menu_and_item_ids_convert() {
        let item: ItemId = MenuItemId::new(4).into();
        assert_eq!(item.get(), 4);
    }
}
