//! The restaurant menu.
//!
//! Prices are kept as the text printed on the menu (`"25,90"`). That text is
//! what the menu page hands to the cart, so the cart parses it the same way
//! whether it came from here or from a hand-edited form.

use hc_core::Price;

/// Menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Burgers,
    Sides,
    Drinks,
    Desserts,
}

impl Category {
    /// All sections in display order.
    pub const ALL: [Self; 4] = [Self::Burgers, Self::Sides, Self::Drinks, Self::Desserts];

    /// Section heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Burgers => "Hambúrgueres",
            Self::Sides => "Acompanhamentos",
            Self::Drinks => "Bebidas",
            Self::Desserts => "Sobremesas",
        }
    }
}

/// One dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    /// Price as printed, comma decimal.
    pub price: String,
    pub category: Category,
}

impl MenuItem {
    fn new(name: &str, description: &str, price: &str, category: Category) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            price: price.to_string(),
            category,
        }
    }

    /// The printed price parsed, if it parses.
    #[must_use]
    pub fn parsed_price(&self) -> Option<Price> {
        Price::parse(&self.price).ok()
    }
}

/// The full menu.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Build a menu from items.
    #[must_use]
    pub const fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The house menu.
    #[must_use]
    pub fn house() -> Self {
        use Category::{Burgers, Desserts, Drinks, Sides};

        Self::new(vec![
            MenuItem::new(
                "X-Burger",
                "Pão brioche, blend bovino 160g, queijo prato e molho da casa.",
                "25,90",
                Burgers,
            ),
            MenuItem::new(
                "X-Bacon",
                "Blend bovino 160g, bacon crocante, cheddar e cebola caramelizada.",
                "29,90",
                Burgers,
            ),
            MenuItem::new(
                "X-Salada",
                "Blend bovino 160g, queijo, alface, tomate e maionese verde.",
                "27,50",
                Burgers,
            ),
            MenuItem::new(
                "Veggie",
                "Hambúrguer de grão-de-bico, queijo coalho e rúcula.",
                "28,00",
                Burgers,
            ),
            MenuItem::new(
                "Batata Frita",
                "Porção de batatas rústicas com páprica.",
                "14,00",
                Sides,
            ),
            MenuItem::new(
                "Onion Rings",
                "Anéis de cebola empanados com molho barbecue.",
                "16,50",
                Sides,
            ),
            MenuItem::new("Refrigerante", "Lata 350ml.", "6,50", Drinks),
            MenuItem::new("Suco Natural", "Laranja, limão ou maracujá, 400ml.", "9,00", Drinks),
            MenuItem::new(
                "Milkshake",
                "Chocolate, morango ou baunilha, 400ml.",
                "18,00",
                Desserts,
            ),
            MenuItem::new(
                "Brownie",
                "Brownie de chocolate meio amargo com calda quente.",
                "12,00",
                Desserts,
            ),
        ])
    }

    /// All items in menu order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Items in one section.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Find an item by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_prices_parse() {
        for item in Menu::house().items() {
            assert!(
                item.parsed_price().is_some_and(|p| !p.is_zero()),
                "{} has price {:?}",
                item.name,
                item.price
            );
        }
    }

    #[test]
    fn test_house_names_unique() {
        let menu = Menu::house();
        for item in menu.items() {
            let same = menu.items().iter().filter(|i| i.name == item.name).count();
            assert_eq!(same, 1, "{} listed twice", item.name);
        }
    }

    #[test]
    fn test_find() {
        let menu = Menu::house();
        assert_eq!(menu.find("X-Burger").map(|i| i.price.as_str()), Some("25,90"));
        assert!(menu.find("x-burger").is_none());
    }

    #[test]
    fn test_every_category_has_items() {
        let menu = Menu::house();
        for category in Category::ALL {
            assert!(menu.in_category(category).next().is_some(), "{}", category.label());
        }
    }
}
