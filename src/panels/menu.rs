use serde::Deserialize;

use crate::contact::SelectOption;
use crate::i18n::Language;
use crate::models::menu::MAX_SPICE_LEVEL;
use crate::models::{MenuCategory, MenuItem, MenuItemUpdate, NewMenuItem};
use crate::panels::reservations::FilterTab;
use crate::stores::{MenuStore, Mutation};

/// Category filter of the menu manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuFilter {
    #[default]
    All,
    Category(MenuCategory),
}

impl MenuFilter {
    pub fn options() -> impl Iterator<Item = MenuFilter> {
        std::iter::once(Self::All).chain(MenuCategory::ALL.into_iter().map(Self::Category))
    }

    pub fn parse(param: Option<&str>) -> Self {
        param
            .and_then(|p| p.parse::<MenuCategory>().ok())
            .map(Self::Category)
            .unwrap_or(Self::All)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category(category) => category.as_str(),
        }
    }

    pub fn matches(self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => item.category == category.as_str(),
        }
    }
}

pub fn format_price(price: f64) -> String {
    format!("€{:.2}", price)
}

fn category_class(category: &str) -> &'static str {
    match category {
        "starters" => "badge-blue",
        "mains" => "badge-green",
        "desserts" => "badge-pink",
        _ => "badge-purple",
    }
}

/// Flags of the spice indicator, one per dot
pub fn spice_dots(level: i32) -> Vec<bool> {
    (0..MAX_SPICE_LEVEL).map(|i| i < level).collect()
}

#[derive(Debug, Clone)]
pub struct MenuCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub category_class: &'static str,
    pub image_url: Option<String>,
    pub is_vegetarian: bool,
    pub is_special: bool,
    pub is_available: bool,
    pub spice_dots: Vec<bool>,
}

impl MenuCard {
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: format_price(item.price),
            category: item.category.clone(),
            category_class: category_class(&item.category),
            image_url: item.image_url.clone().filter(|u| !u.is_empty()),
            is_vegetarian: item.is_vegetarian,
            is_special: item.is_special,
            is_available: item.is_available,
            spice_dots: spice_dots(item.spice_level),
        }
    }
}

/// Everything the menu manager renders
#[derive(Debug, Clone)]
pub struct MenuPanel {
    pub filter: &'static str,
    pub tabs: Vec<FilterTab>,
    pub cards: Vec<MenuCard>,
    pub loading: bool,
    pub error: Option<String>,
}

impl MenuPanel {
    pub fn build(store: &MenuStore, filter: MenuFilter) -> Self {
        let tabs = MenuFilter::options()
            .map(|option| FilterTab {
                value: option.as_str(),
                active: option == filter,
            })
            .collect();

        let cards = store
            .items()
            .iter()
            .filter(|item| filter.matches(item))
            .map(MenuCard::from_item)
            .collect();

        Self {
            filter: filter.as_str(),
            tabs,
            cards,
            loading: store.loading(),
            error: store.error().map(str::to_string),
        }
    }
}

/// Flip `is_available` and nothing else
pub async fn toggle_availability(
    store: &mut MenuStore,
    id: &str,
    currently_available: bool,
) -> Mutation<MenuItem> {
    store
        .update(id, MenuItemUpdate::availability(!currently_available))
        .await
}

/// Flip `is_special` and nothing else
pub async fn toggle_special(
    store: &mut MenuStore,
    id: &str,
    currently_special: bool,
) -> Mutation<MenuItem> {
    store
        .update(id, MenuItemUpdate::special(!currently_special))
        .await
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuFormError {
    #[error("Name is required")]
    MissingName,

    #[error("Description is required")]
    MissingDescription,

    #[error("Price must be a non-negative number")]
    InvalidPrice,

    #[error("Category must be one of starters, mains, desserts, drinks")]
    InvalidCategory,

    #[error("Spice level must be between 0 and 3")]
    InvalidSpiceLevel,
}

/// Add/edit form of a menu item. Unchecked boxes are absent from the post.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
    pub spice_level: String,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub is_available: bool,
}

impl Default for MenuItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: MenuCategory::Starters.as_str().to_string(),
            image_url: String::new(),
            spice_level: "0".to_string(),
            is_vegetarian: false,
            is_special: false,
            is_available: true,
        }
    }
}

/// Checked form values
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: MenuCategory,
    pub image_url: Option<String>,
    pub spice_level: i32,
    pub is_vegetarian: bool,
    pub is_special: bool,
    pub is_available: bool,
}

impl MenuItemForm {
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: format!("{:.2}", item.price),
            category: item.category.clone(),
            image_url: item.image_url.clone().unwrap_or_default(),
            spice_level: item.spice_level.to_string(),
            is_vegetarian: item.is_vegetarian,
            is_special: item.is_special,
            is_available: item.is_available,
        }
    }

    pub fn validate(&self) -> Result<MenuItemInput, MenuFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MenuFormError::MissingName);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(MenuFormError::MissingDescription);
        }

        let price = self
            .price
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or(MenuFormError::InvalidPrice)?;

        let category = self
            .category
            .parse::<MenuCategory>()
            .map_err(|_| MenuFormError::InvalidCategory)?;

        let spice_level = self
            .spice_level
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|level| (0..=MAX_SPICE_LEVEL).contains(level))
            .ok_or(MenuFormError::InvalidSpiceLevel)?;

        let image_url = Some(self.image_url.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        Ok(MenuItemInput {
            name: name.to_string(),
            description: description.to_string(),
            price,
            category,
            image_url,
            spice_level,
            is_vegetarian: self.is_vegetarian,
            is_special: self.is_special,
            is_available: self.is_available,
        })
    }

    pub fn category_options(&self) -> Vec<SelectOption> {
        let strings = Language::En.strings();
        MenuCategory::ALL
            .iter()
            .map(|c| SelectOption {
                value: c.as_str().to_string(),
                label: strings.category(*c).to_string(),
                selected: self.category == c.as_str(),
            })
            .collect()
    }

    pub fn spice_options(&self) -> Vec<SelectOption> {
        (0..=MAX_SPICE_LEVEL)
            .map(|level| {
                let value = level.to_string();
                SelectOption {
                    label: value.clone(),
                    selected: self.spice_level == value,
                    value,
                }
            })
            .collect()
    }
}

impl From<MenuItemInput> for NewMenuItem {
    fn from(input: MenuItemInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category.as_str().to_string(),
            image_url: input.image_url,
            is_vegetarian: Some(input.is_vegetarian),
            is_special: Some(input.is_special),
            spice_level: Some(input.spice_level),
            is_available: Some(input.is_available),
        }
    }
}

impl From<MenuItemInput> for MenuItemUpdate {
    fn from(input: MenuItemInput) -> Self {
        Self {
            name: Some(input.name),
            description: Some(input.description),
            price: Some(input.price),
            category: Some(input.category.as_str().to_string()),
            image_url: input.image_url,
            is_vegetarian: Some(input.is_vegetarian),
            is_special: Some(input.is_special),
            spice_level: Some(input.spice_level),
            is_available: Some(input.is_available),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::TABLE;
    use crate::remote::MemoryTables;
    use crate::stores::MenuScope;
    use serde_json::json;
    use std::sync::Arc;

    async fn admin_store() -> MenuStore {
        let tables = Arc::new(MemoryTables::restaurant());
        tables
            .seed(
                TABLE,
                vec![
                    json!({ "id": "samosa", "name": "Samosa", "description": "Pastry",
                            "price": 5.5, "category": "starters", "is_vegetarian": true,
                            "spice_level": 1 }),
                    json!({ "id": "biryani", "name": "Biryani", "description": "Rice",
                            "price": 16.0, "category": "mains", "spice_level": 2,
                            "is_special": true }),
                    json!({ "id": "kulfi", "name": "Kulfi", "description": "Ice cream",
                            "price": 4.0, "category": "desserts" }),
                ],
            )
            .await;
        MenuStore::load(tables, MenuScope::Admin).await
    }

    #[tokio::test]
    async fn category_filter_is_local() {
        let store = admin_store().await;
        let panel = MenuPanel::build(&store, MenuFilter::Category(MenuCategory::Mains));
        assert_eq!(panel.cards.len(), 1);
        assert_eq!(panel.cards[0].id, "biryani");

        let panel = MenuPanel::build(&store, MenuFilter::All);
        assert_eq!(panel.cards.len(), 3);
        assert_eq!(panel.tabs.len(), 5);
    }

    #[tokio::test]
    async fn toggling_availability_changes_only_that_flag() {
        let mut store = admin_store().await;
        let before = store.find("biryani").unwrap().clone();

        toggle_availability(&mut store, "biryani", before.is_available)
            .await
            .unwrap();

        let after = store.find("biryani").unwrap();
        assert_eq!(after.is_available, !before.is_available);
        assert_eq!(
            MenuItem {
                is_available: before.is_available,
                updated_at: before.updated_at,
                ..after.clone()
            },
            before
        );
    }

    #[tokio::test]
    async fn toggling_special_twice_restores_it() {
        let mut store = admin_store().await;
        toggle_special(&mut store, "kulfi", false).await.unwrap();
        assert!(store.find("kulfi").unwrap().is_special);
        toggle_special(&mut store, "kulfi", true).await.unwrap();
        assert!(!store.find("kulfi").unwrap().is_special);
    }

    #[test]
    fn card_formats_price_and_spice() {
        let item: MenuItem = serde_json::from_value(json!({
            "id": "x", "name": "Rasam", "description": "Soup", "price": 6.5,
            "category": "starters", "is_vegetarian": true, "is_special": false,
            "spice_level": 2, "is_available": true,
            "created_at": "2024-01-01T00:00:00+00:00", "updated_at": "2024-01-01T00:00:00+00:00"
        }))
        .unwrap();
        let card = MenuCard::from_item(&item);
        assert_eq!(card.price, "€6.50");
        assert_eq!(card.spice_dots, vec![true, true, false]);
        assert_eq!(card.category_class, "badge-blue");
    }

    #[test]
    fn form_validation_checks_each_field() {
        let form = MenuItemForm {
            name: "Uttapam".into(),
            description: "Thick pancake".into(),
            price: "9,90".into(),
            category: "mains".into(),
            spice_level: "1".into(),
            ..MenuItemForm::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.price, 9.9);
        assert_eq!(input.category, MenuCategory::Mains);
        assert_eq!(input.image_url, None);

        let bad_price = MenuItemForm {
            price: "-1".into(),
            ..form.clone()
        };
        assert_eq!(bad_price.validate(), Err(MenuFormError::InvalidPrice));

        let bad_category = MenuItemForm {
            category: "soups".into(),
            ..form.clone()
        };
        assert_eq!(bad_category.validate(), Err(MenuFormError::InvalidCategory));

        let too_hot = MenuItemForm {
            spice_level: "4".into(),
            ..form.clone()
        };
        assert_eq!(too_hot.validate(), Err(MenuFormError::InvalidSpiceLevel));

        let unnamed = MenuItemForm {
            name: " ".into(),
            ..form
        };
        assert_eq!(unnamed.validate(), Err(MenuFormError::MissingName));
    }

    #[test]
    fn dropdowns_preselect_current_values() {
        let form = MenuItemForm {
            category: "desserts".into(),
            spice_level: "2".into(),
            ..MenuItemForm::default()
        };
        let selected: Vec<_> = form
            .category_options()
            .into_iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, ["desserts"]);

        let spice = form.spice_options();
        assert_eq!(spice.len(), 4);
        assert!(spice[2].selected);
    }

    #[tokio::test]
    async fn edit_form_round_trips_through_update() {
        let mut store = admin_store().await;
        let item = store.find("samosa").unwrap().clone();
        let form = MenuItemForm {
            price: "6.00".into(),
            ..MenuItemForm::from_item(&item)
        };

        let update: MenuItemUpdate = form.validate().unwrap().into();
        let updated = store.update("samosa", update).await.unwrap();

        assert_eq!(updated.price, 6.0);
        assert_eq!(updated.name, item.name);
        assert_eq!(updated.is_vegetarian, item.is_vegetarian);
        assert_eq!(updated.spice_level, item.spice_level);
    }
}
