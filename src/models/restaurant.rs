use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::registry::Registry;

/// Cuisine assigned when none is given at construction
pub const DEFAULT_CUISINE: &str = "unknown";

/// Construction options for a restaurant
/// Unset fields fall back to the defaults documented on each field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantOptions {
    /// Defaults to an empty name
    pub name: Option<String>,
    /// Defaults to "unknown"
    pub cuisine: Option<String>,
    /// No default
    pub price: Option<String>,
}

impl RestaurantOptions {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }
}

/// A restaurant listing
/// Fields may be changed (or cleared) freely; validity is only checked on save
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    /// Numeric amount kept as entered
    pub price: Option<String>,
}

impl Restaurant {
    /// Create a restaurant from options, applying per-field defaults
    pub fn new(options: RestaurantOptions) -> Self {
        Restaurant {
            name: Some(options.name.unwrap_or_default()),
            cuisine: Some(
                options
                    .cuisine
                    .unwrap_or_else(|| DEFAULT_CUISINE.to_string()),
            ),
            price: options.price,
        }
    }

    /// Check that name and cuisine are non-blank and price is a positive number
    pub fn is_valid(&self) -> bool {
        is_present(self.name.as_deref())
            && is_present(self.cuisine.as_deref())
            && self.price_value().is_some()
    }

    /// Append this restaurant to the registry's active store
    /// Returns false if there is no usable store, the record is invalid,
    /// or the store fails to write
    pub fn save(&self, registry: &Registry) -> bool {
        let Some(store) = registry.file() else {
            log::debug!("Not saving {:?}: no restaurant file loaded", self.name);
            return false;
        };

        if !store.is_usable() {
            log::debug!(
                "Not saving {:?}: restaurant file {:?} is not usable",
                self.name,
                store.path()
            );
            return false;
        }

        if !self.is_valid() {
            log::debug!("Not saving invalid restaurant {:?}", self);
            return false;
        }

        match store.append(self) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save restaurant {:?}: {}", self.name, e);
                false
            }
        }
    }

    /// Parsed price, if it is a finite number greater than zero
    pub fn price_value(&self) -> Option<f64> {
        let value = self.price.as_deref()?.trim().parse::<f64>().ok()?;
        (value.is_finite() && value > 0.0).then_some(value)
    }

    /// Price as dollars with two decimals, "$0.00" when it doesn't parse
    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.price_value().unwrap_or(0.0))
    }

    /// Parse one tab-separated row: name, cuisine, price
    /// Missing columns are left unset
    pub fn from_line(line: &str) -> Self {
        let mut columns = line.trim_end_matches(['\r', '\n']).splitn(3, '\t');
        let mut next = || columns.next().map(str::to_string);

        Restaurant {
            name: next(),
            cuisine: next(),
            price: next(),
        }
    }

    /// Encode as one tab-separated row (without trailing newline)
    pub fn to_line(&self) -> String {
        [&self.name, &self.cuisine, &self.price]
            .iter()
            .map(|field| sanitize_column(field.as_deref().unwrap_or("")))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

impl Default for Restaurant {
    fn default() -> Self {
        Self::new(RestaurantOptions::default())
    }
}

/// Column to order listings by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Cuisine,
    Price,
}

/// Sort restaurants in place
/// Text columns compare case-insensitively; unparsable prices sort last
pub fn sort_restaurants(restaurants: &mut [Restaurant], key: SortKey) {
    match key {
        SortKey::Name => restaurants.sort_by_key(|r| lowercase(r.name.as_deref())),
        SortKey::Cuisine => restaurants.sort_by_key(|r| lowercase(r.cuisine.as_deref())),
        SortKey::Price => restaurants.sort_by(|a, b| match (a.price_value(), b.price_value()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn lowercase(value: Option<&str>) -> String {
    value.unwrap_or("").to_lowercase()
}

// One record per line, so tabs and line breaks can't appear inside a column
fn sanitize_column(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
