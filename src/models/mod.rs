pub mod registry;
pub mod restaurant;

pub use registry::Registry;
pub use restaurant::{Restaurant, RestaurantOptions, SortKey, sort_restaurants};
