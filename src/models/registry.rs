use std::io::{self, Write};
use std::path::Path;

use super::restaurant::Restaurant;
use crate::storage::{RestaurantFile, RestaurantStore};

/// Holds the restaurant file currently in use
/// Restaurants are saved through a registry passed by reference
#[derive(Default)]
pub struct Registry {
    file: Option<Box<dyn RestaurantStore>>,
}

impl Registry {
    /// Create a registry with no restaurant file loaded
    pub fn new() -> Self {
        Registry { file: None }
    }

    /// Create a registry backed by an existing store
    pub fn with_store(store: Box<dyn RestaurantStore>) -> Self {
        Registry { file: Some(store) }
    }

    /// Bind the registry to a restaurant file, reporting on stdout when
    /// no path was given
    pub fn load_file(&mut self, path: Option<&Path>) {
        self.load_file_to(path, &mut io::stdout());
    }

    /// Bind the registry to a restaurant file
    /// A missing path clears the current file and writes a notice to `out`;
    /// a given path is loaded whether or not it is usable yet
    pub fn load_file_to<W: Write>(&mut self, path: Option<&Path>, out: &mut W) {
        match path {
            None => {
                self.file = None;
                // Output is informational only
                let _ = writeln!(out, "Restaurant file path is not usable.");
                log::debug!("Cleared restaurant file: no path given");
            }
            Some(path) => {
                let file = RestaurantFile::new(path.to_path_buf());
                log::debug!(
                    "Loaded restaurant file {:?} (usable: {})",
                    path,
                    file.is_usable()
                );
                self.file = Some(Box::new(file));
            }
        }
    }

    /// The restaurant file currently in use, if any
    pub fn file(&self) -> Option<&dyn RestaurantStore> {
        self.file.as_deref()
    }

    /// Every restaurant in the current file, in file order
    /// Empty when no file is loaded or it can't be read
    pub fn all(&self) -> Vec<Restaurant> {
        let Some(file) = self.file() else {
            return Vec::new();
        };

        match file.restaurants() {
            Ok(restaurants) => restaurants,
            Err(e) => {
                log::warn!("Failed to read restaurants from {:?}: {}", file.path(), e);
                Vec::new()
            }
        }
    }
}
