use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use crate::models::Restaurant;

/// Errors raised by restaurant storage
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Restaurant file is not usable: {0}")]
    NotUsable(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for restaurant persistence
pub trait RestaurantStore: Send + Sync {
    /// Whether the backing storage can currently be read and written
    fn is_usable(&self) -> bool;

    /// Persist one restaurant after those already stored
    fn append(&self, restaurant: &Restaurant) -> Result<(), StoreError>;

    /// Load every stored restaurant in storage order
    fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError>;

    /// Get the storage file path
    fn path(&self) -> &PathBuf;
}

/// Tab-separated text file, one restaurant per line
pub struct RestaurantFile {
    path: PathBuf,
}

impl RestaurantFile {
    /// Bind to a path without touching the filesystem
    pub fn new(path: PathBuf) -> Self {
        RestaurantFile { path }
    }

    /// Bind to a path, creating an empty file (and parent directories)
    /// if nothing exists there yet
    pub fn create_if_missing(path: PathBuf) -> Result<Self, StoreError> {
        if path.exists() {
            log::info!("Found restaurant file {:?}", path);
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            File::create(&path)?;
            log::info!("Created restaurant file {:?}", path);
        }

        Ok(RestaurantFile::new(path))
    }
}

impl RestaurantStore for RestaurantFile {
    fn is_usable(&self) -> bool {
        self.path.is_file()
            && File::open(&self.path).is_ok()
            && OpenOptions::new().append(true).open(&self.path).is_ok()
    }

    fn append(&self, restaurant: &Restaurant) -> Result<(), StoreError> {
        if !self.is_usable() {
            return Err(StoreError::NotUsable(self.path.clone()));
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)?;

        // Hand-edited files may lack a final newline
        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                writeln!(file)?;
            }
        }

        writeln!(file, "{}", restaurant.to_line())?;

        log::debug!("Appended {:?} to {:?}", restaurant.name, self.path);
        Ok(())
    }

    fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        if !self.is_usable() {
            log::debug!("Restaurant file {:?} not usable, nothing to load", self.path);
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut restaurants = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            restaurants.push(Restaurant::from_line(&line));
        }

        log::debug!("Loaded {} restaurants from {:?}", restaurants.len(), self.path);
        Ok(restaurants)
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RestaurantOptions;

    #[test]
    fn test_missing_file_is_not_usable() {
        let dir = tempfile::tempdir().unwrap();
        let file = RestaurantFile::new(dir.path().join("missing.txt"));

        assert!(!file.is_usable());
        assert!(file.restaurants().unwrap().is_empty());
        assert!(matches!(
            file.append(&Restaurant::default()),
            Err(StoreError::NotUsable(_))
        ));
    }

    #[test]
    fn test_directory_is_not_usable() {
        let dir = tempfile::tempdir().unwrap();
        let file = RestaurantFile::new(dir.path().to_path_buf());
        assert!(!file.is_usable());
    }

    #[test]
    fn test_create_if_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("restaurants.txt");

        let file = RestaurantFile::create_if_missing(path.clone()).unwrap();
        assert!(path.exists());
        assert!(file.is_usable());
        assert!(file.restaurants().unwrap().is_empty());

        // Existing content is left alone
        fs::write(&path, "Crescent\tpaleo\t321\n").unwrap();
        let file = RestaurantFile::create_if_missing(path).unwrap();
        assert_eq!(file.restaurants().unwrap().len(), 1);
    }

    #[test]
    fn test_append_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let file = RestaurantFile::create_if_missing(dir.path().join("restaurants.txt")).unwrap();

        let first = Restaurant::new(
            RestaurantOptions::default()
                .name("Crescent")
                .cuisine("paleo")
                .price("321"),
        );
        let second = Restaurant::new(
            RestaurantOptions::default()
                .name("Noodle Bar")
                .cuisine("thai")
                .price("12.5"),
        );
        file.append(&first).unwrap();
        file.append(&second).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "Crescent\tpaleo\t321\nNoodle Bar\tthai\t12.5\n");
        assert_eq!(file.restaurants().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_append_after_missing_final_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restaurants.txt");
        fs::write(&path, "Crescent\tpaleo\t321").unwrap();

        let file = RestaurantFile::new(path.clone());
        let noodle = Restaurant::new(
            RestaurantOptions::default()
                .name("Noodle")
                .cuisine("thai")
                .price("9"),
        );
        file.append(&noodle).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Crescent\tpaleo\t321\nNoodle\tthai\t9\n"
        );
        let restaurants = file.restaurants().unwrap();
        assert_eq!(restaurants.len(), 2);
        assert_eq!(restaurants[0].price.as_deref(), Some("321"));
        assert_eq!(restaurants[1], noodle);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restaurants.txt");
        fs::write(&path, "\nCrescent\tpaleo\t321\n   \nLa Bodega\tspanish\t45\r\n").unwrap();

        let restaurants = RestaurantFile::new(path).restaurants().unwrap();
        assert_eq!(restaurants.len(), 2);
        assert_eq!(restaurants[1].price.as_deref(), Some("45"));
    }
}
