//! Static geodata for the data-center globe.
//!
//! The catalog is plain data injected into the engine at construction;
//! nothing here mutates behind the engine's back. [`Catalog::revision`]
//! changes whenever the location list does, so derived layers know when to
//! recompute.

mod builtin;
mod location;

use std::collections::BTreeSet;

use thiserror::Error;

pub use builtin::DATA_CENTERS;
pub use location::{Category, HEADQUARTERS, Location};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("catalog json is invalid: {0}")]
    Parse(String),
    #[error("duplicate location name: {0}")]
    DuplicateName(String),
    #[error("location {name} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates { name: String, lat: f64, lon: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    locations: Vec<Location>,
    revision: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            locations: DATA_CENTERS.to_vec(),
            revision: 0,
        }
    }

    pub fn empty() -> Self {
        Self {
            locations: Vec::new(),
            revision: 0,
        }
    }

    pub fn new(locations: Vec<Location>) -> Result<Self, CatalogError> {
        validate(&locations)?;
        Ok(Self {
            locations,
            revision: 0,
        })
    }

    /// Parse a JSON array of locations.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let locations: Vec<Location> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(locations)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string(&self.locations).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    pub fn push(&mut self, location: Location) -> Result<(), CatalogError> {
        validate_one(&location)?;
        if self.get(&location.name).is_some() {
            return Err(CatalogError::DuplicateName(location.name.into_owned()));
        }
        self.locations.push(location);
        self.revision += 1;
        Ok(())
    }

    pub fn replace(&mut self, locations: Vec<Location>) -> Result<(), CatalogError> {
        validate(&locations)?;
        self.locations = locations;
        self.revision += 1;
        Ok(())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.name == name)
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn headquarters(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| l.category.is_headquarters())
    }

    /// Distinct provider identifiers, sorted.
    pub fn providers(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .locations
            .iter()
            .filter(|l| !l.category.is_headquarters())
            .map(|l| l.category.as_str())
            .collect();
        set.into_iter().collect()
    }
}

fn validate_one(location: &Location) -> Result<(), CatalogError> {
    if !location.position().is_valid() {
        return Err(CatalogError::InvalidCoordinates {
            name: location.name.to_string(),
            lat: location.lat,
            lon: location.lon,
        });
    }
    Ok(())
}

fn validate(locations: &[Location]) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for location in locations {
        validate_one(location)?;
        if !seen.insert(&*location.name) {
            return Err(CatalogError::DuplicateName(location.name.to_string()));
        }
    }
    Ok(())
}
