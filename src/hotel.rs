// Hotel records and their flat-file repository, including room availability

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    store::{next_id, JsonStore},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(rename = "hotel_id")]
    pub id: u32,
    pub name: String,
    pub location: String,
    // Rooms currently available, not the hotel's total
    pub rooms: u32,
}

// Patch applied by `update`; fields left as `None` keep their value.
#[derive(Debug, Clone, Default)]
pub struct HotelUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rooms: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct HotelRepository {
    store: JsonStore<Hotel>,
}

impl HotelRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn create(&self, name: &str, location: &str, rooms: u32) -> Result<Hotel> {
        if name.is_empty() || location.is_empty() {
            return Err(Error::Validation("name and location are required".into()));
        }
        if rooms == 0 {
            return Err(Error::Validation("rooms must be a positive integer".into()));
        }
        let mut hotels = self.store.load();
        let hotel = Hotel {
            id: next_id(hotels.iter().map(|h| h.id)),
            name: name.to_owned(),
            location: location.to_owned(),
            rooms,
        };
        hotels.push(hotel.clone());
        self.store.save(&hotels)?;
        debug!(hotel_id = hotel.id, "created hotel");
        Ok(hotel)
    }

    pub fn get(&self, id: u32) -> Option<Hotel> {
        self.store.load().into_iter().find(|h| h.id == id)
    }

    pub fn update(&self, id: u32, update: HotelUpdate) -> Result<Hotel> {
        let mut hotels = self.store.load();
        let hotel = hotels
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(Error::NotFound { entity: "hotel", id })?;
        if let Some(name) = update.name {
            hotel.name = name;
        }
        if let Some(location) = update.location {
            hotel.location = location;
        }
        if let Some(rooms) = update.rooms {
            hotel.rooms = rooms;
        }
        let updated = hotel.clone();
        self.store.save(&hotels)?;
        Ok(updated)
    }

    pub fn delete(&self, id: u32) -> Result<()> {
        let mut hotels = self.store.load();
        let before = hotels.len();
        hotels.retain(|h| h.id != id);
        if hotels.len() == before {
            return Err(Error::NotFound { entity: "hotel", id });
        }
        self.store.save(&hotels)?;
        debug!(hotel_id = id, "deleted hotel");
        Ok(())
    }

    // Take one room out of availability. Fails without mutation when the
    // hotel is unknown or already full.
    pub fn reserve_room(&self, id: u32) -> Result<()> {
        let mut hotels = self.store.load();
        let hotel = hotels
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(Error::NotFound { entity: "hotel", id })?;
        if hotel.rooms == 0 {
            return Err(Error::NoRoomsAvailable(id));
        }
        hotel.rooms -= 1;
        let rooms = hotel.rooms;
        self.store.save(&hotels)?;
        debug!(hotel_id = id, rooms, "reserved room");
        Ok(())
    }

    // Put one room back into availability.
    pub fn release_room(&self, id: u32) -> Result<()> {
        let mut hotels = self.store.load();
        let hotel = hotels
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(Error::NotFound { entity: "hotel", id })?;
        hotel.rooms += 1;
        let rooms = hotel.rooms;
        self.store.save(&hotels)?;
        debug!(hotel_id = id, rooms, "released room");
        Ok(())
    }
}
