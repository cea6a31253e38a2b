// Customer records and their flat-file repository

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    store::{next_id, JsonStore},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "customer_id")]
    pub id: u32,
    pub name: String,
    pub surname: String,
    pub email: String,
}

// Patch applied by `update`; fields left as `None` keep their value.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CustomerRepository {
    store: JsonStore<Customer>,
}

impl CustomerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn create(&self, name: &str, surname: &str, email: &str) -> Result<Customer> {
        if name.is_empty() || surname.is_empty() || email.is_empty() {
            return Err(Error::Validation(
                "name, surname and email are required".into(),
            ));
        }
        let mut customers = self.store.load();
        let customer = Customer {
            id: next_id(customers.iter().map(|c| c.id)),
            name: name.to_owned(),
            surname: surname.to_owned(),
            email: email.to_owned(),
        };
        customers.push(customer.clone());
        self.store.save(&customers)?;
        debug!(customer_id = customer.id, "created customer");
        Ok(customer)
    }

    pub fn get(&self, id: u32) -> Option<Customer> {
        self.store.load().into_iter().find(|c| c.id == id)
    }

    pub fn update(&self, id: u32, update: CustomerUpdate) -> Result<Customer> {
        let mut customers = self.store.load();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::NotFound {
                entity: "customer",
                id,
            })?;
        if let Some(name) = update.name {
            customer.name = name;
        }
        if let Some(surname) = update.surname {
            customer.surname = surname;
        }
        if let Some(email) = update.email {
            customer.email = email;
        }
        let updated = customer.clone();
        self.store.save(&customers)?;
        Ok(updated)
    }

    pub fn delete(&self, id: u32) -> Result<()> {
        let mut customers = self.store.load();
        let before = customers.len();
        customers.retain(|c| c.id != id);
        if customers.len() == before {
            return Err(Error::NotFound {
                entity: "customer",
                id,
            });
        }
        self.store.save(&customers)?;
        debug!(customer_id = id, "deleted customer");
        Ok(())
    }
}
