//! Resource administration and privileged maintenance.

use chrono::Utc;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId};
use crate::resource::{NewResource, Resource, ResourceId, ResourceUpdate};

use super::query::{Page, PageRequest, ResourceFilter};
use super::{refresh_availability, ReservationEngine};

impl ReservationEngine {
    /// Adds a resource. New resources are available.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank names or a negative rate.
    pub fn create_resource(&mut self, resource: &NewResource) -> Result<Resource> {
        resource.validate()?;
        let created = Database::insert_resource(self.db.connection(), resource, Utc::now())?;
        log::info!(
            "created resource {} ({} {})",
            created.id(),
            created.brand(),
            created.model()
        );
        Ok(created)
    }

    /// Edits a resource's descriptive fields or rate.
    ///
    /// Existing reservations keep the price they were booked at.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a validation error.
    pub fn update_resource(&mut self, id: ResourceId, update: &ResourceUpdate) -> Result<Resource> {
        update.validate()?;

        let tx = self.db.begin_transaction()?;
        let mut resource =
            Database::get_resource(&tx, id)?.ok_or_else(|| Error::resource_not_found(id))?;
        if update.is_empty() {
            return Ok(resource);
        }

        update.apply_to(&mut resource);
        resource.updated_at = Utc::now();
        Database::update_resource_row(&tx, &resource)?;
        tx.commit()?;

        log::info!("updated resource {id}");
        Ok(resource)
    }

    /// Removes a resource together with all of its reservations.
    ///
    /// Returns the removed resource.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the resource does not exist.
    pub fn delete_resource(&mut self, id: ResourceId) -> Result<Resource> {
        let tx = self.db.begin_transaction()?;
        let resource =
            Database::get_resource(&tx, id)?.ok_or_else(|| Error::resource_not_found(id))?;
        Database::delete_resource_row(&tx, id)?;
        tx.commit()?;

        log::info!("deleted resource {id}");
        Ok(resource)
    }

    /// Fetches a resource.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the resource does not exist.
    pub fn get_resource(&self, id: ResourceId) -> Result<Resource> {
        Database::get_resource(self.db.connection(), id)?
            .ok_or_else(|| Error::resource_not_found(id))
    }

    /// Lists resources matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_resources(&self, filter: &ResourceFilter, page: PageRequest) -> Result<Page<Resource>> {
        // One read transaction so the count and the page see the same snapshot
        let tx = self.db.connection().unchecked_transaction()?;
        let total = Database::count_resources(&tx, filter)?;
        let data = Database::list_resources(&tx, filter, page.page_size(), page.offset())?;
        tx.finish()?;
        Ok(Page::new(data, page, total))
    }

    /// Sets a resource's availability flag directly.
    ///
    /// This is the administrative override: withdrawing a resource with no
    /// confirmed reservations makes `reserve` refuse it. The flag is not
    /// reconciled with the reservations here, and the next cancellation or
    /// reservation deletion on the resource recomputes it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the resource does not exist.
    pub fn set_availability_override(&mut self, id: ResourceId, available: bool) -> Result<Resource> {
        let tx = self.db.begin_transaction()?;
        let mut resource =
            Database::get_resource(&tx, id)?.ok_or_else(|| Error::resource_not_found(id))?;

        let now = Utc::now();
        Database::set_resource_available(&tx, id, available, now)?;
        tx.commit()?;

        log::warn!(
            "availability of resource {id} overridden: {} -> {available}",
            resource.available()
        );
        resource.available = available;
        resource.updated_at = now;
        Ok(resource)
    }

    /// Removes a reservation record outright.
    ///
    /// The resource's flag is recomputed in the same transaction. Returns
    /// the removed reservation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reservation does not exist.
    pub fn delete_reservation(&mut self, id: ReservationId) -> Result<Reservation> {
        let tx = self.db.begin_transaction()?;
        let reservation =
            Database::get_reservation(&tx, id)?.ok_or_else(|| Error::reservation_not_found(id))?;

        Database::delete_reservation_row(&tx, id)?;
        let available = refresh_availability(&tx, reservation.resource_id(), Utc::now())?;
        tx.commit()?;

        log::info!(
            "deleted reservation {id} on resource {} (available={available})",
            reservation.resource_id()
        );
        Ok(reservation)
    }
}
