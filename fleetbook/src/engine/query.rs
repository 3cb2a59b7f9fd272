//! Filters and pagination for read operations.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{Actor, ReservationEngine};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{RequesterId, Reservation, ReservationId, ReservationStatus};
use crate::resource::ResourceId;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller gives none.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A clamped page request.
///
/// Out-of-range input is clamped rather than rejected: the page number to at
/// least 1 and the page size into `[1, 100]`.
///
/// # Examples
///
/// ```
/// use fleetbook::PageRequest;
///
/// let page = PageRequest::new(0, 500);
/// assert_eq!(page.page(), 1);
/// assert_eq!(page.page_size(), 100);
///
/// let page = PageRequest::new(3, 10);
/// assert_eq!(page.offset(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a request, clamping both values.
    #[must_use]
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let page_size = page_size.clamp(1, i64::from(MAX_PAGE_SIZE));
        Self {
            page,
            page_size: u32::try_from(page_size).unwrap_or(MAX_PAGE_SIZE),
        }
    }

    /// Creates a request where missing values fall back to page 1 and
    /// `default_size`.
    #[must_use]
    pub fn from_options(page: Option<i64>, page_size: Option<i64>, default_size: u32) -> Self {
        Self::new(
            page.unwrap_or(1),
            page_size.unwrap_or_else(|| i64::from(default_size)),
        )
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, i64::from(DEFAULT_PAGE_SIZE))
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, newest first.
    pub data: Vec<T>,
    /// The 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Number of items matching the filter across all pages.
    pub total: u64,
    /// `ceil(total / page_size)`, never less than 1.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assembles a page from its items and the filter's total count.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let size = u64::from(request.page_size());
        Self {
            data,
            page: request.page(),
            page_size: request.page_size(),
            total,
            total_pages: total.div_ceil(size).max(1),
        }
    }
}

/// Filter for reservation listings. Unset fields match everything.
///
/// # Examples
///
/// ```
/// use fleetbook::{Actor, RequesterId, ReservationFilter, ReservationStatus, ResourceId};
///
/// let filter = ReservationFilter::default()
///     .for_resource(ResourceId::new(1))
///     .with_status(ReservationStatus::Confirmed)
///     .scoped_to(&Actor::new(RequesterId::new(7)));
/// assert_eq!(filter.requester_id, Some(RequesterId::new(7)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations of this resource.
    pub resource_id: Option<ResourceId>,
    /// Only reservations of this requester.
    pub requester_id: Option<RequesterId>,
    /// Only reservations in this status.
    pub status: Option<ReservationStatus>,
}

impl ReservationFilter {
    /// Restricts to one resource.
    #[must_use]
    pub const fn for_resource(mut self, resource_id: ResourceId) -> Self {
        self.resource_id = Some(resource_id);
        self
    }

    /// Restricts to one requester.
    #[must_use]
    pub const fn for_requester(mut self, requester_id: RequesterId) -> Self {
        self.requester_id = Some(requester_id);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Narrows the filter to what `actor` may see.
    ///
    /// Privileged actors see everything; anyone else only their own
    /// reservations, whatever requester the filter asked for.
    #[must_use]
    pub const fn scoped_to(mut self, actor: &Actor) -> Self {
        if !actor.privileged {
            self.requester_id = Some(actor.id);
        }
        self
    }
}

/// Filter for resource listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Case-insensitive substring of the model name.
    pub query: Option<String>,
    /// Only resources whose flag has this value.
    pub available: Option<bool>,
    /// Lower price bound, inclusive. Ignored unless `max_price` is also set.
    pub min_price: Option<Decimal>,
    /// Upper price bound, inclusive. Ignored unless `min_price` is also set.
    pub max_price: Option<Decimal>,
}

impl ResourceFilter {
    /// The price bounds, present only when both ends are given.
    #[must_use]
    pub fn price_bounds(&self) -> Option<(Decimal, Decimal)> {
        self.min_price.zip(self.max_price)
    }

    /// The trimmed model query, `None` when blank.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

impl ReservationEngine {
    /// Fetches a reservation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reservation does not exist.
    pub fn get(&self, id: ReservationId) -> Result<Reservation> {
        Database::get_reservation(self.db.connection(), id)?
            .ok_or_else(|| Error::reservation_not_found(id))
    }

    /// Lists reservations matching `filter`, newest first.
    ///
    /// Ties on creation time are broken by descending id, so with a fixed
    /// data set consecutive pages partition the matches without gaps or
    /// repeats.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list(&self, filter: &ReservationFilter, page: PageRequest) -> Result<Page<Reservation>> {
        // One read transaction so the count and the page see the same snapshot
        let tx = self.db.connection().unchecked_transaction()?;
        let total = Database::count_reservations(&tx, filter)?;
        let data = Database::list_reservations(&tx, filter, page.page_size(), page.offset())?;
        tx.finish()?;

        log::debug!(
            "listed {} of {total} reservation(s), page {}",
            data.len(),
            page.page()
        );
        Ok(Page::new(data, page, total))
    }
}
