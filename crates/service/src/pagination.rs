//! Pagination and sort parameters for advertisement listings.
//!
//! Sort column and direction are resolved to enumerated constants here;
//! caller text never travels further than this module, so nothing
//! string-shaped can reach the query builder.

use models::advertisement;
use sea_orm::Order;

use crate::errors::ServiceError;

/// 1-based page request.
#[derive(Clone, Copy, Debug)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Validate and convert to `(offset, limit)`.
    pub fn to_offset_limit(self) -> Result<(u64, u64), ServiceError> {
        if self.page == 0 || self.per_page == 0 {
            return Err(ServiceError::Validation("invalid page or page size".into()));
        }
        let offset = (self.page as u64 - 1) * self.per_page as u64;
        Ok((offset, self.per_page as u64))
    }
}

/// Whitelisted sort columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Price,
    CreatedAt,
}

impl SortKey {
    pub fn parse(s: &str) -> Result<Self, ServiceError> {
        match s {
            "price" => Ok(Self::Price),
            "created_at" => Ok(Self::CreatedAt),
            _ => Err(ServiceError::Validation("invalid sort parameter".into())),
        }
    }

    pub fn column(self) -> advertisement::Column {
        match self {
            Self::Price => advertisement::Column::Price,
            Self::CreatedAt => advertisement::Column::CreatedAt,
        }
    }
}

/// Sort direction, case-insensitive on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn parse(s: &str) -> Result<Self, ServiceError> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ServiceError::Validation("invalid order parameter".into())),
        }
    }

    pub fn order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}
