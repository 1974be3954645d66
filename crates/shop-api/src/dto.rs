//! Request shapes for the HTTP surface

use serde::Deserialize;
use shop_core::domain::{MemberForm, SellStatus};
use shop_core::search::{ItemSearchCriteria, ItemSort};
use shop_core::DomainError;

/// `GET /items` query string. Every field may be missing or empty, the way a
/// search form submits untouched inputs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSearchQuery {
    pub detail: Option<String>,
    pub min_price: Option<String>,
    pub sell_status: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &Option<String>) -> Result<Option<T>, DomainError> {
    non_empty(value)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| DomainError::InvalidArgument(format!("{} is not a number: {}", name, raw)))
        })
        .transpose()
}

impl ItemSearchQuery {
    pub fn criteria(&self) -> Result<ItemSearchCriteria, DomainError> {
        let mut criteria = ItemSearchCriteria::new();

        // detail is matched verbatim, surrounding spaces included
        if let Some(detail) = self.detail.as_deref().filter(|d| !d.is_empty()) {
            criteria = criteria.detail_contains(detail);
        }

        if let Some(price) = parse_number::<i32>("minPrice", &self.min_price)? {
            criteria = criteria.min_price(price);
        }

        if let Some(raw) = non_empty(&self.sell_status) {
            let status = SellStatus::from_str(raw)
                .ok_or_else(|| DomainError::InvalidArgument(format!("unknown sellStatus: {}", raw)))?;
            criteria = criteria.sell_status(status);
        }

        Ok(criteria)
    }

    /// Zero-based page number, `None` when left empty.
    pub fn page_number(&self) -> Result<Option<i64>, DomainError> {
        parse_number("page", &self.page)
    }

    pub fn page_size(&self) -> Result<Option<i64>, DomainError> {
        parse_number("size", &self.size)
    }

    pub fn sort(&self) -> Result<Option<ItemSort>, DomainError> {
        non_empty(&self.sort).map(ItemSort::parse).transpose()
    }
}

/// `POST /members/new` form. Missing fields read as empty so they surface as
/// validation messages rather than decode errors.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
}

impl From<RegisterRequest> for MemberForm {
    fn from(r: RegisterRequest) -> Self {
        MemberForm {
            name: r.name,
            email: r.email,
            password: r.password,
            address: r.address,
        }
    }
}

/// `POST /members/login` form
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::search::PredicateBuilder;

    #[test]
    fn test_empty_query_builds_empty_criteria() {
        let query = ItemSearchQuery {
            detail: Some(String::new()),
            min_price: Some(" ".into()),
            sell_status: Some(String::new()),
            ..Default::default()
        };
        let predicate = PredicateBuilder::build(&query.criteria().unwrap());
        assert!(predicate.is_empty());
        assert!(query.sort().unwrap().is_none());
    }

    #[test]
    fn test_query_parses_filters() {
        let query = ItemSearchQuery {
            detail: Some("detail".into()),
            min_price: Some("10003".into()),
            sell_status: Some("SELL".into()),
            sort: Some("price,asc".into()),
            ..Default::default()
        };
        let predicate = PredicateBuilder::build(&query.criteria().unwrap());
        assert_eq!(predicate.conditions().len(), 3);
        assert!(query.sort().unwrap().is_some());
    }

    #[test]
    fn test_query_rejects_garbage() {
        let bad_price = ItemSearchQuery { min_price: Some("cheap".into()), ..Default::default() };
        assert!(matches!(bad_price.criteria(), Err(DomainError::InvalidArgument(_))));

        let bad_status = ItemSearchQuery { sell_status: Some("GONE".into()), ..Default::default() };
        assert!(matches!(bad_status.criteria(), Err(DomainError::InvalidArgument(_))));

        let bad_sort = ItemSearchQuery { sort: Some("colour".into()), ..Default::default() };
        assert!(matches!(bad_sort.sort(), Err(DomainError::InvalidArgument(_))));

        let bad_page = ItemSearchQuery { page: Some("first".into()), ..Default::default() };
        assert!(matches!(bad_page.page_number(), Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_paging_inputs_are_ignored() {
        let query = ItemSearchQuery {
            page: Some(String::new()),
            size: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(query.page_number().unwrap(), None);
        assert_eq!(query.page_size().unwrap(), None);

        let query = ItemSearchQuery {
            page: Some("2".into()),
            size: Some("15".into()),
            ..Default::default()
        };
        assert_eq!(query.page_number().unwrap(), Some(2));
        assert_eq!(query.page_size().unwrap(), Some(15));
    }
}
