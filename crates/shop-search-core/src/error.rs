use thiserror::Error;

/// Failure while building a [`ReferenceStore`](crate::ReferenceStore).
///
/// Every variant aborts the whole load; there is no partial store.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{file}: expected header [{expected}], found [{found}]")]
    Header {
        file: &'static str,
        expected: String,
        found: String,
    },

    #[error("{file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{file}: record '{id}' has a non-finite {field}: {value}")]
    NonFinite {
        file: &'static str,
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("shops: duplicate shop id '{id}'")]
    DuplicateShop { id: String },

    #[error("products: product '{product_id}' references unknown shop '{shop_id}'")]
    DanglingShop { product_id: String, shop_id: String },
}

/// Failure while answering a query.
///
/// Only raised when a loaded store breaks its own integrity invariant.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("product '{product_id}' references unknown shop '{shop_id}'")]
    MissingShop { product_id: String, shop_id: String },
}
