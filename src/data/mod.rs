//! CSV loading and the join/normalize stage.

pub mod csv_loader;
pub mod join;
pub mod parse;
pub mod source;

pub use csv_loader::{CsvLoader, LoadReport, Loaded, RawRow, field, parse_rows};
pub use join::{
    KeyedAuxiliary, columns, join_by_key, join_companies, normalize_companies,
    normalize_price_series, normalize_year_returns, price_point_from_row, year_return_from_row,
};
pub use source::{DataSource, Resource, ResourceLocator};
