//! Configuration constants and environment lookups.

/// Catalog file read when `CIDR_CATALOG_FILE` is not set.
pub const DEFAULT_CATALOG_FILE: &str = "ip-ranges.json";

/// Environment variable naming the catalog file (also read from `.env`).
pub const CATALOG_FILE_ENV: &str = "CIDR_CATALOG_FILE";

/// log4rs configuration file read by the binary.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Requested CIDR meaning "no request": return the catalog unevaluated.
pub const NO_REQUEST_CIDR: &str = "0.0.0.0/0";

/// Dataset `geo_region` value -> region name, in display order.
pub const REGION_ORDER: [(&str, &str); 3] = [
    ("Americas", "Americas"),
    ("Europe", "EMEA"),
    ("Asia Pacific", "APAC"),
];

/// The catalog file to load.
pub fn catalog_file() -> String {
    std::env::var(CATALOG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CATALOG_FILE.to_string())
}

/// Region name for a dataset `geo_region` value.
pub fn region_name(geo_region: &str) -> &str {
    REGION_ORDER
        .iter()
        .find(|(geo, _)| *geo == geo_region)
        .map_or(geo_region, |(_, name)| *name)
}
