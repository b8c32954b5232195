/// Standard sector names, matched case-sensitively.
pub const SECTORS: [&str; 11] = [
    "Technology",
    "Healthcare",
    "Financial Services",
    "Consumer Cyclical",
    "Communication Services",
    "Industrials",
    "Consumer Defensive",
    "Energy",
    "Basic Materials",
    "Real Estate",
    "Utilities",
];

/// Curated groupings that are not part of the standard classification
pub const CUSTOM_SECTORS: [&str; 1] = ["Software"];

pub fn is_valid_sector(sector: &str) -> bool {
    SECTORS.contains(&sector) || is_custom_sector(sector)
}

pub fn is_custom_sector(sector: &str) -> bool {
    CUSTOM_SECTORS.contains(&sector)
}

/// Convert a URL path segment such as `Financial-Services` back into a sector name.
pub fn normalize_sector_param(param: &str) -> String {
    param.replace('-', " ")
}
