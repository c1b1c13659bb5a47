/// Input file names
pub const CRIME_DATA_FILE: &str = "df_for_dash.csv";
pub const ABBREVIATION_FILE: &str = "ABBRV.csv";
pub const SETTINGS_FILE: &str = "crime-dashboard.toml";
pub const SETTINGS_ENV_PREFIX: &str = "CRIME_DASHBOARD";

/// Crime dataset column names
pub const COL_YEAR: &str = "Year";
pub const COL_STATE: &str = "State";
pub const COL_CITY: &str = "City";
pub const COL_POPULATION: &str = "Population";
pub const COL_VIOLENT_CRIME: &str = "Violent_crime";
pub const COL_PROPERTY_CRIME: &str = "Property_crime";
pub const COL_VIOLENT_PER_100K: &str = "Violent_crime_per_100k";
pub const COL_PROPERTY_PER_100K: &str = "Property_crime_per_100k";
pub const COL_VIOLENT_TO_PROPERTY: &str = "Violent_to_property_ratio";

/// Abbreviation lookup column names
pub const COL_ABBRV: &str = "Abbrv";

/// Marks a missing measurement in the source data
pub const MISSING_SENTINEL: f64 = -1000.0;

/// Locations below this population are dropped as outliers
pub const MIN_CITY_POPULATION: u64 = 1000;

/// Year coverage of the dataset
pub const YEAR_MIN: i32 = 2001;
pub const YEAR_MAX: i32 = 2019;

/// City ranked when no chart click selects one
pub const DEFAULT_CITY: &str = "New York, NY";

/// Chart presentation
pub const CHART_TEMPLATE: &str = "plotly_dark";
pub const CHART_WIDTH: u32 = 600;
pub const CHART_HEIGHT: u32 = 400;
pub const BACKGROUND_COLOR: &str = "lightsteelblue";
pub const BACKGROUND_OPACITY: f64 = 0.5;
pub const HIGHLIGHT_COLOR: &str = "orangered";
pub const HIGHLIGHT_SIZE: u32 = 15;
pub const HIGHLIGHT_SYMBOL: &str = "triangle-up";

/// Export defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
