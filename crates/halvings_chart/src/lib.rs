//! Frontend half of the halving chart: pulls the proxied price history,
//! shapes it into a series and keeps one chart of it up to date.

pub mod config;
pub mod format;
pub mod normalize;
pub mod refresh;
pub mod render;
pub mod source;
pub mod surface;

pub use config::{ChartConfig, Formatter, PALETTE, build_chart_config};
pub use normalize::{ShapeError, normalize_histoday};
pub use refresh::{RefreshTask, refresh_once};
pub use render::{ChartSurface, Rejected, RenderError, SurfaceError, render};
pub use source::{FetchError, PriceSource, ProxySource, fetch_series};
pub use surface::{JsonChart, JsonFileSurface};
