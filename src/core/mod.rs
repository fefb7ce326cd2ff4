pub mod investment;
pub mod primitives;
pub mod records;
pub mod scale;
pub mod time_scale;
pub mod types;

pub use investment::{InvestmentAmount, InvestmentInput, simulate_growth};
pub use records::{CompanyRecord, InvestmentPoint, PricePoint, YearReturn};
pub use scale::{LinearScale, nice_ticks};
pub use time_scale::TimeScale;
pub use types::{Margins, PlotArea, Rect, Viewport};
