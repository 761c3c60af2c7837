pub mod scale;
pub mod time_scale;
pub mod types;

pub use scale::{LinearScale, QuantizeScale};
pub use time_scale::DateScale;
pub use types::{Margins, Point, Viewport};
