mod metrics;
mod sheet;

pub use metrics::DigitMetrics;
pub use sheet::{SheetError, SpriteSheet, DIGIT_COUNT};
