pub mod error;
pub mod model;
pub mod normalizer;
pub mod formatter;
pub mod view;
pub mod batch;

mod utils;

pub use crate::model::{Configuration, Precision};
pub use crate::normalizer::normalize;
pub use crate::formatter::{format_amount, render, round_half_up, try_render};
pub use crate::view::MoneyView;
pub use crate::batch::{AmountRecord, BatchSummary, check_roundtrip, render_csv};
pub use crate::error::ParseError;
