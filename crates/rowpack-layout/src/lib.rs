#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
//! Justified row layout for items of varying aspect ratio.
//!
//! Items are packed, in order, into rows that fill the container width
//! exactly while every row height stays within `[max / 2, max]`. This is
//! the photo-gallery arrangement: row height varies, item order never does.
//!
//! # Incremental layout
//!
//! [`RowCalculator`] is fed the full item list on every pass. Rows that end
//! before the first changed item are reused as-is, so appending items (as an
//! infinitely scrolling gallery does) never re-lays-out rows already shown.
//!
//! ```
//! use rowpack_layout::{Item, RowCalculator, RowConfig};
//!
//! let mut calc: RowCalculator<&str> = RowCalculator::new(RowConfig::new(600, 8)?)?;
//! calc.set_width(1000);
//! calc.add_items(&[Item::keyed(1.0, "a", ())?, Item::keyed(1.0, "b", ())?]);
//!
//! let row = &calc.rows()[0];
//! assert_eq!(row.key(), "a-b");
//! assert_eq!(row.items()[0].width, 496);
//! assert_eq!(row.height(), 496);
//! # Ok::<(), rowpack_layout::LayoutError>(())
//! ```

mod calculator;
mod config;
mod diff;
mod error;
mod item;
mod packing;
mod row;
mod stats;

pub use calculator::RowCalculator;
pub use config::{
    RowConfig, DEFAULT_MAX_ROW_HEIGHT, MIN_ROW_HEIGHT_RATIO, OVERFLOW_ROW_HEIGHT_RATIO,
};
pub use error::{LayoutError, Result};
pub use item::{Item, ItemListBuilder, LayoutItem};
pub use row::Row;
pub use stats::LayoutStats;
