//! List numbering: definitions, instances, and label resolution.
//!
//! A [`NumberingModel`] holds abstract definitions (per-level format, start
//! value, label template) and the instances paragraphs refer to. The
//! [`NumberingResolver`] walks list items in document order and produces the
//! label each one displays.
//!
//! ```
//! use docxforge::numbering::{Level, NumberFormat, NumberingModel, NumberingResolver};
//!
//! let mut model = NumberingModel::new();
//! let list = model.add_list(vec![
//!     Level::numbered(0, NumberFormat::Decimal, "%1."),
//!     Level::numbered(1, NumberFormat::LowerLetter, "%1.%2"),
//! ])?;
//!
//! let mut resolver = NumberingResolver::new(model);
//! assert_eq!(resolver.advance(list, 0)?, "1.");
//! assert_eq!(resolver.advance(list, 1)?, "1.a");
//! # Ok::<(), docxforge::Error>(())
//! ```

mod definition;
mod format;
mod resolver;

pub use definition::{
    AbstractNumId, AbstractNumbering, Level, NumId, NumberingInstance, NumberingModel, MAX_LEVELS,
};
pub use format::NumberFormat;
pub use resolver::NumberingResolver;
