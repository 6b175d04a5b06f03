//! Presentation Layer
//!
//! Rendering of typed results into display strings. Nothing in the
//! domain or application layers depends on this module.

mod format;

pub use format::{
    format_amount, format_count, format_tons, format_tons_signed, group_thousands,
    group_thousands_signed, GlobalDataView,
};
