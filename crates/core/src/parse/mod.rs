//! Platform output parsers
//!
//! One parser per platform output shape, all sharing the same post-condition:
//! return the device records that could be fully identified, skip anything
//! malformed, and never fail. An entry whose vendor or product identifier
//! does not normalize is silently dropped; a structurally broken input
//! (e.g. invalid JSON) degrades to an empty result with a warning.

mod ioreg;
mod lsusb;
mod pnp;
mod profiler;

pub use ioreg::ioreg_tree;
pub use lsusb::usb_list;
pub use pnp::pnp_json;
pub use profiler::profiler_json;
