//! Pure puzzle logic: parsing, conversion, and traversal without I/O.

pub mod almanac;
pub mod category;
pub mod direction;
pub mod interval;
pub mod maze;
pub mod wasteland;
