//! statline-render: Output backends for statline.
//!
//! Turns the fragments of one tick into a single line in the syntax of the
//! target bar (plain text, dzen2 or xmobar markup) and writes it out.

pub mod line_writer;
pub mod markup;

pub use line_writer::LineWriter;
pub use markup::Markup;
