//! Per-pixel passes run on the working buffer.

pub(crate) mod color_grade;
pub(crate) mod tonal_burn;
