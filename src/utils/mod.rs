pub mod maths_utils;
pub mod time_utils;
