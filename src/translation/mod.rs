// Translation module - Gemini response → relay result
// Author: kelexine (https://github.com/kelexine)

pub mod response;

pub use response::extract_result;
