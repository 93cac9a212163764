pub mod math_helpers;
pub mod price_codec;
