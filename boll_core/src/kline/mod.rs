pub mod generator;
pub mod price_bar;
