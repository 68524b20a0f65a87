pub mod color;
pub mod plot_series;
