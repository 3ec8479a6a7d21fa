/// egui widgets: side/top panels and the stacked sensor plots.
pub mod panels;
pub mod plot;
