pub mod header;
pub mod loading_indicator;
pub mod result_card;
pub mod upload_area;
