// src/gui/components/mod.rs
pub mod location_card;
pub mod ranking_chart;
pub mod ranking_display;
pub mod ranking_table;
pub mod school_search;
