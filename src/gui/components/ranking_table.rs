// src/gui/components/ranking_table.rs
//
// Ranking history table. Purely a view: renders a RankingView and reports
// which header (if any) was clicked; the caller owns the sort state.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::{
    model::RankingField,
    rankings::{RankingView, SortState},
};

const ROW_H: f32 = 20.0;
const HEADER_H: f32 = 24.0;

fn header_text(field: RankingField, sort: SortState) -> String {
    match sort.indicator(field) {
        Some(dir) => format!("{} {}", field.label(), dir.arrow()),
        None => s!(field.label()),
    }
}

pub fn draw(ui: &mut egui::Ui, view: &RankingView<'_>, sort: SortState) -> Option<RankingField> {
    if view.is_empty() {
        ui.weak("No rows match the filter.");
        return None;
    }

    let mut clicked = None;

    TableBuilder::new(ui)
        .id_salt("ranking_table")
        .striped(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0).resizable(true).clip(true), RankingField::ALL.len())
        .header(HEADER_H, |mut header| {
            for field in RankingField::ALL {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    let label = RichText::new(header_text(field, sort)).strong();
                    let resp = ui
                        .add(egui::Button::new(label).frame(false))
                        .on_hover_text("Sort by this column");
                    if resp.clicked() {
                        clicked = Some(field);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_H, view.len(), |mut row| {
                let Some(record) = view.row(row.index()) else { return };
                for field in RankingField::ALL {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        let value = field.value(record);
                        let text = value.to_string();
                        if value.is_number() {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(text);
                            });
                        } else {
                            ui.label(text);
                        }
                    });
                }
            });
        });

    clicked
}
