use {
    crate::{
        domain::{Instrument, Timeframe},
        engine::UserAction,
        projection::{
            CatalogPanel, LiveEntryView, RenderModel, ReportView, ScannerButton, SectionView,
            SignalPanel,
        },
        ui::{
            UI_CONFIG, UI_TEXT,
            styles::{ToneColor, UiStyleExt, apply_opacity, status_text},
        },
        utils::{epoch_ms_to_clock, format_countdown},
    },
    eframe::egui::{
        Align, CentralPanel, CollapsingHeader, ComboBox, Context, FontId, Layout, ProgressBar,
        RichText, ScrollArea, SidePanel, Spinner, TextEdit, TopBottomPanel, Ui,
    },
    strum::IntoEnumIterator,
};

/// Top bar: search box, timeframe picker, scanner switches.
pub(crate) fn render_top_panel(
    ctx: &Context,
    model: &RenderModel,
    search_text: &mut String,
    actions: &mut Vec<UserAction>,
) {
    TopBottomPanel::top("top_panel")
        .frame(UI_CONFIG.top_panel_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new(&UI_TEXT.app_title).color(UI_CONFIG.colors.heading));
                ui.separator();

                let search = ui.add(
                    TextEdit::singleline(search_text)
                        .hint_text(&UI_TEXT.tb_search_hint)
                        .desired_width(180.0),
                );
                if search.changed() {
                    actions.push(UserAction::SetSearch(search_text.clone()));
                }

                ui.separator();
                ui.label_subdued(&UI_TEXT.tb_timeframe);
                let mut timeframe = model.timeframe;
                ComboBox::from_id_salt("timeframe_picker")
                    .selected_text(timeframe.to_string())
                    .width(60.0)
                    .show_ui(ui, |ui| {
                        for tf in Timeframe::iter() {
                            ui.selectable_value(&mut timeframe, tf, tf.to_string());
                        }
                    });
                if timeframe != model.timeframe {
                    actions.push(UserAction::SetTimeframe(timeframe));
                }

                ui.separator();
                ui.label_subdued(&UI_TEXT.tb_scanner);
                render_scanner_chips(ui, &model.scanner, actions);
            });
        });
}

fn render_scanner_chips(ui: &mut Ui, buttons: &[ScannerButton], actions: &mut Vec<UserAction>) {
    for button in buttons {
        if ui
            .toggle_chip(&button.category.to_string(), button.enabled)
            .clicked()
        {
            actions.push(UserAction::ToggleScanner(button.category));
        }
    }
}

pub(crate) fn render_catalog_panel(
    ctx: &Context,
    model: &RenderModel,
    selected: Option<&Instrument>,
    actions: &mut Vec<UserAction>,
) {
    SidePanel::left("catalog_panel")
        .frame(UI_CONFIG.side_panel_frame())
        .default_width(UI_CONFIG.catalog_panel_width)
        .show(ctx, |ui| {
            ui.label_subheader(&UI_TEXT.cat_heading);
            ui.separator();

            match &model.catalog {
                CatalogPanel::Loading => {
                    ui.horizontal(|ui| {
                        ui.add(Spinner::new());
                        ui.label_subdued(&UI_TEXT.cat_loading);
                    });
                }
                CatalogPanel::Failed(reason) => {
                    ui.label(RichText::new(&UI_TEXT.cat_failed).color(UI_CONFIG.colors.error));
                    ui.label_subdued(reason);
                }
                CatalogPanel::Sections(sections) if sections.is_empty() => {
                    ui.label_subdued(&UI_TEXT.cat_no_matches);
                }
                CatalogPanel::Sections(sections) => {
                    ScrollArea::vertical()
                        .id_salt("catalog_scroll")
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for section in sections {
                                render_section(ui, section, selected, actions);
                            }
                        });
                }
            }
        });
}

fn render_section(
    ui: &mut Ui,
    section: &SectionView,
    selected: Option<&Instrument>,
    actions: &mut Vec<UserAction>,
) {
    CollapsingHeader::new(RichText::new(&section.title).strong())
        .id_salt(("section", section.is_favorites, &section.title))
        .default_open(true)
        .show(ui, |ui| {
            for item in &section.items {
                ui.horizontal(|ui| {
                    let (star, star_color) = if item.favorite {
                        (&UI_TEXT.icon_favorite_on, UI_CONFIG.colors.favorite)
                    } else {
                        (&UI_TEXT.icon_favorite_off, UI_CONFIG.colors.label)
                    };
                    if ui
                        .small_button(RichText::new(star).color(star_color))
                        .on_hover_text(&UI_TEXT.hover_toggle_favorite)
                        .clicked()
                    {
                        actions.push(UserAction::ToggleFavorite(item.instrument.clone()));
                    }

                    let is_selected = selected == Some(&item.instrument);
                    if ui
                        .interactive_label(
                            &item.label,
                            is_selected,
                            UI_CONFIG.colors.label,
                            FontId::proportional(13.0),
                        )
                        .clicked()
                    {
                        actions.push(UserAction::RequestSignal(item.instrument.clone()));
                    }
                });
            }
        });
}

pub(crate) fn render_live_feed_panel(
    ctx: &Context,
    entries: &[LiveEntryView],
    actions: &mut Vec<UserAction>,
) {
    SidePanel::right("live_feed_panel")
        .frame(UI_CONFIG.side_panel_frame())
        .default_width(UI_CONFIG.feed_panel_width)
        .show(ctx, |ui| {
            ui.label_subheader(&UI_TEXT.feed_heading);
            ui.separator();

            if entries.is_empty() {
                ui.label_subdued(&UI_TEXT.feed_empty);
                return;
            }

            ScrollArea::vertical()
                .id_salt("feed_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for entry in entries {
                        render_feed_entry(ui, entry, actions);
                        ui.add_space(4.0);
                    }
                });
        });
}

fn render_feed_entry(ui: &mut Ui, entry: &LiveEntryView, actions: &mut Vec<UserAction>) {
    let tone = apply_opacity(entry.tone.color(), entry.opacity);
    let text = apply_opacity(UI_CONFIG.colors.label, entry.opacity);

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            let headline = ui
                .interactive_label(
                    &format!("{}  {}", entry.label, entry.verdict),
                    false,
                    tone,
                    FontId::proportional(13.0),
                )
                .on_hover_text(&UI_TEXT.hover_open_entry);
            if headline.clicked() {
                actions.push(UserAction::SelectEntry(entry.id));
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .small_button(&UI_TEXT.icon_dismiss)
                    .on_hover_text(&UI_TEXT.hover_dismiss)
                    .clicked()
                {
                    actions.push(UserAction::DismissEntry(entry.id));
                }
            });
        });
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{}%", entry.score)).small().color(tone));
            ui.label(
                RichText::new(format!(
                    "{}  {} {}",
                    epoch_ms_to_clock(entry.created_at_ms),
                    UI_TEXT.status_expires_in,
                    format_countdown(entry.expires_in_ms)
                ))
                .small()
                .color(text),
            );
        });
    });
}

pub(crate) fn render_signal_panel(ctx: &Context, signal: &SignalPanel) {
    CentralPanel::default()
        .frame(UI_CONFIG.central_panel_frame())
        .show(ctx, |ui| match signal {
            SignalPanel::Idle => {
                ui.centered_and_justified(|ui| {
                    ui.label_subdued(&UI_TEXT.sig_select_pair);
                });
            }
            SignalPanel::Loading { label } => {
                ui.heading(label);
                ui.horizontal(|ui| {
                    ui.add(Spinner::new());
                    ui.label_subdued(format!("{}...", UI_TEXT.sig_analyzing));
                });
            }
            SignalPanel::Error { label, reason } => {
                ui.heading(label);
                ui.label(
                    RichText::new(format!("{} {}", UI_TEXT.sig_error_prefix, reason))
                        .color(UI_CONFIG.colors.error),
                );
            }
            SignalPanel::Report(report) => render_report(ui, report),
        });
}

fn render_report(ui: &mut Ui, report: &ReportView) {
    let tone = report.tone.color();

    ui.horizontal(|ui| {
        ui.heading(&report.label);
        ui.label_subdued(report.timeframe.to_string());
        if report.from_live_feed {
            ui.label_subdued(&UI_TEXT.sig_from_live_feed);
        }
    });
    ui.metric(&UI_TEXT.sig_price, &report.price, UI_CONFIG.colors.label);
    ui.add_space(8.0);

    ui.label(RichText::new(&report.verdict).size(28.0).strong().color(tone));
    ui.add_space(8.0);

    ui.add(
        ProgressBar::new(f32::from(report.score) / 100.0)
            .fill(tone)
            .desired_width(320.0),
    );
    ui.horizontal(|ui| {
        ui.metric(&UI_TEXT.sig_bulls, &report.bulls, UI_CONFIG.colors.bullish);
        ui.add_space(16.0);
        ui.metric(&UI_TEXT.sig_bears, &report.bears, UI_CONFIG.colors.bearish);
    });

    if !report.reasons.is_empty() {
        ui.add_space(12.0);
        ui.label_subheader(&UI_TEXT.sig_reasons);
        for reason in &report.reasons {
            ui.label(format!("• {}", reason));
        }
    }
}

pub(crate) fn render_status_panel(ctx: &Context, model: &RenderModel) {
    TopBottomPanel::bottom("status_panel")
        .frame(UI_CONFIG.bottom_panel_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("●").color(model.stream_status.color()));
                ui.label_subdued(status_text(model.stream_status));
            });
        });
}
