use {
    crate::{
        data::ConnectionStatus,
        models::Tone,
        ui::{UI_CONFIG, UI_TEXT},
    },
    eframe::egui::{
        Color32, CornerRadius, FontId, Response, RichText, Sense, Stroke, StrokeKind, Ui, Vec2,
        WidgetInfo, WidgetType,
    },
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

pub trait ToneColor {
    fn color(&self) -> Color32;
}

impl ToneColor for Tone {
    fn color(&self) -> Color32 {
        match self {
            Self::Bullish => UI_CONFIG.colors.bullish,
            Self::Bearish => UI_CONFIG.colors.bearish,
            Self::Neutral => UI_CONFIG.colors.neutral,
        }
    }
}

impl ToneColor for ConnectionStatus {
    fn color(&self) -> Color32 {
        match self {
            Self::Connected => UI_CONFIG.colors.bullish,
            Self::Connecting => UI_CONFIG.colors.neutral,
            Self::Disconnected => UI_CONFIG.colors.error,
        }
    }
}

pub(crate) fn status_text(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => UI_TEXT.status_connected.as_str(),
        ConnectionStatus::Connecting => UI_TEXT.status_connecting.as_str(),
        ConnectionStatus::Disconnected => UI_TEXT.status_disconnected.as_str(),
    }
}

pub fn apply_opacity(color: Color32, factor: f32) -> Color32 {
    color.gamma_multiply(factor.clamp(0.0, 1.0))
}

pub(crate) trait UiStyleExt {
    /// Clickable text with no button chrome: highlighted on hover, filled when selected.
    fn interactive_label(
        &mut self,
        text: &str,
        is_selected: bool,
        idle_color: Color32,
        font_id: FontId,
    ) -> Response;

    /// On/off pill for a server-side switch.
    fn toggle_chip(&mut self, text: &str, on: bool) -> Response;

    fn label_subdued(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn interactive_label(
        &mut self,
        text: &str,
        is_selected: bool,
        idle_color: Color32,
        font_id: FontId,
    ) -> Response {
        let padding = Vec2::new(4.0, 3.0);
        let galley = self
            .painter()
            .layout_no_wrap(text.to_string(), font_id, idle_color);
        let width = (galley.size().x + padding.x * 2.0).max(self.available_width());
        let desired_size = Vec2::new(width, galley.size().y + padding.y * 2.0);
        let (rect, response) = self.allocate_exact_size(desired_size, Sense::click());
        response.widget_info(|| WidgetInfo::selected(WidgetType::Button, true, is_selected, text));

        if self.is_rect_visible(rect) {
            let visuals = self.style().visuals.clone();
            let (bg_fill, text_color) = if is_selected {
                (visuals.selection.bg_fill, Color32::WHITE)
            } else if response.hovered() || response.has_focus() {
                (visuals.widgets.hovered.bg_fill, UI_CONFIG.colors.heading)
            } else {
                (Color32::TRANSPARENT, idle_color)
            };

            if bg_fill != Color32::TRANSPARENT {
                self.painter().rect(
                    rect,
                    CornerRadius::same(3),
                    bg_fill,
                    Stroke::NONE,
                    StrokeKind::Inside,
                );
            }
            self.painter()
                .galley(rect.left_top() + padding, galley, text_color);
        }
        response
    }

    fn toggle_chip(&mut self, text: &str, on: bool) -> Response {
        let (fill, fg) = if on {
            (UI_CONFIG.colors.bullish, Color32::WHITE)
        } else {
            (Color32::from_gray(50), UI_CONFIG.colors.label)
        };
        let button = eframe::egui::Button::new(RichText::new(text).small().color(fg))
            .fill(fill)
            .corner_radius(CornerRadius::same(8));
        self.add(button)
    }

    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).strong().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }
}
