//! Custom widgets for the game UI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
    buffer::Buffer,
};

/// Progress through the mansion
pub struct ExplorationBar {
    value: usize,
    max: usize,
    label: String,
    color: Color,
}

impl ExplorationBar {
    pub fn new(label: &str, value: usize, max: usize) -> Self {
        Self {
            value,
            max,
            label: label.to_string(),
            color: Color::Cyan,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn filled(&self, width: u16) -> u16 {
        if self.max == 0 {
            return 0;
        }
        let value = self.value.min(self.max);
        (value * width as usize / self.max) as u16
    }
}

impl Widget for ExplorationBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = if self.value >= self.max { Color::Green } else { self.color };

        let label = format!("{}: {}/{}", self.label, self.value, self.max);
        buf.set_string(area.x, area.y, &label, Style::default().fg(color));

        if area.height > 1 {
            let bar_y = area.y + 1;
            let inner = area.width - 2;
            let filled = self.filled(inner);
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..inner {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// Double-bordered box for the verdict
pub struct DramaticBox {
    title: String,
    content: Vec<(String, Color)>,
    border_color: Color,
}

impl DramaticBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Red,
        }
    }

    pub fn line(mut self, text: &str, color: Color) -> Self {
        self.content.push((text.to_string(), color));
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for DramaticBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        let style = Style::default().fg(self.border_color);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        buf.set_string(area.x, area.y, "╔", style);
        buf.set_string(area.x, bottom, "╚", style);
        for x in area.x + 1..right {
            buf.set_string(x, area.y, "═", style);
            buf.set_string(x, bottom, "═", style);
        }
        buf.set_string(right, area.y, "╗", style);
        buf.set_string(right, bottom, "╝", style);
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, "║", style);
            buf.set_string(right, y, "║", style);
        }

        let title = format!(" {} ", self.title);
        let title_width = title.chars().count() as u16;
        if title_width < area.width {
            let start = area.x + (area.width - title_width) / 2;
            buf.set_string(start, area.y, title, style.add_modifier(Modifier::BOLD));
        }

        for (i, (line, color)) in self.content.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= bottom {
                break;
            }
            buf.set_stringn(
                area.x + 2,
                y,
                line,
                area.width.saturating_sub(4) as usize,
                Style::default().fg(*color),
            );
        }
    }
}
