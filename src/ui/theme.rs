use ratatui::style::Color;

// Small palette for the dashboard. Add roles here rather than inlining colors in render code.
pub const FG: Color = Color::Rgb(229, 231, 235);
pub const MUTED: Color = Color::Rgb(156, 163, 175);
pub const DIM: Color = Color::Rgb(107, 114, 128);
pub const BORDER: Color = Color::Rgb(55, 65, 81);

pub const ACCENT: Color = Color::Rgb(255, 159, 26);

// Selected row in the focused list.
pub const SELECTION_FG: Color = Color::Black;
pub const SELECTION_BG: Color = Color::Green;

pub const ERROR: Color = Color::Rgb(248, 113, 113); // soft red
