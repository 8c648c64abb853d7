pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::App;
use ratatui::Frame;

pub fn ui(f: &mut Frame, app: &App) {
    let area = f.area();

    let main_layout = layout::get_main_layout(area);
    let content = layout::get_content_layout(main_layout.body_area);

    widgets::player::render(f, content.card, app);
    if let Some(queue_area) = content.queue {
        widgets::queue::render(f, queue_area, app);
    }
    widgets::search::render(f, main_layout.search_area, app);
    widgets::status::render(f, main_layout.footer_area, app);

    // Overlays last
    widgets::popups::render(f, app);
}
