mod battle_scene;
mod collection_scene;
mod enemy_sprites;
mod menu_scenes;

pub use enemy_sprites::SpriteBook;

use kanji_battle::core::GameContext;
use kanji_battle::screens::{ScreenKind, ScreenMachine};
use kanji_battle::stages::StageCatalog;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything a frame needs besides the screen itself.
pub struct DrawContext<'a> {
    pub ctx: &'a GameContext,
    pub catalog: &'a StageCatalog,
}

/// Draw whichever screen is current.
pub fn draw_ui(
    frame: &mut Frame,
    machine: &ScreenMachine,
    draw: &DrawContext,
    sprites: &mut SpriteBook,
) {
    let area = frame.size();
    match machine.current() {
        Some(ScreenKind::Title(screen)) => menu_scenes::draw_title(frame, area, screen),
        Some(ScreenKind::Menu(screen)) => menu_scenes::draw_main_menu(frame, area, screen),
        Some(ScreenKind::Settings(screen)) => {
            menu_scenes::draw_settings(frame, area, screen, draw.ctx)
        }
        Some(ScreenKind::GameOver(screen)) => {
            menu_scenes::draw_game_over(frame, area, screen, draw.ctx)
        }
        Some(ScreenKind::ResultWin(_)) => menu_scenes::draw_result_win(frame, area, draw.ctx),
        Some(ScreenKind::StageSelect(screen)) => {
            collection_scene::draw_stage_select(frame, area, screen, draw)
        }
        Some(ScreenKind::Dex(screen)) => collection_scene::draw_dex(frame, area, screen, draw.ctx),
        Some(ScreenKind::Battle(screen)) => {
            battle_scene::draw_battle_scene(frame, area, screen, draw, sprites)
        }
        None => {}
    }
}

/// Bordered block with a bold title.
fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Centered rect of the given size, clipped to `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Menu rows with a `>` cursor on the selected one.
fn menu_lines(labels: &[&str], selected: usize) -> Vec<Line<'static>> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == selected {
                Line::from(Span::styled(
                    format!("> {}", label),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", label))
            }
        })
        .collect()
}

/// Split off a one-line key help footer.
fn with_footer(frame: &mut Frame, area: Rect, help: &str) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let footer = Paragraph::new(Line::from(Span::styled(
        help.to_string(),
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[1]);
    chunks[0]
}

fn hp_color(ratio: f64) -> Color {
    if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    }
}
