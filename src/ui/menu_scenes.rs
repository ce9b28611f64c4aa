use super::{centered_rect, menu_lines, titled_block, with_footer};
use kanji_battle::core::GameContext;
use kanji_battle::screens::{
    GameOverScreen, MainMenuScreen, ResultWinScreen, SettingsRow, SettingsScreen, TitleScreen,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

const TITLE_ART: &str = r"╔═══════════════════════════╗
║   漢 字   バ ト ル        ║
║      KANJI  BATTLE        ║
╚═══════════════════════════╝";

const MENU_HELP: &str = "[↑/↓] Move  [Enter] Select  [Esc] Back  [Ctrl+C] Quit";

pub fn draw_title(frame: &mut Frame, area: Rect, screen: &TitleScreen) {
    let area = with_footer(frame, area, MENU_HELP);
    let mut lines: Vec<Line> = TITLE_ART
        .lines()
        .map(|l| {
            Line::from(Span::styled(
                l.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    lines.extend(menu_lines(screen.menu().labels(), screen.menu().selected()));

    let box_area = centered_rect(36, lines.len() as u16 + 2, area);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        box_area,
    );
}

pub fn draw_main_menu(frame: &mut Frame, area: Rect, screen: &MainMenuScreen) {
    let area = with_footer(frame, area, MENU_HELP);
    let lines = menu_lines(screen.menu().labels(), screen.menu().selected());
    let box_area = centered_rect(30, lines.len() as u16 + 2, area);
    frame.render_widget(Paragraph::new(lines).block(titled_block("Menu")), box_area);
}

pub fn draw_game_over(frame: &mut Frame, area: Rect, screen: &GameOverScreen, ctx: &GameContext) {
    let area = with_footer(frame, area, MENU_HELP);
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} has fallen.", ctx.player_name)),
        Line::from(""),
    ];
    if let Some(report) = &ctx.last_report {
        lines.push(Line::from(format!(
            "Enemies defeated: {}   Correct: {}   Wrong: {}",
            report.enemies_defeated,
            report.correct.len(),
            report.wrong.len()
        )));
        lines.push(Line::from(""));
    }
    lines.extend(menu_lines(screen.menu().labels(), screen.menu().selected()));

    let box_area = centered_rect(56, lines.len() as u16 + 2, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(titled_block("Defeat")),
        box_area,
    );
}

pub fn draw_result_win(frame: &mut Frame, area: Rect, ctx: &GameContext) {
    let area = with_footer(frame, area, "[Enter] Next");
    let mut lines = vec![
        Line::from(Span::styled(
            "STAGE CLEAR!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Lv {}  EXP {}/{}",
            ctx.player.level, ctx.player.exp, ctx.player.next_level_exp
        )),
        Line::from(""),
    ];

    let missed = ResultWinScreen::missed_kanji(ctx);
    if missed.is_empty() {
        lines.push(Line::from("No mistakes. Perfect!"));
    } else {
        lines.push(Line::from(Span::styled(
            "Kanji to review:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )));
        for challenge in missed {
            lines.push(Line::from(format!(
                "{}  {}  ({})",
                challenge.text,
                challenge.reading_summary(),
                challenge.meaning
            )));
        }
    }

    let box_area = centered_rect(60, lines.len() as u16 + 2, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(titled_block("Victory")),
        box_area,
    );
}

fn volume_bar(value: f32) -> String {
    let filled = (value * 10.0).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(10 - filled.min(10)),
        (value * 100.0).round() as u32
    )
}

pub fn draw_settings(frame: &mut Frame, area: Rect, screen: &SettingsScreen, ctx: &GameContext) {
    let area = with_footer(
        frame,
        area,
        "[↑/↓] Move  [←/→] Adjust  [Enter] Select  [Esc] Back",
    );
    let box_area = centered_rect(48, 8, area);

    let lines: Vec<Line> = SettingsRow::ALL
        .iter()
        .map(|row| {
            let value = match row {
                SettingsRow::BgmVolume => volume_bar(ctx.settings.bgm_volume),
                SettingsRow::SeVolume => volume_bar(ctx.settings.se_volume),
                _ => String::new(),
            };
            let text = format!("{:<16}{}", row.label(), value);
            if *row == screen.selected_row() {
                Line::from(Span::styled(
                    format!("> {}", text),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", text))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(titled_block("Settings")), box_area);

    if screen.confirming_reset() {
        let dialog = centered_rect(44, 5, area);
        frame.render_widget(Clear, dialog);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from("Erase all progress, dex entries and clears?"),
                Line::from(""),
                Line::from(Span::styled(
                    "[Y] Erase   [N] Cancel",
                    Style::default().fg(Color::Red),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(titled_block("Reset Data")),
            dialog,
        );
    }
}
