use super::{titled_block, with_footer, DrawContext};
use kanji_battle::core::GameContext;
use kanji_battle::screens::stage_select::MAX_GRADE;
use kanji_battle::screens::{DexScreen, StageSelectScreen};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Wrap},
    Frame,
};

fn grade_label(grade: u8) -> String {
    match grade {
        0 => "All".to_string(),
        g => format!("Grade {}", g),
    }
}

/// Draws the stage list with grade tabs and the redirect notice
pub fn draw_stage_select(
    frame: &mut Frame,
    area: Rect,
    screen: &StageSelectScreen,
    draw: &DrawContext,
) {
    let area = with_footer(
        frame,
        area,
        "[↑/↓] Stage  [←/→] Grade  [Enter] Battle  [R] Review  [K] Kanji Dex  [M] Monster Dex  [Esc] Title",
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Grade tabs
            Constraint::Min(3),    // Stage list
            Constraint::Length(4), // Notice / player summary, review
        ])
        .split(area);

    let titles: Vec<Line> = (0..=MAX_GRADE).map(|g| Line::from(grade_label(g))).collect();
    let tabs = Tabs::new(titles)
        .block(titled_block("Stage Select"))
        .select(screen.grade() as usize)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let stages = screen.visible_stages();
    let lines: Vec<Line> = if stages.is_empty() {
        vec![Line::from(Span::styled(
            "No stages for this grade yet.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        stages
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                let cleared = draw.ctx.collection.is_stage_cleared(&stage.id);
                let marker = if cleared { "★" } else { " " };
                let text = format!(
                    "{} {} {:<28} {} kanji",
                    if i == screen.selected() { ">" } else { " " },
                    marker,
                    stage.name,
                    stage.challenge_ids.len()
                );
                let style = if i == screen.selected() {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if cleared {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(text, style))
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).block(titled_block("Stages")), chunks[1]);

    let status = match screen.notice() {
        Some(notice) => Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(format!(
            "{}  Lv {}  HP {}/{}  Cleared {}/{}",
            draw.ctx.player_name,
            draw.ctx.player.level,
            draw.ctx.player.hp,
            draw.ctx.player.max_hp,
            draw.ctx.collection.cleared_stages.len(),
            draw.catalog.stages_for_grade(0).len()
        )),
    };
    frame.render_widget(
        Paragraph::new(vec![status, review_line(draw.ctx.collection.review_queue.len())])
            .wrap(Wrap { trim: true })
            .block(titled_block("Status")),
        chunks[2],
    );
}

/// Review entry; dimmed while there is nothing to review.
fn review_line(queued: usize) -> Line<'static> {
    if queued == 0 {
        Line::from(Span::styled(
            "[R] Review: nothing missed yet",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            format!("[R] Review {} missed kanji", queued),
            Style::default().fg(Color::Cyan),
        ))
    }
}

/// Draws a kanji or monster dex
pub fn draw_dex(frame: &mut Frame, area: Rect, screen: &DexScreen, ctx: &GameContext) {
    let area = with_footer(frame, area, "[↑/↓] Scroll  [Esc] Back");
    let (collected, total) = screen.progress(ctx);
    let title = format!("{} ({}/{})", screen.kind().title(), collected, total);

    let lines: Vec<Line> = screen
        .entries(ctx)
        .into_iter()
        .skip(screen.scroll())
        .map(|entry| {
            if entry.collected {
                Line::from(vec![
                    Span::styled(
                        format!("{:<16}", entry.label),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(entry.detail),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{:<16}{}", entry.label, entry.detail),
                    Style::default().fg(Color::DarkGray),
                ))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(titled_block(&title)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_labels() {
        assert_eq!(grade_label(0), "All");
        assert_eq!(grade_label(3), "Grade 3");
    }

    #[test]
    fn test_review_line_dims_when_empty() {
        let empty = review_line(0);
        assert_eq!(empty.spans[0].style.fg, Some(Color::DarkGray));
        let queued = review_line(2);
        assert_eq!(queued.spans[0].content, "[R] Review 2 missed kanji");
        assert_eq!(queued.spans[0].style.fg, Some(Color::Cyan));
    }
}
