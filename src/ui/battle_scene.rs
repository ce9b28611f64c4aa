use super::enemy_sprites::SpriteBook;
use super::{hp_color, titled_block, with_footer, DrawContext};
use kanji_battle::battle::{BattleSession, EnemyAnimation, TurnOwner};
use kanji_battle::core::{GameContext, LOG_VISIBLE_LINES, REVIEW_STAGE_NAME};
use kanji_battle::screens::BattleScreen;
use kanji_battle::stages::StageSource;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

const BATTLE_HELP: &str =
    "[type] Answer  [Enter] Repeat  [F1] Attack  [F2] Heal  [F3] Hint  [↑/↓] Log  [Esc] Stages  [F10] Title";

/// Draws the battle: enemy, challenge, player hp, log and input line
pub fn draw_battle_scene(
    frame: &mut Frame,
    area: Rect,
    screen: &BattleScreen,
    draw: &DrawContext,
    sprites: &mut SpriteBook,
) {
    let area = with_footer(frame, area, BATTLE_HELP);
    let stage_name = if screen.is_review() {
        REVIEW_STAGE_NAME
    } else {
        draw.catalog
            .stage(screen.stage_id())
            .map(|s| s.name.as_str())
            .unwrap_or(screen.stage_id())
    };

    let Some(session) = screen.session() else {
        frame.render_widget(
            Paragraph::new("Preparing battle...")
                .alignment(Alignment::Center)
                .block(titled_block(stage_name)),
            area,
        );
        return;
    };

    let block = titled_block(stage_name);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),                                // Enemy
            Constraint::Length(3),                             // Enemy HP
            Constraint::Length(4),                             // Challenge
            Constraint::Length(3),                             // Player HP
            Constraint::Length(LOG_VISIBLE_LINES as u16 + 2),  // Log
            Constraint::Length(3),                             // Input
        ])
        .split(inner);

    draw_enemy(frame, chunks[0], session, sprites);
    draw_enemy_hp(frame, chunks[1], session);
    draw_challenge(frame, chunks[2], session);
    draw_player_hp(frame, chunks[3], session, draw.ctx);
    draw_log(frame, chunks[4], session);
    draw_input(frame, chunks[5], session);
}

fn animation_style(animation: EnemyAnimation) -> Style {
    match animation {
        EnemyAnimation::None => Style::default().fg(Color::White),
        EnemyAnimation::Damage(n) if n % 2 == 0 => Style::default().fg(Color::Red),
        EnemyAnimation::Damage(_) => Style::default().fg(Color::White),
        EnemyAnimation::Attack(_) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        EnemyAnimation::Defeat(_) => Style::default().fg(Color::DarkGray),
    }
}

/// Vertically centre a sprite of `height` rows, clipped to `area`.
fn sprite_area(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}

/// Sprite art, or a framed name box when the enemy has no art
fn draw_enemy(frame: &mut Frame, area: Rect, session: &BattleSession, sprites: &mut SpriteBook) {
    let enemy = session.current_enemy();
    let style = animation_style(session.animation());
    let header = Line::from(Span::styled(
        format!(
            "{}  Lv {}   ({}/{})",
            enemy.name,
            enemy.level,
            session.current_enemy_index() + 1,
            session.enemies().len()
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), chunks[0]);

    match sprites.sprite_for(&enemy.id) {
        Some(sprite) => {
            let lines: Vec<Line> = sprite
                .art
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), style)))
                .collect();
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                sprite_area(chunks[1], sprite.height),
            );
        }
        None => {
            let width = (enemy.name.chars().count() as u16 + 6).min(chunks[1].width);
            let height = 3.min(chunks[1].height);
            let boxed = Rect {
                x: chunks[1].x + (chunks[1].width - width) / 2,
                y: chunks[1].y + (chunks[1].height - height) / 2,
                width,
                height,
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(enemy.name.clone(), style)))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).border_style(style)),
                boxed,
            );
        }
    }
}

fn draw_enemy_hp(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let enemy = session.current_enemy();
    let ratio = enemy.hp_ratio().clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Enemy"))
        .gauge_style(Style::default().fg(hp_color(ratio)))
        .label(format!("{}/{}", enemy.hp, enemy.max_hp))
        .ratio(ratio);
    frame.render_widget(gauge, area);
}

fn draw_challenge(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let challenge = session.current_challenge();
    let mut lines = vec![Line::from(vec![
        Span::raw("Read: "),
        Span::styled(
            challenge.text.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   weak to {}", challenge.weakness.label()),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if session.show_hint() {
        lines.push(Line::from(Span::styled(
            format!("Hint: {} ({} strokes)", challenge.meaning, challenge.stroke_count),
            Style::default().fg(Color::Green),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Kanji")),
        area,
    );
}

fn draw_player_hp(frame: &mut Frame, area: Rect, session: &BattleSession, ctx: &GameContext) {
    let gauge_state = session.player_hp();
    let max_hp = ctx.player.max_hp.max(1);
    let ratio = (gauge_state.display as f64 / max_hp as f64).clamp(0.0, 1.0);
    let title = format!(
        "{}  Lv {}  EXP {}/{}  Combo {}  Heals {}",
        ctx.player_name,
        ctx.player.level,
        ctx.player.exp,
        ctx.player.next_level_exp,
        session.combo_count(),
        ctx.player.heal_charges
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(
            Style::default()
                .fg(hp_color(ratio))
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("HP {}/{}", gauge_state.display, ctx.player.max_hp))
        .ratio(ratio);
    frame.render_widget(gauge, area);
}

fn draw_log(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let lines: Vec<Line> = session
        .visible_log(LOG_VISIBLE_LINES)
        .iter()
        .map(|entry| Line::from(entry.as_str()))
        .collect();
    let title = if session.log_offset() > 0 {
        format!("Log (-{})", session.log_offset())
    } else {
        "Log".to_string()
    };
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn draw_input(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let (prompt, style) = if session.accepts_input() {
        ("> ", Style::default().fg(Color::Cyan))
    } else if session.phase().is_terminal() {
        ("■ ", Style::default().fg(Color::DarkGray))
    } else if session.turn_owner() == TurnOwner::Enemy {
        ("… ", Style::default().fg(Color::DarkGray))
    } else {
        ("  ", Style::default().fg(Color::DarkGray))
    };
    let line = Line::from(vec![
        Span::styled(prompt, style),
        Span::raw(session.input().to_string()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        Span::styled(
            format!("   [{:?}]", session.last_command()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Answer")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_animation_flashes() {
        assert_eq!(
            animation_style(EnemyAnimation::Damage(4)).fg,
            Some(Color::Red)
        );
        assert_eq!(
            animation_style(EnemyAnimation::Damage(3)).fg,
            Some(Color::White)
        );
        assert_eq!(
            animation_style(EnemyAnimation::Defeat(30)).fg,
            Some(Color::DarkGray)
        );
    }

    #[test]
    fn test_sprite_area_centres_and_clips() {
        let area = Rect::new(2, 10, 40, 12);
        assert_eq!(sprite_area(area, 6), Rect::new(2, 13, 40, 6));
        assert_eq!(sprite_area(area, 20), area);
    }
}
