use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::app::{
    App, DUPLICATE_BODY, DUPLICATE_TITLE, InputMode, REMOVE_CANCEL, REMOVE_CONFIRM,
    REMOVE_QUESTION, REMOVE_TITLE,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_title_bar(frame, app, outer[0]);
    draw_input_bar(frame, app, outer[1]);
    draw_task_list(frame, app, outer[2]);
    draw_status_bar(frame, app, outer[3]);

    match app.input_mode {
        InputMode::ConfirmRemove => draw_confirm_remove(frame, app),
        InputMode::Notice => draw_notice(frame, app),
        InputMode::Help => draw_help(frame, app),
        InputMode::Normal | InputMode::AddingTask => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.store.len();
    let counter = format!("{count} tarefa{} ", if count == 1 { "" } else { "s" });

    let title = Line::from(vec![
        Span::styled(
            " to.do ",
            Style::default()
                .fg(app.theme.text_accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(counter, Style::default().fg(app.theme.text_secondary)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn draw_input_bar(frame: &mut Frame, app: &App, area: Rect) {
    let adding = app.input_mode == InputMode::AddingTask;
    let border_style = if adding {
        Style::default().fg(app.theme.input_active)
    } else {
        app.theme.unfocused_border()
    };

    let block = Block::default()
        .title(" Nova task ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let content = if adding {
        Line::from(Span::styled(
            app.new_task_input.display_with_cursor(),
            Style::default().fg(app.theme.text_primary),
        ))
    } else if app.new_task_input.is_empty() {
        Line::from(Span::styled(
            "Adicionar novo todo...",
            Style::default().fg(app.theme.text_secondary),
        ))
    } else {
        Line::from(Span::styled(
            app.new_task_input.text(),
            Style::default().fg(app.theme.text_secondary),
        ))
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn draw_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.input_mode == InputMode::Normal;
    let block = Block::default()
        .title(" Tasks ")
        .borders(Borders::ALL)
        .border_style(if focused {
            app.theme.focused_border()
        } else {
            app.theme.unfocused_border()
        });

    if app.store.is_empty() {
        let msg = Paragraph::new("  Nenhuma task ainda. Pressione 'n' para criar.")
            .style(Style::default().fg(app.theme.text_secondary))
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .store
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let selected = i == app.selected;
            let row = &app.rows[i];

            let mut spans = vec![if selected {
                Span::styled("▸ ", Style::default().fg(app.theme.selection_indicator))
            } else {
                Span::raw("  ")
            }];

            spans.push(Span::styled(
                task.marker(),
                app.theme.task_marker_style(task.done),
            ));
            spans.push(Span::raw(" "));

            if row.is_editing() {
                spans.push(Span::styled(
                    row.draft_with_cursor(),
                    Style::default().fg(app.theme.input_active),
                ));
                spans.push(Span::styled(
                    "  Enter:salvar  Esc:cancelar",
                    Style::default().fg(app.theme.text_secondary),
                ));
            } else {
                spans.push(Span::styled(
                    &task.title,
                    app.theme.task_title_style(task.done),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let secondary = Style::default().fg(app.theme.text_secondary);

    let status = if app.input_mode == InputMode::AddingTask {
        Line::from(Span::styled(
            " Enter:criar  Esc:cancelar",
            Style::default().fg(app.theme.input_active),
        ))
    } else if app
        .rows
        .get(app.selected)
        .is_some_and(super::row::TaskRow::is_editing)
    {
        // Remove is unavailable for a row mid-edit; show it dimmed.
        Line::from(vec![
            Span::styled(" Enter:salvar  Esc:cancelar  ", secondary),
            Span::styled(
                "d:remover",
                secondary.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
            ),
        ])
    } else {
        Line::from(Span::styled(
            " n:nova  Espaço:concluir  e:editar  d:remover  ?:ajuda  q:sair",
            secondary,
        ))
    };

    frame.render_widget(Paragraph::new(status), area);
}

// ── Modals ────────────────────────────────────────────────────────────

/// Centered modal overlay: cleared background, bordered block; returns the
/// usable inner area.
fn render_modal(
    frame: &mut Frame,
    title: &str,
    border_style: Style,
    width: u16,
    height: u16,
) -> Rect {
    let area = frame.area();
    let w = width.min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(w)) / 2;
    let y = (area.height.saturating_sub(h)) / 2;
    let panel = Rect::new(x, y, w, h);

    frame.render_widget(Clear, panel);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    inner
}

fn draw_confirm_remove(frame: &mut Frame, app: &App) {
    let inner = render_modal(
        frame,
        &format!(" {REMOVE_TITLE} "),
        Style::default().fg(app.theme.confirm_border),
        52,
        8,
    );
    if inner.height < 4 {
        return;
    }

    let target = app
        .pending_remove
        .as_ref()
        .map(|p| p.title.as_str())
        .unwrap_or_default();

    let question = Paragraph::new(vec![
        Line::from(Span::styled(
            REMOVE_QUESTION,
            Style::default().fg(app.theme.text_primary),
        )),
        Line::from(Span::styled(
            format!("\"{target}\""),
            Style::default().fg(app.theme.text_secondary),
        )),
    ])
    .wrap(Wrap { trim: false });
    let question_area = Rect::new(inner.x, inner.y, inner.width, inner.height - 2);
    frame.render_widget(question, question_area);

    let buttons = Line::from(vec![
        Span::styled(
            format!("  {REMOVE_CANCEL}  "),
            app.theme.button_style(!app.confirm_yes),
        ),
        Span::raw("   "),
        Span::styled(
            format!("  {REMOVE_CONFIRM}  "),
            app.theme.button_style(app.confirm_yes),
        ),
    ]);
    let buttons_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    frame.render_widget(
        Paragraph::new(buttons).alignment(ratatui::layout::Alignment::Center),
        buttons_area,
    );
}

fn draw_notice(frame: &mut Frame, app: &App) {
    let notice = app.notice.unwrap_or(super::app::Notice {
        title: DUPLICATE_TITLE,
        body: DUPLICATE_BODY,
    });

    let inner = render_modal(
        frame,
        &format!(" {} ", notice.title),
        Style::default().fg(app.theme.notice_border),
        56,
        7,
    );
    if inner.height < 3 {
        return;
    }

    let body = Paragraph::new(Span::styled(
        notice.body,
        Style::default().fg(app.theme.text_primary),
    ))
    .wrap(Wrap { trim: false });
    let body_area = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
    frame.render_widget(body, body_area);

    let hint = Paragraph::new(Span::styled(
        "(Enter para fechar)",
        Style::default().fg(app.theme.text_secondary),
    ))
    .alignment(ratatui::layout::Alignment::Center);
    let hint_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    frame.render_widget(hint, hint_area);
}

fn draw_help(frame: &mut Frame, app: &App) {
    let groups = app.keymap.help_entries();
    let line_count: usize = groups.iter().map(|(_, entries)| entries.len() + 2).sum();

    let inner = render_modal(
        frame,
        " Atalhos ",
        app.theme.focused_border(),
        44,
        line_count as u16 + 2,
    );

    let mut lines: Vec<Line> = Vec::new();
    for (category, entries) in groups {
        lines.push(Line::from(Span::styled(
            category,
            Style::default()
                .fg(app.theme.text_accent)
                .add_modifier(Modifier::BOLD),
        )));
        for entry in entries {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<12}", entry.label),
                    Style::default().fg(app.theme.text_primary),
                ),
                Span::styled(
                    entry.description,
                    Style::default().fg(app.theme.text_secondary),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
