// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Header, footer, panel, dialog and help helpers used by TUI rendering.
const APP_TITLE: &str = "MLM Binary Tree";
const SEARCH_PREFIX: &str = "Search: ";
const FIELD_LABEL_WIDTH: usize = 8;
const DIALOG_WIDTH: u16 = 64;
const CONFIRM_WIDTH: u16 = 56;

fn header_line(app: &App) -> Line<'static> {
    let mut spans = vec![Span::styled(
        APP_TITLE.to_owned(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if !app.controller.is_loaded() {
        spans.push(Span::styled(
            "  Loading tree...".to_owned(),
            Style::default().fg(Color::DarkGray),
        ));
    } else if app.controller.can_add_root() {
        spans.push(Span::raw("  ".to_owned()));
        spans.push(Span::styled("[a]".to_owned(), help_key_style()));
        spans.push(Span::raw(" Add Root Member".to_owned()));
    }
    Line::from(spans)
}

fn search_bar_line(app: &App) -> Line<'static> {
    let label_style = Style::default().fg(FOOTER_LABEL_COLOR);
    match app.search_mode {
        SearchMode::Editing => Line::from(vec![
            Span::styled(SEARCH_PREFIX.to_owned(), label_style.add_modifier(Modifier::BOLD)),
            Span::raw(app.search_draft.clone()),
        ]),
        SearchMode::Inactive if app.search_query.is_empty() => Line::from(vec![
            Span::styled(SEARCH_PREFIX.to_owned(), label_style),
            Span::styled(
                "press / to search by name, email or phone".to_owned(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        SearchMode::Inactive => Line::from(vec![
            Span::styled(SEARCH_PREFIX.to_owned(), label_style),
            Span::styled(app.search_query.clone(), Style::default().fg(MATCH_COLOR)),
        ]),
    }
}

fn footer_line(app: &App) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    if app.show_help {
        push_footer_entry(&mut spans, "SCROLL", "j/k");
        push_footer_entry(&mut spans, "CLOSE", "Esc");
    } else if app.controller.is_confirming_delete() {
        push_footer_entry(&mut spans, "CHOOSE", "Tab/←/→");
        push_footer_entry(&mut spans, "CONFIRM", "Enter");
        push_footer_entry(&mut spans, "BACK", "Esc");
    } else if app.controller.mode().is_open() {
        push_footer_entry(&mut spans, "NEXT", "Tab");
        push_footer_entry(&mut spans, "SUBMIT", "Enter");
        push_footer_entry(&mut spans, "CANCEL", "Esc");
    } else if app.search_mode == SearchMode::Editing {
        push_footer_entry(&mut spans, "SEARCH", "Enter");
        push_footer_entry(&mut spans, "CANCEL", "Esc");
    } else if let HintMode::Awaiting { kind, typed, .. } = &app.hint_mode {
        let action = match kind {
            HintKind::Open => "OPEN",
            HintKind::Collapse => "FOLD",
        };
        let typed = if typed.is_empty() { "_" } else { typed.as_str() };
        push_footer_entry(&mut spans, action, typed);
        push_footer_entry(&mut spans, "CANCEL", "Esc");
    } else {
        push_footer_entry(&mut spans, "SEARCH", "/");
        push_footer_entry(&mut spans, "OPEN", "f");
        push_footer_entry(&mut spans, "FOLD", "z");
        push_footer_entry_maybe_disabled(
            &mut spans,
            "ADD ROOT",
            "a",
            !app.controller.can_add_root(),
        );
        push_footer_entry(&mut spans, "PAN", "hjkl");
        push_footer_entry(&mut spans, "CENTER", "c");
        push_footer_entry(&mut spans, "RELOAD", "r");
        push_footer_entry(&mut spans, "HELP", "?");
        push_footer_entry(&mut spans, "QUIT", "q");
    }

    if let Some(toast) = &app.toast {
        let color = match toast.level {
            NoticeLevel::Error => Color::Red,
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Info => Color::White,
        };
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled(toast.message.clone(), Style::default().fg(color)));
    }

    Line::from(spans)
}

fn render_summary(frame: &mut Frame<'_>, summary: &SearchSummary, area: Rect) {
    let key_style = help_key_style();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name: ".to_owned(), key_style),
            Span::styled(
                summary.name.clone(),
                Style::default().fg(MATCH_COLOR).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Upline: ".to_owned(), key_style),
            Span::raw(summary.upline.clone().unwrap_or_else(|| "-".to_owned())),
        ]),
    ];
    if let Some(downlines) = &summary.downlines {
        lines.push(Line::from(vec![
            Span::styled("Downlines: ".to_owned(), key_style),
            Span::raw(downlines.clone()),
        ]));
    }

    let block = Block::default().borders(Borders::ALL).title(" Search Result ");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_dialog(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let controller = &app.controller;
    let mode = controller.mode();

    let mut lines = Vec::<Line<'static>>::new();
    match mode {
        DialogMode::AddingChild { upline } => {
            lines.push(Line::from(vec![
                Span::styled("Upline: ".to_owned(), help_key_style()),
                Span::raw(upline.name.clone()),
            ]));
        }
        DialogMode::Editing { downlines, .. } => {
            lines.push(Line::from(vec![
                Span::styled("Downlines: ".to_owned(), help_key_style()),
                Span::raw(downlines.to_string()),
            ]));
        }
        DialogMode::AddingRoot | DialogMode::Closed => {}
    }
    lines.push(Line::from(""));

    let first_field_row = lines.len();
    for field in FormField::ALL {
        let focused = app.dialog_focus == DialogFocus::Field(field);
        let label_style = if focused {
            help_key_style()
        } else {
            Style::default().fg(FOOTER_LABEL_COLOR)
        };
        let label = format!("{}:", field.label());
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<width$}", width = FIELD_LABEL_WIDTH), label_style),
            Span::raw(controller.form().field(field).to_owned()),
        ]));
    }
    lines.push(Line::from(""));

    let mut buttons = Vec::<Span<'static>>::new();
    for button in app.dialog_buttons() {
        let label = match button {
            DialogButton::Submit => mode.submit_label(),
            DialogButton::AddDownline => "Add Downline",
            DialogButton::Delete => "Delete",
            DialogButton::Cancel => "Cancel",
        };
        if !buttons.is_empty() {
            buttons.push(Span::raw(" ".to_owned()));
        }
        buttons.push(button_span(label, app.dialog_focus == DialogFocus::Button(button)));
    }
    lines.push(Line::from(buttons));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_fixed_rect(DIALOG_WIDTH, height, main_area);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", mode.title()))
        .border_style(Style::default().fg(NODE_COLOR))
        .title_style(Style::default().fg(NODE_COLOR).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if controller.is_confirming_delete() {
        return;
    }
    if let DialogFocus::Field(field) = app.dialog_focus {
        let row = FormField::ALL.iter().position(|f| *f == field).unwrap_or(0) + first_field_row;
        let column = FIELD_LABEL_WIDTH + controller.form().field(field).chars().count();
        let x = inner
            .x
            .saturating_add(u16::try_from(column).unwrap_or(u16::MAX))
            .min(inner.right().saturating_sub(1));
        let y = inner.y.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
        if y < inner.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

fn render_confirm(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let prompt = app.controller.delete_prompt().unwrap_or_default();
    let buttons = ConfirmChoice::ALL
        .iter()
        .enumerate()
        .flat_map(|(idx, choice)| {
            let separator = (idx > 0).then(|| Span::raw(" ".to_owned()));
            separator
                .into_iter()
                .chain([button_span(choice.label(), *choice == app.confirm_choice)])
        })
        .collect::<Vec<_>>();

    let inner_width = usize::from(CONFIRM_WIDTH.saturating_sub(2)).max(1);
    let prompt_rows = prompt.chars().count().div_ceil(inner_width).max(1);
    let height = u16::try_from(prompt_rows + 4).unwrap_or(u16::MAX);
    let area = centered_fixed_rect(CONFIRM_WIDTH, height, main_area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirm Delete ")
        .border_style(Style::default().fg(Color::Red))
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    let lines = vec![Line::from(prompt), Line::from(""), Line::from(buttons)];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn button_span(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(FOOTER_KEY_COLOR)
    };
    Span::styled(format!("[ {label} ]"), style)
}

fn node_circle_style(is_match: bool) -> Style {
    let color = if is_match { MATCH_COLOR } else { NODE_COLOR };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn hint_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>key_width$}"), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(76, 84, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let dim_style = Style::default().fg(Color::DarkGray);

    let sections: [(&str, &[(&str, &str)]); 4] = [
        (
            "Tree",
            &[
                ("f", "Jump: open a member for editing"),
                ("z", "Jump: fold or unfold a member's downlines"),
                ("click", "Circle folds, name opens the member"),
                ("hjkl, ←↓↑→", "Pan one cell"),
                ("HJKL, PgUp/PgDn", "Pan ten cells"),
                ("c", "Center the tree"),
                ("Home", "Reset the pan"),
            ],
        ),
        (
            "Members",
            &[
                ("a", "Add the root member (empty tree only)"),
                ("/", "Search by name, email or phone"),
                ("r", "Reload the tree"),
            ],
        ),
        (
            "Dialog",
            &[
                ("Tab/Shift-Tab", "Next / previous field or button"),
                ("Enter", "Submit, or press the focused button"),
                ("Esc", "Cancel"),
            ],
        ),
        (
            "Global",
            &[("?", "Help (toggle)"), ("q, Ctrl-C", "Quit")],
        ),
    ];

    let key_col_width = sections
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (idx, (title, entries)) in sections.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(format!("--- {title} ---"), header_style)));
        for (key, desc) in entries.iter() {
            lines.push(help_kv(key, desc, key_col_width, key_style));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Search centers the view on the first match once the tree has been drawn.",
        dim_style,
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title("─ Help ─")
        .border_style(Style::default().fg(NODE_COLOR))
        .title_style(Style::default().fg(NODE_COLOR).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    let max_scroll = lines
        .len()
        .saturating_sub(inner.height.max(1) as usize)
        .min(u16::MAX as usize) as u16;
    app.help_scroll = app.help_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    let color = if disabled {
        Color::DarkGray
    } else {
        FOOTER_KEY_COLOR
    };
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
