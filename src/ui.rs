use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap,
};
use ratatui::Frame;

use crate::app::App;
use crate::dates::{display_date, display_datetime};
use crate::error::{ActionError, ErrorKind};
use crate::forms::{FormStatus, TextField, mask};
use crate::grouping::document_counts;
use crate::modals::{
    AddFocus, AddToWorkspaceModal, CreateWorkspaceModal, Modal, UploadField, UploadModal,
    ViewDocumentModal,
};
use crate::pages::{
    DeleteConfirmation, Health, HomeFocus, LoadState, LoginPage, ProfileTab, RegisterPage,
};
use crate::router::Route;
use crate::storage::ThemePreference;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    let theme = theme_from(app.theme);
    draw_background(frame, size, &theme);

    match app.route {
        Route::Landing => draw_landing(frame, app, size, &theme),
        Route::Register => draw_register(frame, &app.register, size, &theme),
        Route::Login => draw_login(frame, &app.login, size, &theme),
        Route::Home => draw_home(frame, app, size, &theme),
        Route::Profile => draw_profile(frame, app, size, &theme),
    }

    if app.route == Route::Home {
        if let Some(confirm) = &app.home.confirm {
            draw_confirm(frame, confirm, size, &theme);
        }
        match app.home.modal.as_mut() {
            Some(Modal::Upload(modal)) => draw_upload(frame, modal, size, &theme),
            Some(Modal::CreateWorkspace(modal)) => draw_create_workspace(frame, modal, size, &theme),
            Some(Modal::AddToWorkspace(modal)) => draw_add_to_workspace(frame, modal, size, &theme),
            Some(Modal::ViewDocument(modal)) => draw_view_document(frame, modal, size, &theme),
            None => {}
        }
    }

    if !app.show_help {
        if let Some(toast) = app.active_toast() {
            draw_toast(frame, size, &toast.message, toast.is_error, &theme);
        }
    }

    if app.show_help {
        draw_help(frame, app.route, size, &theme);
    }
}

fn page_layout(area: Rect) -> (Rect, Rect, Rect) {
    let content = area.inner(Margin {
        vertical: 1,
        horizontal: 2,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(2)])
        .split(content);
    (chunks[0], chunks[1], chunks[2])
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let nav = |route: Route, key: &str| {
        let style = if app.route == route {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            theme.muted_style()
        };
        Span::styled(format!("{} ({key})", route.title()), style)
    };

    let line = Line::from(vec![
        Span::styled("Research Assistant", theme.title_style()),
        Span::raw("   "),
        nav(Route::Home, "h"),
        Span::raw(" · "),
        nav(Route::Profile, "p"),
        Span::raw(" · "),
        Span::styled("Logout (o)", theme.muted_style()),
        Span::raw("   "),
        Span::styled("Signed in as", theme.muted_style()),
        Span::raw(": "),
        Span::styled(
            app.session.display_name().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(line).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.border_style())
            .style(theme.panel_style()),
    );
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, hints: &[(&str, &str)], area: Rect, theme: &Theme) {
    let mut spans = Vec::new();
    for (index, (key, label)) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" · "));
        }
        spans.push(Span::styled(format!("{key} {label}"), theme.muted_style()));
    }
    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(theme.border_style())
            .style(theme.panel_style()),
    );
    frame.render_widget(footer, area);
}

fn draw_landing(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let block = centered_rect(70, 50, area);
    let health = match &app.landing.health {
        Health::Checking => Span::styled("Checking server...", theme.muted_style()),
        Health::Online => Span::styled(
            format!("Server online at {}", app.api_url),
            Style::default().fg(theme.success),
        ),
        Health::Offline(reason) => Span::styled(
            format!("Server unreachable at {}: {reason}", app.api_url),
            Style::default().fg(theme.error),
        ),
    };

    let lines = vec![
        Line::from(Span::styled(
            "Your AI-powered research companion",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "Upload research papers, organize them into workspaces by topic, and keep \
             their text one keystroke away.",
        ),
        Line::from(""),
        Line::from(health),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.highlight)),
            Span::raw(" get started   "),
            Span::styled("l", Style::default().fg(theme.highlight)),
            Span::raw(" login   "),
            Span::styled("r", Style::default().fg(theme.highlight)),
            Span::raw(" register   "),
            Span::styled("q", Style::default().fg(theme.highlight)),
            Span::raw(" quit"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel_block("Research Assistant", theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, block);
}

fn draw_register(frame: &mut Frame, page: &RegisterPage, area: Rect, theme: &Theme) {
    let mut lines = vec![Line::from("Create an account"), Line::from("")];
    for (index, (label, field)) in RegisterPage::LABELS.iter().zip(&page.fields).enumerate() {
        lines.push(field_line(label, field, page.focus == index, theme));
    }
    push_form_status(&mut lines, &page.status, "Registering...", theme);
    lines.push(Line::from(""));
    lines.push(Line::from("Tab next field • Enter register • Esc back"));

    let block = centered_rect(60, 40, area);
    frame.render_widget(Clear, block);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(panel_block("Register", theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, block);
}

fn draw_login(frame: &mut Frame, page: &LoginPage, area: Rect, theme: &Theme) {
    let mut lines = vec![Line::from("Log in to Research Assistant"), Line::from("")];
    for (index, (label, field)) in LoginPage::LABELS.iter().zip(&page.fields).enumerate() {
        lines.push(field_line(label, field, page.focus == index, theme));
    }
    push_form_status(&mut lines, &page.status, "Logging in...", theme);
    lines.push(Line::from(""));
    lines.push(Line::from("Tab next field • Enter login • Esc back"));

    let block = centered_rect(60, 35, area);
    frame.render_widget(Clear, block);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(panel_block("Login", theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, block);
}

fn draw_home(frame: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    let (header, body, footer) = page_layout(area);
    draw_header(frame, app, header, theme);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(body);

    let active_highlight = Style::default()
        .bg(theme.accent)
        .fg(theme.accent_contrast())
        .add_modifier(Modifier::BOLD);
    let inactive_highlight = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);
    let (workspace_highlight, workspace_symbol, document_highlight, document_symbol) =
        match app.home.focus {
            HomeFocus::Workspaces => (active_highlight, "▍ ", inactive_highlight, "▏ "),
            HomeFocus::Documents => (inactive_highlight, "▏ ", active_highlight, "▍ "),
        };

    let home = &mut app.home;
    let counts = document_counts(home.document_list());
    let workspace_items: Vec<ListItem> = match &home.workspaces {
        LoadState::Loading => vec![placeholder("Loading workspaces...", theme)],
        LoadState::Failed(reason) => vec![failure_item("Could not load workspaces", reason, theme)],
        LoadState::Loaded(workspaces) if workspaces.is_empty() => {
            vec![placeholder("No workspaces yet.", theme)]
        }
        LoadState::Loaded(workspaces) => workspaces
            .iter()
            .map(|workspace| {
                let marker = if home.open_workspace == Some(workspace.id) {
                    "● "
                } else {
                    ""
                };
                let count = counts.get(&workspace.id).copied().unwrap_or(0);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{marker}{}", workspace.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {count} docs · {}", display_date(&workspace.created_at)),
                        theme.muted_style(),
                    ),
                ]))
                .style(theme.panel_style())
            })
            .collect(),
    };

    let workspaces_title = format!("Workspaces ({})", home.workspace_list().len());
    let workspace_list = List::new(workspace_items)
        .block(panel_block(&workspaces_title, theme))
        .highlight_style(workspace_highlight)
        .highlight_symbol(workspace_symbol);
    frame.render_stateful_widget(workspace_list, panels[0], &mut home.workspace_state);

    let documents_title = match home.open_workspace() {
        Some(workspace) => format!(
            "Documents in {} ({})",
            workspace.title,
            home.visible_documents().len()
        ),
        None => format!("Uploaded Documents ({})", home.document_list().len()),
    };
    let document_items: Vec<ListItem> = match &home.documents {
        LoadState::Loading => vec![placeholder("Loading documents...", theme)],
        LoadState::Failed(reason) => vec![failure_item("Could not load documents", reason, theme)],
        LoadState::Loaded(_) => {
            let visible = home.visible_documents();
            if visible.is_empty() {
                vec![placeholder("No documents uploaded yet.", theme)]
            } else {
                visible
                    .into_iter()
                    .map(|document| {
                        ListItem::new(vec![
                            Line::from(Span::styled(
                                document.title.clone(),
                                Style::default().add_modifier(Modifier::BOLD),
                            )),
                            Line::from(Span::styled(
                                format!(
                                    "Uploaded: {} · {}",
                                    display_date(&document.uploaded_at),
                                    home.placement_label(document)
                                ),
                                theme.muted_style(),
                            )),
                        ])
                        .style(theme.panel_style())
                    })
                    .collect()
            }
        }
    };

    let document_list = List::new(document_items)
        .block(panel_block(&documents_title, theme))
        .highlight_style(document_highlight)
        .highlight_symbol(document_symbol);
    frame.render_stateful_widget(document_list, panels[1], &mut home.document_state);

    let hints: &[(&str, &str)] = match app.home.focus {
        HomeFocus::Workspaces => &[
            ("Tab", "documents"),
            ("Enter", "open"),
            ("c", "create"),
            ("d", "delete"),
            ("u", "upload"),
            ("a", "add to workspace"),
            ("r", "refresh"),
            ("?", "help"),
            ("q", "quit"),
        ],
        HomeFocus::Documents => &[
            ("Tab", "workspaces"),
            ("Enter", "view"),
            ("a", "add to workspace"),
            ("x", "remove from workspace"),
            ("u", "upload"),
            ("r", "refresh"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };
    draw_footer(frame, hints, footer, theme);
}

fn placeholder(message: &str, theme: &Theme) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(message.to_string(), theme.muted_style())))
}

fn failure_item(message: &str, reason: &str, theme: &Theme) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(reason.to_string(), theme.muted_style())),
        Line::from(Span::styled("Press r to retry.", theme.muted_style())),
    ])
}

fn draw_confirm(frame: &mut Frame, confirm: &DeleteConfirmation, area: Rect, theme: &Theme) {
    let block = centered_rect(50, 20, area);
    frame.render_widget(Clear, block);
    let lines = vec![
        Line::from("Are you sure you want to delete this workspace?"),
        Line::from(""),
        Line::from(Span::styled(
            confirm.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("y delete • n cancel"),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel_block("Delete Workspace", theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, block);
}

fn draw_upload(frame: &mut Frame, modal: &UploadModal, area: Rect, theme: &Theme) {
    let target = modal
        .workspace
        .as_ref()
        .map(|(_, title)| format!("Into workspace: {title}"))
        .unwrap_or_else(|| "Not assigned to a workspace".to_string());

    let file_hint = if modal.file.value().is_empty() {
        "Drag & drop a PDF onto the terminal, or type its path"
    } else {
        "PDF selected"
    };

    let mut lines = vec![
        Line::from(Span::styled(target, theme.muted_style())),
        Line::from(""),
        field_line("Title", &modal.title, modal.focus == UploadField::Title, theme),
        field_line("PDF", &modal.file, modal.focus == UploadField::File, theme),
        Line::from(Span::styled(file_hint, theme.muted_style())),
    ];
    push_form_status(&mut lines, &modal.status, "Uploading...", theme);
    lines.push(Line::from(""));
    lines.push(Line::from("Tab switch field • Enter submit • Esc cancel"));

    let block = centered_rect(70, 40, area);
    frame.render_widget(Clear, block);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(panel_block("Upload PDF", theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, block);
}

fn draw_create_workspace(frame: &mut Frame, modal: &CreateWorkspaceModal, area: Rect, theme: &Theme) {
    let mut lines = vec![field_line("Title", &modal.title, true, theme)];
    push_form_status(&mut lines, &modal.status, "Creating...", theme);
    lines.push(Line::from(""));
    lines.push(Line::from("Enter create • Esc cancel"));

    let block = centered_rect(60, 25, area);
    frame.render_widget(Clear, block);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(panel_block("Create New Workspace", theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, block);
}

fn draw_add_to_workspace(
    frame: &mut Frame,
    modal: &mut AddToWorkspaceModal,
    area: Rect,
    theme: &Theme,
) {
    let block = centered_rect(80, 70, area);
    frame.render_widget(Clear, block);
    let outer = panel_block("Add Documents to Workspace", theme);
    let inner = outer.inner(block);
    frame.render_widget(outer, block);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let focused = Style::default()
        .bg(theme.accent)
        .fg(theme.accent_contrast())
        .add_modifier(Modifier::BOLD);
    let unfocused = Style::default().fg(theme.highlight);

    let workspace_items: Vec<ListItem> = modal
        .workspaces
        .iter()
        .map(|choice| {
            let mark = if modal.selected_workspace == Some(choice.id) {
                "(•) "
            } else {
                "( ) "
            };
            ListItem::new(format!("{mark}{}", choice.title))
        })
        .collect();
    let workspace_list = List::new(workspace_items)
        .block(panel_block("Select Workspace", theme))
        .highlight_style(if modal.focus == AddFocus::Workspaces {
            focused
        } else {
            unfocused
        });
    frame.render_stateful_widget(workspace_list, columns[0], &mut modal.workspace_state);

    let document_items: Vec<ListItem> = modal
        .documents
        .iter()
        .map(|choice| {
            let mark = if modal.is_document_selected(choice.id) {
                "[x] "
            } else {
                "[ ] "
            };
            ListItem::new(format!("{mark}{}", choice.title))
        })
        .collect();
    let document_list = List::new(document_items)
        .block(panel_block("Select Documents", theme))
        .highlight_style(if modal.focus == AddFocus::Documents {
            focused
        } else {
            unfocused
        });
    frame.render_stateful_widget(document_list, columns[1], &mut modal.document_state);

    let mut lines = vec![Line::from(format!(
        "{} document(s) selected",
        modal.selected_documents.len()
    ))];
    push_form_status(&mut lines, &modal.status, "Adding...", theme);
    lines.push(Line::from("Tab switch list • Space select • Enter add • Esc cancel"));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).style(theme.panel_style()),
        rows[1],
    );
}

fn draw_view_document(frame: &mut Frame, modal: &ViewDocumentModal, area: Rect, theme: &Theme) {
    let block = centered_rect(85, 85, area);
    frame.render_widget(Clear, block);
    let outer = panel_block(&modal.document.title, theme);
    let inner = outer.inner(block);
    frame.render_widget(outer, block);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let document = &modal.document;
    let details = vec![
        detail_line("Document", format!("#{}", document.id), theme),
        detail_line("Uploaded", display_datetime(&document.uploaded_at), theme),
        detail_line("Workspace", modal.workspace_label.clone(), theme),
        detail_line(
            "File",
            document
                .file_path
                .clone()
                .unwrap_or_else(|| "not reported".to_string()),
            theme,
        ),
    ];
    frame.render_widget(Paragraph::new(details).style(theme.panel_style()), rows[0]);

    let text = if modal.text().is_empty() {
        "No extracted text available for this document."
    } else {
        modal.text()
    };
    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((modal.scroll, 0))
        .block(panel_block("Extracted Text", theme));
    frame.render_widget(body, rows[1]);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Up/Down scroll • PgUp/PgDn page • c copy text • Esc close",
            theme.muted_style(),
        )),
        rows[2],
    );
}

fn draw_profile(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let (header, body, footer) = page_layout(area);
    draw_header(frame, app, header, theme);

    let sections = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(10)])
        .split(body);

    let tab_line = |tab: ProfileTab, label: &str| {
        if app.profile.tab == tab {
            Line::from(Span::styled(
                format!("▍ {label}"),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(format!("  {label}"))
        }
    };
    let sidebar = Paragraph::new(vec![
        tab_line(ProfileTab::Account, "Account"),
        tab_line(ProfileTab::ApiKeys, "API Keys"),
        Line::from(""),
        Line::from(Span::styled("o log out", Style::default().fg(theme.error))),
    ])
    .block(panel_block("Profile", theme));
    frame.render_widget(sidebar, sections[0]);

    let lines = match app.profile.tab {
        ProfileTab::Account => vec![
            detail_line("Username", app.session.display_name().to_string(), theme),
            detail_line("User ID", app.session.user_id.to_string(), theme),
            detail_line("Server", app.api_url.clone(), theme),
            detail_line("Theme", theme_label(app.theme).to_string(), theme),
            Line::from(""),
            Line::from(Span::styled("t change theme", theme.muted_style())),
        ],
        ProfileTab::ApiKeys => app
            .profile
            .api_keys
            .iter()
            .enumerate()
            .map(|(index, (service, field))| {
                let focused = index == app.profile.key_focus;
                let value = if focused {
                    field.display(true)
                } else if field.value().is_empty() {
                    "API Key".to_string()
                } else {
                    mask(field.value())
                };
                let label_style = if focused {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Line::from(vec![
                    Span::styled(format!("{service:<10}"), label_style),
                    Span::raw(value),
                ])
            })
            .collect(),
    };
    let title = match app.profile.tab {
        ProfileTab::Account => "Account Information",
        ProfileTab::ApiKeys => "API Keys",
    };
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel_block(title, theme))
            .wrap(Wrap { trim: true }),
        sections[1],
    );

    let hints: &[(&str, &str)] = match app.profile.tab {
        ProfileTab::Account => &[
            ("←/→", "switch tab"),
            ("t", "theme"),
            ("h", "home"),
            ("o", "log out"),
            ("?", "help"),
            ("q", "quit"),
        ],
        ProfileTab::ApiKeys => &[
            ("←/→", "switch tab"),
            ("Up/Down", "select key"),
            ("Enter", "register"),
            ("Esc", "home"),
        ],
    };
    draw_footer(frame, hints, footer, theme);
}

fn field_line(label: &str, field: &TextField, focused: bool, theme: &Theme) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::styled(format!("{label:<10}"), label_style),
        Span::raw(field.display(focused)),
    ])
}

fn detail_line(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), theme.muted_style()),
        Span::raw(value),
    ])
}

fn push_form_status(lines: &mut Vec<Line<'static>>, status: &FormStatus, busy: &str, theme: &Theme) {
    if status.is_submitting() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(busy.to_string(), theme.muted_style())));
    } else if let Some(error) = &status.error {
        lines.push(Line::from(""));
        lines.push(error_line(error, theme));
    }
}

fn error_line(error: &ActionError, theme: &Theme) -> Line<'static> {
    let (prefix, color) = match error.kind() {
        ErrorKind::Validation => ("", theme.highlight),
        ErrorKind::Network => ("Network: ", theme.error),
        ErrorKind::Server => ("Server: ", theme.error),
    };
    Line::from(Span::styled(
        format!("{prefix}{}", error.message()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let vertical = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    vertical[1]
}

fn draw_toast(frame: &mut Frame, area: Rect, message: &str, is_error: bool, theme: &Theme) {
    let width = (message.chars().count() as u16 + 6)
        .max(20)
        .min(area.width.saturating_sub(2));
    let height = 3;
    let x = area.x + area.width.saturating_sub(width + 1);
    let y = area.y + area.height.saturating_sub(height + 4);
    let rect = Rect::new(x, y, width, height);

    frame.render_widget(Clear, rect);
    let style = if is_error {
        Style::default().fg(theme.error).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
    };
    let title = if is_error { "Error" } else { "Done" };
    let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
        .alignment(Alignment::Center)
        .block(panel_block(title, theme));
    frame.render_widget(paragraph, rect);
}

fn draw_help(frame: &mut Frame, route: Route, area: Rect, theme: &Theme) {
    let block = centered_rect(70, 70, area);
    frame.render_widget(Clear, block);

    let header_style = Style::default().add_modifier(Modifier::BOLD).fg(theme.accent);
    let key_style = Style::default().fg(theme.highlight);
    let section = |title: &'static str| {
        Row::new(vec![Cell::from(Span::styled(title, header_style)), Cell::from("")])
    };
    let key = |keys: &'static str, action: &'static str| {
        Row::new(vec![Cell::from(Span::styled(keys, key_style)), Cell::from(action)])
    };
    let blank = || Row::new(vec![Cell::from(""), Cell::from("")]);

    let mut rows = vec![
        section("Everywhere"),
        key("Ctrl+C", "Quit"),
        key("?", "Toggle help"),
        key("Esc", "Close dialog / go back"),
        blank(),
    ];
    match route {
        Route::Home => rows.extend([
            section("Home"),
            key("Tab", "Switch between workspaces and documents"),
            key("Up/Down", "Move selection"),
            key("Enter", "Open workspace / view document"),
            key("c", "Create workspace"),
            key("d", "Delete workspace"),
            key("u", "Upload PDF"),
            key("a", "Add documents to a workspace"),
            key("x", "Remove document from its workspace"),
            key("r", "Refresh lists"),
            key("p / o", "Profile / log out"),
            blank(),
            section("Dialogs"),
            key("Tab", "Next field or list"),
            key("Space", "Select in lists"),
            key("Enter", "Submit"),
        ]),
        Route::Profile => rows.extend([
            section("Profile"),
            key("←/→", "Switch tab"),
            key("t", "Cycle theme"),
            key("h", "Back home"),
            key("o", "Log out"),
        ]),
        Route::Landing | Route::Login | Route::Register => rows.extend([
            section("Welcome"),
            key("l", "Login"),
            key("r / Enter", "Register"),
            key("Tab", "Next field in forms"),
        ]),
    }

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(10)])
        .block(panel_block("Help", theme))
        .column_spacing(2);
    frame.render_widget(table, block);
}

fn draw_background(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default().style(Style::default().bg(theme.bg).fg(theme.text));
    frame.render_widget(block, area);
}

fn panel_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style())
        .style(theme.panel_style())
        .title(Line::from(Span::styled(
            format!(" {} ", title),
            theme.title_style(),
        )))
}

#[derive(Clone, Copy)]
struct Theme {
    bg: Color,
    panel: Color,
    border: Color,
    text: Color,
    muted: Color,
    accent: Color,
    highlight: Color,
    success: Color,
    error: Color,
    accent_dark: Color,
}

impl Theme {
    fn panel_style(&self) -> Style {
        Style::default().bg(self.panel).fg(self.text)
    }

    fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    fn accent_contrast(&self) -> Color {
        if matches!(self.bg, Color::Rgb(242, 244, 248)) {
            self.accent_dark
        } else {
            Color::Black
        }
    }
}

fn theme_from(pref: ThemePreference) -> Theme {
    match pref {
        ThemePreference::Terminal => Theme {
            bg: Color::Reset,
            panel: Color::Reset,
            border: Color::DarkGray,
            text: Color::Reset,
            muted: Color::DarkGray,
            accent: Color::Blue,
            highlight: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            accent_dark: Color::Black,
        },
        ThemePreference::Dark => Theme {
            bg: Color::Rgb(14, 20, 30),
            panel: Color::Rgb(22, 30, 44),
            border: Color::Rgb(52, 70, 96),
            text: Color::Rgb(225, 232, 245),
            muted: Color::Rgb(140, 156, 182),
            accent: Color::Rgb(96, 165, 250),
            highlight: Color::Rgb(250, 204, 21),
            success: Color::Rgb(74, 222, 128),
            error: Color::Rgb(248, 113, 113),
            accent_dark: Color::Rgb(30, 58, 138),
        },
        ThemePreference::Light => Theme {
            bg: Color::Rgb(242, 244, 248),
            panel: Color::Rgb(255, 255, 255),
            border: Color::Rgb(209, 213, 219),
            text: Color::Rgb(31, 41, 55),
            muted: Color::Rgb(107, 114, 128),
            accent: Color::Rgb(37, 99, 235),
            highlight: Color::Rgb(217, 119, 6),
            success: Color::Rgb(22, 163, 74),
            error: Color::Rgb(220, 38, 38),
            accent_dark: Color::Rgb(30, 58, 138),
        },
    }
}

fn theme_label(theme: ThemePreference) -> &'static str {
    match theme {
        ThemePreference::Terminal => "Terminal",
        ThemePreference::Dark => "Midnight",
        ThemePreference::Light => "Paper",
    }
}
