use chrono_tz::Tz;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{
    FilterDraft, Focus, MessageType, SIDEBAR_FIXED_ROWS, SIDEBAR_ROW_CAMERA, SIDEBAR_ROW_FROM,
    SIDEBAR_ROW_SEARCH, SIDEBAR_ROW_TO, StatusMessage,
};
use super::layout::{AppLayout, overlay_area};
use crate::models::{ChatTurn, Role, SummaryRecord, TurnContent};
use crate::present::display_model;

const ACCENT: Color = Color::Rgb(16, 185, 129); // Emerald
const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const BAR_BG: Color = Color::Rgb(24, 24, 27);
const ERROR: Color = Color::Rgb(239, 68, 68);

/// Everything the renderer needs for one frame.
pub struct RenderState<'a> {
    pub turns: &'a [ChatTurn],
    pub results: &'a [SummaryRecord],
    pub has_searched: bool,
    pub draft: &'a FilterDraft,
    pub input: &'a str,
    pub focus: Focus,
    pub sidebar_row: usize,
    pub busy: bool,
    pub searching: bool,
    pub detail: Option<&'a SummaryRecord>,
    pub status_message: Option<&'a StatusMessage>,
    pub timezone: Tz,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_sidebar(frame, layout.sidebar_area, state);
    render_transcript(frame, layout.transcript_area, state);
    render_input(frame, layout.input_area, state);
    render_status_bar(frame, layout.status_area, state);

    if let Some(record) = state.detail {
        render_detail_overlay(frame, frame.area(), record, state.timezone);
    }
}

fn border_style(focused: bool) -> Style {
    if focused { Style::default().fg(ACCENT) } else { Style::default().fg(MUTED) }
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let sidebar_focused = state.focus == Focus::Sidebar;
    let selected = |row: usize| sidebar_focused && state.sidebar_row == row;

    let camera_label = match state.draft.camera_id {
        Some(id) => format!("Camera {}", id),
        None => "All Cameras".to_string(),
    };

    let mut items: Vec<ListItem> = vec![
        ListItem::new(format!("Camera: {}", camera_label))
            .style(row_style(selected(SIDEBAR_ROW_CAMERA))),
        ListItem::new(format!("From:   {}", state.draft.start_time))
            .style(row_style(selected(SIDEBAR_ROW_FROM))),
        ListItem::new(format!("To:     {}", state.draft.end_time))
            .style(row_style(selected(SIDEBAR_ROW_TO))),
        ListItem::new(if state.searching { "Searching..." } else { "[ Search ]" })
            .style(row_style(selected(SIDEBAR_ROW_SEARCH))),
        ListItem::new(""),
        ListItem::new("SEARCH RESULTS").style(Style::default().fg(BRIGHT)),
    ];

    if state.results.is_empty() {
        let placeholder =
            if state.has_searched { "No results found" } else { "No search performed yet" };
        items.push(ListItem::new(placeholder).style(Style::default().fg(MUTED)));
    } else {
        for (idx, record) in state.results.iter().enumerate() {
            let display = display_model(record, state.timezone);
            let content =
                format!("{} | {}...", display.time_label, display.preview);
            items.push(ListItem::new(content).style(row_style(selected(SIDEBAR_FIXED_ROWS + idx))));
        }
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(sidebar_focused))
            .title(" Filters "),
    );

    frame.render_widget(list, area);
}

fn render_transcript(frame: &mut Frame, area: Rect, state: &RenderState) {
    let mut lines: Vec<Line> = Vec::new();
    for turn in state.turns {
        push_turn_lines(&mut lines, turn, state.timezone);
        lines.push(Line::from(""));
    }
    if state.busy {
        lines.push(Line::from(Span::styled("🤖 Analyzing...", Style::default().fg(MUTED))));
    }

    // Stick to the newest turn when the transcript overflows
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_height) as u16;

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Conversation "),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn push_turn_lines(lines: &mut Vec<Line>, turn: &ChatTurn, tz: Tz) {
    let (icon, name_style) = match turn.role {
        Role::User => ("👤", Style::default().fg(ACCENT)),
        Role::Assistant => ("🤖", Style::default().fg(BRIGHT)),
    };

    match &turn.content {
        TurnContent::Text(text) => {
            for (i, line) in text.lines().enumerate() {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{} ", icon), name_style),
                        Span::raw(line.to_string()),
                    ]));
                } else {
                    lines.push(Line::from(format!("   {}", line)));
                }
            }
        }
        TurnContent::Summaries(records) => {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", icon), name_style),
                Span::styled(
                    format!("Found {} video summaries", records.len()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            for record in records {
                let display = display_model(record, tz);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("   {} | {} | {}", display.camera_label, display.interval_label, display.time_label),
                        Style::default().fg(MUTED),
                    ),
                ]));
                for line in display.summary.lines() {
                    lines.push(Line::from(format!("   {}", line)));
                }
                if !record.frame_snapshots.is_empty() {
                    let frames = record
                        .frame_snapshots
                        .iter()
                        .map(|f| match f.frame_number {
                            Some(n) => format!("frame {}", n),
                            None => f.path.clone(),
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    lines.push(Line::from(Span::styled(
                        format!("   🖼 Frames: {}", frames),
                        Style::default().fg(MUTED),
                    )));
                }
                if !record.video_clips.is_empty() {
                    let clips = record
                        .video_clips
                        .iter()
                        .map(|c| c.filename.clone().unwrap_or_else(|| c.path.clone()))
                        .collect::<Vec<_>>()
                        .join(", ");
                    lines.push(Line::from(Span::styled(
                        format!("   📹 Clips: {}", clips),
                        Style::default().fg(MUTED),
                    )));
                }
                if let Some(frames_label) = display.frames_label {
                    lines.push(Line::from(Span::styled(
                        format!("   {}", frames_label),
                        Style::default().fg(MUTED),
                    )));
                }
            }
        }
    }
}

fn render_input(frame: &mut Frame, area: Rect, state: &RenderState) {
    let chat_focused = state.focus == Focus::Chat;
    let title = if state.busy { " Ask (waiting...) " } else { " Ask " };

    let content = if chat_focused {
        Line::from(vec![Span::raw(state.input), Span::styled("▏", Style::default().fg(ACCENT))])
    } else {
        Line::from(state.input)
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(chat_focused))
            .title(title),
    );

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Info => BRIGHT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", message.text), Style::default().fg(color).bg(BAR_BG))
    } else {
        let mut parts = vec![];

        if state.busy {
            parts.push("[BUSY]".to_string());
        }
        if state.searching {
            parts.push("[SEARCHING]".to_string());
        }
        if state.has_searched {
            parts.push(format!("{} results", state.results.len()));
        }

        match state.focus {
            Focus::Chat => parts.push("Enter: send".to_string()),
            Focus::Sidebar => parts.push("Enter: search/open | ←→: camera".to_string()),
        }
        parts.push("Tab: focus".to_string());
        if state.detail.is_some() {
            parts.push("Esc: close".to_string());
        }
        parts.push("Ctrl+C: quit".to_string());

        (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(BAR_BG))
    };

    let paragraph = Paragraph::new(status_text).style(style);

    frame.render_widget(paragraph, area);
}

fn render_detail_overlay(frame: &mut Frame, area: Rect, record: &SummaryRecord, tz: Tz) {
    let overlay = overlay_area(area);
    frame.render_widget(Clear, overlay);

    let display = display_model(record, tz);

    let label = |name: &str| Span::styled(format!("{:<10}", name), Style::default().fg(MUTED));

    let mut lines = vec![
        Line::from(vec![label("Camera"), Span::raw(display.camera_label.clone())]),
        Line::from(vec![label("Interval"), Span::raw(display.interval_label.to_uppercase())]),
        Line::from(vec![label("Time"), Span::raw(display.time_label.clone())]),
        Line::from(""),
        Line::from(Span::styled("Summary", Style::default().add_modifier(Modifier::BOLD))),
    ];
    for line in display.summary.lines() {
        lines.push(Line::from(line.to_string()));
    }

    if !record.frame_snapshots.is_empty() {
        lines.push(Line::from(""));
        let header = match display.frames_label.as_deref() {
            Some(counts) => format!("Frame Snapshots ({})", counts),
            None => "Frame Snapshots".to_string(),
        };
        lines.push(Line::from(Span::styled(header, Style::default().add_modifier(Modifier::BOLD))));
        for frame_snapshot in &record.frame_snapshots {
            let number = frame_snapshot
                .frame_number
                .map(|n| format!("Frame {}", n))
                .unwrap_or_else(|| "Frame".to_string());
            lines.push(Line::from(format!("  {} — {}", number, frame_snapshot.path)));
        }
    }

    if !record.video_clips.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Video Clips",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for clip in &record.video_clips {
            let name = clip.filename.clone().unwrap_or_else(|| clip.path.clone());
            let time = clip
                .timestamp
                .map(|t| t.with_timezone(&tz).format(" — %H:%M:%S").to_string())
                .unwrap_or_default();
            lines.push(Line::from(format!("  {}{} — {}", name, time, clip.path)));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(" Event Details ")
                .title_bottom(" Esc: close "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, overlay);
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::models::{FrameSnapshot, VideoClip};
    use crate::session::{DEFAULT_TIMEZONE, FilterStore, Session};

    fn test_record(summary: &str) -> SummaryRecord {
        SummaryRecord {
            camera_id: Some(1),
            interval: Some("10_00-10_05".to_string()),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            summary: summary.to_string(),
            frames_analyzed: Some(5),
            frames_sampled: Some(3),
            frame_snapshots: vec![FrameSnapshot {
                path: "/frames/f_0042.jpg".to_string(),
                frame_number: Some(42),
            }],
            video_clips: vec![VideoClip {
                path: "/clips/motion_001.mp4".to_string(),
                filename: Some("motion_001.mp4".to_string()),
                timestamp: None,
            }],
        }
    }

    fn draw(state: &RenderState) {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                render_ui(f, state);
            })
            .unwrap();
    }

    fn base_state<'a>(
        session: &'a Session,
        draft: &'a FilterDraft,
    ) -> RenderState<'a> {
        RenderState {
            turns: session.conversation.turns(),
            results: &session.recent_results,
            has_searched: session.has_searched,
            draft,
            input: "",
            focus: Focus::Chat,
            sidebar_row: 0,
            busy: false,
            searching: false,
            detail: None,
            status_message: None,
            timezone: DEFAULT_TIMEZONE,
        }
    }

    fn draft_for(store: &FilterStore) -> FilterDraft {
        FilterDraft::from_store(store)
    }

    #[test]
    fn test_render_fresh_session() {
        let session = Session::start();
        let draft = draft_for(&session.filters);
        draw(&base_state(&session, &draft));
    }

    #[test]
    fn test_render_with_turns_and_results() {
        let mut session = Session::start();
        session.conversation.push_user_text("what happened at the gate?");
        session.conversation.push_assistant_summaries(vec![test_record("a cat sits by the gate")]);
        session.recent_results = vec![test_record("a person walks past")];
        session.has_searched = true;

        let draft = draft_for(&session.filters);
        let mut state = base_state(&session, &draft);
        state.busy = true;
        state.searching = true;
        draw(&state);
    }

    #[test]
    fn test_render_no_results_after_search() {
        let mut session = Session::start();
        session.has_searched = true;

        let draft = draft_for(&session.filters);
        draw(&base_state(&session, &draft));
    }

    #[test]
    fn test_render_detail_overlay() {
        let session = Session::start();
        let record = test_record("a long summary of camera activity");

        let draft = draft_for(&session.filters);
        let mut state = base_state(&session, &draft);
        state.detail = Some(&record);
        draw(&state);
    }

    #[test]
    fn test_render_sidebar_focus_highlights_rows() {
        let mut session = Session::start();
        session.recent_results = vec![test_record("a cat")];
        session.has_searched = true;

        let draft = draft_for(&session.filters);
        let mut state = base_state(&session, &draft);
        state.focus = Focus::Sidebar;
        state.sidebar_row = SIDEBAR_FIXED_ROWS; // first result row
        draw(&state);
    }

    #[test]
    fn test_render_status_message() {
        let session = Session::start();
        let draft = draft_for(&session.filters);
        let message = StatusMessage {
            text: "Search failed".to_string(),
            message_type: MessageType::Error,
            expires_at: std::time::Instant::now(),
        };

        let mut state = base_state(&session, &draft);
        state.status_message = Some(&message);
        draw(&state);
    }

    #[test]
    fn test_transcript_error_turn_renders() {
        let mut session = Session::start();
        session.conversation.push_user_text("anything?");
        session.conversation.push_assistant_text("Error: backend down");

        let draft = draft_for(&session.filters);
        draw(&base_state(&session, &draft));
    }
}
