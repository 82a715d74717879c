use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Split-pane layout configuration
pub struct AppLayout {
    pub sidebar_area: Rect,
    pub transcript_area: Rect,
    pub input_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create split-pane layout:
    /// - Sidebar (filters + results): 30% width (left)
    /// - Chat transcript: 70% width (right)
    /// - Input box: 3 rows above the status bar
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        // Vertical split: main area + input box + status bar
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Main area (at least 3 rows)
                Constraint::Length(3), // Input box (bordered, 3 rows)
                Constraint::Length(1), // Status bar (1 row)
            ])
            .split(area);

        // Horizontal split: sidebar + transcript
        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30), // Sidebar
                Constraint::Percentage(70), // Transcript
            ])
            .split(vertical_chunks[0]);

        Self {
            sidebar_area: horizontal_chunks[0],
            transcript_area: horizontal_chunks[1],
            input_area: vertical_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}

/// Centered overlay rectangle for the detail view (80% of each dimension).
pub fn overlay_area(area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(vertical[1]);

    horizontal[1]
}
