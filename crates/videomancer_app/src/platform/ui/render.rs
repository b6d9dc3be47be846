use std::fmt::Write;

use videomancer_core::{AppViewModel, GenerationView, NoticeSeverity, RecordView, PROGRESS_MAX};

const BAR_WIDTH: usize = 20;
const RULE: &str = "------------------------------------------------------------";

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "VideoMancer                                NATO HACKATHON 2025");
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "Generate New Video");
    let _ = writeln!(
        out,
        "  Style:    {} ({})",
        view.style.display_name(),
        view.style.id()
    );
    let scenario = if view.draft_text.trim().is_empty() {
        "(describe your wargaming scenario in detail...)"
    } else {
        view.draft_text.as_str()
    };
    let _ = writeln!(out, "  Scenario: {scenario}");
    let _ = writeln!(
        out,
        "  [{}]{}",
        view.submit_label,
        if view.submit_enabled { "" } else { " (disabled)" }
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Generation Status");
    match (&view.generation, &view.player) {
        (Some(generation), _) => {
            let _ = writeln!(out, "  Generating Video");
            let _ = writeln!(out, "  {}", progress_line(generation));
        }
        (None, Some(player)) => {
            let _ = writeln!(
                out,
                "  ▶ {}  [{}]",
                player.title,
                player.style.display_name()
            );
            let _ = writeln!(out, "    {}", player.video_url);
        }
        (None, None) => {
            let _ = writeln!(
                out,
                "  No video selected. Generate a new video or select one from history."
            );
        }
    }

    if !view.recent.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recent Generations");
        for record in &view.recent {
            let _ = writeln!(out, "  {}", format_record_row(record));
        }
    }

    if view.sidebar_open {
        let _ = writeln!(out);
        let _ = writeln!(out, "Video History");
        if view.history.is_empty() {
            let _ = writeln!(out, "  No videos generated yet");
            let _ = writeln!(
                out,
                "  Create your first wargaming video by filling out the scenario form"
            );
        } else {
            for record in &view.history {
                let _ = writeln!(out, "  {} {}", history_icon(record), format_record_row(record));
            }
        }
    }

    if let Some(notice) = &view.notice {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}", severity_marker(notice.severity), notice.text);
    }

    let _ = write!(out, "{RULE}");
    out
}

/// Single-line progress panel, e.g. `[#########...........] 45%  Rendering video...`.
pub fn progress_line(generation: &GenerationView) -> String {
    let filled = usize::from(generation.progress.min(PROGRESS_MAX)) * BAR_WIDTH
        / usize::from(PROGRESS_MAX);
    format!(
        "[{}{}] {:>3}%  {}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        generation.progress,
        generation.stage_label
    )
}

fn format_record_row(record: &RecordView) -> String {
    let marker = if record.selected { ">" } else { " " };
    format!(
        "{marker} #{id} {title} ({time})",
        id = record.id,
        title = record.title,
        time = record.created_at
    )
}

/// Thumbnail when the record has one, the style badge otherwise.
fn history_icon(record: &RecordView) -> String {
    match &record.thumbnail_url {
        Some(url) => format!("[img {url}]"),
        None => record.style.badge().to_string(),
    }
}

fn severity_marker(severity: NoticeSeverity) -> &'static str {
    match severity {
        NoticeSeverity::Info => "[i]",
        NoticeSeverity::Success => "[ok]",
        NoticeSeverity::Warning => "[!]",
        NoticeSeverity::Error => "[x]",
    }
}
