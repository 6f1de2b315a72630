// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the wikindex CLI.
//!
//! Colors follow OneDark on dark terminals and One Light on light ones.
//! `WIKINDEX_THEME` picks explicitly, otherwise `COLORFGBG` is consulted, and
//! dark wins when nothing says otherwise. `NO_COLOR` and non-TTY stdout turn
//! color off entirely, so piping results into other tools stays clean.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use wikindex::build::BuildSummary;
use wikindex::clean::CleanSummary;
use wikindex::TableInfo;

// Width between │ and │
pub const BOX_WIDTH: usize = 60;

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("WIKINDEX_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", background 7 and up (except 8) is light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

/// (dark, light) pairs
mod palette {
    pub const RED: ((u8, u8, u8), (u8, u8, u8)) = ((224, 108, 117), (228, 86, 73));
    pub const GREEN: ((u8, u8, u8), (u8, u8, u8)) = ((152, 195, 121), (80, 161, 79));
    pub const YELLOW: ((u8, u8, u8), (u8, u8, u8)) = ((229, 192, 123), (193, 132, 1));
    pub const CYAN: ((u8, u8, u8), (u8, u8, u8)) = ((86, 182, 194), (1, 132, 188));
    pub const GRAY: ((u8, u8, u8), (u8, u8, u8)) = ((92, 99, 112), (160, 161, 167));
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (dark, light) = palette::$name;
            match theme() {
                Theme::Dark => rgb(dark),
                Theme::Light => rgb(light),
            }
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors only on a TTY, and never with `NO_COLOR` set.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length without ANSI escapes
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", " ".repeat(pad), s)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(text: &str) -> String {
    themed(GRAY, &[], text)
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!("{} {}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_build_summary(summary: &BuildSummary) {
    section_top("BUILD");
    row(&format!("pages     {}", pad_left(&summary.pages.to_string(), 10)));
    row(&format!("strings   {}", pad_left(&summary.strings.to_string(), 10)));
    if summary.terms > 0 {
        row(&format!("terms     {}", pad_left(&summary.terms.to_string(), 10)));
    }
    if let Some(links) = summary.links {
        row(&format!("backlinks {}", pad_left(&links.written.to_string(), 10)));
        row(&format!(
            "dropped   {}",
            themed(
                YELLOW,
                &[],
                &pad_left(&links.dropped_targets.to_string(), 10)
            )
        ));
    }
    section_bot();
}

pub fn print_clean_summary(summary: &CleanSummary) {
    section_top("CLEAN");
    row(&format!("written   {}", pad_left(&summary.written.to_string(), 10)));
    if summary.skipped > 0 {
        row(&format!(
            "skipped   {}",
            themed(RED, &[], &pad_left(&summary.skipped.to_string(), 10))
        ));
    }
    section_bot();
}

pub fn print_tables(index: &str, tables: &[TableInfo]) {
    section_top(index);
    if tables.is_empty() {
        row(&themed(YELLOW, &[], "no tables"));
    }
    for table in tables {
        row(&format!(
            "{:<8}{} entries {} atlas {} data",
            themed(CYAN, &[BOLD], table.name),
            pad_left(&table.entries.to_string(), 10),
            pad_left(&format_size(table.atlas_bytes), 10),
            pad_left(&format_size(table.data_bytes), 10),
        ));
    }
    section_bot();
}

/// One result per line; the count goes to stderr so stdout stays pipeable.
pub fn print_results(results: &BTreeSet<String>) {
    for name in results {
        println!("{}", themed(GREEN, &[], name));
    }
    eprintln!("{} result{}", results.len(), if results.len() == 1 { "" } else { "s" });
}
