//! Display utilities for the tomato timer CLI.
//!
//! This module is the presentation layer: it renders timer state pushed
//! back from the daemon, including the countdown and a progress bar sized
//! by the engine-reported progress fraction.

use crate::types::{IpcResponse, TimerSettings};

/// Width of the status progress bar in cells.
const PROGRESS_BAR_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a success message for timer start.
    pub fn show_start_success(response: &IpcResponse) {
        println!("* タイマーを開始しました");
        Self::show_remaining(response);
    }

    /// Shows a success message for timer pause.
    pub fn show_pause_success(response: &IpcResponse) {
        println!("|| タイマーを一時停止しました");
        Self::show_remaining(response);
    }

    /// Shows a success message for timer reset.
    pub fn show_reset_success(response: &IpcResponse) {
        println!("[] タイマーをリセットしました");
        Self::show_remaining(response);
    }

    /// Shows a success message for a mode switch.
    pub fn show_switch_success(response: &IpcResponse) {
        println!("> モードを切り替えました");

        if let Some(data) = &response.data {
            if let Some(mode) = data.mode.as_deref() {
                println!("  モード: {}", Self::mode_label(mode));
            }
        }
        Self::show_remaining(response);
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        println!("ポモドーロタイマー ステータス");
        println!("─────────────────────────────");

        let Some(data) = &response.data else {
            println!("タイマーは起動していません");
            return;
        };

        let mode = data.mode.as_deref().unwrap_or("unknown");
        println!("モード: {}", Self::mode_label(mode));

        let running = data.running.unwrap_or(false);
        println!("状態: {}", if running { "実行中" } else { "停止中" });

        if let Some(remaining) = data.remaining_seconds {
            let (minutes, seconds) = Self::format_time(remaining);
            println!("残り時間: {}:{:02}", minutes, seconds);
        }
        if let Some(progress) = data.progress {
            println!("進捗: {}", Self::render_progress_bar(progress));
        }
        if let Some(sessions) = data.completed_sessions {
            println!("完了セッション: {}", sessions);
        }
    }

    /// Shows the persisted settings.
    pub fn show_settings(settings: &TimerSettings) {
        println!("ポモドーロタイマー 設定");
        println!("─────────────────────────────");
        println!("作業時間: {}分", settings.work_seconds / 60);
        println!("短い休憩: {}分", settings.short_break_seconds / 60);
        println!("長い休憩: {}分", settings.long_break_seconds / 60);
        println!(
            "長い休憩までのセッション数: {}",
            settings.sessions_before_long_break
        );
    }

    /// Shows a success message for a settings update.
    pub fn show_settings_saved(response: &IpcResponse) {
        println!("* 設定を保存しました");

        if let Some(settings) = response.data.as_ref().and_then(|d| d.settings.as_ref()) {
            Self::show_settings(settings);
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Prints the remaining time line when present.
    fn show_remaining(response: &IpcResponse) {
        if let Some(data) = &response.data {
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                println!("  残り時間: {}:{:02}", minutes, seconds);
            }
        }
    }

    /// Maps a wire mode name to its display label.
    fn mode_label(mode: &str) -> &str {
        match mode {
            "work" => "作業",
            "short_break" => "短い休憩",
            "long_break" => "長い休憩",
            other => other,
        }
    }

    /// Renders a textual progress bar for a fraction in [0, 1].
    fn render_progress_bar(fraction: f64) -> String {
        let clamped = fraction.clamp(0.0, 1.0);
        let filled = ((clamped * PROGRESS_BAR_WIDTH as f64).round() as usize).min(PROGRESS_BAR_WIDTH);

        let mut bar = String::with_capacity(PROGRESS_BAR_WIDTH * 3 + 8);
        bar.push_str(&"█".repeat(filled));
        bar.push_str(&"░".repeat(PROGRESS_BAR_WIDTH - filled));
        format!("{} {:3.0}%", bar, clamped * 100.0)
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
