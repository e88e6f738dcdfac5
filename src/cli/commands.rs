//! Command definitions for the tomato timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::{Mode, SettingsParams};

// ============================================================================
// CLI Structure
// ============================================================================

/// Tomato Timer CLI - a pomodoro interval timer
#[derive(Parser, Debug)]
#[command(
    name = "tomato",
    version,
    about = "ポモドーロタイマーCLI",
    long_about = "ターミナル上で動作するシンプルなポモドーロタイマー。\n\
                  作業と休憩を自動で切り替え、セッション完了をチャイムと通知で知らせます。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start or resume the countdown
    Start,

    /// Pause the countdown
    Pause,

    /// Reset the countdown for the current mode
    Reset,

    /// Switch to another mode (resets the countdown)
    Switch {
        /// Target mode
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Show current timer status
    Status,

    /// Show or update the duration settings
    Settings(SettingsArgs),

    /// Run as daemon (background service)
    #[command(hide = true)]
    Daemon,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Mode Argument
// ============================================================================

/// Mode selector for the switch command.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Work period
    Work,
    /// Short break
    ShortBreak,
    /// Long break
    LongBreak,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Work => Mode::Work,
            ModeArg::ShortBreak => Mode::ShortBreak,
            ModeArg::LongBreak => Mode::LongBreak,
        }
    }
}

// ============================================================================
// Settings Command Arguments
// ============================================================================

/// Arguments for the settings command.
///
/// Without any flag the current settings are shown; with at least one flag
/// the given fields are updated and persisted.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Work duration in minutes (1-60)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub work: Option<u32>,

    /// Short break duration in minutes (1-30)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=30)
    )]
    pub short_break: Option<u32>,

    /// Long break duration in minutes (1-60)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub long_break: Option<u32>,

    /// Work sessions before a long break (1-10)
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    pub sessions: Option<u32>,
}

impl SettingsArgs {
    /// Returns true if no field was given.
    pub fn is_empty(&self) -> bool {
        self.work.is_none()
            && self.short_break.is_none()
            && self.long_break.is_none()
            && self.sessions.is_none()
    }

    /// Converts the arguments to IPC settings parameters.
    pub fn to_params(&self) -> SettingsParams {
        SettingsParams {
            work_minutes: self.work,
            short_break_minutes: self.short_break,
            long_break_minutes: self.long_break,
            sessions: self.sessions,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["tomato"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["tomato", "--verbose"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_short_verbose_flag() {
            let cli = Cli::parse_from(["tomato", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_start_command() {
            let cli = Cli::parse_from(["tomato", "start"]);
            assert!(matches!(cli.command, Some(Commands::Start)));
        }

        #[test]
        fn test_parse_pause_command() {
            let cli = Cli::parse_from(["tomato", "pause"]);
            assert!(matches!(cli.command, Some(Commands::Pause)));
        }

        #[test]
        fn test_parse_reset_command() {
            let cli = Cli::parse_from(["tomato", "reset"]);
            assert!(matches!(cli.command, Some(Commands::Reset)));
        }

        #[test]
        fn test_parse_status_command() {
            let cli = Cli::parse_from(["tomato", "status"]);
            assert!(matches!(cli.command, Some(Commands::Status)));
        }

        #[test]
        fn test_parse_daemon_command() {
            let cli = Cli::parse_from(["tomato", "daemon"]);
            assert!(matches!(cli.command, Some(Commands::Daemon)));
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["tomato", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }

        #[test]
        fn test_parse_completions_zsh() {
            let cli = Cli::parse_from(["tomato", "completions", "zsh"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Zsh);
                }
                _ => panic!("Expected Completions command"),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Switch Command Tests
    // ------------------------------------------------------------------------

    mod switch_tests {
        use super::*;

        #[test]
        fn test_parse_switch_work() {
            let cli = Cli::parse_from(["tomato", "switch", "work"]);
            match cli.command {
                Some(Commands::Switch { mode }) => assert_eq!(mode, ModeArg::Work),
                _ => panic!("Expected Switch command"),
            }
        }

        #[test]
        fn test_parse_switch_short_break() {
            let cli = Cli::parse_from(["tomato", "switch", "short-break"]);
            match cli.command {
                Some(Commands::Switch { mode }) => assert_eq!(mode, ModeArg::ShortBreak),
                _ => panic!("Expected Switch command"),
            }
        }

        #[test]
        fn test_parse_switch_long_break() {
            let cli = Cli::parse_from(["tomato", "switch", "long-break"]);
            match cli.command {
                Some(Commands::Switch { mode }) => assert_eq!(mode, ModeArg::LongBreak),
                _ => panic!("Expected Switch command"),
            }
        }

        #[test]
        fn test_mode_arg_conversion() {
            assert_eq!(Mode::from(ModeArg::Work), Mode::Work);
            assert_eq!(Mode::from(ModeArg::ShortBreak), Mode::ShortBreak);
            assert_eq!(Mode::from(ModeArg::LongBreak), Mode::LongBreak);
        }

        #[test]
        fn test_parse_switch_requires_mode() {
            let result = Cli::try_parse_from(["tomato", "switch"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_switch_invalid_mode() {
            let result = Cli::try_parse_from(["tomato", "switch", "nap"]);
            assert!(result.is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Settings Command Tests
    // ------------------------------------------------------------------------

    mod settings_args_tests {
        use super::*;

        #[test]
        fn test_parse_settings_no_flags() {
            let cli = Cli::parse_from(["tomato", "settings"]);
            match cli.command {
                Some(Commands::Settings(args)) => {
                    assert!(args.is_empty());
                }
                _ => panic!("Expected Settings command"),
            }
        }

        #[test]
        fn test_parse_settings_work() {
            let cli = Cli::parse_from(["tomato", "settings", "--work", "30"]);
            match cli.command {
                Some(Commands::Settings(args)) => {
                    assert_eq!(args.work, Some(30));
                    assert!(!args.is_empty());
                }
                _ => panic!("Expected Settings command"),
            }
        }

        #[test]
        fn test_parse_settings_all_flags() {
            let cli = Cli::parse_from([
                "tomato",
                "settings",
                "--work",
                "50",
                "--short-break",
                "10",
                "--long-break",
                "30",
                "--sessions",
                "2",
            ]);
            match cli.command {
                Some(Commands::Settings(args)) => {
                    assert_eq!(args.work, Some(50));
                    assert_eq!(args.short_break, Some(10));
                    assert_eq!(args.long_break, Some(30));
                    assert_eq!(args.sessions, Some(2));
                }
                _ => panic!("Expected Settings command"),
            }
        }

        #[test]
        fn test_parse_settings_short_flags() {
            let cli = Cli::parse_from(["tomato", "settings", "-w", "45", "-s", "7", "-l", "20"]);
            match cli.command {
                Some(Commands::Settings(args)) => {
                    assert_eq!(args.work, Some(45));
                    assert_eq!(args.short_break, Some(7));
                    assert_eq!(args.long_break, Some(20));
                }
                _ => panic!("Expected Settings command"),
            }
        }

        #[test]
        fn test_settings_args_to_params() {
            let args = SettingsArgs {
                work: Some(30),
                sessions: Some(5),
                ..Default::default()
            };
            let params = args.to_params();

            assert_eq!(params.work_minutes, Some(30));
            assert_eq!(params.sessions, Some(5));
            assert!(params.short_break_minutes.is_none());
            assert!(params.long_break_minutes.is_none());
        }

        #[test]
        fn test_parse_settings_boundary_values() {
            let cli = Cli::parse_from(["tomato", "settings", "--work", "1"]);
            match cli.command {
                Some(Commands::Settings(args)) => assert_eq!(args.work, Some(1)),
                _ => panic!("Expected Settings command"),
            }

            let cli = Cli::parse_from(["tomato", "settings", "--work", "60"]);
            match cli.command {
                Some(Commands::Settings(args)) => assert_eq!(args.work, Some(60)),
                _ => panic!("Expected Settings command"),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Error Case Tests (using try_parse)
    // ------------------------------------------------------------------------

    mod error_tests {
        use super::*;

        #[test]
        fn test_parse_settings_work_too_low() {
            let result = Cli::try_parse_from(["tomato", "settings", "--work", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_settings_work_too_high() {
            let result = Cli::try_parse_from(["tomato", "settings", "--work", "61"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_settings_short_break_too_high() {
            let result = Cli::try_parse_from(["tomato", "settings", "--short-break", "31"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_settings_long_break_too_high() {
            let result = Cli::try_parse_from(["tomato", "settings", "--long-break", "61"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_settings_sessions_too_high() {
            let result = Cli::try_parse_from(["tomato", "settings", "--sessions", "11"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_settings_sessions_zero() {
            let result = Cli::try_parse_from(["tomato", "settings", "--sessions", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_settings_work_not_number() {
            let result = Cli::try_parse_from(["tomato", "settings", "--work", "abc"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_unknown_command() {
            let result = Cli::try_parse_from(["tomato", "unknown"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_completions_invalid_shell() {
            let result = Cli::try_parse_from(["tomato", "completions", "invalid"]);
            assert!(result.is_err());
        }
    }
}
