/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for archived or inactive habits, plain otherwise.
pub fn color_for_habit(is_archived: bool, is_active: bool) -> &'static str {
    if !is_active || is_archived { GREY } else { RESET }
}

/// Green while a timer runs, grey when idle.
pub fn color_for_timer(is_running: bool) -> &'static str {
    if is_running { GREEN } else { GREY }
}
