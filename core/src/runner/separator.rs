//! Separator line rendering.
use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, TimeZone};
use crossterm::style::Stylize;

use crate::util::format_elapsed;

#[derive(Debug, Clone, Copy)]
pub struct SeparatorStyle<'a> {
    pub dash: &'a str,
    pub color: bool,
}

/// Renders `"{date} {time} {elapsed} {dash...}\n"`.
///
/// The dash fills the line up to `width` columns, measured on the uncolored
/// fields. When the fields alone are wider than `width` no dash is written;
/// the fields themselves are never cut.
pub fn render_separator<Tz>(
    now: &DateTime<Tz>,
    elapsed: Duration,
    style: SeparatorStyle<'_>,
    width: usize,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = now.format("%Y-%m-%d").to_string();
    let time = now.format("%H:%M:%S").to_string();
    let dur = format_elapsed(elapsed);
    let filled = date.chars().count() + time.chars().count() + dur.chars().count() + 3;
    let fill = style.dash.repeat(width.saturating_sub(filled));

    if style.color {
        format!(
            "{} {} {} {}\n",
            date.green(),
            time.yellow(),
            dur.blue(),
            fill
        )
    } else {
        format!("{date} {time} {dur} {fill}\n")
    }
}
