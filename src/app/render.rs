//! Terminal rendering of tasks: the list table and the single task view.

use std::io::{self, Write};

use chrono::Local;
use crossterm::style::{Color, Stylize};
use derivative::Derivative;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::models::Task;

// Narrower terminals still render, but with a warning first
pub const MIN_COMFORTABLE_WIDTH: u16 = 75;

const LABEL_WIDTH: usize = 25;
const DESCRIPTION_WRAP_WIDTH: usize = 35;
const BANNER_WIDTH: usize = 60;
const PLACEHOLDER: &str = "...";

// Output geometry and whether to emit ANSI colors
#[derive(Derivative, Debug, Clone, Copy, PartialEq, Eq)]
#[derivative(Default)]
pub struct Layout {
    #[derivative(Default(value = "80"))]
    pub width: u16,
    pub color: bool,
}

impl Layout {
    // Take the width of the attached terminal, keep the default otherwise
    pub fn detect(color: bool) -> Layout {
        let width = match crossterm::terminal::size() {
            Ok((columns, _)) if columns > 0 => columns,
            _ => Layout::default().width,
        };
        Layout { width, color }
    }

    fn paint(&self, text: String, fg: Color) -> String {
        if self.color {
            text.with(fg).to_string()
        } else {
            text
        }
    }

    fn banner(&self, text: String) -> String {
        if self.color {
            text.black().on_green().to_string()
        } else {
            text
        }
    }

    pub fn success(&self, message: &str) -> String {
        self.paint(message.to_string(), Color::Green)
    }

    pub fn failure(&self, message: &str) -> String {
        self.paint(message.to_string(), Color::Red)
    }

    pub fn warning(&self, message: &str) -> String {
        self.paint(message.to_string(), Color::Yellow)
    }

    fn status(&self, is_done: bool, width: usize) -> String {
        if is_done {
            self.paint(format!("{:<width$}", "Done"), Color::Green)
        } else {
            self.paint(format!("{:<width$}", "Not Done"), Color::Red)
        }
    }
}

// Column widths of the list table, as shares of the full width
struct Columns {
    id: usize,
    name: usize,
    description: usize,
    status: usize,
}

impl Columns {
    fn for_width(width: u16) -> Columns {
        let width = usize::from(width);
        Columns {
            id: width * 4 / 100,
            name: width * 34 / 100,
            description: width * 44 / 100,
            status: width * 14 / 100,
        }
    }
}

pub fn write_task_list(out: &mut impl Write, tasks: &[Task], layout: &Layout) -> io::Result<()> {
    if layout.width < MIN_COMFORTABLE_WIDTH {
        let warning = format!(
            "Warning: Your terminal width is {} which is too small, \
             make it wider to display contents correctly.",
            layout.width
        );
        writeln!(out, "{}\n", layout.warning(&warning))?;
    }

    let columns = Columns::for_width(layout.width);
    let header = format!(
        "{:<id$} {:<name$} {:<desc$} {:<status$}",
        "ID",
        "Name",
        "Description",
        "Status",
        id = columns.id,
        name = columns.name,
        desc = columns.description,
        status = columns.status,
    );
    writeln!(out, "{}", layout.banner(header))?;

    for task in tasks {
        let name = shorten(&task.name, columns.name);
        let description = match &task.description {
            Some(description) => shorten(description, columns.description.saturating_sub(3)),
            None => "-".to_string(),
        };
        writeln!(
            out,
            "{:<id$} {} {} {}",
            task.id,
            pad(&name, columns.name),
            pad(&description, columns.description),
            layout.status(task.is_done, columns.status),
            id = columns.id,
        )?;
    }
    Ok(())
}

pub fn write_task(out: &mut impl Write, task: &Task, layout: &Layout) -> io::Result<()> {
    let label = |text: &str| layout.paint(format!("{text:<LABEL_WIDTH$}"), Color::Green);

    let description = match &task.description {
        Some(description) => {
            let indent = format!("\n{:LABEL_WIDTH$}", "");
            wrap(description, DESCRIPTION_WRAP_WIDTH).join(indent.as_str())
        }
        None => "_".to_string(),
    };
    let date = task.created_date.with_timezone(&Local).format("%A, %B %d, %Y");

    writeln!(
        out,
        "{}",
        layout.banner(format!("{:^BANNER_WIDTH$}", "Task Details"))
    )?;
    writeln!(out, "{}{}", label("Id"), task.id)?;
    writeln!(out, "{}{}", label("Name"), task.name)?;
    writeln!(out, "{}{}", label("Description"), description)?;
    writeln!(out, "{}{}", label("Status"), layout.status(task.is_done, 0))?;
    writeln!(out, "{}{}", label("Date"), date)?;
    Ok(())
}

// Greedy word wrap in terminal cells; words longer than a line are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.width() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            // A single wide char may not fit a very narrow line, take it anyway
            let head = match prefix_within(word, width) {
                "" => word.chars().next().map_or(word.len(), char::len_utf8),
                prefix => prefix.len(),
            };
            let (line, rest) = word.split_at(head);
            lines.push(line.to_string());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// Collapse whitespace and drop trailing words until the text, plus a
// placeholder, fits in `width` terminal cells
pub fn shorten(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.width() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(PLACEHOLDER.len());
    let mut kept = String::new();
    for word in words {
        let extra = if kept.is_empty() { 0 } else { 1 };
        if kept.width() + extra + word.width() > budget {
            break;
        }
        if extra == 1 {
            kept.push(' ');
        }
        kept.push_str(word);
    }
    if kept.is_empty() {
        // Not even one word fits, cut inside it
        kept = prefix_within(&collapsed, budget).to_string();
    }
    kept.push_str(PLACEHOLDER);
    prefix_within(&kept, width.max(PLACEHOLDER.len())).to_string()
}

// Right-pad with spaces to `width` cells; `format!` widths count chars
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

// Longest prefix of `text` that takes at most `max` cells
fn prefix_within(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (index, c) in text.char_indices() {
        used += c.width().unwrap_or(0);
        if used > max {
            return &text[..index];
        }
    }
    text
}
