use std::borrow::Cow;

use task_tracker_core::Task;
use time::OffsetDateTime;
use time::UtcOffset;
use time::macros::format_description;
use unicode_segmentation::UnicodeSegmentation;

const ID_WIDTH: usize = 6;
const DESCRIPTION_WIDTH: usize = 50;
const STATUS_WIDTH: usize = 12;
const TIMESTAMP_WIDTH: usize = 19;
const WIDTHS: [usize; 5] = [
    ID_WIDTH,
    DESCRIPTION_WIDTH,
    STATUS_WIDTH,
    TIMESTAMP_WIDTH,
    TIMESTAMP_WIDTH,
];

/// Box-drawn table of tasks, one row per task, ending with a newline.
///
/// With no tasks only the header box is drawn.
pub(super) fn task_table(tasks: &[Task]) -> String {
    let mut out = String::new();
    out.push_str(&border('┌', '┬', '┐'));
    out.push_str(&row(["ID", "Description", "Status", "CreatedAt", "UpdatedAt"]));
    for task in tasks {
        let id = task.id.to_string();
        let description = truncate_with_ellipsis(&task.description, DESCRIPTION_WIDTH);
        let created = format_timestamp(task.created_at);
        let updated = format_timestamp(task.updated_at);
        out.push_str(&border('├', '┼', '┤'));
        out.push_str(&row([
            id.as_str(),
            &*description,
            task.status.as_str(),
            created.as_str(),
            updated.as_str(),
        ]));
    }
    out.push_str(&border('└', '┴', '┘'));
    out
}

fn border(left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = WIDTHS.iter().map(|width| "─".repeat(width + 2)).collect();
    let middle = middle.to_string();
    format!("{left}{}{right}\n", segments.join(middle.as_str()))
}

fn row(cells: [&str; 5]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(WIDTHS)
        .map(|(cell, width)| {
            let fill = width.saturating_sub(cell.graphemes(true).count());
            format!(" {cell}{} ", " ".repeat(fill))
        })
        .collect();
    format!("│{}│\n", padded.join("│"))
}

/// Shown in UTC so output does not depend on the machine's zone.
fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| "-".to_owned())
}

fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_GRAPHEMES: usize = 3;

    let grapheme_count = input.graphemes(true).count();
    if grapheme_count <= max_graphemes {
        return Cow::Borrowed(input);
    }

    if max_graphemes <= ELLIPSIS_GRAPHEMES {
        return Cow::Owned(input.graphemes(true).take(max_graphemes).collect());
    }

    let keep = max_graphemes - ELLIPSIS_GRAPHEMES;
    let mut truncated: String = input.graphemes(true).take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}
