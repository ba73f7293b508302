//! Plain-text rendering of a [`ResultsView`]

use crate::stats::Stat;
use crate::view::ResultsView;

/// Render seconds as hours, minutes and seconds, rounding up.
///
/// `0 s` for zero, negative or non-finite input.
#[must_use]
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0 s".to_string();
    }

    let total = secs.ceil() as u64;
    let (hours, mins, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{} h {} min {} s", hours, mins, secs)
    } else if mins > 0 {
        format!("{} min {} s", mins, secs)
    } else {
        format!("{} s", secs)
    }
}

/// Render the view as a text table with one column per tool run
#[must_use]
pub fn render_text(view: &ResultsView) -> String {
    let mut out = String::new();
    let grouping = view
        .groupings
        .get(view.grouping_index)
        .map_or("", |g| g.display_name.as_str());

    out.push_str(&format!("=== Results ({}) ===\n", grouping));
    out.push_str(&format!("{:<28}", ""));
    for run in &view.runs {
        out.push_str(&format!(" {:>24}", format!("{} {}", run.tool, run.description())));
    }
    out.push('\n');

    let sections = view.sets.iter().chain(std::iter::once(&view.overall));
    for section in sections {
        // inline view prefixes rows with the set name instead of a heading
        let prefix = if view.options.inline_view {
            format!("{} / ", section.set.name)
        } else {
            out.push_str(&format!("\n{}\n", section.set.name));
            String::new()
        };

        for (b, bucket) in view.buckets.iter().enumerate() {
            out.push_str(&format!("  {:<26}", format!("{}{}", prefix, bucket.display_name())));
            for r in 0..view.runs.len() {
                out.push_str(&format!(
                    " {:>24}",
                    cell_text(section.cell(b, r), view.options.show_times)
                ));
            }
            out.push('\n');
        }

        out.push_str(&format!("  {:<26}", format!("{}total", prefix)));
        for total in &section.totals {
            let text = match total {
                Some(t) if view.options.show_times => {
                    format!("{} ({})", t.count, format_time(t.accumulated_time))
                }
                Some(t) => t.count.to_string(),
                None => "-".to_string(),
            };
            out.push_str(&format!(" {:>24}", text));
        }
        out.push('\n');
    }

    out
}

fn cell_text(stat: Stat, show_times: bool) -> String {
    if show_times && stat.count > 0 {
        format!("{} ({})", stat.count, format_time(stat.time))
    } else {
        stat.count.to_string()
    }
}
