//! start / resume / break / break-end / end.

use crate::cli::Context;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::ui::render;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    let user_id = ctx.user_id()?;
    let d = &ctx.dispatcher;
    let zone = d.zone();

    match cmd {
        Commands::Start { name } => {
            let display = name.as_deref().unwrap_or(user_id);
            let record = d.on_start_command(user_id, display)?;
            if let Some(start) = record.start {
                success(format!(
                    "Work started for {} at {}!",
                    display,
                    zone.clock_time(start)
                ));
            }
        }

        Commands::Resume => {
            let record = d.on_resume_command(user_id)?;
            info(format!(
                "Resuming session for {}! {}",
                user_id,
                render::status_line(&record, zone)
            ));
        }

        Commands::Break { issued_for } => {
            let record = d.on_begin_break_button(user_id, *issued_for)?;
            if let Some(b) = record.breaks.last() {
                success(format!(
                    "Break started for {} at {}!",
                    user_id,
                    zone.clock_time(b.start)
                ));
            }
        }

        Commands::BreakEnd { issued_for } => {
            let record = d.on_end_break_button(user_id, *issued_for)?;
            if let Some(end) = record.breaks.last().and_then(|b| b.end) {
                success(format!(
                    "Break ended for {} at {}!",
                    user_id,
                    zone.clock_time(end)
                ));
            }
        }

        Commands::End { issued_for } => {
            d.on_end_button(user_id, *issued_for)?;
            success(format!("Work session ended for {}! Here's the summary:", user_id));
            header("Daily Work Summary");
            let view = d.on_view_log(user_id, None)?;
            print!("{}", render::work_summary(&view, user_id, zone));
        }

        _ => {}
    }

    Ok(())
}
