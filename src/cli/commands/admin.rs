use crate::cli::Context;
use crate::cli::parser::{AdminAction, Commands};
use crate::errors::AppResult;
use crate::ui::messages::{header, success};
use crate::ui::render;
use crate::utils::date::parse_date;
use crate::utils::time::canonical;

/// Handle `admin <delete|modify|show>`. The role check happens in the
/// dispatcher, before any record is read.
pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    let Commands::Admin { roles, action } = cmd else {
        return Ok(());
    };
    let d = &ctx.dispatcher;
    let zone = d.zone();

    match action {
        AdminAction::Delete { target, date } => {
            let date = parse_date(date)?;
            d.on_admin_delete(roles, target, date)?;
            success(format!(
                "Work data for {} on {} has been deleted!",
                target, date
            ));
        }

        AdminAction::Modify {
            target,
            date,
            field,
            value,
        } => {
            let date = parse_date(date)?;
            let record = d.on_admin_modify(roles, target, date, field, value)?;
            let stored = match field.trim().to_lowercase().as_str() {
                "start" => record.start.map(canonical),
                "end" => record.end.map(canonical),
                _ => None,
            };
            success(format!(
                "Updated {} for {} on {}{}!",
                field,
                target,
                date,
                stored.map(|v| format!(" to {}", v)).unwrap_or_default()
            ));
            let view = d.on_admin_show(roles, target, date)?;
            header("Updated Work Data");
            print!("{}", render::work_summary(&view, target, zone));
        }

        AdminAction::Show { target, date } => {
            let date = parse_date(date)?;
            let view = d.on_admin_show(roles, target, date)?;
            header("Work Data");
            print!("{}", render::work_summary(&view, target, zone));
        }
    }

    Ok(())
}
