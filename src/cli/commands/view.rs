use crate::cli::Context;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::ui::render;
use crate::utils::colors::colorize_state;
use crate::utils::date::{parse_optional_date, weekday_name};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    let user_id = ctx.user_id()?;
    let d = &ctx.dispatcher;

    match cmd {
        Commands::View { date } => {
            let date = parse_optional_date(date.as_ref())?;
            let view = d.on_view_log(user_id, date)?;
            header(format!("Work log for {} on {}", user_id, view.date));
            print!("{}", render::work_summary(&view, user_id, d.zone()));
        }

        Commands::List => {
            let days = d.on_list(user_id);
            if days.is_empty() {
                info(format!("No work records for {}.", user_id));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("DATE", 10),
                Column::new("DAY", 9),
                Column::new("STATE", 12),
            ]);
            for (date, state) in days {
                table.add_row(vec![
                    date.to_string(),
                    weekday_name(date),
                    colorize_state(state),
                ]);
            }
            print!("{}", table.render());
        }

        _ => {}
    }

    Ok(())
}
