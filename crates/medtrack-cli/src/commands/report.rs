use medtrack_core::views::ReportPeriod;

use crate::app::AppContext;
use crate::cli::ReportArgs;
use crate::errors::CliError;
use crate::helpers::parse_date;
use crate::output::{print_json, print_report};

pub fn handle_report(ctx: &AppContext, args: &ReportArgs) -> anyhow::Result<()> {
    let mut ws = ctx.load()?;
    ws.require_user()?;
    let today = ws.state.today();

    let period = match (args.from.as_deref(), args.to.as_deref()) {
        (Some(from), Some(to)) => {
            let start = parse_date(from, today)?;
            let end = parse_date(to, today)?;
            if start > end {
                return Err(CliError::invalid_input(format!(
                    "--from {} is after --to {}",
                    start, end
                ))
                .into());
            }
            ReportPeriod::Range { start, end }
        }
        _ => args.period.parse()?,
    };
    let report = ws.state.report(period);

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&report);
    }
    print_report(&ui, &report);
    Ok(())
}
