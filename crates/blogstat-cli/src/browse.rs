//! Interactive post browser.
//!
//! Shows the listing, then reads one selection per line and prints a fresh
//! report for it. `l` reprints the listing; `q` (or end of input) quits.

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use blogstat_core::{ConfigProvider, Result};

use crate::catalog::Catalog;
use crate::display::{ReportOptions, render_error, render_listing, render_report};
use crate::pipeline::analyze_selection;
use crate::state::AppState;

const PROMPT: &str = "Select a post (number, path or name; l = list, q = quit): ";

/// Run the browse loop until the user quits or input ends.
///
/// Returns the number of selections that produced a report.
pub async fn browse<C, R, W>(
    state: &AppState<C>,
    catalog: &Catalog,
    options: &ReportOptions,
    input: R,
    out: &mut W,
) -> Result<usize>
where
    C: ConfigProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut served = 0;

    write!(out, "{}", render_listing(&catalog.listing().await))?;
    loop {
        write!(out, "\n{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let selection = line.trim();
        match selection {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "l" | "list" => {
                write!(out, "{}", render_listing(&catalog.listing().await))?;
                continue;
            }
            _ => {}
        }

        match analyze_selection(state, catalog, selection, options.top_k).await {
            Ok(report) => {
                write!(out, "\n{}", render_report(&report, options)?)?;
                served += 1;
            }
            Err(e) => {
                log::warn!("selection '{selection}' failed: {e}");
                write!(out, "\n{}", render_error(selection, &e, options.format))?;
            }
        }
    }

    log::debug!("browse finished after {served} report(s)");
    Ok(served)
}
