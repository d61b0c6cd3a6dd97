use colored::Colorize;
use linksconnect_lib::Error;
use sysexits::ExitCode;

use crate::{Context, fail};

pub async fn handle(ctx: &Context, ghin: &str) -> Result<(), ExitCode> {
    println!("Verifying your handicap with the GHIN network...");

    match ctx.services.lookup.lookup(ghin).await {
        Ok(record) => {
            println!(
                "{}: {} HCP",
                record.name.bold(),
                record.handicap.to_string().green()
            );
            Ok(())
        }
        Err(e @ Error::InvalidGhin(_)) => Err(fail(e, ExitCode::DataErr)),
        Err(e) => Err(fail(e, ExitCode::Unavailable)),
    }
}
