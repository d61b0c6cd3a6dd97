use colored::Colorize;
use linksconnect_lib::{
    GolferProfile, PlayStyle, Router,
    onboarding::{Action, Message, Onboarding, Step},
};
use sysexits::ExitCode;
use tracing::debug;

use crate::{Context, fail, render};

#[derive(clap::Args, Debug, Clone)]
pub struct Args {
    /// Your full name
    #[arg(long)]
    name: String,
    /// Where you play, as "City, State"
    #[arg(long)]
    location: String,
    /// Your home course
    #[arg(long)]
    home_course: Option<String>,
    /// GHIN number to import your handicap from
    #[arg(long)]
    ghin: Option<String>,
    /// Handicap index; plus handicaps are negative
    #[arg(long, allow_negative_numbers = true)]
    handicap: Option<f64>,
    #[arg(long, value_enum, default_value_t)]
    play_style: PlayStyle,
    /// A few words about your game
    #[arg(long)]
    bio: Option<String>,
    /// Let AI polish your bio
    #[arg(long)]
    enhance: bool,
}

pub async fn handle(ctx: &Context, args: &Args) -> Result<(), ExitCode> {
    let (mut router, existing) =
        Router::load(ctx.store.as_ref()).map_err(|e| fail(e, ExitCode::IoErr))?;
    if let Some(existing) = existing {
        return Err(fail(
            format!(
                "already signed up as {}, run `linksconnect logout` first",
                existing.name()
            ),
            ExitCode::Usage,
        ));
    }

    let mut onboarding = Onboarding::new();

    // Identity
    onboarding.update(Message::NameInput(args.name.clone()));
    onboarding.update(Message::LocationInput(args.location.clone()));
    if let Some(course) = &args.home_course {
        onboarding.update(Message::HomeCourseInput(course.clone()));
    }
    onboarding.update(Message::NextPressed);
    if onboarding.step() != Step::Handicap {
        return Err(fail("a name and a location are required", ExitCode::Usage));
    }

    // Handicap
    if let Some(handicap) = args.handicap {
        onboarding.update(Message::HandicapInput(handicap.to_string()));
    }
    if let Some(ghin) = &args.ghin {
        onboarding.update(Message::GhinInput(ghin.clone()));
        println!("Verifying your handicap with the GHIN network...");
        let action = onboarding.update(Message::ImportPressed);
        perform(ctx, &mut onboarding, action).await;
        if let Some(notice) = onboarding.notice() {
            eprintln!("{}", notice.yellow());
        }
    }
    onboarding.update(Message::NextPressed);

    // Persona
    onboarding.update(Message::PlayStyleSelected(args.play_style));
    if let Some(bio) = &args.bio {
        onboarding.update(Message::BioInput(bio.clone()));
    }
    if args.enhance {
        let action = onboarding.update(Message::EnhancePressed);
        perform(ctx, &mut onboarding, action).await;
    }

    let action = onboarding.update(Message::FinishPressed);
    let Some(profile) = perform(ctx, &mut onboarding, action).await else {
        return Err(fail("could not complete your profile", ExitCode::DataErr));
    };

    router
        .complete_onboarding(ctx.store.as_ref(), &profile)
        .map_err(|e| fail(e, ExitCode::IoErr))?;

    println!("{}", "Welcome to LinksConnect!".green().bold());
    render::profile(&profile);

    Ok(())
}

/// Carry out whatever the form asked for until it has nothing left to do. Returns
/// the finished profile if onboarding completed.
async fn perform(
    ctx: &Context,
    onboarding: &mut Onboarding,
    mut action: Action,
) -> Option<GolferProfile> {
    loop {
        debug!("Performing {action:?}");
        action = match action {
            Action::None => return None,
            Action::Complete(profile) => return Some(profile),
            Action::Lookup(ghin) => {
                let message = match ctx.services.lookup.lookup(&ghin).await {
                    Ok(record) => Message::Imported(record),
                    Err(e) => Message::ImportFailed(e.to_string()),
                };
                onboarding.update(message)
            }
            Action::Enhance { bio, play_style } => {
                let bio = ctx.services.enhancer.enhance(&bio, play_style).await;
                onboarding.update(Message::Enhanced(bio))
            }
        };
    }
}
