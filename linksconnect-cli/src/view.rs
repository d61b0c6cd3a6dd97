use colored::Colorize;
use linksconnect_lib::{
    Bracket, Feed, GolferProfile, Router, Screen, SortOrder, Tab,
    feed::{Action, Message, Shown},
};
use sysexits::ExitCode;

use crate::{Context, fail, render};

#[derive(clap::Args, Debug, Clone, Default)]
pub struct FeedArgs {
    /// Only show golfers in this handicap range
    #[arg(short, long, value_enum, default_value_t)]
    bracket: Bracket,
    /// Sort by handicap
    #[arg(short, long, value_enum, default_value_t)]
    order: SortOrder,
    /// How many golfers to scout for
    #[arg(short, long)]
    count: Option<usize>,
}

pub async fn feed(ctx: &Context, args: &FeedArgs) -> Result<(), ExitCode> {
    let (router, profile) = route(ctx, Tab::Feed)?;
    match (router.screen(), profile) {
        (Screen::Feed, Some(profile)) => show_feed(ctx, &profile, args).await,
        _ => Err(no_profile()),
    }
}

pub fn profile(ctx: &Context) -> Result<(), ExitCode> {
    let (router, profile) = route(ctx, Tab::Profile)?;
    match (router.screen(), profile) {
        (Screen::Profile, Some(profile)) => {
            render::profile(&profile);
            Ok(())
        }
        _ => Err(no_profile()),
    }
}

pub fn messages(ctx: &Context) -> Result<(), ExitCode> {
    let (router, _) = route(ctx, Tab::Messages)?;
    match router.screen() {
        Screen::Messages => {
            render::messages();
            Ok(())
        }
        _ => Err(no_profile()),
    }
}

/// Show a screen picked by name. Unknown names land on the feed.
pub async fn show(ctx: &Context, view: &str) -> Result<(), ExitCode> {
    match Tab::parse_or_default(view) {
        Tab::Feed => feed(ctx, &FeedArgs::default()).await,
        Tab::Messages => messages(ctx),
        Tab::Profile => profile(ctx),
    }
}

pub fn logout(ctx: &Context) -> Result<(), ExitCode> {
    let (mut router, profile) =
        Router::load(ctx.store.as_ref()).map_err(|e| fail(e, ExitCode::IoErr))?;

    router
        .logout(ctx.store.as_ref())
        .map_err(|e| fail(e, ExitCode::IoErr))?;

    match profile {
        Some(profile) => println!("Logged out {}. See you on the course!", profile.name()),
        None => println!("No profile to log out of."),
    }

    Ok(())
}

fn route(ctx: &Context, tab: Tab) -> Result<(Router, Option<GolferProfile>), ExitCode> {
    let (mut router, profile) =
        Router::load(ctx.store.as_ref()).map_err(|e| fail(e, ExitCode::IoErr))?;
    router.navigate(tab);
    Ok((router, profile))
}

fn no_profile() -> ExitCode {
    eprintln!(
        "No profile yet. Run `{}` first.",
        "linksconnect onboard --name <NAME> --location <CITY, STATE>".bold()
    );
    ExitCode::NoUser
}

async fn show_feed(
    ctx: &Context,
    profile: &GolferProfile,
    args: &FeedArgs,
) -> Result<(), ExitCode> {
    let count = args.count.unwrap_or(ctx.cfg.feed.count);
    let (feed, action) = Feed::new(profile.location(), count);
    let mut feed = feed.with_preferences(args.bracket, args.order);

    if let Action::Fetch {
        generation,
        location,
        count,
    } = action
    {
        println!("{}", "Scouting the course for players...".dimmed());
        let profiles = ctx.services.directory.fetch(&location, count).await;
        feed.update(Message::Loaded {
            generation,
            profiles,
        });
    }

    println!(
        "{}  {}  [{} | HCP {}]",
        "Nearby Golfers".bold(),
        feed.location().green(),
        feed.bracket().label(),
        match feed.order() {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    );

    match feed.shown() {
        Shown::Loading => println!("Still scouting..."),
        Shown::Empty => println!("No golfers found in this range."),
        Shown::Golfers(golfers) => {
            for golfer in &golfers {
                render::card(golfer);
            }
        }
    }

    Ok(())
}
