use colored::{ColoredString, Colorize};
use linksconnect_lib::{GolferProfile, Handicap, HandicapBand};

fn handicap(h: Handicap) -> ColoredString {
    let label = format!("{h} HCP");
    match h.band() {
        HandicapBand::Low => label.green(),
        HandicapBand::Mid => label.blue(),
        HandicapBand::High => label.truecolor(249, 115, 22),
    }
    .bold()
}

/// One line per golfer in the feed.
pub fn card(golfer: &GolferProfile) {
    println!(
        "  {:<24} {:>12}  {}",
        golfer.name().bold(),
        handicap(golfer.handicap()),
        golfer.home_course().dimmed()
    );
    println!("  {:<24} {}", golfer.play_style().to_string().cyan(), golfer.bio());
}

pub fn profile(profile: &GolferProfile) {
    println!();
    println!("{}", profile.name().bold());
    println!("{}", profile.location().dimmed());
    println!();
    println!("{:<14} {}", "Handicap", handicap(profile.handicap()));
    println!("{:<14} {}", "Play Style", profile.play_style());
    println!("{:<14} {}", "Home Course", profile.home_course());
    println!();
    println!("{}", "About Me".bold());
    println!("\"{}\"", profile.bio().italic());
    println!();
    println!("{}", "GHIN Status".bold());
    println!("Connected: {}", profile.ghin_status());
    println!();
    println!("{}", "Recent Rounds".bold());
    println!("{}", "Last played 3 days ago".dimmed());
}

pub fn messages() {
    println!("{}", "No messages yet".bold());
    println!("Connect with golfers in the Feed to start a conversation!");
}
