pub mod admin;
pub mod chat;
pub mod color;
mod config;
pub mod persistence;
pub mod telemetry;
pub mod users;

pub use admin::commands::{parse_color_command, ColorCommand};
pub use admin::handler::{handle_color_talk, AdminOutcome, Caller, ColorContext};
pub use chat::render::{render_name, FixedColor, NameColorSource};
pub use color::{hash_color, ColorAssigner, ColorSource, HashedColor, HexColor, OverrideTable};
pub use persistence::overrides::OverrideStore;
pub use persistence::stylesheet::Stylesheet;
pub use users::user_id::{to_id, UserId};

use std::io::BufRead;

const CONSOLE_CALLER: &str = "~console";

pub fn run(args: &[String]) -> Result<(), String> {
    let config = config::AppConfig::from_args(args)?;
    telemetry::logging::init(&config.root)?;
    let mut ctx = ColorContext::load(
        OverrideStore::new(&config.store_path),
        Stylesheet::new(&config.stylesheet_path),
        config.cache_capacity,
    )?;
    let caller = Caller::staff(CONSOLE_CALLER);

    if let Some(command) = config.command.as_deref() {
        println!("{}", run_console_line(&mut ctx, &caller, command)?);
        return Ok(());
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|err| format!("stdin read failed: {}", err))?;
        if line.trim().is_empty() {
            continue;
        }
        match run_console_line(&mut ctx, &caller, &line) {
            Ok(output) => println!("{}", output),
            Err(err) => eprintln!("chatcolors: {}", err),
        }
    }
    Ok(())
}

/// Runs one console line. Bare subcommands (`color ash`) get the
/// `/customcolor` prefix added.
fn run_console_line(ctx: &mut ColorContext, caller: &Caller, line: &str) -> Result<String, String> {
    let trimmed = line.trim();
    let message = if trimmed.starts_with('/') || trimmed.starts_with('!') {
        trimmed.to_string()
    } else {
        format!("/customcolor {}", trimmed)
    };
    let outcome = handle_color_talk(ctx, caller, &message)?;
    Ok(match outcome {
        Some(AdminOutcome::Reply(html)) => html,
        Some(AdminOutcome::Notify {
            reply,
            target,
            popup,
        }) => format!("{}\n[popup to {}] {}", reply, target, popup),
        Some(AdminOutcome::Denied) => "Access denied.".to_string(),
        None => format!("'{}' is not a customcolor command.", trimmed),
    })
}
