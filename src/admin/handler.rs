use crate::admin::commands::{parse_color_command, ColorCommand};
use crate::chat::render::{
    escape_html, render_name, render_override_list, render_preview, render_usage, FixedColor,
};
use crate::color::assigner::{ColorAssigner, ColorSource};
use crate::color::hex::HexColor;
use crate::persistence::overrides::OverrideStore;
use crate::persistence::stylesheet::Stylesheet;
use crate::telemetry::logging;
use crate::users::user_id::UserId;

/// Who issued a chat command. The host decides staff rights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub name: String,
    pub is_staff: bool,
}

impl Caller {
    pub fn staff(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_staff: true,
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_staff: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminOutcome {
    /// HTML shown only to the caller.
    Reply(String),
    /// HTML for the caller plus a popup for the affected user.
    Notify {
        reply: String,
        target: UserId,
        popup: String,
    },
    Denied,
}

/// Everything a color command touches.
pub struct ColorContext {
    pub assigner: ColorAssigner,
    pub store: OverrideStore,
    pub stylesheet: Stylesheet,
}

impl ColorContext {
    pub fn new(assigner: ColorAssigner, store: OverrideStore, stylesheet: Stylesheet) -> Self {
        Self {
            assigner,
            store,
            stylesheet,
        }
    }

    /// Loads overrides from the store into a fresh assigner.
    pub fn load(
        store: OverrideStore,
        stylesheet: Stylesheet,
        cache_capacity: usize,
    ) -> Result<Self, String> {
        let overrides = store.load()?;
        Ok(Self::new(
            ColorAssigner::new(overrides, cache_capacity),
            store,
            stylesheet,
        ))
    }
}

pub fn handle_color_talk(
    ctx: &mut ColorContext,
    caller: &Caller,
    message: &str,
) -> Result<Option<AdminOutcome>, String> {
    let Some(command) = parse_color_command(message)? else {
        return Ok(None);
    };
    if command.requires_staff() && !caller.is_staff {
        return Ok(Some(AdminOutcome::Denied));
    }

    let outcome = match command {
        ColorCommand::Set { target, color } => set_color(ctx, caller, &target, color),
        ColorCommand::Delete { target } => delete_color(ctx, caller, &target),
        ColorCommand::Preview { target, color } => {
            AdminOutcome::Reply(render_preview(&target, &color))
        }
        ColorCommand::Show { target } => {
            let (color, source) = ctx.assigner.resolve(&target);
            let origin = match source {
                ColorSource::Override => "custom color",
                ColorSource::Hashed => "default color",
            };
            AdminOutcome::Reply(format!(
                "{} has the {} <code>{}</code>.",
                render_name(&target, &mut ctx.assigner),
                origin,
                color
            ))
        }
        ColorCommand::List => AdminOutcome::Reply(render_override_list(ctx.assigner.overrides())),
        ColorCommand::Reload => match ctx.store.load() {
            Ok(table) => {
                let count = table.len();
                ctx.assigner.replace_overrides(table);
                logging::log_colors(&format!(
                    "{} reloaded {} custom colors",
                    caller.name, count
                ));
                AdminOutcome::Reply(format!("Reloaded {} custom colors.", count))
            }
            Err(err) => {
                logging::log_error(&err);
                AdminOutcome::Reply(format!(
                    "Custom colors could not be reloaded: {}",
                    escape_html(&err)
                ))
            }
        },
        ColorCommand::Stats => {
            let stats = ctx.assigner.cache_stats();
            AdminOutcome::Reply(format!(
                "Color cache: {} cached, {} hits, {} misses ({:.1}% hit rate), {} evictions, {} clears. {} custom colors.",
                ctx.assigner.cached_len(),
                stats.hits,
                stats.misses,
                stats.hit_rate() * 100.0,
                stats.evictions,
                stats.clears,
                ctx.assigner.overrides().len()
            ))
        }
        ColorCommand::Help => AdminOutcome::Reply(render_usage()),
        ColorCommand::Unknown(sub) => AdminOutcome::Reply(format!(
            "Unknown customcolor command '{}'.<br />{}",
            escape_html(&sub),
            render_usage()
        )),
    };
    Ok(Some(outcome))
}

fn set_color(ctx: &mut ColorContext, caller: &Caller, target: &str, color: HexColor) -> AdminOutcome {
    let id = UserId::new(target);
    if id.is_empty() {
        return AdminOutcome::Reply(format!("'{}' is not a valid user name.", escape_html(target)));
    }
    let mut staged = ctx.assigner.overrides().clone();
    staged.insert(id.clone(), color.clone());
    if let Err(err) = ctx.store.save(&staged) {
        logging::log_error(&err);
        return AdminOutcome::Reply(format!(
            "Custom color was not saved: {}",
            escape_html(&err)
        ));
    }
    ctx.assigner.set_override(target, color.clone());
    let stylesheet_note = publish_stylesheet(ctx);
    logging::log_colors(&format!(
        "{} set the custom color of {} to {}",
        caller.name, id, color
    ));

    let mut preview = FixedColor(color.clone());
    AdminOutcome::Notify {
        reply: format!(
            "You have given {} a custom color.{}",
            render_name(target, &mut preview),
            stylesheet_note
        ),
        target: id,
        popup: format!(
            "{} has set your custom color to <span style=\"color:{}\">{}</span>.",
            escape_html(&caller.name),
            color,
            color
        ),
    }
}

fn delete_color(ctx: &mut ColorContext, caller: &Caller, target: &str) -> AdminOutcome {
    let id = UserId::new(target);
    if ctx.assigner.override_for(target).is_none() {
        return AdminOutcome::Reply(format!(
            "{} does not have a custom color.",
            escape_html(target)
        ));
    }
    let mut staged = ctx.assigner.overrides().clone();
    staged.remove(&id);
    if let Err(err) = ctx.store.save(&staged) {
        logging::log_error(&err);
        return AdminOutcome::Reply(format!(
            "Custom color was not removed: {}",
            escape_html(&err)
        ));
    }
    ctx.assigner.remove_override(target);
    let stylesheet_note = publish_stylesheet(ctx);
    logging::log_colors(&format!(
        "{} removed the custom color of {}",
        caller.name, id
    ));

    AdminOutcome::Notify {
        reply: format!(
            "You have removed {}'s custom color.{}",
            escape_html(target.trim()),
            stylesheet_note
        ),
        target: id,
        popup: format!(
            "{} has removed your custom color.",
            escape_html(&caller.name)
        ),
    }
}

/// The override is already saved when this runs, so a stylesheet failure
/// only adds a warning to the reply.
fn publish_stylesheet(ctx: &ColorContext) -> String {
    match ctx.stylesheet.write(ctx.assigner.overrides()) {
        Ok(()) => String::new(),
        Err(err) => {
            logging::log_error(&err);
            format!("<br />Stylesheet not updated: {}", escape_html(&err))
        }
    }
}
