use crate::color::hex::HexColor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorCommand {
    Set { target: String, color: HexColor },
    Delete { target: String },
    Preview { target: String, color: HexColor },
    Show { target: String },
    List,
    Reload,
    Stats,
    Help,
    Unknown(String),
}

impl ColorCommand {
    /// Commands that change or reveal the override table.
    pub fn requires_staff(&self) -> bool {
        matches!(
            self,
            ColorCommand::Set { .. }
                | ColorCommand::Delete { .. }
                | ColorCommand::List
                | ColorCommand::Reload
                | ColorCommand::Stats
        )
    }
}

/// Parses `/customcolor <sub> <args>` (or `!customcolor`, alias `cc`).
/// Returns `Ok(None)` for chat that is not a color command.
pub fn parse_color_command(message: &str) -> Result<Option<ColorCommand>, String> {
    let trimmed = message.trim();
    let Some(body) = trimmed
        .strip_prefix('/')
        .or_else(|| trimmed.strip_prefix('!'))
    else {
        return Ok(None);
    };

    let (command, rest) = split_word(body);
    let command = command.to_ascii_lowercase();
    if command != "customcolor" && command != "cc" {
        return Ok(None);
    }

    let (sub, args) = split_word(rest);
    let sub = sub.to_ascii_lowercase();
    let parsed = match sub.as_str() {
        "" | "help" => ColorCommand::Help,
        "set" | "add" => {
            let (target, color) = parse_target_and_color(args, "set")?;
            ColorCommand::Set { target, color }
        }
        "delete" | "remove" | "del" => ColorCommand::Delete {
            target: parse_target(args, "delete")?,
        },
        "preview" => {
            let (target, color) = parse_target_and_color(args, "preview")?;
            ColorCommand::Preview { target, color }
        }
        "color" | "hash" | "show" => ColorCommand::Show {
            target: parse_target(args, "color")?,
        },
        "list" => ColorCommand::List,
        "reload" => ColorCommand::Reload,
        "stats" => ColorCommand::Stats,
        _ => ColorCommand::Unknown(sub),
    };
    Ok(Some(parsed))
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(index) => (&text[..index], text[index..].trim()),
        None => (text, ""),
    }
}

fn parse_target(args: &str, sub: &str) -> Result<String, String> {
    let target = args.split(',').next().unwrap_or("").trim();
    if target.is_empty() {
        return Err(format!("customcolor {sub} missing user name"));
    }
    Ok(target.to_string())
}

fn parse_target_and_color(args: &str, sub: &str) -> Result<(String, HexColor), String> {
    let Some((target, color)) = args.split_once(',') else {
        return Err(format!("customcolor {sub} expects '<user>, <hex color>'"));
    };
    let target = parse_target(target, sub)?;
    let color = HexColor::parse(color)
        .map_err(|err| format!("customcolor {sub}: {err}"))?;
    Ok((target, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(text: &str) -> HexColor {
        HexColor::parse(text).unwrap()
    }

    #[test]
    fn ignores_non_command() {
        assert_eq!(parse_color_command("hello").unwrap(), None);
        assert_eq!(parse_color_command("/kick bob").unwrap(), None);
    }

    #[test]
    fn parses_set_with_both_prefixes() {
        let expected = Some(ColorCommand::Set {
            target: "Ash Ketchum".to_string(),
            color: hex("#FF0000"),
        });
        assert_eq!(
            parse_color_command("/customcolor set Ash Ketchum, #FF0000").unwrap(),
            expected
        );
        assert_eq!(
            parse_color_command("!CC SET Ash Ketchum ,#FF0000 ").unwrap(),
            expected
        );
    }

    #[test]
    fn set_rejects_bad_color() {
        let err = parse_color_command("/customcolor set ash, red").unwrap_err();
        assert!(err.contains("must start with '#'"), "{err}");
        assert!(parse_color_command("/customcolor set ash").is_err());
        assert!(parse_color_command("/customcolor set , #fff").is_err());
    }

    #[test]
    fn parses_delete_and_show() {
        assert_eq!(
            parse_color_command("/customcolor delete Misty").unwrap(),
            Some(ColorCommand::Delete {
                target: "Misty".to_string()
            })
        );
        assert_eq!(
            parse_color_command("/cc hash Brock").unwrap(),
            Some(ColorCommand::Show {
                target: "Brock".to_string()
            })
        );
        assert!(parse_color_command("/customcolor delete").is_err());
    }

    #[test]
    fn parses_preview() {
        assert_eq!(
            parse_color_command("/customcolor preview ash, #0f0").unwrap(),
            Some(ColorCommand::Preview {
                target: "ash".to_string(),
                color: hex("#0f0"),
            })
        );
    }

    #[test]
    fn parses_bare_and_unknown_subcommands() {
        assert_eq!(
            parse_color_command("/customcolor").unwrap(),
            Some(ColorCommand::Help)
        );
        assert_eq!(
            parse_color_command("/customcolor list").unwrap(),
            Some(ColorCommand::List)
        );
        assert_eq!(
            parse_color_command("/customcolor reload").unwrap(),
            Some(ColorCommand::Reload)
        );
        assert_eq!(
            parse_color_command("/customcolor stats").unwrap(),
            Some(ColorCommand::Stats)
        );
        assert_eq!(
            parse_color_command("/customcolor paint ash").unwrap(),
            Some(ColorCommand::Unknown("paint".to_string()))
        );
    }

    #[test]
    fn staff_only_commands() {
        assert!(ColorCommand::List.requires_staff());
        assert!(!ColorCommand::Help.requires_staff());
        assert!(!ColorCommand::Show {
            target: "ash".to_string()
        }
        .requires_staff());
    }
}
