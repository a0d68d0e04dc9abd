use crate::color::assigner::OverrideTable;
use std::fs;
use std::path::{Path, PathBuf};

pub const BLOCK_START: &str = "/* CUSTOM COLORS START */";
pub const BLOCK_END: &str = "/* CUSTOM COLORS END */";

/// Client stylesheet that carries one CSS rule per color override, kept
/// between the START/END comments. Text outside the block is never touched.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    path: PathBuf,
}

impl Stylesheet {
    pub fn from_root(root: &Path) -> Self {
        Self {
            path: root.join("config").join("custom.css"),
        }
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, table: &OverrideTable) -> Result<(), String> {
        let existing = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => {
                return Err(format!(
                    "stylesheet read failed for {}: {}",
                    self.path.display(),
                    err
                ))
            }
        };
        let updated = splice(&existing, &render_block(table))
            .map_err(|err| format!("{} in {}", err, self.path.display()))?;
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|err| {
                    format!("stylesheet dir create failed for {}: {}", dir.display(), err)
                })?;
            }
        }
        fs::write(&self.path, updated).map_err(|err| {
            format!(
                "stylesheet write failed for {}: {}",
                self.path.display(),
                err
            )
        })
    }
}

pub fn render_block(table: &OverrideTable) -> String {
    let mut block = String::new();
    block.push_str(BLOCK_START);
    block.push('\n');
    for (id, color) in table {
        block.push_str(&render_rule(id.as_str(), &color.to_long_form()));
        block.push('\n');
    }
    block.push_str(BLOCK_END);
    block
}

fn render_rule(id: &str, color: &str) -> String {
    format!(
        "[class$=\"chatmessage-{id}\"] strong, [class$=\"chatmessage-{id}\"] em, \
         [class$=\"chatmessage-{id}\"] strong span, [id$=\"-userlist-user-{id}\"] strong, \
         [id$=\"-userlist-user-{id}\"] strong em, [id$=\"-userlist-user-{id}\"] span \
         {{ color: {color} !important; }}"
    )
}

/// Replaces the sentinel block in `existing`, or appends one when there is
/// none. An unterminated block is an error so hand edits are not lost.
pub fn splice(existing: &str, block: &str) -> Result<String, String> {
    let Some(start) = existing.find(BLOCK_START) else {
        if existing.contains(BLOCK_END) {
            return Err("stylesheet has a custom color end marker without a start".to_string());
        }
        let mut out = existing.to_string();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(block);
        out.push('\n');
        return Ok(out);
    };
    let Some(end_offset) = existing[start..].find(BLOCK_END) else {
        return Err("stylesheet has an unterminated custom color block".to_string());
    };
    let end = start + end_offset + BLOCK_END.len();
    let mut out = String::with_capacity(existing.len() + block.len());
    out.push_str(&existing[..start]);
    out.push_str(block);
    out.push_str(&existing[end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex::HexColor;
    use crate::users::user_id::UserId;

    fn table(entries: &[(&str, &str)]) -> OverrideTable {
        entries
            .iter()
            .map(|(name, color)| (UserId::new(name), HexColor::parse(color).unwrap()))
            .collect()
    }

    #[test]
    fn block_lists_rules_in_key_order() {
        let block = render_block(&table(&[("Misty", "#00f"), ("ash", "#FF0000")]));
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], BLOCK_START);
        assert!(lines[1].contains("chatmessage-ash\""));
        assert!(lines[1].ends_with("{ color: #ff0000 !important; }"));
        assert!(lines[2].contains("-userlist-user-misty\""));
        assert!(lines[2].ends_with("{ color: #0000ff !important; }"));
        assert_eq!(lines[3], BLOCK_END);
    }

    #[test]
    fn splice_appends_when_missing() {
        let block = render_block(&OverrideTable::new());
        let out = splice("body { margin: 0; }", &block).unwrap();
        assert_eq!(
            out,
            format!("body {{ margin: 0; }}\n{BLOCK_START}\n{BLOCK_END}\n")
        );
    }

    #[test]
    fn splice_replaces_existing_block_only() {
        let original = format!("a {{}}\n{BLOCK_START}\nold rule\n{BLOCK_END}\nb {{}}\n");
        let block = render_block(&table(&[("ash", "#FF0000")]));
        let out = splice(&original, &block).unwrap();
        assert!(out.starts_with("a {}\n"));
        assert!(out.ends_with(&format!("{BLOCK_END}\nb {{}}\n")));
        assert!(!out.contains("old rule"));
        assert_eq!(out.matches(BLOCK_START).count(), 1);
        assert_eq!(splice(&out, &block).unwrap(), out);
    }

    #[test]
    fn splice_refuses_unterminated_block() {
        let original = format!("{BLOCK_START}\nhalf written");
        assert!(splice(&original, "x").is_err());
        assert!(splice(BLOCK_END, "x").is_err());
    }

    #[test]
    fn write_creates_and_updates_file() {
        let root = std::env::temp_dir().join(format!("chatcolors-css-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        let sheet = Stylesheet::from_root(&root);

        sheet.write(&table(&[("ash", "#FF0000")])).unwrap();
        let first = fs::read_to_string(sheet.path()).unwrap();
        assert!(first.contains("#ff0000"));

        sheet.write(&OverrideTable::new()).unwrap();
        let second = fs::read_to_string(sheet.path()).unwrap();
        assert!(!second.contains("#ff0000"));
        assert_eq!(second, format!("{BLOCK_START}\n{BLOCK_END}\n"));
        let _ = fs::remove_dir_all(&root);
    }
}
