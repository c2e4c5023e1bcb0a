use crate::shortcuts::{SHORTCUTS, Shortcut};
use anyhow::Result;

pub fn run_shortcuts(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(SHORTCUTS)?);
        return Ok(());
    }
    print!("{}", render_shortcuts(SHORTCUTS));
    Ok(())
}

pub fn render_shortcuts(shortcuts: &[Shortcut]) -> String {
    let width = shortcuts.iter().map(|s| s.id.len()).max().unwrap_or(0);

    let mut out = String::new();
    for s in shortcuts {
        out.push_str(&format!("{:<width$}  {}\n", s.id, s.description));
        match s.filter {
            Some(f) => out.push_str(&format!(
                "{:<width$}  group by {} where {} {} {}\n",
                "", s.group_by, f.field, f.operator, f.value
            )),
            None => out.push_str(&format!("{:<width$}  group by {}\n", "", s.group_by)),
        }
    }
    out
}
