use std::path::Path;

use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, item_io};
use crate::model::config::{Config, LegacyPolicy};
use crate::model::family::FamilyKey;
use crate::model::item::{Item, ItemKind};
use crate::ops::classify::{self, Classified};
use crate::ops::selection::SelectionManager;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref(), &cwd)?;
    let policy = effective_policy(&config, cli.strict);
    debug!(?policy, "legacy row policy");

    match cli.command {
        Commands::Family(args) => cmd_family(&args.items, args.key.as_ref(), policy, json),
        Commands::Select(args) => cmd_select(&args.items, &args.toggles, policy, json),
        Commands::Check(args) => cmd_check(&args.items, policy, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn effective_policy(config: &Config, strict: bool) -> LegacyPolicy {
    if strict {
        LegacyPolicy::Reject
    } else {
        config.classify.legacy
    }
}

fn load_items(path: &Path, policy: LegacyPolicy) -> Result<Vec<Classified>, Box<dyn std::error::Error>> {
    let rows = item_io::load_rows(path)?;
    Ok(classify::classify_all(&rows, policy)?)
}

/// Parse a `<kind>/<id>` reference
pub fn parse_item_ref(s: &str) -> Result<(ItemKind, &str), String> {
    let (kind, id) = s
        .split_once('/')
        .ok_or_else(|| format!("invalid item reference '{}': expected <kind>/<id>", s))?;
    let kind = ItemKind::parse_kind(kind)
        .ok_or_else(|| format!("invalid item reference '{}': unknown kind '{}'", s, kind))?;
    if id.is_empty() {
        return Err(format!("invalid item reference '{}': missing id", s));
    }
    Ok((kind, id))
}

/// Find the first row matching a `<kind>/<id>` reference
pub fn resolve_item_ref<'a>(items: &'a [Classified], s: &str) -> Result<&'a Item, String> {
    let (kind, id) = parse_item_ref(s)?;
    items
        .iter()
        .map(|c| &c.item)
        .find(|item| item.kind() == kind && item.id().as_str() == id)
        .ok_or_else(|| format!("no row matches '{}'", s))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_family(
    path: &Path,
    key: Option<&FamilyKey>,
    policy: LegacyPolicy,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut items = load_items(path, policy)?;
    if let Some(key) = key {
        items.retain(|c| FamilyKey::of(&c.item) == *key);
    }
    if json {
        let out: Vec<FamilyJson> = items.iter().map(family_json).collect();
        print_json(&out)
    } else {
        print!("{}", render_families(&items));
        Ok(())
    }
}

fn cmd_select(
    path: &Path,
    toggles: &[String],
    policy: LegacyPolicy,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_items(path, policy)?;

    // Resolve every ref before toggling anything
    let targets = toggles
        .iter()
        .map(|r| resolve_item_ref(&items, r))
        .collect::<Result<Vec<_>, _>>()?;

    let mut manager = SelectionManager::new();
    let mut toggle_log = Vec::new();
    for item in targets {
        let selected = manager.toggle_select(item);
        debug!(item = %item.item_ref(), selected, count = manager.selection_count(), "toggle");
        toggle_log.push(ToggleJson {
            item: item.item_ref(),
            selected,
        });
    }

    if json {
        print_json(&SelectJson {
            toggles: toggle_log,
            count: manager.selection_count(),
            selection: manager.selected_items(),
            analysis: manager.selection_analysis(),
        })
    } else {
        print!("{}", render_selection(&manager));
        Ok(())
    }
}

fn cmd_check(path: &Path, policy: LegacyPolicy, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rows = item_io::load_rows(path)?;
    // Inferred rows are reported below, so skip the per-row warnings
    let policy = match policy {
        LegacyPolicy::Warn => LegacyPolicy::Allow,
        other => other,
    };

    let mut inferred = Vec::new();
    let mut errors = Vec::new();
    for row in &rows {
        match classify::classify(row, policy) {
            Ok(c) if c.inferred => {
                let note = if row.project_id.is_none() && row.task_id.is_none() {
                    "no kind tag, no parent references"
                } else {
                    "no kind tag"
                };
                inferred.push(format!("{} ({})", c.item.item_ref(), note));
            }
            Ok(_) => {}
            Err(e) => errors.push(e.to_string()),
        }
    }

    if json {
        print_json(&CheckJson {
            rows: rows.len(),
            inferred: inferred.clone(),
            errors: errors.clone(),
        })?;
    } else {
        for line in &inferred {
            println!("inferred: {}", line);
        }
        for line in &errors {
            println!("error: {}", line);
        }
        println!(
            "{} rows, {} inferred, {} errors",
            rows.len(),
            inferred.len(),
            errors.len()
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("{} row(s) could not be classified", errors.len()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::classify::classify_all;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_item_ref() {
        assert_eq!(parse_item_ref("task/2"), Ok((ItemKind::Task, "2")));
        assert_eq!(
            parse_item_ref("child-subtask/abc"),
            Ok((ItemKind::ChildSubtask, "abc"))
        );
        assert!(parse_item_ref("task").is_err());
        assert!(parse_item_ref("task/").is_err());
        assert!(parse_item_ref("phase/1").is_err());
    }

    #[test]
    fn test_resolve_item_ref_matches_kind_and_id() {
        let rows = item_io::parse_rows(
            r#"[
                {"kind": "project", "id": 1},
                {"kind": "task", "id": 1, "projectId": 1}
            ]"#,
        )
        .unwrap();
        let items = classify_all(&rows, LegacyPolicy::Reject).unwrap();

        assert_eq!(resolve_item_ref(&items, "task/1"), Ok(&Item::task(1u64, 1u64)));
        assert_eq!(resolve_item_ref(&items, "project/1"), Ok(&Item::project(1u64)));
        assert_eq!(
            resolve_item_ref(&items, "subtask/1"),
            Err("no row matches 'subtask/1'".to_string())
        );
    }

    #[test]
    fn test_strict_flag_overrides_config() {
        let config = Config::default();
        assert_eq!(effective_policy(&config, false), LegacyPolicy::Warn);
        assert_eq!(effective_policy(&config, true), LegacyPolicy::Reject);
    }
}
