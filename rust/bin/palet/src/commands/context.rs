//! Context management commands.

use std::path::Path;

use anyhow::Result;
use palet_core::Locale;

use crate::config::{ClientConfig, Context};

pub fn list(config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!("Run: palet context set <name> --server <url>");
        return Ok(());
    }

    println!("{:2} {:20} {:40} {:6}", "", "NAME", "SERVER", "LOCALE");
    for ctx in &config.contexts {
        let marker = if ctx.name == config.current_context { "*" } else { " " };
        let server = if ctx.server.is_empty() { "-" } else { &ctx.server };
        println!("{:2} {:20} {:40} {:6}", marker, ctx.name, server, ctx.locale);
    }
    Ok(())
}

/// Create a context, or change properties of an existing one.
pub fn set(
    name: &str,
    server: Option<&str>,
    locale: Option<Locale>,
    config_path: &Path,
) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    let created = !config.contains(name);
    let existing = config.contexts.iter().find(|c| c.name == name).cloned();
    let mut ctx = match existing {
        Some(existing) => existing,
        None => {
            let Some(server) = server else {
                anyhow::bail!("Context \"{}\" does not exist yet; --server is required.", name);
            };
            Context {
                name: name.to_string(),
                server: server.to_string(),
                locale: Locale::default(),
            }
        }
    };
    if let Some(s) = server {
        ctx.server = s.trim_end_matches('/').to_string();
    }
    if let Some(l) = locale {
        ctx.locale = l;
    }
    config.upsert_context(ctx);
    config.save(config_path)?;

    if created {
        println!("Context \"{}\" created.", name);
    } else {
        println!("Context \"{}\" updated.", name);
    }
    Ok(())
}

pub fn use_context(name: &str, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    if !config.contains(name) {
        anyhow::bail!(
            "Context \"{}\" not found. Run `palet context list` to see available contexts.",
            name
        );
    }

    config.current_context = name.to_string();
    config.save(config_path)?;
    println!("Switched to context \"{}\".", name);
    Ok(())
}

pub fn delete(name: &str, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    if !config.remove_context(name) {
        anyhow::bail!("Context \"{}\" not found.", name);
    }

    config.save(config_path)?;
    println!("Context \"{}\" deleted.", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_creates_then_updates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(set("fabrika", None, None, &path).is_err());

        set("fabrika", Some("http://localhost:5000/"), None, &path).unwrap();
        set("fabrika", None, Some(Locale::En), &path).unwrap();

        let config = ClientConfig::load(&path).unwrap();
        let ctx = config.current().unwrap();
        assert_eq!(ctx.server, "http://localhost:5000");
        assert_eq!(ctx.locale, Locale::En);
    }

    #[test]
    fn use_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        set("a", Some("http://a"), None, &path).unwrap();
        set("b", Some("http://b"), None, &path).unwrap();

        assert!(use_context("c", &path).is_err());
        use_context("b", &path).unwrap();
        assert_eq!(ClientConfig::load(&path).unwrap().current_context, "b");

        delete("b", &path).unwrap();
        assert!(delete("b", &path).is_err());
        let config = ClientConfig::load(&path).unwrap();
        assert!(config.current().is_none());
        assert_eq!(config.contexts.len(), 1);
    }
}
