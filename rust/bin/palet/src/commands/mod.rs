pub mod company;
pub mod context;
pub mod desi;
pub mod pallet;
pub mod status;

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use palet_client::{Ack, ApiError, ClientOptions, Confirm, Deleted, EntityEditor, ResourceClient};
use palet_core::{Editable, Locale, Message};
use serde::Serialize;

use crate::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Output {
    Table,
    Json,
}

/// Backend and locale resolved from the current context and flags.
#[derive(Debug, Clone)]
pub struct Target {
    pub context: String,
    pub server: String,
    pub locale: Locale,
    pub output: Output,
}

impl Target {
    /// The `--locale` flag wins over the context's locale.
    pub fn resolve(config_path: &Path, locale: Option<Locale>, output: Output) -> Result<Self> {
        let config = ClientConfig::load(config_path)?;
        let ctx = config.current().ok_or_else(|| {
            anyhow::anyhow!("No current context. Run `palet context set <name> --server <url>`.")
        })?;
        if ctx.server.is_empty() {
            anyhow::bail!(
                "No server URL set for context \"{}\". Run `palet context set {} --server <url>`.",
                ctx.name,
                ctx.name
            );
        }
        Ok(Self {
            context: ctx.name.clone(),
            server: ctx.server.trim_end_matches('/').to_string(),
            locale: locale.unwrap_or(ctx.locale),
            output,
        })
    }

    pub fn client<T: Editable>(&self) -> Result<ResourceClient<T>> {
        Ok(ResourceClient::from_options(&ClientOptions::new(
            self.server.as_str(),
        ))?)
    }

    pub fn editor<T: Editable>(&self) -> Result<EntityEditor<T>> {
        Ok(EntityEditor::new(self.client()?).with_locale(self.locale))
    }

    pub fn text(&self, message: Message) -> &'static str {
        message.text(self.locale)
    }

    /// Turn a client error into what the user should read.
    pub fn fail(&self, err: ApiError, fallback: Message) -> anyhow::Error {
        tracing::debug!(error = %err, "request failed");
        anyhow::anyhow!(err.user_message(self.locale, fallback))
    }

    pub fn is_json(&self) -> bool {
        self.output == Output::Json
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Asks on stderr and reads the answer from stdin.
pub struct StdinConfirm {
    locale: Locale,
}

impl StdinConfirm {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let hint = match self.locale {
            Locale::Tr => "[e/H]",
            Locale::En => "[y/N]",
        };
        eprint!("{} {}: ", prompt, hint);
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "e" | "evet" | "y" | "yes"
    )
}

/// Prompting confirmer, or one that always agrees when `-y` was given.
pub fn confirmer(yes: bool, locale: Locale) -> Box<dyn Confirm> {
    if yes {
        Box::new(|_: &str| true)
    } else {
        Box::new(StdinConfirm::new(locale))
    }
}

/// Apply `key=value` pairs to the open form.
pub async fn apply_fields<T: Editable>(editor: &EntityEditor<T>, pairs: &[String]) -> Result<()> {
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected field=value, got \"{}\"", pair))?;
        editor.set_field(key.trim(), value).await?;
    }
    Ok(())
}

/// Print the outcome of a save.
pub fn saved(target: &Target, ack: &Ack) {
    match &ack.message {
        Some(m) if !m.is_empty() => println!("{}", m),
        _ => println!("{}", target.text(Message::Saved)),
    }
}

/// Print the outcome of a delete.
pub fn deleted(target: &Target, outcome: &Deleted) {
    match outcome {
        Deleted::Cancelled => println!("{}", target.text(Message::Cancelled)),
        Deleted::Removed(ack) => match &ack.message {
            Some(m) if !m.is_empty() => println!("{}", m),
            _ => println!("{}", target.text(Message::Deleted)),
        },
    }
}

/// Table cell for an optional number.
pub fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        for a in ["e", "E\n", "evet", "y", "YES "] {
            assert!(is_yes(a), "{:?}", a);
        }
        for a in ["", "\n", "h", "hayır", "n", "no"] {
            assert!(!is_yes(a), "{:?}", a);
        }
    }

    #[test]
    fn resolve_requires_server() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(Target::resolve(&path, None, Output::Table).is_err());

        let mut config = ClientConfig::default();
        config.upsert_context(crate::config::Context {
            name: "yerel".into(),
            server: "http://localhost:5000/".into(),
            locale: Locale::En,
        });
        config.save(&path).unwrap();

        let target = Target::resolve(&path, None, Output::Json).unwrap();
        assert_eq!(target.server, "http://localhost:5000");
        assert_eq!(target.locale, Locale::En);
        assert!(target.is_json());

        let target = Target::resolve(&path, Some(Locale::Tr), Output::Table).unwrap();
        assert_eq!(target.locale, Locale::Tr);
    }

    #[test]
    fn empty_cells() {
        assert_eq!(cell(None), "-");
        assert_eq!(cell(Some(2.5)), "2.50");
    }
}
