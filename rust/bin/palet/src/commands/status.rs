//! `palet status`: probe the current context's backend.

use anyhow::Result;
use palet_core::{Company, Message};

use super::Target;

pub async fn run(target: &Target) -> Result<()> {
    println!("Context:   {}", target.context);
    println!("Server:    {}", target.server);
    println!("Locale:    {}", target.locale);

    let client = target.client::<Company>()?;
    match client.list().await {
        Ok(companies) => println!("Status:    connected ({} companies)", companies.len()),
        Err(e) => println!(
            "Status:    disconnected ({})",
            e.user_message(target.locale, Message::Generic)
        ),
    }
    Ok(())
}
