//! `palet company …`

use anyhow::Result;
use palet_core::{Company, Editable, Message, ViewContext};

use super::{confirmer, deleted, print_json, saved, Target};

pub async fn list(target: &Target, search: Option<&str>, sort: Option<&str>) -> Result<()> {
    let mut view = ViewContext::new(target.server.as_str());
    view.set_search(search.unwrap_or_default());
    if let Some(sort) = sort {
        view.set_sort(sort)?;
    }

    let editor = target.editor::<Company>()?;
    let companies = editor
        .refresh(&view)
        .await
        .map_err(|e| target.fail(e, Message::Generic))?;

    if target.is_json() {
        return print_json(&companies);
    }
    if companies.is_empty() {
        println!("{}", target.text(Message::NoResults));
        return Ok(());
    }
    println!("{:>6}  {:30}  {}", "ID", "NAME", "E-MAIL");
    for c in &companies {
        let id = c.id.map(|i| i.to_string()).unwrap_or_default();
        println!("{:>6}  {:30}  {}", id, c.name, c.contact_email);
    }
    Ok(())
}

pub async fn get(target: &Target, id: i64) -> Result<()> {
    let client = target.client::<Company>()?;
    let company = client
        .get(id)
        .await
        .map_err(|e| target.fail(e, Message::NotFound))?;

    if target.is_json() {
        return print_json(&company);
    }
    println!("ID:      {}", id);
    println!("Name:    {}", company.name);
    println!("E-mail:  {}", company.contact_email);
    Ok(())
}

pub async fn create(target: &Target, name: &str, email: &str) -> Result<()> {
    let editor = target.editor::<Company>()?;
    editor.open_create().await;
    editor.set_field("name", name).await?;
    editor.set_field("contact_email", email).await?;

    let ack = editor
        .submit()
        .await
        .map_err(|e| target.fail(e, Company::save_failed()))?;
    saved(target, &ack);
    Ok(())
}

/// Re-fetch the company, apply the given changes, and save.
pub async fn update(
    target: &Target,
    id: i64,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    let editor = target.editor::<Company>()?;
    editor
        .open_edit(id)
        .await
        .map_err(|e| target.fail(e, Company::save_failed()))?;

    if let Some(name) = name {
        editor.set_field("name", name).await?;
    }
    if let Some(email) = email {
        editor.set_field("contact_email", email).await?;
    }

    let ack = editor
        .submit()
        .await
        .map_err(|e| target.fail(e, Company::save_failed()))?;
    saved(target, &ack);
    Ok(())
}

pub async fn delete(target: &Target, id: i64, yes: bool) -> Result<()> {
    let editor = target.editor::<Company>()?;
    let confirm = confirmer(yes, target.locale);
    let outcome = editor
        .delete(id, confirm.as_ref())
        .await
        .map_err(|e| target.fail(e, Company::delete_failed()))?;
    deleted(target, &outcome);
    Ok(())
}
