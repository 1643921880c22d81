//! `palet pallet …`

use anyhow::Result;
use palet_core::{details_url, Editable, Listable, Message, Pallet, ViewContext};

use super::{apply_fields, cell, confirmer, deleted, print_json, saved, Target};

/// Listing filters, taken as raw text the same way the filter controls
/// deliver them: empty or unparseable values clear that filter.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive substring of the pallet name.
    #[arg(long)]
    pub search: Option<String>,
    /// Only pallets of this company id.
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long = "min-price")]
    pub min_price: Option<String>,
    #[arg(long = "max-price")]
    pub max_price: Option<String>,
}

impl FilterArgs {
    pub fn view(&self, target: &Target) -> ViewContext {
        let mut view = ViewContext::new(target.server.as_str());
        view.set_search(self.search.as_deref().unwrap_or_default());
        view.set_company(self.company.as_deref().unwrap_or_default());
        view.set_min_price(self.min_price.as_deref().unwrap_or_default());
        view.set_max_price(self.max_price.as_deref().unwrap_or_default());
        view
    }
}

pub async fn list(target: &Target, filters: &FilterArgs, sort: Option<&str>) -> Result<()> {
    let mut view = filters.view(target);
    if let Some(sort) = sort {
        view.set_sort(sort)?;
    }

    let editor = target.editor::<Pallet>()?;
    let pallets = editor
        .refresh(&view)
        .await
        .map_err(|e| target.fail(e, Message::Generic))?;

    if target.is_json() {
        return print_json(&pallets);
    }
    if pallets.is_empty() {
        println!("{}", target.text(Message::NoResults));
        return Ok(());
    }
    println!(
        "{:>6}  {:28}  {:>8}  {:>10}  {:>10}  {:>10}",
        "ID", "NAME", "COMPANY", "PRICE", "DESI", "TL/DESI"
    );
    for p in &pallets {
        println!(
            "{:>6}  {:28}  {:>8}  {:>10.2}  {:>10}  {:>10}",
            p.id.map(|i| i.to_string()).unwrap_or_default(),
            p.name,
            p.company_id,
            p.price,
            cell(p.volume()),
            cell(Listable::price_per_desi(p)),
        );
    }
    Ok(())
}

pub async fn get(target: &Target, id: i64) -> Result<()> {
    let client = target.client::<Pallet>()?;
    let pallet = client
        .get(id)
        .await
        .map_err(|e| target.fail(e, Message::NotFound))?;

    if target.is_json() {
        return print_json(&pallet);
    }
    println!("ID:          {}", id);
    println!("Name:        {}", pallet.name);
    println!("Company:     {}", pallet.company_id);
    println!("Price:       {:.2}", pallet.price);
    println!("Thickness:   {}", pallet.board_thickness);
    println!("Upper:       {}", pallet.upper_summary());
    println!("Lower:       {}", pallet.lower_summary());
    println!("Closure:     {}", pallet.closure_summary());
    println!("Block:       {}", pallet.block_summary());
    println!();
    println!("{}", pallet.desi().render(target.locale));
    if let Some(server) = pallet.total_volume {
        println!("Stored:     {:>10.2} desi", server);
    }
    Ok(())
}

pub async fn create(target: &Target, fields: &[String]) -> Result<()> {
    let editor = target.editor::<Pallet>()?;
    editor.open_create().await;
    apply_fields(&editor, fields).await?;

    if let Some(values) = editor.values().await {
        tracing::debug!(?values, "submitting new pallet");
    }
    let ack = editor
        .submit()
        .await
        .map_err(|e| target.fail(e, Pallet::save_failed()))?;
    saved(target, &ack);
    Ok(())
}

/// Re-fetch the pallet, apply `field=value` overrides, and save.
pub async fn update(target: &Target, id: i64, fields: &[String]) -> Result<()> {
    let editor = target.editor::<Pallet>()?;
    editor
        .open_edit(id)
        .await
        .map_err(|e| target.fail(e, Pallet::save_failed()))?;
    apply_fields(&editor, fields).await?;

    let ack = editor
        .submit()
        .await
        .map_err(|e| target.fail(e, Pallet::save_failed()))?;
    saved(target, &ack);
    Ok(())
}

pub async fn delete(target: &Target, id: i64, yes: bool) -> Result<()> {
    let editor = target.editor::<Pallet>()?;
    let confirm = confirmer(yes, target.locale);
    let outcome = editor
        .delete(id, confirm.as_ref())
        .await
        .map_err(|e| target.fail(e, Pallet::delete_failed()))?;
    deleted(target, &outcome);
    Ok(())
}

/// Print PDF/CSV export URLs carrying the given filters.
pub fn export_links(target: &Target, filters: &FilterArgs) -> Result<()> {
    let links = filters.view(target).export_links();
    if target.is_json() {
        return print_json(&serde_json::json!({ "pdf": links.pdf, "csv": links.csv }));
    }
    println!("PDF: {}", links.pdf);
    println!("CSV: {}", links.csv);
    Ok(())
}

pub fn view(target: &Target, id: i64) -> Result<()> {
    println!("{}", details_url(&target.server, id));
    Ok(())
}
